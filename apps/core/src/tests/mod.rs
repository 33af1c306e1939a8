//! Test Module
//!
//! Cross-module test suite for the Symbiot core.
//!
//! ## Test Categories
//! - `brain_tests`: full analyze-then-reply pipeline, template hygiene, course tailoring
//! - `companion_tests`: session store and companion actor behavior
