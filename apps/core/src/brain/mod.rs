//! # Brain Module
//!
//! Rule-based analysis and reply generation for the Symbiot companion.
//! No model required: every decision comes from fixed regex tables and
//! fixed reply templates.
//!
//! ## Components
//! - `input`: question type, topic, sentiment and command detection
//! - `mood`: mood detection with learning-style profiles
//! - `response`: reply generation from both analyses and conversation memory
//! - `memory`: rolling conversation memory
//! - `select`: injectable template selection
//! - `patterns`: shared regex table machinery

pub mod input;
pub mod memory;
pub mod mood;
mod patterns;
pub mod response;
pub mod select;

pub use input::{analyze_input, Command, InputAnalysis, QuestionType, Sentiment, Topic};
pub use memory::{ConversationMemory, TurnRecord};
pub use mood::{analyze_text_mood, LearningProfile, Mood, MoodAnalysis};
pub use response::{generate_response, generate_response_with, opening_greeting, ResponseGenerator};
pub use select::{FixedSelector, RandomSelector, Selector, TemplateList};
