//! Actor wrapping the session store behind a message channel.

pub mod companion;
pub mod messages;

pub use companion::CompanionHandle;
