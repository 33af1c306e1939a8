// Symbiot Core
// Rule-based mood and intent analysis with templated replies for a learning companion.

pub mod actors;
pub mod brain;
pub mod config;
pub mod error;
pub mod logging;
pub mod rate_limiter;
pub mod session;

#[cfg(test)]
mod tests;

pub use actors::CompanionHandle;
pub use config::CompanionConfig;
pub use error::AppError;
pub use session::{SessionStart, SessionStore, TurnReport};
