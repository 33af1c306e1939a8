use tokio::sync::oneshot;

use crate::brain::ConversationMemory;
use crate::session::{SessionStart, TurnReport};

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Channel on which the companion actor answers a request.
pub type Responder<T> = oneshot::Sender<Result<T, AppError>>;

/// Messages that can be sent to the `CompanionActor`.
#[derive(Debug)]
pub enum CompanionMessage {
    /// Open a session for a user studying `course`, under `session_id` when
    /// given, else under a fresh UUID.
    StartSession {
        session_id: Option<String>,
        course: Option<String>,
        /// Receives the session id and opening line.
        responder: Responder<SessionStart>,
    },
    /// Run one conversational turn.
    Respond {
        session_id: String,
        text: String,
        responder: Responder<TurnReport>,
    },
    /// Change the course a session is tailored to.
    SetCourse {
        session_id: String,
        course: Option<String>,
        responder: Responder<()>,
    },
    /// Read a snapshot of a session's memory.
    GetMemory {
        session_id: String,
        responder: Responder<ConversationMemory>,
    },
    /// Close a session and discard its memory.
    EndSession {
        session_id: String,
        responder: Responder<()>,
    },
    /// A command to stop the actor.
    Shutdown,
}
