use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout, Duration};
use tracing::{info, instrument};

use crate::actors::messages::{AppError, CompanionMessage, Responder};
use crate::brain::{ConversationMemory, Selector};
use crate::config::CompanionConfig;
use crate::session::{SessionStart, SessionStore, TurnReport};

/// Upper bound on how long a caller waits for the actor to answer.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// A handle to the `CompanionActor`.
///
/// The actor owns every session; requests are processed one at a time, so a
/// session's memory is only ever touched by one turn at once.
#[derive(Clone)]
pub struct CompanionHandle {
    sender: mpsc::Sender<CompanionMessage>,
}

impl CompanionHandle {
    /// Spawns a companion with uniformly random template selection.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &CompanionConfig) -> Self {
        Self::with_store(SessionStore::new(config))
    }

    /// Spawns a companion around an existing session store.
    pub fn with_store<S>(store: SessionStore<S>) -> Self
    where
        S: Selector + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel(32);
        let runner = CompanionRunner { receiver, store };
        tokio::spawn(async move { runner.run().await });
        Self { sender }
    }

    /// Opens a session under a fresh id and returns it with the opening line.
    #[instrument(skip(self))]
    pub async fn start_session(&self, course: Option<String>) -> Result<SessionStart, AppError> {
        self.request(|responder| CompanionMessage::StartSession {
            session_id: None,
            course,
            responder,
        })
        .await
    }

    /// Opens a session under a caller-chosen id.
    #[instrument(skip(self))]
    pub async fn start_session_with_id(
        &self,
        session_id: String,
        course: Option<String>,
    ) -> Result<SessionStart, AppError> {
        self.request(|responder| CompanionMessage::StartSession {
            session_id: Some(session_id),
            course,
            responder,
        })
        .await
    }

    /// Runs one turn: analyzes `text`, replies, and updates the session memory.
    #[instrument(skip(self, text))]
    pub async fn respond(&self, session_id: String, text: String) -> Result<TurnReport, AppError> {
        self.request(|responder| CompanionMessage::Respond {
            session_id,
            text,
            responder,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn set_course(
        &self,
        session_id: String,
        course: Option<String>,
    ) -> Result<(), AppError> {
        self.request(|responder| CompanionMessage::SetCourse {
            session_id,
            course,
            responder,
        })
        .await
    }

    pub async fn memory(&self, session_id: String) -> Result<ConversationMemory, AppError> {
        self.request(|responder| CompanionMessage::GetMemory {
            session_id,
            responder,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn end_session(&self, session_id: String) -> Result<(), AppError> {
        self.request(|responder| CompanionMessage::EndSession {
            session_id,
            responder,
        })
        .await
    }

    /// Stops the actor. Later requests fail with `AppError::Internal`.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.sender
            .send(CompanionMessage::Shutdown)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Responder<T>) -> CompanionMessage,
    ) -> Result<T, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(build(send))
            .await
            .map_err(|e| AppError::Internal(format!("Companion unavailable: {}", e)))?;
        timeout(REQUEST_TIMEOUT, recv)
            .await?
            .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

// --- Actor Runner ---
struct CompanionRunner<S: Selector> {
    receiver: mpsc::Receiver<CompanionMessage>,
    store: SessionStore<S>,
}

impl<S: Selector> CompanionRunner<S> {
    async fn run(mut self) {
        info!("Companion actor started");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CompanionMessage::StartSession {
                    session_id,
                    course,
                    responder,
                } => {
                    let started = match session_id {
                        Some(id) => self.store.start_session_with_id(id, course),
                        None => Ok(self.store.start_session(course)),
                    };
                    let _ = responder.send(started);
                }
                CompanionMessage::Respond {
                    session_id,
                    text,
                    responder,
                } => {
                    let _ = responder.send(self.store.respond(&session_id, &text));
                }
                CompanionMessage::SetCourse {
                    session_id,
                    course,
                    responder,
                } => {
                    let _ = responder.send(self.store.set_course(&session_id, course));
                }
                CompanionMessage::GetMemory {
                    session_id,
                    responder,
                } => {
                    let _ = responder.send(self.store.memory(&session_id));
                }
                CompanionMessage::EndSession {
                    session_id,
                    responder,
                } => {
                    let _ = responder.send(self.store.end_session(&session_id));
                }
                CompanionMessage::Shutdown => {
                    info!("Companion actor shutting down");
                    break;
                }
            }
        }
        info!("Companion actor stopped");
    }
}
