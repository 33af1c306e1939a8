//! Conversation sessions.
//!
//! A [`SessionStore`] keeps one [`ConversationMemory`] per live session and
//! runs complete turns: analyze, reply, then advance the memory. Sessions
//! are held in an LRU cache; evicting a session discards its memory.

use chrono::{DateTime, Utc};
use lru::LruCache;
use serde::Serialize;
use std::num::NonZeroUsize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::brain::{
    analyze_input, analyze_text_mood, ConversationMemory, InputAnalysis, MoodAnalysis,
    RandomSelector, ResponseGenerator, Selector, TurnRecord,
};
use crate::config::CompanionConfig;
use crate::error::AppError;
use crate::rate_limiter::RateLimiter;

/// One live conversation
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    /// The user's declared field of study
    pub course: Option<String>,
    pub memory: ConversationMemory,
    pub created_at: DateTime<Utc>,
    /// Completed turns
    pub turns: u64,
}

/// A freshly opened session and the companion's opening line
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStart {
    pub session_id: String,
    pub greeting: String,
}

/// Outcome of one conversational turn
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnReport {
    pub session_id: String,
    /// 1-based turn number within the session
    pub turn: u64,
    pub reply: String,
    pub analysis: InputAnalysis,
    pub mood: MoodAnalysis,
    pub course: Option<String>,
    pub timestamp: DateTime<Utc>,
}

pub struct SessionStore<S: Selector> {
    sessions: LruCache<String, Session>,
    limiter: RateLimiter,
    generator: ResponseGenerator<S>,
    default_course: Option<String>,
    max_input_chars: usize,
}

impl SessionStore<RandomSelector> {
    pub fn new(config: &CompanionConfig) -> Self {
        Self::with_selector(config, RandomSelector)
    }
}

impl<S: Selector> SessionStore<S> {
    /// Store whose replies pick templates through `selector`.
    pub fn with_selector(config: &CompanionConfig, selector: S) -> Self {
        let capacity = NonZeroUsize::new(config.max_sessions).unwrap_or(NonZeroUsize::MIN);
        Self {
            sessions: LruCache::new(capacity),
            limiter: RateLimiter::new(config.rate_limit, config.rate_window()),
            generator: ResponseGenerator::new(selector),
            default_course: normalize_course(config.default_course.clone()),
            max_input_chars: config.max_input_chars,
        }
    }

    /// Open a session under a fresh v4 UUID. Falls back to the configured
    /// default course when `course` is blank or absent.
    pub fn start_session(&mut self, course: Option<String>) -> SessionStart {
        self.open(Uuid::new_v4().to_string(), course)
    }

    /// Open a session under a caller-chosen id, e.g. a user id.
    ///
    /// Fails with `AppError::Validation` when the id is blank or already
    /// names a live session.
    pub fn start_session_with_id(
        &mut self,
        session_id: String,
        course: Option<String>,
    ) -> Result<SessionStart, AppError> {
        let session_id = session_id.trim().to_string();
        if session_id.is_empty() {
            return Err(AppError::Validation("Session id must not be blank".to_string()));
        }
        if self.sessions.contains(&session_id) {
            return Err(AppError::Validation(format!(
                "Session {} is already open",
                session_id
            )));
        }
        Ok(self.open(session_id, course))
    }

    fn open(&mut self, id: String, course: Option<String>) -> SessionStart {
        let course = normalize_course(course).or_else(|| self.default_course.clone());

        let session = Session {
            id: id.clone(),
            course,
            memory: ConversationMemory::new(),
            created_at: Utc::now(),
            turns: 0,
        };

        if let Some((evicted, _)) = self.sessions.push(id.clone(), session) {
            info!(session_id = %evicted, "Session evicted (capacity reached)");
            self.limiter.forget(&evicted);
        }

        info!(session_id = %id, "Session started");
        SessionStart {
            session_id: id,
            greeting: self.generator.opening(),
        }
    }

    /// Close a session, discarding its memory.
    pub fn end_session(&mut self, session_id: &str) -> Result<(), AppError> {
        self.sessions
            .pop(session_id)
            .ok_or_else(|| AppError::SessionNotFound(session_id.to_string()))?;
        self.limiter.forget(session_id);
        info!(session_id, "Session ended");
        Ok(())
    }

    pub fn set_course(&mut self, session_id: &str, course: Option<String>) -> Result<(), AppError> {
        let session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| AppError::SessionNotFound(session_id.to_string()))?;
        session.course = normalize_course(course);
        debug!(session_id, course = ?session.course, "Course updated");
        Ok(())
    }

    /// Snapshot of a session's memory.
    pub fn memory(&self, session_id: &str) -> Result<ConversationMemory, AppError> {
        self.sessions
            .peek(session_id)
            .map(|session| session.memory.clone())
            .ok_or_else(|| AppError::SessionNotFound(session_id.to_string()))
    }

    pub fn session(&self, session_id: &str) -> Option<&Session> {
        self.sessions.peek(session_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Run one turn of a session.
    ///
    /// The reply is generated from the memory of the previous turns; the
    /// memory is advanced with this turn only after the reply exists.
    pub fn respond(&mut self, session_id: &str, text: &str) -> Result<TurnReport, AppError> {
        let session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| AppError::SessionNotFound(session_id.to_string()))?;

        let length = text.chars().count();
        if length > self.max_input_chars {
            return Err(AppError::Validation(format!(
                "Input is {} characters long, the limit is {}",
                length, self.max_input_chars
            )));
        }

        if !self.limiter.check(session_id) {
            warn!(session_id, "Turn rejected by rate limiter");
            return Err(AppError::RateLimited);
        }

        let analysis = analyze_input(text);
        let mood = analyze_text_mood(text);
        let reply = self
            .generator
            .generate(&analysis, &session.memory, session.course.as_deref());

        session.memory = session.memory.advance(&TurnRecord {
            input: text,
            analysis: &analysis,
            mood: mood.mood,
            response: &reply,
        });
        session.turns += 1;

        info!(
            session_id,
            turn = session.turns,
            mood = %mood.mood,
            repetitive = session.memory.repetitive_input_count,
            "Turn completed"
        );

        Ok(TurnReport {
            session_id: session.id.clone(),
            turn: session.turns,
            reply,
            analysis,
            mood,
            course: session.course.clone(),
            timestamp: Utc::now(),
        })
    }
}

fn normalize_course(course: Option<String>) -> Option<String> {
    course
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}
