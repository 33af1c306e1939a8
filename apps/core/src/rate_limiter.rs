use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

/// Sliding-window limit on conversation turns, tracked per session id.
pub struct RateLimiter {
    /// Turn timestamps per session, oldest first.
    turns: HashMap<String, VecDeque<Instant>>,
    /// The maximum number of turns allowed within the `window`.
    limit: usize,
    window: Duration,
}

impl RateLimiter {
    /// Creates a new `RateLimiter`.
    ///
    /// # Arguments
    ///
    /// * `limit` - The number of turns allowed per `window`.
    /// * `window` - The time duration of the sliding window.
    pub fn new(limit: usize, window: Duration) -> Self {
        RateLimiter {
            turns: HashMap::new(),
            limit,
            window,
        }
    }

    /// Records a turn for `session_id` if it is within the limit.
    ///
    /// Returns `false` (and records nothing) when the session already used
    /// its allowance for the current window.
    pub fn check(&mut self, session_id: &str) -> bool {
        self.check_at(session_id, Instant::now())
    }

    fn check_at(&mut self, session_id: &str, now: Instant) -> bool {
        let window = self.window;
        let turns = self.turns.entry(session_id.to_string()).or_default();

        while let Some(&oldest) = turns.front() {
            if now.duration_since(oldest) >= window {
                turns.pop_front();
            } else {
                break;
            }
        }

        if turns.len() < self.limit {
            turns.push_back(now);
            true
        } else {
            false
        }
    }

    /// Drops the history of an ended session.
    pub fn forget(&mut self, session_id: &str) {
        self.turns.remove(session_id);
    }

    #[cfg(test)]
    fn tracked_sessions(&self) -> usize {
        self.turns.len()
    }
}
