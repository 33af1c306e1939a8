//! Companion configuration, read from the environment.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use validator::Validate;

use crate::error::AppError;

pub const ENV_DEFAULT_COURSE: &str = "SYMBIOT_DEFAULT_COURSE";
pub const ENV_MAX_SESSIONS: &str = "SYMBIOT_MAX_SESSIONS";
pub const ENV_RATE_LIMIT: &str = "SYMBIOT_RATE_LIMIT";
pub const ENV_RATE_WINDOW_SECS: &str = "SYMBIOT_RATE_WINDOW_SECS";
pub const ENV_MAX_INPUT_CHARS: &str = "SYMBIOT_MAX_INPUT_CHARS";
pub const ENV_LOG_FORMAT: &str = "SYMBIOT_LOG_FORMAT";

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Runtime settings of the companion service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompanionConfig {
    /// Course used for new sessions when none is given.
    #[validate(length(min = 1))]
    pub default_course: Option<String>,
    /// Live sessions kept before the least recently used one is dropped.
    #[validate(range(min = 1, max = 100000))]
    pub max_sessions: usize,
    /// Turns allowed per session within `rate_window_secs`.
    #[validate(range(min = 1, max = 10000))]
    pub rate_limit: usize,
    #[validate(range(min = 1, max = 3600))]
    pub rate_window_secs: u64,
    /// Longest accepted utterance, in characters.
    #[validate(range(min = 1, max = 100000))]
    pub max_input_chars: usize,
    pub log_format: LogFormat,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            default_course: None,
            max_sessions: 1_000,
            rate_limit: 30,
            rate_window_secs: 60,
            max_input_chars: 4_000,
            log_format: LogFormat::Pretty,
        }
    }
}

impl CompanionConfig {
    /// Build the configuration from `SYMBIOT_*` environment variables,
    /// falling back to defaults for unset ones.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let default_course = env::var(ENV_DEFAULT_COURSE)
            .ok()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let config = Self {
            default_course,
            max_sessions: env_or(ENV_MAX_SESSIONS, defaults.max_sessions)?,
            rate_limit: env_or(ENV_RATE_LIMIT, defaults.rate_limit)?,
            rate_window_secs: env_or(ENV_RATE_WINDOW_SECS, defaults.rate_window_secs)?,
            max_input_chars: env_or(ENV_MAX_INPUT_CHARS, defaults.max_input_chars)?,
            log_format: env_or(ENV_LOG_FORMAT, defaults.log_format)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn rate_window(&self) -> Duration {
        Duration::from_secs(self.rate_window_secs)
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{}: {}", key, e))),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: [&str; 6] = [
        ENV_DEFAULT_COURSE,
        ENV_MAX_SESSIONS,
        ENV_RATE_LIMIT,
        ENV_RATE_WINDOW_SECS,
        ENV_MAX_INPUT_CHARS,
        ENV_LOG_FORMAT,
    ];

    fn unset_all() -> Vec<(&'static str, Option<&'static str>)> {
        ALL_VARS.iter().map(|k| (*k, None)).collect()
    }

    #[test]
    fn test_defaults_when_unset() {
        temp_env::with_vars(unset_all(), || {
            let config = CompanionConfig::from_env().unwrap();
            assert_eq!(config.default_course, None);
            assert_eq!(config.max_sessions, 1_000);
            assert_eq!(config.rate_window(), Duration::from_secs(60));
            assert_eq!(config.log_format, LogFormat::Pretty);
        });
    }

    #[test]
    fn test_reads_environment() {
        temp_env::with_vars(
            [
                (ENV_DEFAULT_COURSE, Some(" Physics ")),
                (ENV_MAX_SESSIONS, Some("10")),
                (ENV_RATE_LIMIT, Some("5")),
                (ENV_RATE_WINDOW_SECS, Some("2")),
                (ENV_MAX_INPUT_CHARS, Some("200")),
                (ENV_LOG_FORMAT, Some("JSON")),
            ],
            || {
                let config = CompanionConfig::from_env().unwrap();
                assert_eq!(config.default_course.as_deref(), Some("Physics"));
                assert_eq!(config.max_sessions, 10);
                assert_eq!(config.rate_limit, 5);
                assert_eq!(config.rate_window_secs, 2);
                assert_eq!(config.max_input_chars, 200);
                assert_eq!(config.log_format, LogFormat::Json);
            },
        );
    }

    #[test]
    fn test_blank_course_is_none() {
        temp_env::with_var(ENV_DEFAULT_COURSE, Some("   "), || {
            let config = CompanionConfig::from_env().unwrap();
            assert_eq!(config.default_course, None);
        });
    }

    #[test]
    fn test_malformed_number() {
        temp_env::with_var(ENV_MAX_SESSIONS, Some("lots"), || {
            let err = CompanionConfig::from_env().unwrap_err();
            assert!(matches!(err, AppError::Config(ref msg) if msg.contains(ENV_MAX_SESSIONS)));
        });
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        temp_env::with_var(ENV_RATE_LIMIT, Some("0"), || {
            assert!(matches!(
                CompanionConfig::from_env(),
                Err(AppError::Config(_))
            ));
        });
    }

    #[test]
    fn test_unknown_log_format() {
        temp_env::with_var(ENV_LOG_FORMAT, Some("xml"), || {
            assert!(CompanionConfig::from_env().is_err());
        });
    }
}
