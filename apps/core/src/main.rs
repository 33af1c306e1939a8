// Symbiot CLI Entry Point
// Talks to the companion actor over stdin/stdout, one line per turn.

use anyhow::{Context, Result};
use dotenv::dotenv;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use symbiot_core::config::CompanionConfig;
use symbiot_core::logging::init_tracing;
use symbiot_core::{AppError, CompanionHandle};

/// Set to `json` to print full turn reports instead of bare replies.
const ENV_OUTPUT: &str = "SYMBIOT_OUTPUT";

enum Line<'a> {
    Quit,
    Memory,
    Course(Option<&'a str>),
    Say(&'a str),
}

fn parse_line(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    match trimmed {
        "/quit" => Line::Quit,
        "/memory" => Line::Memory,
        "/course" => Line::Course(None),
        _ => match trimmed.strip_prefix("/course ") {
            Some(course) => Line::Course(Some(course.trim())),
            None => Line::Say(line),
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = CompanionConfig::from_env().context("Invalid configuration")?;
    init_tracing(config.log_format)?;

    let json_output = std::env::var(ENV_OUTPUT)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let companion = CompanionHandle::new(&config);
    let start = companion.start_session(None).await?;
    let session_id = start.session_id;
    info!(session_id = %session_id, "Symbiot ready");

    let mut stdout = io::stdout();
    stdout.write_all(start.greeting.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    let mut lines = BufReader::new(io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let output = match parse_line(&line) {
            Line::Quit => break,
            Line::Memory => {
                let memory = companion.memory(session_id.clone()).await?;
                serde_json::to_string_pretty(&memory)?
            }
            Line::Course(course) => {
                companion
                    .set_course(session_id.clone(), course.map(str::to_string))
                    .await?;
                match course {
                    Some(course) => format!("Course set to {}.", course),
                    None => "Course cleared.".to_string(),
                }
            }
            Line::Say(text) => match companion.respond(session_id.clone(), text.to_string()).await {
                Ok(report) if json_output => serde_json::to_string(&report)?,
                Ok(report) => report.reply,
                Err(e @ (AppError::RateLimited | AppError::Validation(_))) => {
                    warn!("Turn rejected: {}", e);
                    format!("[{}]", e)
                }
                Err(e) => return Err(e.into()),
            },
        };

        stdout.write_all(output.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    companion.end_session(session_id).await?;
    companion.shutdown().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert!(matches!(parse_line("/quit"), Line::Quit));
        assert!(matches!(parse_line("  /memory "), Line::Memory));
        assert!(matches!(parse_line("/course"), Line::Course(None)));
        assert!(matches!(parse_line("/course  Physics "), Line::Course(Some("Physics"))));
        assert!(matches!(parse_line("What is /quit?"), Line::Say(_)));
        assert!(matches!(parse_line("/courses"), Line::Say(_)));
    }
}
