// utils.rs - helpers shared by the services: external tools, timestamps, text
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to start {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{tool} timed out after {seconds}s")]
    Timeout { tool: String, seconds: u64 },
    #[error("{tool} exited with {status}: {stderr}")]
    Failed {
        tool: String,
        status: String,
        stderr: String,
    },
    #[error("{0} produced no output")]
    EmptyOutput(String),
}

/// Run an external tool to completion within `timeout`, returning stdout.
/// The child is killed if the deadline passes.
pub async fn run_tool(tool: &str, mut command: Command, timeout: Duration) -> Result<String, ToolError> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    tracing::debug!("Executing {}: {:?}", tool, command);

    let output = match tokio::time::timeout(timeout, command.output()).await {
        Ok(result) => result.map_err(|source| ToolError::Spawn {
            tool: tool.to_string(),
            source,
        })?,
        Err(_) => {
            return Err(ToolError::Timeout {
                tool: tool.to_string(),
                seconds: timeout.as_secs(),
            })
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ToolError::Failed {
            tool: tool.to_string(),
            status: output.status.to_string(),
            stderr: truncate_chars(stderr.trim(), 500).to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Convert `MM:SS` or `HH:MM:SS` into seconds. Any other shape is 0, as is
/// any component that is not an integer and any total that overflows.
/// Negative values pass through.
pub fn parse_timestamp(timestamp: &str) -> i64 {
    let parts: Vec<i64> = timestamp
        .split(':')
        .map(|part| part.trim().parse::<i64>().unwrap_or(0))
        .collect();

    let total = match parts.as_slice() {
        [minutes, seconds] => minutes.checked_mul(60).and_then(|m| m.checked_add(*seconds)),
        [hours, minutes, seconds] => hours
            .checked_mul(3600)
            .zip(minutes.checked_mul(60))
            .and_then(|(h, m)| h.checked_add(m))
            .and_then(|hm| hm.checked_add(*seconds)),
        _ => None,
    };
    total.unwrap_or(0)
}

/// First `max_chars` characters of `text` (characters, not bytes).
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
