// yt-dlp wrapper: resolves a direct media URL without downloading the video

use std::time::Duration;
use tokio::process::Command;

use crate::utils::{run_tool, ToolError};

#[derive(Debug, Clone)]
pub struct YtDlpClient {
    bin: String,
    timeout: Duration,
}

impl YtDlpClient {
    pub fn new(bin: impl Into<String>, timeout: Duration) -> Self {
        Self {
            bin: bin.into(),
            timeout,
        }
    }

    /// Resolve a playable stream URL, capped at 720p.
    pub async fn resolve_stream_url(&self, video_url: &str) -> Result<String, ToolError> {
        tracing::info!("Resolving stream URL with yt-dlp: {}", video_url);

        let mut command = Command::new(&self.bin);
        command
            .arg("-f")
            .arg("best[height<=720]")
            .arg("-g")
            .arg("--no-playlist")
            .arg(video_url);

        let stdout = run_tool(&self.bin, command, self.timeout).await?;

        stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ToolError::EmptyOutput(self.bin.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_a_tool_error() {
        let client = YtDlpClient::new("yt-dlp-does-not-exist-here", Duration::from_secs(5));
        let result = client
            .resolve_stream_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .await;
        assert!(matches!(result, Err(ToolError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_first_stdout_line_is_the_stream_url() {
        // `echo` prints its arguments, which stands in for the resolved URL
        let client = YtDlpClient::new("echo", Duration::from_secs(5));
        let url = client.resolve_stream_url("https://example.com/v").await.unwrap();
        assert!(url.ends_with("https://example.com/v"));
    }
}
