// src/services/frame_extraction.rs
//
// Still-frame extraction: yt-dlp resolves a stream URL, ffmpeg grabs one
// frame. When the toolchain fails the video's thumbnail is returned instead.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

use crate::config::FrameSettings;
use crate::data_uri::DataUri;
use crate::error::{ApiError, ApiResult};
use crate::models::frame::{FrameExtraction, FrameRequest};
use crate::models::youtube::{thumbnail_url, watch_url};
use crate::utils::{parse_timestamp, run_tool, ToolError};
use crate::youtube::YtDlpClient;

pub const THUMBNAIL_NOTE: &str = "Using thumbnail - frame extraction requires yt-dlp and ffmpeg";

#[derive(Debug, Error)]
pub enum FrameError {
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error("frame file missing after extraction: {0}")]
    MissingOutput(PathBuf),
    #[error("frame extraction I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FrameError {
    /// Tool failures are expected on hosts without yt-dlp/ffmpeg or for
    /// unavailable videos; everything else is a genuine fault.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FrameError::Tool(_))
    }
}

/// Something that can turn (video, offset) into a frame.
#[async_trait]
pub trait FrameSource: Send + Sync {
    async fn produce(&self, video_id: &str, offset_seconds: i64) -> Result<FrameExtraction, FrameError>;
}

/// yt-dlp + ffmpeg inside a per-request temp directory.
pub struct ToolchainFrameSource {
    ytdlp: YtDlpClient,
    settings: FrameSettings,
}

impl ToolchainFrameSource {
    pub fn new(settings: FrameSettings) -> Self {
        Self {
            ytdlp: YtDlpClient::new(settings.ytdlp_bin.clone(), settings.ytdlp_timeout),
            settings,
        }
    }
}

#[async_trait]
impl FrameSource for ToolchainFrameSource {
    async fn produce(&self, video_id: &str, offset_seconds: i64) -> Result<FrameExtraction, FrameError> {
        // Removed on drop, whichever way this function returns
        let workdir = tempfile::Builder::new()
            .prefix(&format!("frame-{}-", chrono::Utc::now().timestamp_millis()))
            .tempdir_in(&self.settings.temp_dir)?;
        let frame_path = workdir.path().join("frame.jpg");

        let stream_url = self.ytdlp.resolve_stream_url(&watch_url(video_id)).await?;

        let mut command = Command::new(&self.settings.ffmpeg_bin);
        command
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-ss")
            .arg(offset_seconds.to_string())
            .arg("-i")
            .arg(&stream_url)
            .arg("-frames:v")
            .arg("1")
            .arg("-q:v")
            .arg("2")
            .arg("-y")
            .arg(&frame_path);

        run_tool(&self.settings.ffmpeg_bin, command, self.settings.ffmpeg_timeout).await?;

        let bytes = match tokio::fs::read(&frame_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FrameError::MissingOutput(frame_path))
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            video_id = %video_id,
            offset_seconds,
            bytes = bytes.len(),
            "extracted frame"
        );

        Ok(FrameExtraction::extracted(DataUri::new("image/jpeg", bytes).encode()))
    }
}

/// Static thumbnail URL; never fails.
pub struct ThumbnailFrameSource;

#[async_trait]
impl FrameSource for ThumbnailFrameSource {
    async fn produce(&self, video_id: &str, _offset_seconds: i64) -> Result<FrameExtraction, FrameError> {
        Ok(FrameExtraction::fallback(thumbnail_url(video_id), THUMBNAIL_NOTE))
    }
}

/// Try `primary`; on a recoverable failure ask `fallback`.
pub struct WithFallback<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> WithFallback<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<P: FrameSource, F: FrameSource> FrameSource for WithFallback<P, F> {
    async fn produce(&self, video_id: &str, offset_seconds: i64) -> Result<FrameExtraction, FrameError> {
        match self.primary.produce(video_id, offset_seconds).await {
            Ok(frame) => Ok(frame),
            Err(e) if e.is_recoverable() => {
                tracing::warn!("Frame extraction failed for {}, using fallback: {}", video_id, e);
                self.fallback.produce(video_id, offset_seconds).await
            }
            Err(e) => Err(e),
        }
    }
}

pub struct FrameExtractionService {
    source: Arc<dyn FrameSource>,
}

impl FrameExtractionService {
    pub fn new(source: Arc<dyn FrameSource>) -> Self {
        Self { source }
    }

    /// The production chain: toolchain first, thumbnail second.
    pub fn with_toolchain(settings: FrameSettings) -> Self {
        Self::new(Arc::new(WithFallback::new(
            ToolchainFrameSource::new(settings),
            ThumbnailFrameSource,
        )))
    }

    pub async fn extract(&self, request: FrameRequest) -> ApiResult<FrameExtraction> {
        let video_id = request
            .video_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::InvalidInput("Video ID is required".to_string()))?;
        let offset_seconds = parse_timestamp(request.timestamp.as_deref().unwrap_or("0:00"));

        self.source.produce(video_id, offset_seconds).await.map_err(|e| {
            tracing::error!("Unexpected frame extraction error for {}: {}", video_id, e);
            ApiError::Unexpected("Failed to extract frame".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn settings_in(dir: &tempfile::TempDir, ytdlp: &str, ffmpeg: &str) -> FrameSettings {
        FrameSettings {
            ytdlp_bin: ytdlp.to_string(),
            ffmpeg_bin: ffmpeg.to_string(),
            ytdlp_timeout: Duration::from_secs(5),
            ffmpeg_timeout: Duration::from_secs(5),
            temp_dir: dir.path().to_path_buf(),
        }
    }

    fn is_empty(dir: &tempfile::TempDir) -> bool {
        std::fs::read_dir(dir.path()).unwrap().next().is_none()
    }

    #[tokio::test]
    async fn test_missing_tools_fall_back_to_thumbnail_and_clean_up() {
        let scratch = tempfile::tempdir().unwrap();
        let service = FrameExtractionService::with_toolchain(settings_in(
            &scratch,
            "yt-dlp-not-installed-here",
            "ffmpeg-not-installed-here",
        ));

        let frame = service
            .extract(FrameRequest {
                video_id: Some("dQw4w9WgXcQ".to_string()),
                timestamp: Some("1:30".to_string()),
            })
            .await
            .unwrap();

        assert!(!frame.extracted);
        assert_eq!(
            frame.frame_data,
            "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"
        );
        assert_eq!(frame.note.as_deref(), Some(THUMBNAIL_NOTE));
        assert!(is_empty(&scratch));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_ffmpeg_after_resolution_falls_back_and_cleans_up() {
        let scratch = tempfile::tempdir().unwrap();
        let source = WithFallback::new(
            ToolchainFrameSource::new(settings_in(&scratch, "echo", "false")),
            ThumbnailFrameSource,
        );

        let frame = source.produce("dQw4w9WgXcQ", 90).await.unwrap();
        assert!(!frame.extracted);
        assert!(is_empty(&scratch));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_missing_frame_after_reported_success_is_unexpected() {
        let scratch = tempfile::tempdir().unwrap();
        let service = FrameExtractionService::new(Arc::new(WithFallback::new(
            ToolchainFrameSource::new(settings_in(&scratch, "echo", "true")),
            ThumbnailFrameSource,
        )));

        let err = service
            .extract(FrameRequest {
                video_id: Some("dQw4w9WgXcQ".to_string()),
                timestamp: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unexpected(ref m) if m == "Failed to extract frame"));
        assert!(is_empty(&scratch));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_extracted_frame_is_jpeg_data_uri_and_cleans_up() {
        use std::os::unix::fs::PermissionsExt;

        // Stand-in ffmpeg: writes a JPEG magic number to its last argument
        let bin_dir = tempfile::tempdir().unwrap();
        let ffmpeg = bin_dir.path().join("fake-ffmpeg");
        std::fs::write(
            &ffmpeg,
            "#!/bin/sh\nfor last; do :; done\nprintf '\\377\\330\\377' > \"$last\"\n",
        )
        .unwrap();
        std::fs::set_permissions(&ffmpeg, std::fs::Permissions::from_mode(0o755)).unwrap();

        let scratch = tempfile::tempdir().unwrap();
        let service = FrameExtractionService::with_toolchain(settings_in(
            &scratch,
            "echo",
            ffmpeg.to_str().unwrap(),
        ));

        let frame = service
            .extract(FrameRequest {
                video_id: Some("dQw4w9WgXcQ".to_string()),
                timestamp: Some("0:05".to_string()),
            })
            .await
            .unwrap();

        assert!(frame.extracted);
        assert!(frame.note.is_none());
        assert_eq!(frame.frame_data, "data:image/jpeg;base64,/9j/");
        assert!(is_empty(&scratch));
    }

    #[tokio::test]
    async fn test_missing_video_id_is_rejected() {
        let service = FrameExtractionService::new(Arc::new(ThumbnailFrameSource));
        let err = service
            .extract(FrameRequest {
                video_id: Some("  ".to_string()),
                timestamp: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[test]
    fn test_only_tool_errors_are_recoverable() {
        assert!(FrameError::Tool(ToolError::EmptyOutput("yt-dlp".into())).is_recoverable());
        assert!(!FrameError::MissingOutput(PathBuf::from("/tmp/x.jpg")).is_recoverable());
    }
}
