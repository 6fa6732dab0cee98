// src/services/video_lookup.rs
use std::sync::Arc;

use crate::config::LookupSettings;
use crate::error::{ApiError, ApiResult};
use crate::models::youtube::{thumbnail_url, VideoMetadata};
use crate::utils::truncate_chars;
use crate::youtube::{extract_video_id, MetadataProvider, TranscriptProvider};

pub struct VideoLookupService {
    metadata: Arc<dyn MetadataProvider>,
    transcripts: Arc<dyn TranscriptProvider>,
    settings: LookupSettings,
}

impl VideoLookupService {
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        transcripts: Arc<dyn TranscriptProvider>,
        settings: LookupSettings,
    ) -> Self {
        Self {
            metadata,
            transcripts,
            settings,
        }
    }

    /// Resolve a URL or bare ID into title, author, thumbnail and transcript.
    pub async fn lookup(&self, url: Option<&str>) -> ApiResult<VideoMetadata> {
        let url = url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ApiError::InvalidInput("YouTube URL is required".to_string()))?;

        let video_id = extract_video_id(url)
            .ok_or_else(|| ApiError::InvalidInput("Invalid YouTube URL".to_string()))?;

        let oembed = self.metadata.fetch_metadata(&video_id).await.map_err(|e| {
            tracing::warn!("oEmbed lookup failed for {}: {}", video_id, e);
            ApiError::MetadataUnavailable("Failed to fetch video metadata".to_string())
        })?;

        let transcript = self.transcript_text(&video_id).await;

        tracing::info!(
            video_id = %video_id,
            transcript_chars = transcript.chars().count(),
            "video lookup complete"
        );

        Ok(VideoMetadata {
            thumbnail_url: thumbnail_url(&video_id),
            video_id,
            title: oembed.title,
            author: oembed.author_name,
            transcript,
        })
    }

    /// Joined caption text, or empty when captions cannot be fetched.
    async fn transcript_text(&self, video_id: &str) -> String {
        match self.transcripts.fetch_transcript(video_id).await {
            Ok(segments) => {
                let joined = segments
                    .iter()
                    .map(|segment| segment.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                truncate_chars(&joined, self.settings.transcript_max_chars).to_string()
            }
            Err(e) => {
                tracing::warn!("Transcript unavailable for {}: {}", video_id, e);
                String::new()
            }
        }
    }
}
