use serde::{Deserialize, Serialize};

/// Body of `POST /api/youtube`.
#[derive(Debug, Deserialize)]
pub struct VideoLookupRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Everything the page needs to build a prompt for one video.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    pub video_id: String,
    pub title: String,
    pub author: String,
    pub thumbnail_url: String,
    pub transcript: String,
}

/// Subset of the oEmbed response we care about.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OEmbedResponse {
    pub title: String,
    pub author_name: String,
}

/// One caption cue returned by the transcript provider.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    pub text: String,
    pub offset: f64,
    pub duration: f64,
}

pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", video_id)
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}
