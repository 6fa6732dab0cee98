use serde::{Deserialize, Serialize};

/// Body of `POST /api/frame`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRequest {
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Outcome of a frame request. `extracted` is false when the thumbnail
/// fallback was used; it stays off the wire, the note tells the client.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FrameExtraction {
    pub frame_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip)]
    pub extracted: bool,
}

impl FrameExtraction {
    pub fn extracted(frame_data: String) -> Self {
        Self {
            frame_data,
            note: None,
            extracted: true,
        }
    }

    pub fn fallback(frame_data: String, note: impl Into<String>) -> Self {
        Self {
            frame_data,
            note: Some(note.into()),
            extracted: false,
        }
    }
}
