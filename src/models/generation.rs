use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationMode {
    #[default]
    Generate,
    Enhance,
}

impl GenerationMode {
    /// Anything other than "enhance" means plain generation.
    pub fn from_request(mode: Option<&str>) -> Self {
        match mode {
            Some("enhance") => GenerationMode::Enhance,
            _ => GenerationMode::Generate,
        }
    }
}

/// Body of `POST /api/generate` and `POST /api/generate-enhanced`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub source_image: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub image_prompt: String,
    pub image_data: String,
    pub width: u32,
    pub height: u32,
}
