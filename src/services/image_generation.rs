// src/services/image_generation.rs
use std::sync::Arc;

use reqwest::Client;

use crate::config::GenerationSettings;
use crate::data_uri::{self, DataUri};
use crate::error::{ApiError, ApiResult};
use crate::gemini_client::{GenerateContentRequest, GeminiError, ImageModel, InlineData, Part};
use crate::models::generation::{GeneratedImage, GenerationMode, GenerationRequest};
use crate::utils::truncate_chars;

const DEFAULT_PROMPT_LABEL: &str = "Generated blog header image";

pub struct ImageGenerationService {
    model: Option<Arc<dyn ImageModel>>,
    http: Client,
    settings: GenerationSettings,
}

/// Fields shared by both prompt templates.
struct PromptInputs<'a> {
    title: &'a str,
    context: Option<&'a str>,
    style: &'a str,
}

impl ImageGenerationService {
    pub fn new(model: Option<Arc<dyn ImageModel>>, http: Client, settings: GenerationSettings) -> Self {
        Self {
            model,
            http,
            settings,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.model.is_some()
    }

    pub async fn generate(&self, request: GenerationRequest, mode: GenerationMode) -> ApiResult<GeneratedImage> {
        let model = self.model.as_ref().ok_or(GeminiError::NotConfigured)?;

        let inputs = PromptInputs {
            title: request.title.trim(),
            context: request
                .transcript
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(|t| truncate_chars(t, self.settings.prompt_context_chars)),
            style: request
                .style
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(self.settings.default_style.as_str()),
        };

        let parts = match mode {
            GenerationMode::Generate => vec![Part::Text {
                text: self.generate_prompt(&inputs),
            }],
            GenerationMode::Enhance => {
                let source = request
                    .source_image
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| {
                        ApiError::InvalidInput("Source image is required for enhance mode".to_string())
                    })?;
                let image = self.load_source_image(source).await?;
                vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            data: image.base64_payload(),
                            mime_type: image.mime_type,
                        },
                    },
                    Part::Text {
                        text: self.enhance_prompt(&inputs),
                    },
                ]
            }
        };

        tracing::info!(?mode, title = %inputs.title, style = %inputs.style, "requesting header image");

        let response = model
            .generate_content(GenerateContentRequest::text_and_image(parts))
            .await?;

        let image = response.first_inline_data().ok_or_else(|| {
            tracing::error!("Model response contained no image part");
            ApiError::GenerationFailed
        })?;

        Ok(GeneratedImage {
            image_prompt: response
                .first_text()
                .unwrap_or(DEFAULT_PROMPT_LABEL)
                .to_string(),
            // The client always gets a PNG-labelled data URI
            image_data: data_uri::from_base64("image/png", &image.data),
            width: self.settings.width,
            height: self.settings.height,
        })
    }

    /// A data URI is decoded in place; an http(s) URL is fetched and assumed JPEG.
    async fn load_source_image(&self, source: &str) -> ApiResult<DataUri> {
        if source.starts_with("data:") {
            return Ok(DataUri::parse(source)?);
        }

        let url = reqwest::Url::parse(source)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .ok_or_else(|| ApiError::InvalidInput("Invalid image data format".to_string()))?;

        tracing::info!("Fetching source image: {}", url);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ApiError::Upstream(format!("Failed to fetch source image: {}", e)))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Upstream(format!("Failed to read source image: {}", e)))?;

        Ok(DataUri::new("image/jpeg", bytes.to_vec()))
    }

    fn generate_prompt(&self, inputs: &PromptInputs<'_>) -> String {
        let mut prompt = format!(
            "Create a professional blog header image for an article about: \"{}\".\n",
            inputs.title
        );
        if let Some(context) = inputs.context {
            prompt.push_str(&format!("Context from the video: {}\n", context));
        }
        prompt.push_str(&format!("Style: {}\n", inputs.style));
        prompt.push_str(&self.requirements("Visually represent the main topic and themes"));
        prompt
    }

    fn enhance_prompt(&self, inputs: &PromptInputs<'_>) -> String {
        let mut prompt = format!(
            "Transform this image into a professional blog header for an article about: \"{}\".\n",
            inputs.title
        );
        if let Some(context) = inputs.context {
            prompt.push_str(&format!("Context from the video: {}\n", context));
        }
        prompt.push_str(&format!("Style: {}\n", inputs.style));
        prompt.push_str(&self.requirements(
            "Keep the key subject of the source image recognisable while restyling it",
        ));
        prompt
    }

    fn requirements(&self, focus: &str) -> String {
        format!(
            "Requirements:\n\
             - Dimensions: {}x{} pixels (landscape, optimized for blog headers and social sharing)\n\
             - Do NOT include any text, letters, words, numbers, or typography in the image\n\
             - {}\n\
             - High quality, suitable for a professional blog",
            self.settings.width, self.settings.height, focus
        )
    }
}
