// Fakes for the external seams and a router harness for handler tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::config::AppConfig;
use crate::gemini_client::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GeminiError, ImageModel,
    InlineData, Part,
};
use crate::models::youtube::{OEmbedResponse, TranscriptSegment};
use crate::services::frame_extraction::ThumbnailFrameSource;
use crate::services::{FrameExtractionService, ImageGenerationService, VideoLookupService};
use crate::youtube::{MetadataProvider, OEmbedError, TranscriptError, TranscriptProvider};
use crate::{build_router, AppState};

pub struct FakeMetadata {
    result: Option<(String, String)>,
    pub calls: AtomicUsize,
}

impl FakeMetadata {
    pub fn ok(title: &str, author: &str) -> Self {
        Self {
            result: Some((title.to_string(), author.to_string())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl MetadataProvider for FakeMetadata {
    async fn fetch_metadata(&self, _video_id: &str) -> Result<OEmbedResponse, OEmbedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.result {
            Some((title, author)) => Ok(OEmbedResponse {
                title: title.clone(),
                author_name: author.clone(),
            }),
            None => Err(OEmbedError::Status(404)),
        }
    }
}

pub struct FakeTranscripts {
    texts: Option<Vec<String>>,
    pub calls: AtomicUsize,
}

impl FakeTranscripts {
    pub fn with_texts(texts: &[&str]) -> Self {
        Self {
            texts: Some(texts.iter().map(|t| t.to_string()).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            texts: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TranscriptProvider for FakeTranscripts {
    async fn fetch_transcript(&self, video_id: &str) -> Result<Vec<TranscriptSegment>, TranscriptError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.texts {
            Some(texts) => Ok(texts
                .iter()
                .enumerate()
                .map(|(i, text)| TranscriptSegment {
                    text: text.clone(),
                    offset: i as f64,
                    duration: 1.0,
                })
                .collect()),
            None => Err(TranscriptError::Disabled(video_id.to_string())),
        }
    }
}

pub struct FakeImageModel {
    text: Option<String>,
    image: Option<InlineData>,
    fail: bool,
    last: Mutex<Option<GenerateContentRequest>>,
}

impl FakeImageModel {
    pub fn returning(text: Option<&str>, image: Option<(&str, &str)>) -> Self {
        Self {
            text: text.map(str::to_string),
            image: image.map(|(mime_type, data)| InlineData {
                mime_type: mime_type.to_string(),
                data: data.to_string(),
            }),
            fail: false,
            last: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            text: None,
            image: None,
            fail: true,
            last: Mutex::new(None),
        }
    }

    pub fn last_request(&self) -> Option<GenerateContentRequest> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageModel for FakeImageModel {
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        *self.last.lock().unwrap() = Some(request);
        if self.fail {
            return Err(GeminiError::Api {
                status: 503,
                body: "overloaded".to_string(),
            });
        }

        let mut parts = Vec::new();
        if let Some(text) = &self.text {
            parts.push(Part::Text { text: text.clone() });
        }
        if let Some(image) = &self.image {
            parts.push(Part::InlineData {
                inline_data: image.clone(),
            });
        }

        Ok(GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content {
                    parts,
                    role: Some("model".to_string()),
                }),
                finish_reason: Some("STOP".to_string()),
            }],
            prompt_feedback: None,
        })
    }
}

pub struct TestHarness {
    pub router: Router,
    pub metadata: Arc<FakeMetadata>,
    pub transcripts: Arc<FakeTranscripts>,
    pub model: Arc<FakeImageModel>,
}

pub struct TestHarnessBuilder {
    metadata: FakeMetadata,
    transcripts: FakeTranscripts,
    model: FakeImageModel,
    with_model: bool,
    config: AppConfig,
}

impl TestHarnessBuilder {
    pub fn metadata(mut self, metadata: FakeMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn transcripts(mut self, transcripts: FakeTranscripts) -> Self {
        self.transcripts = transcripts;
        self
    }

    pub fn model(mut self, model: FakeImageModel) -> Self {
        self.model = model;
        self
    }

    pub fn without_model(mut self) -> Self {
        self.with_model = false;
        self
    }

    pub fn default_style(mut self, style: &str) -> Self {
        self.config.generation.default_style = style.to_string();
        self
    }

    pub fn build(self) -> TestHarness {
        let config = self.config;
        let metadata = Arc::new(self.metadata);
        let transcripts = Arc::new(self.transcripts);
        let model = Arc::new(self.model);

        let image_model: Option<Arc<dyn ImageModel>> = if self.with_model {
            Some(model.clone())
        } else {
            None
        };

        let state = AppState {
            lookup: VideoLookupService::new(
                metadata.clone(),
                transcripts.clone(),
                config.lookup.clone(),
            ),
            generator: ImageGenerationService::new(
                image_model,
                reqwest::Client::new(),
                config.generation.clone(),
            ),
            frames: FrameExtractionService::new(Arc::new(ThumbnailFrameSource)),
            config,
        };

        TestHarness {
            router: build_router(Arc::new(state)),
            metadata,
            transcripts,
            model,
        }
    }
}

impl TestHarness {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder {
            metadata: FakeMetadata::ok("Never Gonna Give You Up", "Rick Astley"),
            transcripts: FakeTranscripts::with_texts(&["never gonna", "give you up"]),
            model: FakeImageModel::returning(
                Some("A clean abstract header"),
                Some(("image/jpeg", "iVBORw0KGgo=")),
            ),
            with_model: true,
            config: AppConfig::default(),
        }
    }

    pub async fn post_json(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn get_json(&self, path: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}
