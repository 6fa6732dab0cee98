// lib.rs - Main library file: shared state, router and module exports
pub mod config;
pub mod data_uri;
pub mod error;
pub mod gemini_client;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;
pub mod youtube;

use axum::{Extension, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use config::AppConfig;
use gemini_client::{GeminiClient, ImageModel};
use services::{FrameExtractionService, ImageGenerationService, VideoLookupService};
use youtube::{OEmbedClient, TranscriptClient};

// AppState holds the configuration and the three request-scoped services
pub struct AppState {
    pub config: AppConfig,
    pub lookup: VideoLookupService,
    pub generator: ImageGenerationService,
    pub frames: FrameExtractionService,
}

impl AppState {
    /// Wire the production clients from configuration.
    pub fn from_config(config: AppConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        let image_model: Option<Arc<dyn ImageModel>> = match &config.gemini_api_key {
            Some(api_key) => {
                tracing::info!("Initializing Gemini image client ({})...", config.gemini_image_model);
                Some(Arc::new(GeminiClient::new(
                    http.clone(),
                    api_key.clone(),
                    config.gemini_base_url.clone(),
                    config.gemini_image_model.clone(),
                )))
            }
            None => {
                tracing::warn!("GEMINI_API_KEY not found. Image generation requests will fail.");
                None
            }
        };

        let lookup = VideoLookupService::new(
            Arc::new(OEmbedClient::new(http.clone(), config.oembed_endpoint.clone())),
            Arc::new(TranscriptClient::new(http.clone(), config.transcript_lang.clone())),
            config.lookup.clone(),
        );
        let generator = ImageGenerationService::new(image_model, http, config.generation.clone());
        let frames = FrameExtractionService::with_toolchain(config.frames.clone());

        Ok(Self {
            config,
            lookup,
            generator,
            frames,
        })
    }
}

/// Build the application with all routes and shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(handlers::ui::ui_routes())
        .merge(handlers::youtube::youtube_routes())
        .merge(handlers::generate::generate_routes())
        .merge(handlers::frame::frame_routes())
        .merge(handlers::status::status_routes())
        .layer(axum::middleware::from_fn(middleware::logging::request_logging_middleware))
        .layer(CorsLayer::permissive())
        .layer(Extension(state))
}
