// Image generation handlers. Both endpoints share one code path; the plain
// endpoint is pinned to generate mode.

use crate::error::ApiResult;
use crate::models::generation::{GeneratedImage, GenerationMode, GenerationRequest};
use crate::AppState;
use axum::{extract::Extension, response::Json, routing::post, Router};
use std::sync::Arc;

pub fn generate_routes() -> Router {
    Router::new()
        .route("/api/generate", post(generate_image))
        .route("/api/generate-enhanced", post(generate_enhanced_image))
}

pub async fn generate_image(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<GenerationRequest>,
) -> ApiResult<Json<GeneratedImage>> {
    let image = state.generator.generate(payload, GenerationMode::Generate).await?;
    Ok(Json(image))
}

pub async fn generate_enhanced_image(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<GenerationRequest>,
) -> ApiResult<Json<GeneratedImage>> {
    let mode = GenerationMode::from_request(payload.mode.as_deref());
    let image = state.generator.generate(payload, mode).await?;
    Ok(Json(image))
}
