// Frame extraction handler

use crate::error::ApiResult;
use crate::models::frame::{FrameExtraction, FrameRequest};
use crate::AppState;
use axum::{extract::Extension, response::Json, routing::post, Router};
use std::sync::Arc;

pub fn frame_routes() -> Router {
    Router::new().route("/api/frame", post(extract_frame))
}

pub async fn extract_frame(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<FrameRequest>,
) -> ApiResult<Json<FrameExtraction>> {
    let frame = state.frames.extract(payload).await?;
    Ok(Json(frame))
}
