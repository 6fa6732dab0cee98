// YouTube lookup handler: URL -> title, author, thumbnail and transcript

use crate::error::ApiResult;
use crate::models::youtube::{VideoLookupRequest, VideoMetadata};
use crate::AppState;
use axum::{extract::Extension, response::Json, routing::post, Router};
use std::sync::Arc;

pub fn youtube_routes() -> Router {
    Router::new().route("/api/youtube", post(lookup_video))
}

pub async fn lookup_video(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<VideoLookupRequest>,
) -> ApiResult<Json<VideoMetadata>> {
    let metadata = state.lookup.lookup(payload.url.as_deref()).await?;
    Ok(Json(metadata))
}
