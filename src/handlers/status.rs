// Service status endpoint

use crate::AppState;
use axum::{extract::Extension, response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::sync::Arc;

pub fn status_routes() -> Router {
    Router::new().route("/api/status", get(api_status))
}

pub async fn api_status(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    let gemini_status = if state.generator.is_configured() { "configured" } else { "not_configured" };

    Json(json!({
        "status": "operational",
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "gemini_image": gemini_status,
            "image_model": state.config.gemini_image_model,
            "oembed_endpoint": state.config.oembed_endpoint,
            "frame_tools": {
                "ytdlp": state.config.frames.ytdlp_bin,
                "ffmpeg": state.config.frames.ffmpeg_bin
            }
        },
        "output": {
            "width": state.config.generation.width,
            "height": state.config.generation.height
        }
    }))
}
