// HTTP-facing error type shared by all API handlers

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::data_uri::DataUriError;
use crate::gemini_client::GeminiError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    MetadataUnavailable(String),
    #[error("{0}")]
    Upstream(String),
    #[error("No image generated")]
    GenerationFailed,
    #[error("{0}")]
    Configuration(String),
    #[error("{0}")]
    Unexpected(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::MetadataUnavailable(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_)
            | ApiError::GenerationFailed
            | ApiError::Configuration(_)
            | ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status.as_u16(), error = %self, "request failed");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<DataUriError> for ApiError {
    fn from(_: DataUriError) -> Self {
        ApiError::InvalidInput("Invalid image data format".to_string())
    }
}

impl From<GeminiError> for ApiError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::NotConfigured => {
                ApiError::Configuration("GEMINI_API_KEY is not configured".to_string())
            }
            other => ApiError::Upstream(format!("Image generation failed: {}", other)),
        }
    }
}
