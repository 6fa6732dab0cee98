use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::models::youtube::{watch_url, OEmbedResponse};

#[derive(Debug, Error)]
pub enum OEmbedError {
    #[error("oEmbed request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("oEmbed returned status {0}")]
    Status(u16),
}

/// Source of title/author metadata for a video.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn fetch_metadata(&self, video_id: &str) -> Result<OEmbedResponse, OEmbedError>;
}

#[derive(Debug, Clone)]
pub struct OEmbedClient {
    client: Client,
    endpoint: String,
}

impl OEmbedClient {
    pub fn new(client: Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }

    pub fn request_url(&self, video_id: &str) -> String {
        format!(
            "{}?url={}&format=json",
            self.endpoint,
            urlencoding::encode(&watch_url(video_id))
        )
    }
}

#[async_trait]
impl MetadataProvider for OEmbedClient {
    async fn fetch_metadata(&self, video_id: &str) -> Result<OEmbedResponse, OEmbedError> {
        let url = self.request_url(video_id);
        tracing::debug!("Fetching oEmbed metadata: {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(OEmbedError::Status(response.status().as_u16()));
        }

        Ok(response.json::<OEmbedResponse>().await?)
    }
}
