// Caption scraping from the public watch page.
// The watch page embeds the player's caption track list; each track has a
// timedtext URL that returns <text start=".." dur="..">..</text> cues.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::models::youtube::{watch_url, TranscriptSegment};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/85.0.4183.83 Safari/537.36";

lazy_static! {
    static ref XML_CUE: Regex =
        Regex::new(r#"<text start="([^"]*)" dur="([^"]*)"[^>]*>([^<]*)</text>"#).unwrap();
    static ref NUMERIC_ENTITY: Regex = Regex::new(r"&#(x?)([0-9a-fA-F]+);").unwrap();
}

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("YouTube is receiving too many requests from this IP")]
    TooManyRequests,
    #[error("video {0} is no longer available")]
    VideoUnavailable(String),
    #[error("transcripts are disabled for video {0}")]
    Disabled(String),
    #[error("no transcripts are available for video {0}")]
    NotAvailable(String),
    #[error("no transcript in language {lang} for video {video_id} (available: {available})")]
    LanguageNotAvailable {
        lang: String,
        video_id: String,
        available: String,
    },
    #[error("transcript request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Source of caption cues for a video.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    async fn fetch_transcript(&self, video_id: &str) -> Result<Vec<TranscriptSegment>, TranscriptError>;
}

#[derive(Debug, Clone)]
pub struct TranscriptClient {
    client: Client,
    lang: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CaptionsBlob {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
struct TracklistRenderer {
    #[serde(rename = "captionTracks")]
    caption_tracks: Option<Vec<CaptionTrack>>,
}

#[derive(Debug, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode", default)]
    language_code: String,
}

impl TranscriptClient {
    pub fn new(client: Client, lang: Option<String>) -> Self {
        Self { client, lang }
    }
}

#[async_trait]
impl TranscriptProvider for TranscriptClient {
    async fn fetch_transcript(&self, video_id: &str) -> Result<Vec<TranscriptSegment>, TranscriptError> {
        let mut page_request = self
            .client
            .get(watch_url(video_id))
            .header(reqwest::header::USER_AGENT, USER_AGENT);
        if let Some(lang) = &self.lang {
            page_request = page_request.header(reqwest::header::ACCEPT_LANGUAGE, lang.as_str());
        }
        let page = page_request.send().await?.text().await?;

        let track_url = caption_track_url(&page, video_id, self.lang.as_deref())?;
        tracing::debug!("Fetching caption track for {}", video_id);

        let response = self
            .client
            .get(&track_url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(TranscriptError::NotAvailable(video_id.to_string()));
        }

        let xml = response.text().await?;
        Ok(parse_transcript_xml(&xml))
    }
}

/// Locate the timedtext URL for the requested (or first) caption track in a
/// watch page.
pub fn caption_track_url(
    page: &str,
    video_id: &str,
    lang: Option<&str>,
) -> Result<String, TranscriptError> {
    let Some((_, after)) = page.split_once("\"captions\":") else {
        if page.contains("class=\"g-recaptcha\"") {
            return Err(TranscriptError::TooManyRequests);
        }
        if !page.contains("\"playabilityStatus\":") {
            return Err(TranscriptError::VideoUnavailable(video_id.to_string()));
        }
        return Err(TranscriptError::Disabled(video_id.to_string()));
    };

    let blob = after
        .split(",\"videoDetails")
        .next()
        .unwrap_or_default()
        .replace('\n', "");
    let captions: CaptionsBlob = serde_json::from_str(&blob)
        .map_err(|_| TranscriptError::Disabled(video_id.to_string()))?;

    let tracks = captions
        .renderer
        .ok_or_else(|| TranscriptError::Disabled(video_id.to_string()))?
        .caption_tracks
        .filter(|tracks| !tracks.is_empty())
        .ok_or_else(|| TranscriptError::NotAvailable(video_id.to_string()))?;

    let track = match lang {
        Some(lang) => tracks
            .iter()
            .find(|track| track.language_code == lang)
            .ok_or_else(|| TranscriptError::LanguageNotAvailable {
                lang: lang.to_string(),
                video_id: video_id.to_string(),
                available: tracks
                    .iter()
                    .map(|track| track.language_code.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })?,
        None => &tracks[0],
    };

    Ok(track.base_url.clone())
}

pub fn parse_transcript_xml(xml: &str) -> Vec<TranscriptSegment> {
    XML_CUE
        .captures_iter(xml)
        .map(|caps| TranscriptSegment {
            offset: caps[1].parse().unwrap_or(0.0),
            duration: caps[2].parse().unwrap_or(0.0),
            text: decode_entities(&caps[3]),
        })
        .collect()
}

/// Caption text arrives XML-escaped, often twice (`&amp;#39;`).
fn decode_entities(text: &str) -> String {
    let mut decoded = text.to_string();
    for _ in 0..2 {
        if !decoded.contains('&') {
            break;
        }
        let named = decoded
            .replace("&quot;", "\"")
            .replace("&apos;", "'")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&");
        decoded = NUMERIC_ENTITY
            .replace_all(&named, |caps: &regex::Captures| {
                let radix = if caps[1].is_empty() { 10 } else { 16 };
                u32::from_str_radix(&caps[2], radix)
                    .ok()
                    .and_then(char::from_u32)
                    .map(String::from)
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned();
    }
    decoded
}
