// Parser for self-describing inline payloads: data:<mime>;base64,<payload>

use base64::prelude::*;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref DATA_URI: Regex = Regex::new(r"^data:([^;,]+);base64,(.+)$").unwrap();
}

#[derive(Debug, Error, PartialEq)]
pub enum DataUriError {
    #[error("not a data:<mime>;base64,<payload> URI")]
    Malformed,
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// A decoded data URI.
#[derive(Debug, Clone, PartialEq)]
pub struct DataUri {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DataUri {
    pub fn parse(input: &str) -> Result<Self, DataUriError> {
        let caps = DATA_URI.captures(input.trim()).ok_or(DataUriError::Malformed)?;
        let mime_type = caps[1].to_string();
        let bytes = BASE64_STANDARD
            .decode(caps[2].as_bytes())
            .map_err(|e| DataUriError::InvalidBase64(e.to_string()))?;

        Ok(Self { mime_type, bytes })
    }

    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn base64_payload(&self) -> String {
        BASE64_STANDARD.encode(&self.bytes)
    }

    pub fn encode(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_payload())
    }
}

/// Wrap an already base64-encoded payload without decoding it.
pub fn from_base64(mime_type: &str, payload: &str) -> String {
    format!("data:{};base64,{}", mime_type, payload)
}
