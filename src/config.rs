// Runtime configuration loaded from the process environment (and .env)

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_STYLE: &str = "modern, clean, professional";
pub const DEFAULT_IMAGE_WIDTH: u32 = 1200;
pub const DEFAULT_IMAGE_HEIGHT: u32 = 628;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_image_model: String,
    pub oembed_endpoint: String,
    pub transcript_lang: Option<String>,
    pub http_timeout: Duration,
    pub generation: GenerationSettings,
    pub lookup: LookupSettings,
    pub frames: FrameSettings,
}

/// Prompt and output policy for the image generation endpoints.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub default_style: String,
    pub width: u32,
    pub height: u32,
    /// How much of the transcript is quoted into the prompt.
    pub prompt_context_chars: usize,
}

#[derive(Debug, Clone)]
pub struct LookupSettings {
    pub transcript_max_chars: usize,
}

#[derive(Debug, Clone)]
pub struct FrameSettings {
    pub ytdlp_bin: String,
    pub ffmpeg_bin: String,
    pub ytdlp_timeout: Duration,
    pub ffmpeg_timeout: Duration,
    pub temp_dir: PathBuf,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            default_style: DEFAULT_STYLE.to_string(),
            width: DEFAULT_IMAGE_WIDTH,
            height: DEFAULT_IMAGE_HEIGHT,
            prompt_context_chars: 1500,
        }
    }
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            transcript_max_chars: 5000,
        }
    }
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            ytdlp_bin: "yt-dlp".to_string(),
            ffmpeg_bin: "ffmpeg".to_string(),
            ytdlp_timeout: Duration::from_secs(30),
            ffmpeg_timeout: Duration::from_secs(60),
            temp_dir: std::env::temp_dir(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            gemini_api_key: None,
            gemini_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            gemini_image_model: "gemini-2.5-flash-image".to_string(),
            oembed_endpoint: "https://www.youtube.com/oembed".to_string(),
            transcript_lang: None,
            http_timeout: Duration::from_secs(60),
            generation: GenerationSettings::default(),
            lookup: LookupSettings::default(),
            frames: FrameSettings::default(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from environment variables, falling back to
    /// the defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let generation = GenerationSettings {
            default_style: get("DEFAULT_STYLE").unwrap_or(defaults.generation.default_style),
            width: parse_or(get("IMAGE_WIDTH"), "IMAGE_WIDTH", defaults.generation.width),
            height: parse_or(get("IMAGE_HEIGHT"), "IMAGE_HEIGHT", defaults.generation.height),
            prompt_context_chars: parse_or(
                get("PROMPT_CONTEXT_CHARS"),
                "PROMPT_CONTEXT_CHARS",
                defaults.generation.prompt_context_chars,
            ),
        };

        let lookup_settings = LookupSettings {
            transcript_max_chars: parse_or(
                get("TRANSCRIPT_MAX_CHARS"),
                "TRANSCRIPT_MAX_CHARS",
                defaults.lookup.transcript_max_chars,
            ),
        };

        let frames = FrameSettings {
            ytdlp_bin: get("YTDLP_BIN").unwrap_or(defaults.frames.ytdlp_bin),
            ffmpeg_bin: get("FFMPEG_BIN").unwrap_or(defaults.frames.ffmpeg_bin),
            ytdlp_timeout: Duration::from_secs(parse_or(
                get("YTDLP_TIMEOUT_SECS"),
                "YTDLP_TIMEOUT_SECS",
                defaults.frames.ytdlp_timeout.as_secs(),
            )),
            ffmpeg_timeout: Duration::from_secs(parse_or(
                get("FFMPEG_TIMEOUT_SECS"),
                "FFMPEG_TIMEOUT_SECS",
                defaults.frames.ffmpeg_timeout.as_secs(),
            )),
            temp_dir: get("FRAME_TEMP_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.frames.temp_dir),
        };

        Self {
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_base_url: get("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            gemini_image_model: get("GEMINI_IMAGE_MODEL").unwrap_or(defaults.gemini_image_model),
            oembed_endpoint: get("OEMBED_ENDPOINT").unwrap_or(defaults.oembed_endpoint),
            transcript_lang: get("TRANSCRIPT_LANG"),
            http_timeout: Duration::from_secs(parse_or(
                get("HTTP_TIMEOUT_SECS"),
                "HTTP_TIMEOUT_SECS",
                defaults.http_timeout.as_secs(),
            )),
            generation,
            lookup: lookup_settings,
            frames,
        }
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, key: &str, default: T) -> T {
    match value {
        Some(raw) => match raw.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                tracing::warn!("Ignoring invalid value for {}: {:?}", key, raw);
                default
            }
        },
        None => default,
    }
}
