// YouTube integration: video ID parsing, oEmbed metadata, transcripts and
// yt-dlp stream resolution

pub mod oembed_client;
pub mod transcript_client;
pub mod video_id;
pub mod ytdlp_client;

pub use oembed_client::{MetadataProvider, OEmbedClient, OEmbedError};
pub use transcript_client::{TranscriptClient, TranscriptError, TranscriptProvider};
pub use video_id::extract_video_id;
pub use ytdlp_client::YtDlpClient;
