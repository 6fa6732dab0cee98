// src/services/mod.rs
pub mod frame_extraction;
pub mod image_generation;
pub mod video_lookup;

pub use frame_extraction::FrameExtractionService;
pub use image_generation::ImageGenerationService;
pub use video_lookup::VideoLookupService;
