// Request and response bodies for the JSON API
pub mod frame;
pub mod generation;
pub mod youtube;
