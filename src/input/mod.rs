//! Input processing module
//! Handles file detection, text extraction, catalog loading and input caching

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use manager::InputManager;
