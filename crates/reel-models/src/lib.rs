//! Shared data models for the Reelstack backend.

pub mod key;
pub mod video;

pub use key::{generate_storage_key, STORAGE_KEY_BYTES};
pub use video::{VideoId, VideoRecord};
