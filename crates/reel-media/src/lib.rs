//! FFmpeg/FFprobe CLI wrapper for upload processing.
//!
//! This crate provides:
//! - Stream geometry probing and aspect-ratio classification
//! - Fast-start container remuxing for streaming playback
//! - The `MediaProcessor` capability trait so handlers can be tested
//!   without spawning real processes

pub mod error;
pub mod faststart;
pub mod probe;
pub mod processor;

pub use error::{MediaError, MediaResult};
pub use faststart::remux_fast_start;
pub use probe::{probe_geometry, AspectClass, Geometry};
pub use processor::{FfmpegProcessor, MediaProcessor};
