//! flashgesture Runner Library
//!
//! This module exports the runner's frame source and observer for testing
//! and for embedding the detector in other binaries.

pub mod frame_writer;
pub mod image_sequence;

// Re-export key types for convenience
pub use frame_writer::RunnerObserver;
pub use image_sequence::{ImageSequenceSource, IMAGE_EXTENSIONS};
