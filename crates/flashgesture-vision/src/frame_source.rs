// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Frame acquisition seam.
//!
//! Camera drivers live outside this workspace; anything that can produce
//! [`ImageFrame`]s implements [`FrameSource`].

use crate::ImageFrame;

/// Errors produced while acquiring a frame
///
/// None of these are fatal to the detection loop: the tick that hit the
/// error is skipped and the next tick reads again.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The device or stream failed to deliver a frame
    #[error("Failed to read frame: {0}")]
    ReadFailed(String),

    /// A buffer arrived but does not describe a valid image
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    /// The source has no more frames and does not loop
    #[error("Frame source exhausted")]
    Exhausted,
}

/// Producer of camera frames, polled once per tick
pub trait FrameSource {
    /// Read the next frame.
    fn read_frame(&mut self) -> Result<ImageFrame, SourceError>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn read_frame(&mut self) -> Result<ImageFrame, SourceError> {
        (**self).read_frame()
    }
}
