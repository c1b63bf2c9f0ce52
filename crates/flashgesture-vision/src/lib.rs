// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Frame model and bright-region extraction.
//!
//! A [`FrameSource`] hands out [`ImageFrame`]s; the [`BrightRegionExtractor`]
//! turns each frame into the bounding boxes of near-white regions large
//! enough to be a flashlight beam.

pub mod bright_region_extractor;
pub mod data_types;
pub mod frame_source;
pub mod processing;

pub use bright_region_extractor::{BrightRegion, BrightRegionExtractor};
pub use data_types::{ImageFrame, Rect};
pub use frame_source::{FrameSource, SourceError};
