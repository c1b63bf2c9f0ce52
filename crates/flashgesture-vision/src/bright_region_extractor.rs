// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;

use flashgesture_config::{ConfigResult, DetectionParameters};
use tracing::trace;

use crate::data_types::{ImageFrame, Rect};
use crate::processing::{brightness_mask, external_contours, gaussian_blur_5x5};

/// Outline color for [`BrightRegionExtractor::annotate`]
pub const ANNOTATION_COLOR: [u8; 3] = [0, 255, 0];
/// Outline thickness in pixels
pub const ANNOTATION_THICKNESS: u32 = 2;

/// A bright region that passed the area filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightRegion {
    pub bounding_box: Rect,
    /// Area enclosed by the region's outer border, holes included
    pub area: f64,
}

/// Finds near-white regions large enough to be a flashlight beam.
///
/// Stateless between calls: the same frame always yields the same boxes in
/// the same (row-major discovery) order.
#[derive(Debug, Clone)]
pub struct BrightRegionExtractor {
    value_threshold: u8,
    max_saturation: u8,
    min_region_area: f64,
}

impl Display for BrightRegionExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "BrightRegionExtractor(value >= {}, saturation <= {}, area >= {})",
            self.value_threshold, self.max_saturation, self.min_region_area
        )
    }
}

impl BrightRegionExtractor {
    pub fn new(params: &DetectionParameters) -> ConfigResult<Self> {
        params.validate()?;
        Ok(BrightRegionExtractor {
            value_threshold: params.brightness_threshold_u8(),
            max_saturation: params.max_saturation_u8(),
            min_region_area: params.min_region_area,
        })
    }

    /// Bounding boxes of qualifying regions.
    pub fn extract(&self, frame: &ImageFrame) -> Vec<Rect> {
        self.extract_regions(frame)
            .into_iter()
            .map(|region| region.bounding_box)
            .collect()
    }

    /// Qualifying regions along with their areas.
    pub fn extract_regions(&self, frame: &ImageFrame) -> Vec<BrightRegion> {
        if frame.is_empty() {
            return Vec::new();
        }

        let mask = brightness_mask(frame, self.value_threshold, self.max_saturation);
        let smoothed = gaussian_blur_5x5(&mask);
        let contours = external_contours(&smoothed);
        let candidates = contours.len();

        let regions: Vec<BrightRegion> = contours
            .into_iter()
            .filter(|contour| contour.area >= self.min_region_area)
            .map(|contour| BrightRegion {
                bounding_box: contour.bounding_box,
                area: contour.area,
            })
            .collect();

        trace!(
            target: "flashgesture-vision",
            "[EXTRACT] {} candidate regions, {} kept",
            candidates,
            regions.len()
        );
        regions
    }

    /// Draws each box as a 2px green outline. Decoration only.
    pub fn annotate(frame: &mut ImageFrame, boxes: &[Rect]) {
        for rect in boxes {
            frame.draw_rect_outline(*rect, ANNOTATION_THICKNESS, ANNOTATION_COLOR);
        }
    }
}
