//! Pixel-level processing steps used by the bright-region extractor.
//!
//! Each step is a pure function over arrays so it can be tested in isolation.

mod brightness_mask;
mod gaussian_blur;
mod outer_contour;
mod region_labeling;

pub use brightness_mask::{brightness_mask, value_and_saturation, MASK_ON};
pub use gaussian_blur::gaussian_blur_5x5;
pub use outer_contour::{
    contour_area, external_contours, outside_background, trace_outer_contour, ExternalContour,
};
pub use region_labeling::{label_regions, LabeledRegion};
