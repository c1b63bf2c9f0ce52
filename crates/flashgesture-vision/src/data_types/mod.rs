//! Data types shared by the vision pipeline.
//!
//! - **[`ImageFrame`]** - RGB pixel buffer in height x width x channel order
//! - **[`Rect`]** - Axis-aligned bounding box in pixel coordinates

mod image_frame;
mod rect;

pub use image_frame::ImageFrame;
pub use rect::Rect;
