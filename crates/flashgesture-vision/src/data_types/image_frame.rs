// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use image::{DynamicImage, RgbImage};
use ndarray::{Array3, ArrayView3};

use super::Rect;
use crate::frame_source::SourceError;

/// An RGB image held as a 3D array with height, width, and channel dimensions.
///
/// Frames from any source are normalized to 8-bit RGB on construction, so
/// downstream processing never has to branch on channel layout.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageFrame {
    pixels: Array3<u8>, // heights x widths x channels
}

// NOTE -> (0,0) is in the top left corner!

impl ImageFrame {
    /// Number of color channels stored per pixel
    pub const CHANNELS: usize = 3;

    //region Constructors

    /// Creates a black frame of the given resolution.
    pub fn new(width: u32, height: u32) -> ImageFrame {
        ImageFrame {
            pixels: Array3::<u8>::zeros((height as usize, width as usize, Self::CHANNELS)),
        }
    }

    /// Wraps tightly packed RGB bytes (row-major, 3 bytes per pixel).
    pub fn from_rgb_bytes(width: u32, height: u32, bytes: Vec<u8>) -> Result<ImageFrame, SourceError> {
        let expected = width as usize * height as usize * Self::CHANNELS;
        if bytes.len() != expected {
            return Err(SourceError::InvalidFrame(format!(
                "expected {} bytes for {}x{} RGB, got {}",
                expected,
                width,
                height,
                bytes.len()
            )));
        }
        let pixels = Array3::from_shape_vec((height as usize, width as usize, Self::CHANNELS), bytes)
            .map_err(|e| SourceError::InvalidFrame(e.to_string()))?;
        Ok(ImageFrame { pixels })
    }

    /// Converts any decoded image into an RGB frame.
    pub fn from_dynamic_image(img: DynamicImage) -> ImageFrame {
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels = Array3::from_shape_vec(
            (height as usize, width as usize, Self::CHANNELS),
            rgb.into_raw(),
        )
        .unwrap_or_else(|_| Array3::zeros((0, 0, Self::CHANNELS)));
        ImageFrame { pixels }
    }

    //endregion

    //region Properties

    pub fn width(&self) -> u32 {
        self.pixels.shape()[1] as u32
    }

    pub fn height(&self) -> u32 {
        self.pixels.shape()[0] as u32
    }

    /// True when the frame holds no pixels
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Read-only access to the underlying (height, width, channel) array.
    pub fn pixels(&self) -> &Array3<u8> {
        &self.pixels
    }

    pub fn pixels_view(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }

    /// RGB value at (x, y), or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let (y, x) = (y as usize, x as usize);
        Some([
            self.pixels[(y, x, 0)],
            self.pixels[(y, x, 1)],
            self.pixels[(y, x, 2)],
        ])
    }

    /// Writes one pixel; coordinates outside the frame are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        if x >= self.width() || y >= self.height() {
            return;
        }
        let (y, x) = (y as usize, x as usize);
        for (channel, value) in rgb.into_iter().enumerate() {
            self.pixels[(y, x, channel)] = value;
        }
    }

    /// Fills a rectangle, clipped to the frame.
    pub fn fill_rect(&mut self, rect: Rect, rgb: [u8; 3]) {
        let right = rect.right().min(self.width());
        let bottom = rect.bottom().min(self.height());
        for y in rect.y..bottom {
            for x in rect.x..right {
                self.set_pixel(x, y, rgb);
            }
        }
    }

    /// Draws a rectangle outline of the given thickness, clipped to the frame.
    pub fn draw_rect_outline(&mut self, rect: Rect, thickness: u32, rgb: [u8; 3]) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        let t = thickness.max(1);
        let top = Rect::new(rect.x, rect.y, rect.width, t.min(rect.height));
        let bottom = Rect::new(
            rect.x,
            rect.bottom().saturating_sub(t).max(rect.y),
            rect.width,
            t.min(rect.height),
        );
        let left = Rect::new(rect.x, rect.y, t.min(rect.width), rect.height);
        let right = Rect::new(
            rect.right().saturating_sub(t).max(rect.x),
            rect.y,
            t.min(rect.width),
            rect.height,
        );
        for edge in [top, bottom, left, right] {
            self.fill_rect(edge, rgb);
        }
    }

    //endregion

    //region Export

    /// Exports the frame as an `image` crate buffer for saving or display.
    pub fn export_as_rgb_image(&self) -> Option<RgbImage> {
        let bytes = self.pixels.iter().copied().collect::<Vec<u8>>();
        RgbImage::from_raw(self.width(), self.height(), bytes)
    }

    //endregion
}
