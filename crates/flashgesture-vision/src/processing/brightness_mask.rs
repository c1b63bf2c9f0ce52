use ndarray::{Array2, Axis, Zip};

use crate::ImageFrame;

/// Value written for pixels that pass the mask
pub const MASK_ON: u8 = 255;

/// HSV value and saturation of one RGB pixel, both on the 0-255 scale.
///
/// Value is the largest channel. Saturation is `255 * (max - min) / max`,
/// rounded, and 0 for black.
pub fn value_and_saturation(r: u8, g: u8, b: u8) -> (u8, u8) {
    let max = r.max(g).max(b) as u32;
    let min = r.min(g).min(b) as u32;
    if max == 0 {
        return (0, 0);
    }
    let saturation = (255 * (max - min) + max / 2) / max;
    (max as u8, saturation as u8)
}

/// Binary mask of near-white bright pixels.
///
/// A pixel is on (`MASK_ON`) when its value is at least `min_value` and its
/// saturation is at most `max_saturation`; every other pixel is 0. Rows are
/// processed in parallel.
pub fn brightness_mask(frame: &ImageFrame, min_value: u8, max_saturation: u8) -> Array2<u8> {
    let pixels = frame.pixels();
    let mut mask = Array2::<u8>::zeros((frame.height() as usize, frame.width() as usize));

    Zip::from(&mut mask)
        .and(pixels.lanes(Axis(2)))
        .par_for_each(|out, rgb| {
            let (value, saturation) = value_and_saturation(rgb[0], rgb[1], rgb[2]);
            *out = if value >= min_value && saturation <= max_saturation {
                MASK_ON
            } else {
                0
            };
        });

    mask
}
