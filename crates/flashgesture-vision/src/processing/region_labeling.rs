use ndarray::Array2;

use crate::Rect;

/// One 8-connected foreground component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabeledRegion {
    pub bounding_box: Rect,
    /// Number of foreground pixels in the component
    pub pixel_count: usize,
    /// Top-most, then left-most pixel as `(x, y)`
    pub seed: (usize, usize),
}

const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Finds every 8-connected component of non-zero pixels.
///
/// Components are returned in the row-major order of their first (top-most,
/// then left-most) pixel, which keeps the output stable across runs.
pub fn label_regions(mask: &Array2<u8>) -> Vec<LabeledRegion> {
    let (height, width) = mask.dim();
    let mut visited = Array2::<bool>::from_elem((height, width), false);
    let mut regions = Vec::new();
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if mask[(y, x)] == 0 || visited[(y, x)] {
                continue;
            }

            visited[(y, x)] = true;
            stack.push((y, x));
            let (mut min_x, mut min_y, mut max_x, mut max_y) = (x, y, x, y);
            let mut pixel_count = 0usize;

            while let Some((cy, cx)) = stack.pop() {
                pixel_count += 1;
                min_x = min_x.min(cx);
                max_x = max_x.max(cx);
                min_y = min_y.min(cy);
                max_y = max_y.max(cy);

                for (dx, dy) in NEIGHBORS {
                    let nx = cx as isize + dx;
                    let ny = cy as isize + dy;
                    if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                        continue;
                    }
                    let (nx, ny) = (nx as usize, ny as usize);
                    if mask[(ny, nx)] != 0 && !visited[(ny, nx)] {
                        visited[(ny, nx)] = true;
                        stack.push((ny, nx));
                    }
                }
            }

            regions.push(LabeledRegion {
                bounding_box: Rect::new(
                    min_x as u32,
                    min_y as u32,
                    (max_x - min_x + 1) as u32,
                    (max_y - min_y + 1) as u32,
                ),
                pixel_count,
                seed: (x, y),
            });
        }
    }

    regions
}
