//! Outer borders of foreground components and the area they enclose.
//!
//! Borders are followed through pixel centres with 8-connectivity, and the
//! enclosed area is the polygon area of that border. Holes inside a
//! component do not reduce its area, and components lying inside another
//! component's hole are not external and are skipped.

use std::collections::VecDeque;

use ndarray::Array2;

use crate::processing::label_regions;
use crate::Rect;

/// Neighbour offsets as `(dx, dy)`, counterclockwise on screen starting east
const DIRECTIONS: [(isize, isize); 8] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];
const WEST: usize = 4;

/// Outer border of one external component
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalContour {
    pub bounding_box: Rect,
    /// Border pixels as `(x, y)`, starting at the component's top-left pixel
    pub points: Vec<(usize, usize)>,
    /// Area enclosed by the border polygon
    pub area: f64,
}

/// Outer contours of every component not nested inside another one.
///
/// Returned in the row-major order of each component's top-left pixel.
pub fn external_contours(mask: &Array2<u8>) -> Vec<ExternalContour> {
    let outside = outside_background(mask);

    label_regions(mask)
        .into_iter()
        .filter(|region| {
            // the pixel above the seed is background; it decides nesting
            let (x, y) = region.seed;
            y == 0 || outside[(y - 1, x)]
        })
        .map(|region| {
            let points = trace_outer_contour(mask, region.seed);
            let area = contour_area(&points);
            ExternalContour {
                bounding_box: region.bounding_box,
                points,
                area,
            }
        })
        .collect()
}

/// Background pixels 4-connected to the frame edge.
pub fn outside_background(mask: &Array2<u8>) -> Array2<bool> {
    let (height, width) = mask.dim();
    let mut outside = Array2::<bool>::from_elem((height, width), false);
    let mut queue = VecDeque::new();

    for x in 0..width {
        visit(mask, x, 0, &mut outside, &mut queue);
        if height > 1 {
            visit(mask, x, height - 1, &mut outside, &mut queue);
        }
    }
    for y in 0..height {
        visit(mask, 0, y, &mut outside, &mut queue);
        if width > 1 {
            visit(mask, width - 1, y, &mut outside, &mut queue);
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        if x > 0 {
            visit(mask, x - 1, y, &mut outside, &mut queue);
        }
        if x + 1 < width {
            visit(mask, x + 1, y, &mut outside, &mut queue);
        }
        if y > 0 {
            visit(mask, x, y - 1, &mut outside, &mut queue);
        }
        if y + 1 < height {
            visit(mask, x, y + 1, &mut outside, &mut queue);
        }
    }

    outside
}

fn visit(
    mask: &Array2<u8>,
    x: usize,
    y: usize,
    outside: &mut Array2<bool>,
    queue: &mut VecDeque<(usize, usize)>,
) {
    if mask[(y, x)] == 0 && !outside[(y, x)] {
        outside[(y, x)] = true;
        queue.push_back((x, y));
    }
}

/// Follows the outer border of the component whose top-left pixel is `seed`.
///
/// `seed` must be the first pixel of its component in row-major order, so
/// its west and north neighbours are background.
pub fn trace_outer_contour(mask: &Array2<u8>, seed: (usize, usize)) -> Vec<(usize, usize)> {
    let start = (seed.0 as isize, seed.1 as isize);

    // clockwise from west for the first neighbour
    let Some(first) = (0..8)
        .map(|k| step(start, (WEST + 8 - k) % 8))
        .find(|&p| is_foreground(mask, p))
    else {
        return vec![seed];
    };

    let mut points = Vec::new();
    let mut previous = first;
    let mut current = start;
    loop {
        let back = direction(current, previous);
        let next = (1..=8)
            .map(|k| step(current, (back + k) % 8))
            .find(|&p| is_foreground(mask, p));
        points.push((current.0 as usize, current.1 as usize));

        // `previous` is foreground, so the search always ends on a pixel
        let Some(next) = next else {
            break;
        };
        if next == start && current == first {
            break;
        }
        previous = current;
        current = next;
    }

    points
}

/// Shoelace area of a closed polygon, always non-negative.
pub fn contour_area(points: &[(usize, usize)]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice_signed: i64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(&(x0, y0), &(x1, y1))| x0 as i64 * y1 as i64 - x1 as i64 * y0 as i64)
        .sum();
    twice_signed.unsigned_abs() as f64 / 2.0
}

fn step(p: (isize, isize), dir: usize) -> (isize, isize) {
    let (dx, dy) = DIRECTIONS[dir];
    (p.0 + dx, p.1 + dy)
}

fn direction(from: (isize, isize), to: (isize, isize)) -> usize {
    let delta = (to.0 - from.0, to.1 - from.1);
    DIRECTIONS.iter().position(|&d| d == delta).unwrap_or(WEST)
}

fn is_foreground(mask: &Array2<u8>, (x, y): (isize, isize)) -> bool {
    let (height, width) = mask.dim();
    x >= 0
        && y >= 0
        && (x as usize) < width
        && (y as usize) < height
        && mask[(y as usize, x as usize)] != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from_rows(rows: &[&str]) -> Array2<u8> {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        Array2::from_shape_fn((height, width), |(y, x)| {
            if rows[y].as_bytes()[x] == b'#' {
                255
            } else {
                0
            }
        })
    }

    #[test]
    fn test_square_border_runs_through_pixel_centres() {
        let mask = mask_from_rows(&["....", ".##.", ".##.", "...."]);
        let contours = external_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].points, vec![(1, 1), (1, 2), (2, 2), (2, 1)]);
        assert_eq!(contours[0].area, 1.0);
    }

    #[test]
    fn test_filled_rectangle_area() {
        let mask = Array2::<u8>::from_elem((4, 5), 255);
        let contours = external_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].area, 12.0);
        assert_eq!(contours[0].bounding_box, Rect::new(0, 0, 5, 4));
    }

    #[test]
    fn test_single_pixel_and_line_enclose_nothing() {
        let mask = mask_from_rows(&["#....", ".....", ".###."]);
        let contours = external_contours(&mask);
        assert_eq!(contours.len(), 2);
        assert_eq!(contours[0].points, vec![(0, 0)]);
        assert_eq!(contours[0].area, 0.0);
        assert_eq!(contours[1].area, 0.0);
    }

    #[test]
    fn test_ring_area_includes_its_hole() {
        let mask = mask_from_rows(&[
            "#######",
            "#.....#",
            "#.....#",
            "#.....#",
            "#.....#",
            "#.....#",
            "#######",
        ]);
        let contours = external_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].area, 36.0);
    }

    #[test]
    fn test_component_inside_a_hole_is_skipped() {
        let mask = mask_from_rows(&[
            ".........",
            ".#######.",
            ".#.....#.",
            ".#.....#.",
            ".#..#..#.",
            ".#.....#.",
            ".#.....#.",
            ".#######.",
            ".........",
        ]);
        assert_eq!(label_regions(&mask).len(), 2);
        let contours = external_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].bounding_box, Rect::new(1, 1, 7, 7));
    }

    #[test]
    fn test_open_ring_does_not_nest() {
        let mask = mask_from_rows(&[
            ".........",
            ".###.###.",
            ".#.....#.",
            ".#..#..#.",
            ".#.....#.",
            ".#######.",
            ".........",
        ]);
        assert_eq!(external_contours(&mask).len(), 2);
    }

    #[test]
    fn test_outside_background() {
        let mask = mask_from_rows(&["###", "#.#", "###", "..."]);
        let outside = outside_background(&mask);
        assert!(!outside[(1, 1)]);
        assert!(outside[(3, 0)]);
        assert!(!outside[(0, 0)]);
    }
}
