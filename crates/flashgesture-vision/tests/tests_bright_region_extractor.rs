//! Tests for bright region extraction using the public API.
//!
//! Frames are synthesized in memory: black backgrounds with solid squares of
//! known color, so expected boxes can be computed by hand. The 5x5 smoothing
//! step grows a hard-edged square by exactly two pixels on every side that is
//! not clipped by the frame border. Region area is measured inside the outer
//! border through pixel centres, so a filled w x h box encloses (w-1) x (h-1).

use flashgesture_config::DetectionParameters;
use flashgesture_vision::{BrightRegionExtractor, ImageFrame, Rect};

//region Helper Functions

const WHITE: [u8; 3] = [255, 255, 255];

fn frame_with_squares(squares: &[(Rect, [u8; 3])]) -> ImageFrame {
    let mut frame = ImageFrame::new(640, 480);
    for (rect, rgb) in squares {
        frame.fill_rect(*rect, *rgb);
    }
    frame
}

fn default_extractor() -> BrightRegionExtractor {
    BrightRegionExtractor::new(&DetectionParameters::default())
        .expect("Default parameters should be valid")
}

//endregion

#[cfg(test)]
mod test_extraction_basic {
    use super::*;

    #[test]
    fn test_dark_frame_has_no_regions() {
        let extractor = default_extractor();
        let frame = ImageFrame::new(640, 480);
        assert!(extractor.extract(&frame).is_empty());
    }

    #[test]
    fn test_white_square_is_found_with_blur_margin() {
        let extractor = default_extractor();
        let frame = frame_with_squares(&[(Rect::new(100, 100, 30, 30), WHITE)]);

        let regions = extractor.extract_regions(&frame);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].bounding_box, Rect::new(98, 98, 34, 34));
        assert_eq!(regions[0].area, 33.0 * 33.0);
    }

    #[test]
    fn test_square_on_frame_corner_is_clipped() {
        let extractor = default_extractor();
        let frame = frame_with_squares(&[(Rect::new(0, 0, 30, 30), WHITE)]);

        let boxes = extractor.extract(&frame);
        assert_eq!(boxes, vec![Rect::new(0, 0, 32, 32)]);
    }

    #[test]
    fn test_two_squares_in_row_major_order() {
        let extractor = default_extractor();
        let frame = frame_with_squares(&[
            (Rect::new(300, 200, 30, 30), WHITE),
            (Rect::new(50, 50, 30, 30), WHITE),
        ]);

        let boxes = extractor.extract(&frame);
        assert_eq!(
            boxes,
            vec![Rect::new(48, 48, 34, 34), Rect::new(298, 198, 34, 34)]
        );
    }

    #[test]
    fn test_empty_frame_has_no_regions() {
        let extractor = default_extractor();
        assert!(extractor.extract(&ImageFrame::new(0, 0)).is_empty());
    }
}

#[cfg(test)]
mod test_extraction_filters {
    use super::*;

    #[test]
    fn test_saturated_color_is_rejected() {
        let extractor = default_extractor();
        let frame = frame_with_squares(&[(Rect::new(100, 100, 40, 40), [255, 0, 0])]);
        assert!(extractor.extract(&frame).is_empty());
    }

    #[test]
    fn test_small_region_is_filtered_by_area() {
        let extractor = default_extractor();
        // 10x10 grows to 14x14, enclosing 13x13 = 169, below the default 500
        let frame = frame_with_squares(&[(Rect::new(200, 200, 10, 10), WHITE)]);
        assert!(extractor.extract(&frame).is_empty());

        let params = DetectionParameters {
            min_region_area: 169.0,
            ..Default::default()
        };
        let permissive = BrightRegionExtractor::new(&params).unwrap();
        assert_eq!(permissive.extract(&frame), vec![Rect::new(198, 198, 14, 14)]);
    }

    #[test]
    fn test_hollow_beam_area_includes_its_dark_centre() {
        let extractor = default_extractor();
        // 1px ring with a 20x20 outer edge; only 380 lit pixels after smoothing
        let mut frame = frame_with_squares(&[(Rect::new(40, 40, 20, 20), WHITE)]);
        frame.fill_rect(Rect::new(41, 41, 18, 18), [0, 0, 0]);

        let regions = extractor.extract_regions(&frame);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].bounding_box, Rect::new(38, 38, 24, 24));
        assert_eq!(regions[0].area, 23.0 * 23.0);
    }

    #[test]
    fn test_brightness_threshold_is_inclusive_and_configurable() {
        let gray = [200, 200, 200];
        let frame = frame_with_squares(&[(Rect::new(100, 100, 30, 30), gray)]);

        assert!(default_extractor().extract(&frame).is_empty());

        let params = DetectionParameters {
            brightness_threshold: 200,
            ..Default::default()
        };
        let extractor = BrightRegionExtractor::new(&params).unwrap();
        assert_eq!(extractor.extract(&frame).len(), 1);
    }

    #[test]
    fn test_near_white_within_saturation_bound_is_kept() {
        let extractor = default_extractor();
        let frame = frame_with_squares(&[(Rect::new(100, 100, 30, 30), [250, 240, 230])]);
        assert_eq!(extractor.extract(&frame).len(), 1);
    }
}

#[cfg(test)]
mod test_extraction_properties {
    use super::*;

    #[test]
    fn test_extraction_is_deterministic() {
        let extractor = default_extractor();
        let frame = frame_with_squares(&[
            (Rect::new(10, 10, 40, 25), WHITE),
            (Rect::new(400, 300, 60, 60), WHITE),
        ]);
        let first = extractor.extract(&frame);
        for _ in 0..5 {
            assert_eq!(extractor.extract(&frame), first);
        }
    }

    #[test]
    fn test_annotate_draws_green_outline_only() {
        let extractor = default_extractor();
        let mut frame = frame_with_squares(&[(Rect::new(100, 100, 30, 30), WHITE)]);
        let boxes = extractor.extract(&frame);

        BrightRegionExtractor::annotate(&mut frame, &boxes);

        assert_eq!(frame.pixel(98, 98), Some([0, 255, 0]));
        assert_eq!(frame.pixel(99, 99), Some([0, 255, 0]));
        assert_eq!(frame.pixel(131, 131), Some([0, 255, 0]));
        // interior untouched, outside untouched
        assert_eq!(frame.pixel(115, 115), Some(WHITE));
        assert_eq!(frame.pixel(97, 97), Some([0, 0, 0]));
    }
}
