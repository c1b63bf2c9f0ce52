//! Tests for the flash event tracker using the public API.
//!
//! Timestamps are chosen around the default parameters: 500ms debounce,
//! 2000ms retention window, dim trigger at exactly two flashes.

use flashgesture_config::DetectionParameters;
use flashgesture_core::{FlashEventTracker, TorchState};

//region Helper Functions

fn default_tracker() -> FlashEventTracker {
    FlashEventTracker::new(&DetectionParameters::default())
        .expect("Default parameters should be valid")
}

/// Feed (timestamp, present) pairs, returning how many dim triggers fired.
fn feed(tracker: &mut FlashEventTracker, frames: &[(u64, bool)]) -> usize {
    frames
        .iter()
        .filter(|(ts, present)| tracker.observe(*ts, *present).dim_trigger)
        .count()
}

//endregion

#[cfg(test)]
mod test_tracker_transitions {
    use super::*;

    #[test]
    fn test_no_regions_stays_off() {
        let mut tracker = default_tracker();
        for ts in (0..3000).step_by(33) {
            let update = tracker.observe(ts, false);
            assert_eq!(update.flash, None);
        }
        assert_eq!(tracker.torch_state(), TorchState::default());
        assert_eq!(tracker.flash_count(), 0);
    }

    #[test]
    fn test_absent_frame_returns_to_off() {
        let mut tracker = default_tracker();
        tracker.observe(0, true);
        assert!(tracker.torch_state().torch_on);
        tracker.observe(33, false);
        assert!(!tracker.torch_state().torch_on);
    }

    #[test]
    fn test_two_flashes_trigger_exactly_once() {
        let mut tracker = default_tracker();
        let triggers = feed(
            &mut tracker,
            &[
                (0, true),
                (33, true),
                (100, false),
                (400, false),
                (700, true),
                (733, true),
                (766, true),
            ],
        );
        assert_eq!(triggers, 1);
        assert_eq!(tracker.flash_count(), 2);
    }

    #[test]
    fn test_rise_within_debounce_is_absorbed() {
        let mut tracker = default_tracker();
        let triggers = feed(&mut tracker, &[(0, true), (100, false), (300, true), (330, true)]);
        assert_eq!(triggers, 0);
        assert_eq!(tracker.flash_count(), 1);
        assert!(!tracker.torch_state().torch_on);
    }

    #[test]
    fn test_fast_flicker_counts_once() {
        let mut tracker = default_tracker();
        let mut frames = Vec::new();
        for i in 0..10u64 {
            frames.push((i * 40, i % 2 == 0));
        }
        feed(&mut tracker, &frames);
        assert_eq!(tracker.flash_count(), 1);
    }

    #[test]
    fn test_old_flash_ages_out_of_window() {
        let mut tracker = default_tracker();
        tracker.observe(0, true);
        tracker.observe(100, false);

        let update = tracker.observe(2500, true);
        assert!(update.flash.is_some());
        assert_eq!(update.flash_count, 1);
        assert!(!update.dim_trigger);
    }

    #[test]
    fn test_third_flash_does_not_retrigger() {
        let mut tracker = default_tracker();
        let triggers = feed(
            &mut tracker,
            &[
                (0, true),
                (50, false),
                (600, true),
                (650, false),
                (1200, true),
            ],
        );
        assert_eq!(triggers, 1);
        assert_eq!(tracker.flash_count(), 3);
    }

    #[test]
    fn test_trigger_rearms_after_window() {
        let mut tracker = default_tracker();
        let triggers = feed(
            &mut tracker,
            &[
                (0, true),
                (50, false),
                (600, true),
                (650, false),
                // both earlier flashes are more than 2000ms old by now
                (5000, true),
                (5050, false),
                (5600, true),
            ],
        );
        assert_eq!(triggers, 2);
    }
}

#[cfg(test)]
mod test_tracker_reset {
    use super::*;

    #[test]
    fn test_reset_count_keeps_torch_state() {
        let mut tracker = default_tracker();
        tracker.observe(0, true);
        tracker.observe(100, false);
        tracker.observe(700, true);
        let before = tracker.torch_state();

        tracker.reset_count();

        assert_eq!(tracker.flash_count(), 0);
        assert_eq!(tracker.events().count(), 0);
        assert_eq!(tracker.torch_state(), before);
        assert!(tracker.torch_state().torch_on);
    }

    #[test]
    fn test_count_restarts_after_reset() {
        let mut tracker = default_tracker();
        feed(&mut tracker, &[(0, true), (100, false), (700, true)]);
        tracker.reset_count();

        tracker.observe(800, false);
        let update = tracker.observe(1400, true);
        assert_eq!(update.flash_count, 1);
        assert!(!update.dim_trigger);
    }
}

#[cfg(test)]
mod test_tracker_parameters {
    use super::*;

    #[test]
    fn test_custom_trigger_count() {
        let params = DetectionParameters {
            trigger_flash_count: 3,
            flash_debounce_ms: 100,
            ..Default::default()
        };
        let mut tracker = FlashEventTracker::new(&params).unwrap();
        let triggers = feed(
            &mut tracker,
            &[
                (0, true),
                (50, false),
                (200, true),
                (250, false),
                (400, true),
            ],
        );
        assert_eq!(triggers, 1);
        assert_eq!(tracker.flash_count(), 3);
    }
}
