//! Tests for the image sequence source and the runner observer.
//!
//! Frames are written as PNG files into a temporary directory, then replayed
//! through the same controller the binary builds.

use std::path::Path;

use flashgesture_actuator::{Actuator, ActuatorCommand, CommandError, ConnectError};
use flashgesture_config::{ActuatorConfig, DetectionParameters};
use flashgesture_core::{ActuationTiming, GestureController, TickOutcome};
use flashgesture_runner::{ImageSequenceSource, RunnerObserver};
use flashgesture_vision::{FrameSource, ImageFrame, Rect, SourceError};
use tempfile::TempDir;

//region Helper Functions

fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

fn write_frame(dir: &Path, name: &str, lit: bool) {
    let mut frame = ImageFrame::new(80, 60);
    if lit {
        frame.fill_rect(Rect::new(20, 10, 30, 30), [255, 255, 255]);
    }
    frame
        .export_as_rgb_image()
        .expect("Frame should export")
        .save(dir.join(name))
        .expect("Failed to write test frame");
}

/// Writes frames named so that lexical order is playback order.
fn write_sequence(dir: &Path, pattern: &[bool]) {
    for (i, lit) in pattern.iter().enumerate() {
        write_frame(dir, &format!("frame_{:03}.png", i), *lit);
    }
}

#[derive(Default)]
struct CountingActuator {
    connected: bool,
    sent: Vec<ActuatorCommand>,
}

impl Actuator for CountingActuator {
    fn connect(&mut self) -> Result<(), ConnectError> {
        self.connected = true;
        Ok(())
    }

    fn send_command(&mut self, command: ActuatorCommand) -> Result<(), CommandError> {
        if !self.connected {
            return Err(CommandError::NotConnected);
        }
        self.sent.push(command);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn shutdown(&mut self) {
        if self.connected {
            self.sent.push(ActuatorCommand::Reset);
        }
        self.connected = false;
    }
}

//endregion

#[cfg(test)]
mod test_image_sequence_source {
    use super::*;

    #[test]
    fn test_open_sorts_and_filters_files() {
        let dir = create_temp_dir();
        write_frame(dir.path(), "b.png", false);
        write_frame(dir.path(), "a.png", true);
        std::fs::write(dir.path().join("notes.txt"), "not a frame").unwrap();

        let source = ImageSequenceSource::open(dir.path(), false).unwrap();
        assert_eq!(source.len(), 2);
        let names: Vec<_> = source
            .paths()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_open_empty_directory_fails() {
        let dir = create_temp_dir();
        assert!(ImageSequenceSource::open(dir.path(), true).is_err());
    }

    #[test]
    fn test_open_missing_directory_fails() {
        let dir = create_temp_dir();
        assert!(ImageSequenceSource::open(dir.path().join("missing"), true).is_err());
    }

    #[test]
    fn test_without_loop_source_is_exhausted() {
        let dir = create_temp_dir();
        write_sequence(dir.path(), &[true, false]);

        let mut source = ImageSequenceSource::open(dir.path(), false).unwrap();
        let first = source.read_frame().unwrap();
        assert_eq!(first.pixel(30, 20), Some([255, 255, 255]));
        assert!(source.read_frame().is_ok());
        assert!(matches!(source.read_frame(), Err(SourceError::Exhausted)));
        assert_eq!(source.frames_served(), 2);
    }

    #[test]
    fn test_loop_wraps_around() {
        let dir = create_temp_dir();
        write_sequence(dir.path(), &[true, false]);

        let mut source = ImageSequenceSource::open(dir.path(), true).unwrap();
        for _ in 0..5 {
            assert!(source.read_frame().is_ok());
        }
        assert_eq!(source.frames_served(), 5);
    }

    #[test]
    fn test_preload_matches_lazy_decode() {
        let dir = create_temp_dir();
        write_sequence(dir.path(), &[true, false, true]);

        let mut lazy = ImageSequenceSource::open(dir.path(), false).unwrap();
        let mut eager = ImageSequenceSource::open(dir.path(), false).unwrap();
        eager.preload().unwrap();

        for _ in 0..3 {
            assert_eq!(lazy.read_frame().unwrap(), eager.read_frame().unwrap());
        }
    }

    #[test]
    fn test_corrupt_file_is_read_failure() {
        let dir = create_temp_dir();
        std::fs::write(dir.path().join("broken.png"), b"not a png").unwrap();

        let mut source = ImageSequenceSource::open(dir.path(), false).unwrap();
        assert!(matches!(source.read_frame(), Err(SourceError::ReadFailed(_))));
        assert!(source.preload().is_err());
    }
}

#[cfg(test)]
mod test_runner_pipeline {
    use super::*;

    #[test]
    fn test_recorded_double_flash_dims_once() {
        let dir = create_temp_dir();
        write_sequence(dir.path(), &[true, true, false, false, true, true]);
        let mut source = ImageSequenceSource::open(dir.path(), false).unwrap();

        let mut controller = GestureController::new(
            &DetectionParameters::default(),
            ActuationTiming::from(&ActuatorConfig::default()),
            CountingActuator::default(),
            RunnerObserver::new(None).unwrap(),
        )
        .unwrap();
        controller.start();

        // 300ms per frame: lit 0-300, dark 600-900, lit from 1200
        let mut now = 0;
        while controller.tick(now, &mut source) != TickOutcome::SourceExhausted {
            now += 300;
        }

        assert_eq!(controller.actuator().sent, vec![ActuatorCommand::Dim]);
        assert_eq!(controller.reset_due_ms(), Some(11_200));
    }

    #[test]
    fn test_annotated_frames_are_written() {
        let frames = create_temp_dir();
        let output = create_temp_dir();
        let annotated_dir = output.path().join("annotated");
        write_sequence(frames.path(), &[true, false]);
        let mut source = ImageSequenceSource::open(frames.path(), false).unwrap();

        let mut controller = GestureController::new(
            &DetectionParameters::default(),
            ActuationTiming {
                actuator_enabled: false,
                ..ActuationTiming::from(&ActuatorConfig::default())
            },
            CountingActuator::default(),
            RunnerObserver::new(Some(&annotated_dir)).unwrap(),
        )
        .unwrap();
        controller.start();
        controller.toggle_debug_annotations();

        controller.tick(0, &mut source);
        controller.tick(100, &mut source);

        assert_eq!(controller.observer().frames_written(), 2);
        let saved = image::open(annotated_dir.join("annotated_000000.png"))
            .unwrap()
            .to_rgb8();
        // box outline drawn at the blurred region's corner
        assert_eq!(saved.get_pixel(18, 8).0, [0, 255, 0]);
    }
}
