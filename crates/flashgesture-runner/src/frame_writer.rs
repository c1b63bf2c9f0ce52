// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flashgesture_core::{
    DebugInfo, FlashEvent, GestureError, GestureObserver, GestureStatus, LoggingObserver,
};
use flashgesture_vision::ImageFrame;
use tracing::warn;

/// Logs every notification and, when given a directory, saves the annotated
/// debug frames there as numbered PNGs.
pub struct RunnerObserver {
    log: LoggingObserver,
    output_dir: Option<PathBuf>,
    frames_written: u64,
}

impl RunnerObserver {
    pub fn new(output_dir: Option<&Path>) -> Result<Self> {
        if let Some(dir) = output_dir {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        Ok(Self {
            log: LoggingObserver,
            output_dir: output_dir.map(Path::to_path_buf),
            frames_written: 0,
        })
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    fn save(&mut self, dir: &Path, frame: &ImageFrame) -> Result<()> {
        let path = dir.join(format!("annotated_{:06}.png", self.frames_written));
        let img = frame
            .export_as_rgb_image()
            .context("Frame buffer does not match its dimensions")?;
        img.save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        self.frames_written += 1;
        Ok(())
    }
}

impl GestureObserver for RunnerObserver {
    fn on_flash_detected(&mut self, event: &FlashEvent, flash_count: usize) {
        self.log.on_flash_detected(event, flash_count);
    }

    fn on_status_changed(&mut self, status: &GestureStatus) {
        self.log.on_status_changed(status);
    }

    fn on_error(&mut self, error: &GestureError) {
        self.log.on_error(error);
    }

    fn on_debug_frame(&mut self, frame: &ImageFrame, info: &DebugInfo) {
        self.log.on_debug_frame(frame, info);
        if let Some(dir) = self.output_dir.clone() {
            if let Err(e) = self.save(&dir, frame) {
                warn!(target: "flashgesture-runner", "Could not save debug frame: {:#}", e);
            }
        }
    }
}
