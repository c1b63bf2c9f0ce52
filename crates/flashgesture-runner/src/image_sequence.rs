// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Image sequence frame source
//!
//! Replays a directory of still images as camera frames, in file name order.
//! Useful for offline runs and reproducible gesture recordings.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use flashgesture_vision::{FrameSource, ImageFrame, SourceError};
use rayon::prelude::*;
use tracing::{debug, info};

/// File extensions recognized as frames (compared case-insensitively)
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff"];

/// Frame source backed by image files on disk
pub struct ImageSequenceSource {
    paths: Vec<PathBuf>,
    cursor: usize,
    loop_playback: bool,
    /// Decoded frames, when preloaded
    preloaded: Option<Vec<ImageFrame>>,
    frames_served: u64,
}

impl ImageSequenceSource {
    /// Collect every image file in `dir`, sorted by file name.
    pub fn open(dir: impl AsRef<Path>, loop_playback: bool) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read frames directory: {}", dir.display()))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("Failed to list {}", dir.display()))?
                .path();
            if path.is_file() && is_image_file(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            bail!("No image files found in {}", dir.display());
        }

        info!(
            target: "flashgesture-runner",
            "Opened image sequence: {} frames from {} (loop: {})",
            paths.len(),
            dir.display(),
            loop_playback
        );

        Ok(Self {
            paths,
            cursor: 0,
            loop_playback,
            preloaded: None,
            frames_served: 0,
        })
    }

    /// Decode every frame up front, in parallel, so playback does no I/O.
    pub fn preload(&mut self) -> Result<()> {
        let frames = self
            .paths
            .par_iter()
            .map(|path| decode(path).map_err(anyhow::Error::from))
            .collect::<Result<Vec<_>>>()?;
        debug!(
            target: "flashgesture-runner",
            "Preloaded {} frames",
            frames.len()
        );
        self.preloaded = Some(frames);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn frames_served(&self) -> u64 {
        self.frames_served
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl FrameSource for ImageSequenceSource {
    fn read_frame(&mut self) -> Result<ImageFrame, SourceError> {
        if self.cursor >= self.paths.len() {
            if !self.loop_playback {
                return Err(SourceError::Exhausted);
            }
            debug!(target: "flashgesture-runner", "Looping image sequence");
            self.cursor = 0;
        }

        let index = self.cursor;
        self.cursor += 1;

        let frame = match &self.preloaded {
            Some(frames) => frames[index].clone(),
            None => decode(&self.paths[index])?,
        };
        self.frames_served += 1;
        Ok(frame)
    }
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

fn decode(path: &Path) -> Result<ImageFrame, SourceError> {
    let img = image::open(path)
        .map_err(|e| SourceError::ReadFailed(format!("{}: {}", path.display(), e)))?;
    Ok(ImageFrame::from_dynamic_image(img))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file(Path::new("a/frame_001.png")));
        assert!(is_image_file(Path::new("frame.JPG")));
        assert!(is_image_file(Path::new("frame.tiff")));
        assert!(!is_image_file(Path::new("notes.txt")));
        assert!(!is_image_file(Path::new("no_extension")));
    }
}
