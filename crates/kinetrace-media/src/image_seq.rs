//! Image-sequence video directories
//!
//! Layout: `meta.json` (fps, dimensions, frame count) next to
//! `frame_000000.png` .. `frame_NNNNNN.png`. The sink stages into a
//! `<dir>.partial` sibling and renames on finish, so a crashed or
//! failed run never leaves a directory that claims success.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;
use serde::{Deserialize, Serialize};

use kinetrace_core::{KinetraceError, KinetraceResult};
use kinetrace_render::{FrameSink, FrameSource};

/// Sidecar metadata for an image-sequence directory.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct SequenceMeta {
    pub fps: f64,
    pub width: u32,
    pub height: u32,
    pub frame_count: usize,
}

const META_FILE: &str = "meta.json";

fn frame_file(index: usize) -> String {
    format!("frame_{:06}.png", index)
}

/// Reads frames from an image-sequence directory in order.
pub struct ImageSequenceSource {
    directory: PathBuf,
    meta: SequenceMeta,
    cursor: usize,
}

impl ImageSequenceSource {
    pub fn open(directory: &Path) -> KinetraceResult<Self> {
        if !directory.is_dir() {
            return Err(KinetraceError::VideoSource(format!(
                "video directory not found: {}",
                directory.display()
            )));
        }
        let raw = fs::read_to_string(directory.join(META_FILE))?;
        let meta: SequenceMeta = serde_json::from_str(&raw).map_err(|e| {
            KinetraceError::VideoSource(format!(
                "invalid {} in {}: {}",
                META_FILE,
                directory.display(),
                e
            ))
        })?;
        if !(meta.fps > 0.0) {
            return Err(KinetraceError::VideoSource(format!(
                "non-positive fps in {}",
                directory.display()
            )));
        }
        Ok(ImageSequenceSource {
            directory: directory.to_path_buf(),
            meta,
            cursor: 0,
        })
    }

    pub fn meta(&self) -> &SequenceMeta {
        &self.meta
    }
}

impl FrameSource for ImageSequenceSource {
    fn fps(&self) -> f64 {
        self.meta.fps
    }

    fn width(&self) -> u32 {
        self.meta.width
    }

    fn height(&self) -> u32 {
        self.meta.height
    }

    fn frame_count(&self) -> usize {
        self.meta.frame_count
    }

    fn next_frame(&mut self) -> KinetraceResult<Option<RgbImage>> {
        if self.cursor >= self.meta.frame_count {
            return Ok(None);
        }
        let path = self.directory.join(frame_file(self.cursor));
        let frame = image::open(&path)
            .map_err(|e| KinetraceError::Image(format!("{}: {}", path.display(), e)))?
            .to_rgb8();
        self.cursor += 1;
        Ok(Some(frame))
    }
}

/// Writes frames into a staging directory, finalized by rename.
pub struct ImageSequenceSink {
    staging: PathBuf,
    target: PathBuf,
    fps: f64,
    dimensions: Option<(u32, u32)>,
    frames_written: usize,
    finished: bool,
}

impl ImageSequenceSink {
    pub fn create(target: &Path, fps: f64) -> KinetraceResult<Self> {
        let mut staging = target.as_os_str().to_owned();
        staging.push(".partial");
        let staging = PathBuf::from(staging);

        if staging.exists() {
            fs::remove_dir_all(&staging)?;
        }
        fs::create_dir_all(&staging)?;

        Ok(ImageSequenceSink {
            staging,
            target: target.to_path_buf(),
            fps,
            dimensions: None,
            frames_written: 0,
            finished: false,
        })
    }
}

impl FrameSink for ImageSequenceSink {
    fn write_frame(&mut self, frame: &RgbImage) -> KinetraceResult<()> {
        let dims = (frame.width(), frame.height());
        match self.dimensions {
            None => self.dimensions = Some(dims),
            Some(expected) if expected != dims => {
                return Err(KinetraceError::VideoSink(format!(
                    "frame size changed from {:?} to {:?}",
                    expected, dims
                )));
            }
            Some(_) => {}
        }

        let path = self.staging.join(frame_file(self.frames_written));
        frame
            .save(&path)
            .map_err(|e| KinetraceError::Image(format!("{}: {}", path.display(), e)))?;
        self.frames_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> KinetraceResult<()> {
        let (width, height) = self.dimensions.unwrap_or((0, 0));
        let meta = SequenceMeta {
            fps: self.fps,
            width,
            height,
            frame_count: self.frames_written,
        };
        let raw = serde_json::to_string_pretty(&meta)
            .map_err(|e| KinetraceError::VideoSink(e.to_string()))?;
        fs::write(self.staging.join(META_FILE), raw)?;

        if self.target.exists() {
            fs::remove_dir_all(&self.target)?;
        }
        fs::rename(&self.staging, &self.target)?;
        self.finished = true;

        tracing::debug!(
            frames = self.frames_written,
            target = %self.target.display(),
            "finalized image sequence"
        );
        Ok(())
    }
}

impl Drop for ImageSequenceSink {
    fn drop(&mut self) {
        if !self.finished {
            let _ = fs::remove_dir_all(&self.staging);
        }
    }
}
