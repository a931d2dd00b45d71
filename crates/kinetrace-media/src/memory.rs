//! In-memory frame source/sink doubles
//!
//! Used by integration tests and callers that already hold decoded
//! frames.

use image::RgbImage;

use kinetrace_core::KinetraceResult;
use kinetrace_render::{FrameSink, FrameSource};

/// Frame source over a pre-decoded frame list.
pub struct MemoryFrameSource {
    fps: f64,
    frames: Vec<RgbImage>,
    cursor: usize,
}

impl MemoryFrameSource {
    pub fn new(frames: Vec<RgbImage>, fps: f64) -> Self {
        MemoryFrameSource {
            fps,
            frames,
            cursor: 0,
        }
    }
}

impl FrameSource for MemoryFrameSource {
    fn fps(&self) -> f64 {
        self.fps
    }

    fn width(&self) -> u32 {
        self.frames.first().map(|f| f.width()).unwrap_or(0)
    }

    fn height(&self) -> u32 {
        self.frames.first().map(|f| f.height()).unwrap_or(0)
    }

    fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn next_frame(&mut self) -> KinetraceResult<Option<RgbImage>> {
        let frame = self.frames.get(self.cursor).cloned();
        self.cursor += 1;
        Ok(frame)
    }
}

/// Frame sink collecting into memory.
#[derive(Default)]
pub struct MemoryFrameSink {
    frames: Vec<RgbImage>,
    finished: bool,
}

impl MemoryFrameSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[RgbImage] {
        &self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for MemoryFrameSink {
    fn write_frame(&mut self, frame: &RgbImage) -> KinetraceResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn finish(&mut self) -> KinetraceResult<()> {
        self.finished = true;
        Ok(())
    }
}
