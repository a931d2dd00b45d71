//! Video collaborator seam
//!
//! Container decode/encode belongs to an external collaborator. The
//! renderer only needs a sequential source of decoded RGB frames that
//! knows its own fps and count, and a sink that accepts frames in
//! order and finalizes the output on finish.

use image::RgbImage;
use kinetrace_core::KinetraceResult;

/// Sequential source of decoded video frames.
pub trait FrameSource: Send {
    /// Frame rate reported by the container
    fn fps(&self) -> f64;
    /// Frame width in pixels
    fn width(&self) -> u32;
    /// Frame height in pixels
    fn height(&self) -> u32;
    /// Total frames the source will yield
    fn frame_count(&self) -> usize;
    /// Next decoded frame, or None at end of stream
    fn next_frame(&mut self) -> KinetraceResult<Option<RgbImage>>;
}

/// Ordered sink for composited frames.
///
/// `finish` finalizes the output atomically; a sink dropped without
/// finish must leave no committed output behind.
pub trait FrameSink {
    fn write_frame(&mut self, frame: &RgbImage) -> KinetraceResult<()>;
    fn finish(&mut self) -> KinetraceResult<()>;
}
