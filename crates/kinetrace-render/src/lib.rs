//! Kinetrace Render - skeleton overlay compositing
//!
//! Aligns stored pose frames to video frames by frame rate and draws
//! joints and bones onto a copy of each decoded frame. Video decode
//! and encode stay behind the [`FrameSource`] / [`FrameSink`] traits;
//! this crate only consumes and produces RGB frame buffers.

pub mod align;
pub mod config;
pub mod overlay;
pub mod pipeline;
pub mod video;

pub use align::*;
pub use config::*;
pub use overlay::*;
pub use pipeline::*;
pub use video::*;
