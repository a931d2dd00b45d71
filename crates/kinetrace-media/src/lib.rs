//! Kinetrace Media - frame source/sink implementations
//!
//! The renderer talks to video through the `FrameSource`/`FrameSink`
//! traits; this crate supplies the implementations shipped with the
//! tool: an image-sequence directory format (one PNG per frame plus
//! a metadata sidecar) and in-memory doubles for tests. Proper
//! container decode/encode belongs to an external collaborator and
//! can slot in behind the same traits.

pub mod image_seq;
pub mod memory;

pub use image_seq::*;
pub use memory::*;
