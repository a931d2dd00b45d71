//! Kinetrace Wire - the binary pose file format
//!
//! File = Fixed Header + frame blocks, all little-endian:
//!
//! - 32-byte fixed header (magic, version, schema, fps, dimensions,
//!   keypoints per person, frame count)
//! - per frame: person count (u16), then per person
//!   `keypoints_per_person` x (x, y, confidence) as three f32
//!
//! The format is self-describing (magic + version gate old readers
//! away from new files), compact (no padding for ragged person
//! counts), and streamable (strictly sequential in both directions).

pub mod codec;
pub mod header;

pub use codec::*;
pub use header::*;
