//! Kinetrace OpenPose - per-frame detection record parser
//!
//! Reads a directory of OpenPose JSON output (one record per video
//! frame), orders the files by the numeric frame index embedded in
//! each file name, and decodes the flat keypoint triple arrays into
//! typed frames.
//!
//! File order is never taken from the directory listing: OpenPose
//! zero-padding is not consistent across producers, so lexicographic
//! order can misorder frames. Every file must carry a numeric index.

pub mod parser;
pub mod record;

pub use parser::*;
pub use record::*;
