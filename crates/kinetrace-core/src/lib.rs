//! Kinetrace Core - Pose data model and primitives
//!
//! This crate defines the types shared across the kinetrace pipeline:
//! - Keypoint, Person, Frame, Header, PoseSequence
//! - Keypoint schemas (BODY_25, BODY_25 + face + hands) with bone tables
//! - The sequence builder
//! - Error taxonomy

pub mod builder;
pub mod error;
pub mod schema;
pub mod types;

pub use builder::*;
pub use error::*;
pub use schema::*;
pub use types::*;
