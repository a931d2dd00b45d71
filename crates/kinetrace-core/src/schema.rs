//! Keypoint schemas - fixed keypoint orderings and skeleton topology
//!
//! A schema fixes how many keypoints describe one person and what each
//! position means. Position k of a person is always the same landmark,
//! so the schema also owns the bone table (pairs of keypoint indices
//! to connect when drawing).
//!
//! The combined schema concatenates groups in producer order:
//! body, face, left hand, right hand.

use crate::{KinetraceError, KinetraceResult};

/// Keypoints in the OpenPose BODY_25 group
pub const BODY_25_POINTS: usize = 25;

/// Keypoints in the OpenPose face group
pub const FACE_POINTS: usize = 70;

/// Keypoints in one OpenPose hand group
pub const HAND_POINTS: usize = 21;

/// BODY_25 skeleton topology (pairs of keypoint indices)
pub const BODY_25_BONES: [(usize, usize); 24] = [
    (1, 8),
    (1, 2),
    (1, 5),
    (2, 3),
    (3, 4),
    (5, 6),
    (6, 7),
    (8, 9),
    (9, 10),
    (10, 11),
    (8, 12),
    (12, 13),
    (13, 14),
    (1, 0),
    (0, 15),
    (15, 17),
    (0, 16),
    (16, 18),
    (14, 19),
    (19, 20),
    (14, 21),
    (11, 22),
    (22, 23),
    (11, 24),
];

/// Schema identifier as stored in the pose file header
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum SchemaId {
    /// Body keypoints only (25 per person)
    Body25 = 0,
    /// Body + face + both hands (25 + 70 + 21 + 21 = 137 per person)
    Body25FaceHands = 1,
}

impl SchemaId {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(SchemaId::Body25),
            1 => Some(SchemaId::Body25FaceHands),
            _ => None,
        }
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

/// An explicit, immutable keypoint schema value.
///
/// Passed into the parser and renderer rather than living behind a
/// global, so multiple schemas can coexist in one process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeypointSchema {
    id: SchemaId,
}

impl From<SchemaId> for KeypointSchema {
    fn from(id: SchemaId) -> Self {
        KeypointSchema { id }
    }
}

impl KeypointSchema {
    /// Body-only schema
    pub fn body25() -> Self {
        KeypointSchema { id: SchemaId::Body25 }
    }

    /// Body + face + hands schema
    pub fn body25_face_hands() -> Self {
        KeypointSchema {
            id: SchemaId::Body25FaceHands,
        }
    }

    /// Resolve a schema from its stored header byte
    pub fn from_id(id: u8) -> KinetraceResult<Self> {
        match SchemaId::from_byte(id) {
            Some(id) => Ok(KeypointSchema { id }),
            None => Err(KinetraceError::UnknownSchema(id)),
        }
    }

    #[inline]
    pub fn id(&self) -> SchemaId {
        self.id
    }

    pub fn has_face(&self) -> bool {
        self.id == SchemaId::Body25FaceHands
    }

    pub fn has_hands(&self) -> bool {
        self.id == SchemaId::Body25FaceHands
    }

    /// Total keypoints per person under this schema
    pub fn keypoints_per_person(&self) -> usize {
        match self.id {
            SchemaId::Body25 => BODY_25_POINTS,
            SchemaId::Body25FaceHands => {
                BODY_25_POINTS + FACE_POINTS + 2 * HAND_POINTS
            }
        }
    }

    /// Bone table for drawing.
    ///
    /// Face and hand points are rendered as joints only; the drawn
    /// skeleton connects body keypoints, which occupy indices
    /// 0..BODY_25_POINTS in both schemas.
    pub fn bones(&self) -> &'static [(usize, usize)] {
        &BODY_25_BONES
    }
}
