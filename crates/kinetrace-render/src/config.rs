//! Drawing configuration
//!
//! The bone table is an explicit immutable value handed to the
//! renderer, never a process-wide singleton, so body-only and
//! body+face+hands configs can coexist in one process.

use kinetrace_core::KeypointSchema;

/// A drawn connection between two keypoint positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bone {
    pub a: usize,
    pub b: usize,
    pub color: [u8; 3],
}

/// Limb color palette, cycled over the bone table.
const BONE_PALETTE: [[u8; 3]; 6] = [
    [255, 85, 0],
    [255, 195, 0],
    [85, 255, 0],
    [0, 195, 255],
    [85, 0, 255],
    [255, 0, 170],
];

/// Immutable renderer configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawConfig {
    /// Radius of the filled circle drawn at each joint, in pixels
    pub joint_radius: u32,
    /// Joint circle color
    pub joint_color: [u8; 3],
    /// Bone table: keypoint index pairs plus per-bone color
    pub bones: Vec<Bone>,
    /// Keypoints and bones below this confidence are not drawn;
    /// confidence exactly equal to the threshold is drawn
    pub confidence_threshold: f32,
}

impl DrawConfig {
    /// Default config for a schema: its bone table with the cycled
    /// palette, radius 3, threshold 0.5.
    pub fn for_schema(schema: &KeypointSchema) -> Self {
        let bones = schema
            .bones()
            .iter()
            .enumerate()
            .map(|(i, &(a, b))| Bone {
                a,
                b,
                color: BONE_PALETTE[i % BONE_PALETTE.len()],
            })
            .collect();

        DrawConfig {
            joint_radius: 3,
            joint_color: [255, 255, 255],
            bones,
            confidence_threshold: 0.5,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    pub fn with_joint_radius(mut self, radius: u32) -> Self {
        self.joint_radius = radius;
        self
    }
}
