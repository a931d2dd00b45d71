//! Pose data model
//!
//! A PoseSequence is a Header plus an ordered list of Frames. Each
//! Frame holds zero or more Persons; each Person holds exactly
//! `keypoints_per_person` Keypoints per the active schema. Person
//! count may vary frame to frame; keypoint count per person may not.

use crate::SchemaId;

/// Current pose file format version
pub const FORMAT_VERSION: u8 = 1;

/// A single 2D landmark estimate with detection confidence.
///
/// `(0, 0, 0)` is the "not detected" sentinel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    pub confidence: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, confidence: f32) -> Self {
        Self { x, y, confidence }
    }

    /// The all-zero sentinel meaning the detector saw nothing here
    pub fn undetected() -> Self {
        Self::default()
    }

    /// False only for the exact `(0, 0, 0)` sentinel
    pub fn is_detected(&self) -> bool {
        self.x != 0.0 || self.y != 0.0 || self.confidence != 0.0
    }

    /// Visibility test against a threshold; the boundary is inclusive
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.confidence >= threshold
    }
}

/// One detected person: a fixed-length, ordered keypoint collection.
///
/// Position k is semantically fixed by the schema (k = 10 is always
/// the same landmark, for every person in every frame).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Person {
    keypoints: Vec<Keypoint>,
}

impl Person {
    pub fn new(keypoints: Vec<Keypoint>) -> Self {
        Self { keypoints }
    }

    pub fn keypoints(&self) -> &[Keypoint] {
        &self.keypoints
    }

    pub fn keypoint(&self, index: usize) -> Option<&Keypoint> {
        self.keypoints.get(index)
    }

    pub fn len(&self) -> usize {
        self.keypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }
}

/// One video frame's detections; possibly empty, count ragged across frames.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    persons: Vec<Person>,
}

impl Frame {
    pub fn new(persons: Vec<Person>) -> Self {
        Self { persons }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn person_count(&self) -> usize {
        self.persons.len()
    }
}

/// Sequence header, immutable once built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Header {
    /// Pose file format version
    pub format_version: u8,
    /// Frame rate of the source video. Stored as a float: truncating
    /// to an integer breaks exact frame alignment downstream.
    pub fps: f64,
    /// Source video width in pixels
    pub width: u32,
    /// Source video height in pixels
    pub height: u32,
    /// Keypoint schema identifier
    pub schema_id: SchemaId,
    /// Keypoints per person under the schema
    pub keypoints_per_person: u32,
}

/// A complete pose time series: header + ordered frames.
///
/// Constructed once on the convert path, reconstructed as an
/// immutable value on the visualize path. The only permitted
/// "mutation" is the caller-side fps override via [`with_fps`],
/// which never writes back to storage.
///
/// [`with_fps`]: PoseSequence::with_fps
#[derive(Clone, Debug, PartialEq)]
pub struct PoseSequence {
    header: Header,
    frames: Vec<Frame>,
}

impl PoseSequence {
    /// Assemble a sequence from parts. Invariant checks live in the
    /// builder; this is the trusted-path constructor used by the
    /// builder and the codec read path.
    pub fn from_parts(header: Header, frames: Vec<Frame>) -> Self {
        Self { header, frames }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Caller-side fps override (see the codec's caller-override
    /// contract): returns the same sequence with an authoritative
    /// fps for alignment. The stored file is untouched.
    pub fn with_fps(mut self, fps: f64) -> Self {
        self.header.fps = fps;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undetected_sentinel() {
        assert!(!Keypoint::undetected().is_detected());
        assert!(Keypoint::new(0.0, 0.0, 0.1).is_detected());
        assert!(Keypoint::new(3.0, 0.0, 0.0).is_detected());
    }

    #[test]
    fn test_visibility_boundary_inclusive() {
        let kp = Keypoint::new(10.0, 10.0, 0.5);
        assert!(kp.is_visible(0.5));
        assert!(!Keypoint::new(10.0, 10.0, 0.4).is_visible(0.5));
    }

    #[test]
    fn test_fps_override_leaves_frames_alone() {
        let header = Header {
            format_version: FORMAT_VERSION,
            fps: 24.0,
            width: 640,
            height: 480,
            schema_id: SchemaId::Body25,
            keypoints_per_person: 25,
        };
        let frames = vec![Frame::empty(), Frame::empty()];
        let seq = PoseSequence::from_parts(header, frames.clone());

        let patched = seq.with_fps(29.97);
        assert_eq!(patched.header().fps, 29.97);
        assert_eq!(patched.frames(), frames.as_slice());
        assert_eq!(patched.header().width, 640);
    }
}
