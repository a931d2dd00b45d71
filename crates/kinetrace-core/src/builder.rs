//! Sequence builder - parsed frames + video properties -> PoseSequence
//!
//! Pure transform with no side effects. The header is built exactly
//! once; person counts are not padded across frames because the wire
//! layout stores a per-frame person count natively.

use crate::{
    Frame, Header, KeypointSchema, KinetraceError, KinetraceResult, PoseSequence,
    FORMAT_VERSION,
};

/// Build an immutable [`PoseSequence`] from parsed frames and the
/// source video's properties.
///
/// Fails on an empty frame list, non-positive fps or dimensions, or
/// any person whose keypoint count disagrees with the schema.
pub fn build_sequence(
    frames: Vec<Frame>,
    fps: f64,
    width: u32,
    height: u32,
    schema: KeypointSchema,
) -> KinetraceResult<PoseSequence> {
    if frames.is_empty() {
        return Err(KinetraceError::EmptySequence);
    }
    if !(fps > 0.0) {
        return Err(KinetraceError::InvalidHeaderField("fps"));
    }
    if width == 0 {
        return Err(KinetraceError::InvalidHeaderField("width"));
    }
    if height == 0 {
        return Err(KinetraceError::InvalidHeaderField("height"));
    }

    let expected = schema.keypoints_per_person();
    for frame in &frames {
        for person in frame.persons() {
            if person.len() != expected {
                return Err(KinetraceError::SchemaMismatch {
                    file: "builder input".to_string(),
                    expected,
                    actual: person.len(),
                });
            }
        }
    }

    let header = Header {
        format_version: FORMAT_VERSION,
        fps,
        width,
        height,
        schema_id: schema.id(),
        keypoints_per_person: expected as u32,
    };

    Ok(PoseSequence::from_parts(header, frames))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Keypoint, Person};

    fn person(n: usize) -> Person {
        Person::new(vec![Keypoint::new(1.0, 2.0, 0.9); n])
    }

    #[test]
    fn test_build_sequence() {
        let frames = vec![
            Frame::new(vec![person(25)]),
            Frame::empty(),
            Frame::new(vec![person(25), person(25)]),
        ];
        let seq =
            build_sequence(frames, 29.97, 1280, 720, KeypointSchema::body25()).unwrap();

        assert_eq!(seq.frame_count(), 3);
        assert_eq!(seq.header().fps, 29.97);
        assert_eq!(seq.header().keypoints_per_person, 25);
        assert_eq!(seq.frame(2).unwrap().person_count(), 2);
    }

    #[test]
    fn test_empty_frame_list_rejected() {
        let result = build_sequence(vec![], 24.0, 640, 480, KeypointSchema::body25());
        assert!(matches!(result, Err(KinetraceError::EmptySequence)));
    }

    #[test]
    fn test_bad_header_fields_rejected() {
        let frames = vec![Frame::empty()];
        assert!(matches!(
            build_sequence(frames.clone(), 0.0, 640, 480, KeypointSchema::body25()),
            Err(KinetraceError::InvalidHeaderField("fps"))
        ));
        assert!(matches!(
            build_sequence(frames.clone(), 24.0, 0, 480, KeypointSchema::body25()),
            Err(KinetraceError::InvalidHeaderField("width"))
        ));
        assert!(matches!(
            build_sequence(frames, 24.0, 640, 0, KeypointSchema::body25()),
            Err(KinetraceError::InvalidHeaderField("height"))
        ));
    }

    #[test]
    fn test_schema_mismatch_rejected() {
        let frames = vec![Frame::new(vec![person(17)])];
        let result = build_sequence(frames, 24.0, 640, 480, KeypointSchema::body25());
        assert!(matches!(
            result,
            Err(KinetraceError::SchemaMismatch {
                expected: 25,
                actual: 17,
                ..
            })
        ));
    }
}
