//! Typed OpenPose detection records
//!
//! One record per video frame. The body group is required; face and
//! hand groups may be absent per record, which is valid, not an
//! error. Shape or type mismatches fail fast instead of coercing.

use serde::Deserialize;

use kinetrace_core::{
    Keypoint, KeypointSchema, KinetraceError, KinetraceResult, Person, BODY_25_POINTS,
    FACE_POINTS, HAND_POINTS,
};

/// One OpenPose output file: a list of detected people.
#[derive(Debug, Deserialize)]
pub struct OpenPoseRecord {
    #[serde(default)]
    pub version: Option<f64>,
    pub people: Vec<OpenPosePerson>,
}

/// One detected person: flat `(x, y, confidence)` triple arrays,
/// one per keypoint group.
#[derive(Debug, Deserialize)]
pub struct OpenPosePerson {
    pub pose_keypoints_2d: Vec<f32>,
    #[serde(default)]
    pub face_keypoints_2d: Option<Vec<f32>>,
    #[serde(default)]
    pub hand_left_keypoints_2d: Option<Vec<f32>>,
    #[serde(default)]
    pub hand_right_keypoints_2d: Option<Vec<f32>>,
}

impl OpenPosePerson {
    /// Decode this person's triple arrays into a fixed-length
    /// keypoint collection under `schema`. Groups the schema carries
    /// but the record lacks are filled with the undetected sentinel;
    /// groups the record carries but the schema drops are ignored.
    pub fn into_person(
        self,
        schema: &KeypointSchema,
        file: &str,
    ) -> KinetraceResult<Person> {
        let mut keypoints = Vec::with_capacity(schema.keypoints_per_person());

        decode_triples(&self.pose_keypoints_2d, BODY_25_POINTS, file, &mut keypoints)?;

        if schema.has_face() {
            decode_optional(self.face_keypoints_2d, FACE_POINTS, file, &mut keypoints)?;
        }
        if schema.has_hands() {
            decode_optional(
                self.hand_left_keypoints_2d,
                HAND_POINTS,
                file,
                &mut keypoints,
            )?;
            decode_optional(
                self.hand_right_keypoints_2d,
                HAND_POINTS,
                file,
                &mut keypoints,
            )?;
        }

        Ok(Person::new(keypoints))
    }
}

fn decode_triples(
    raw: &[f32],
    expected_points: usize,
    file: &str,
    out: &mut Vec<Keypoint>,
) -> KinetraceResult<()> {
    if raw.len() % 3 != 0 {
        return Err(KinetraceError::RaggedTripleArray {
            file: file.to_string(),
            len: raw.len(),
        });
    }
    if raw.len() / 3 != expected_points {
        return Err(KinetraceError::SchemaMismatch {
            file: file.to_string(),
            expected: expected_points,
            actual: raw.len() / 3,
        });
    }
    for triple in raw.chunks_exact(3) {
        out.push(Keypoint::new(triple[0], triple[1], triple[2]));
    }
    Ok(())
}

fn decode_optional(
    raw: Option<Vec<f32>>,
    expected_points: usize,
    file: &str,
    out: &mut Vec<Keypoint>,
) -> KinetraceResult<()> {
    match raw {
        Some(raw) => decode_triples(&raw, expected_points, file, out),
        None => {
            out.resize(out.len() + expected_points, Keypoint::undetected());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(points: usize) -> Vec<f32> {
        (0..points)
            .flat_map(|i| [i as f32, i as f32 * 2.0, 0.9])
            .collect()
    }

    #[test]
    fn test_body_only_person() {
        let record = OpenPosePerson {
            pose_keypoints_2d: flat(25),
            face_keypoints_2d: None,
            hand_left_keypoints_2d: None,
            hand_right_keypoints_2d: None,
        };
        let person = record
            .into_person(&KeypointSchema::body25(), "f.json")
            .unwrap();
        assert_eq!(person.len(), 25);
        assert_eq!(person.keypoint(3).unwrap().x, 3.0);
    }

    #[test]
    fn test_missing_optional_groups_padded_with_sentinel() {
        let record = OpenPosePerson {
            pose_keypoints_2d: flat(25),
            face_keypoints_2d: None,
            hand_left_keypoints_2d: Some(flat(21)),
            hand_right_keypoints_2d: None,
        };
        let person = record
            .into_person(&KeypointSchema::body25_face_hands(), "f.json")
            .unwrap();
        assert_eq!(person.len(), 137);
        // face region is sentinel
        assert!(!person.keypoint(25).unwrap().is_detected());
        assert!(!person.keypoint(94).unwrap().is_detected());
        // left hand follows face
        assert!(person.keypoint(95).unwrap().is_detected());
        // right hand absent
        assert!(!person.keypoint(136).unwrap().is_detected());
    }

    #[test]
    fn test_extra_groups_ignored_by_body_schema() {
        let record = OpenPosePerson {
            pose_keypoints_2d: flat(25),
            face_keypoints_2d: Some(flat(70)),
            hand_left_keypoints_2d: Some(flat(21)),
            hand_right_keypoints_2d: Some(flat(21)),
        };
        let person = record
            .into_person(&KeypointSchema::body25(), "f.json")
            .unwrap();
        assert_eq!(person.len(), 25);
    }

    #[test]
    fn test_ragged_triple_array() {
        let record = OpenPosePerson {
            pose_keypoints_2d: vec![1.0, 2.0],
            face_keypoints_2d: None,
            hand_left_keypoints_2d: None,
            hand_right_keypoints_2d: None,
        };
        let result = record.into_person(&KeypointSchema::body25(), "f.json");
        assert!(matches!(
            result,
            Err(KinetraceError::RaggedTripleArray { len: 2, .. })
        ));
    }

    #[test]
    fn test_body_length_schema_mismatch() {
        let record = OpenPosePerson {
            pose_keypoints_2d: flat(18),
            face_keypoints_2d: None,
            hand_left_keypoints_2d: None,
            hand_right_keypoints_2d: None,
        };
        let result = record.into_person(&KeypointSchema::body25(), "f.json");
        assert!(matches!(
            result,
            Err(KinetraceError::SchemaMismatch {
                expected: 25,
                actual: 18,
                ..
            })
        ));
    }
}
