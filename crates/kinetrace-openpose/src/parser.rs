//! Directory parser: detection files -> ordered frames
//!
//! Per-frame decode has no cross-frame dependency, so files are
//! parsed on the rayon pool; ordering is decided up front from each
//! file's extracted numeric index (order-independent work,
//! order-dependent commit).

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use kinetrace_core::{Frame, KeypointSchema, KinetraceError, KinetraceResult};

use crate::OpenPoseRecord;

/// Extract the embedded numeric frame index from a file stem: the
/// last contiguous digit run, so `clip_000000000042_keypoints`
/// resolves to 42 regardless of zero-padding.
pub fn extract_frame_index(stem: &str) -> Option<u64> {
    let bytes = stem.as_bytes();
    let end = bytes.iter().rposition(|b| b.is_ascii_digit())? + 1;
    let start = bytes[..end]
        .iter()
        .rposition(|b| !b.is_ascii_digit())
        .map(|p| p + 1)
        .unwrap_or(0);
    stem[start..end].parse().ok()
}

/// Parse a directory of OpenPose JSON files into an ordered,
/// index-complete frame list (0 to N-1, no gaps).
pub fn parse_directory(
    directory: &Path,
    schema: &KeypointSchema,
) -> KinetraceResult<Vec<Frame>> {
    if !directory.is_dir() {
        return Err(KinetraceError::DirectoryNotFound(
            directory.display().to_string(),
        ));
    }

    let mut indexed = enumerate_detection_files(directory)?;
    if indexed.is_empty() {
        return Err(KinetraceError::NoDetectionFiles(
            directory.display().to_string(),
        ));
    }

    // Sort by extracted index, then check for collisions and gaps.
    // A dropped frame would silently break downstream alignment, so
    // both are hard errors here.
    indexed.sort_by_key(|(index, _)| *index);
    for pair in indexed.windows(2) {
        if pair[0].0 == pair[1].0 {
            return Err(KinetraceError::DuplicateFrameIndex {
                index: pair[0].0,
                first: file_name(&pair[0].1),
                second: file_name(&pair[1].1),
            });
        }
    }
    for (expected, (index, _)) in indexed.iter().enumerate() {
        if *index != expected as u64 {
            return Err(KinetraceError::MissingFrameIndex(expected as u64));
        }
    }

    let frames: Vec<Frame> = indexed
        .par_iter()
        .map(|(_, path)| parse_file(path, schema))
        .collect::<KinetraceResult<_>>()?;

    tracing::info!(
        frames = frames.len(),
        directory = %directory.display(),
        "parsed OpenPose keypoint directory"
    );
    Ok(frames)
}

/// Parse a single detection file into a frame.
pub fn parse_file(path: &Path, schema: &KeypointSchema) -> KinetraceResult<Frame> {
    let name = file_name(path);
    let raw = fs::read_to_string(path).map_err(|source| KinetraceError::UnreadableFile {
        file: name.clone(),
        source,
    })?;
    let record: OpenPoseRecord =
        serde_json::from_str(&raw).map_err(|e| KinetraceError::MalformedRecord {
            file: name.clone(),
            // serde_json reports line and column of the failure
            reason: e.to_string(),
        })?;

    let persons = record
        .people
        .into_iter()
        .map(|p| p.into_person(schema, &name))
        .collect::<KinetraceResult<_>>()?;
    Ok(Frame::new(persons))
}

fn enumerate_detection_files(directory: &Path) -> KinetraceResult<Vec<(u64, PathBuf)>> {
    let mut indexed = Vec::new();
    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        match extract_frame_index(stem) {
            Some(index) => indexed.push((index, path)),
            None => return Err(KinetraceError::UnindexedFile(file_name(&path))),
        }
    }
    Ok(indexed)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    use kinetrace_core::build_sequence;
    use tempfile::tempdir;

    #[test]
    fn test_extract_frame_index() {
        assert_eq!(extract_frame_index("frame_000012"), Some(12));
        assert_eq!(extract_frame_index("clip_000000000042_keypoints"), Some(42));
        assert_eq!(extract_frame_index("7"), Some(7));
        assert_eq!(extract_frame_index("take2_scene_000003_keypoints"), Some(3));
        assert_eq!(extract_frame_index("no_digits_here"), None);
    }

    /// OpenPose JSON with one person whose first keypoint x encodes
    /// the frame index, for order verification.
    fn record_json(index: usize, confidence: f32) -> String {
        let mut triples: Vec<String> = vec![format!("{}.0,0.0,{}", index, confidence)];
        triples.extend((1..25).map(|i| format!("{}.0,{}.0,{}", i, i * 2, confidence)));
        format!(
            "{{\"version\":1.3,\"people\":[{{\"person_id\":[-1],\"pose_keypoints_2d\":[{}]}}]}}",
            triples.join(",")
        )
    }

    fn write_file(dir: &Path, name: &str, contents: &str) {
        let mut f = File::create(dir.join(name)).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn test_numeric_order_beats_lexicographic_order() {
        let dir = tempdir().unwrap();
        // zero-padding is deliberately inconsistent: lexicographic
        // order would be 000, 02, 1 instead of 0, 1, 2
        write_file(dir.path(), "clip_000_keypoints.json", &record_json(0, 0.9));
        write_file(dir.path(), "clip_1_keypoints.json", &record_json(1, 0.9));
        write_file(dir.path(), "clip_02_keypoints.json", &record_json(2, 0.9));

        let frames = parse_directory(dir.path(), &KeypointSchema::body25()).unwrap();
        assert_eq!(frames.len(), 3);
        for (i, frame) in frames.iter().enumerate() {
            let first = frame.persons()[0].keypoint(0).unwrap();
            assert_eq!(first.x, i as f32, "frame {} out of order", i);
        }
    }

    #[test]
    fn test_duplicate_index_rejected() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "a_0.json", &record_json(0, 0.9));
        write_file(dir.path(), "a_1.json", &record_json(1, 0.9));
        write_file(dir.path(), "b_01.json", &record_json(1, 0.9));

        let result = parse_directory(dir.path(), &KeypointSchema::body25());
        assert!(matches!(
            result,
            Err(KinetraceError::DuplicateFrameIndex { index: 1, .. })
        ));
    }

    #[test]
    fn test_index_gap_rejected() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "a_0.json", &record_json(0, 0.9));
        write_file(dir.path(), "a_2.json", &record_json(2, 0.9));

        let result = parse_directory(dir.path(), &KeypointSchema::body25());
        assert!(matches!(
            result,
            Err(KinetraceError::MissingFrameIndex(1))
        ));
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempdir().unwrap();
        let result = parse_directory(
            &dir.path().join("nope"),
            &KeypointSchema::body25(),
        );
        assert!(matches!(result, Err(KinetraceError::DirectoryNotFound(_))));
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempdir().unwrap();
        let result = parse_directory(dir.path(), &KeypointSchema::body25());
        assert!(matches!(result, Err(KinetraceError::NoDetectionFiles(_))));
    }

    #[test]
    fn test_non_json_files_ignored() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "a_0.json", &record_json(0, 0.9));
        write_file(dir.path(), "notes.txt", "not a detection record");

        let frames = parse_directory(dir.path(), &KeypointSchema::body25()).unwrap();
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn test_malformed_record_names_file() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "a_0.json", "{\"people\": [{]}");

        let result = parse_directory(dir.path(), &KeypointSchema::body25());
        match result {
            Err(KinetraceError::MalformedRecord { file, .. }) => {
                assert_eq!(file, "a_0.json");
            }
            other => panic!("expected MalformedRecord, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_unreadable_file_names_file() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "a_0.json", &record_json(0, 0.9));
        // a directory with a detection-file name cannot be read as one
        fs::create_dir(dir.path().join("a_1.json")).unwrap();

        let result = parse_directory(dir.path(), &KeypointSchema::body25());
        match result {
            Err(KinetraceError::UnreadableFile { file, .. }) => {
                assert_eq!(file, "a_1.json");
            }
            other => panic!("expected UnreadableFile, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_empty_people_list_is_valid() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "a_0.json", "{\"version\":1.3,\"people\":[]}");

        let frames = parse_directory(dir.path(), &KeypointSchema::body25()).unwrap();
        assert_eq!(frames[0].person_count(), 0);
    }

    /// End to end over the convert path: three records, one person
    /// each, full confidence, through the builder and the codec.
    #[test]
    fn test_convert_path_end_to_end() {
        let dir = tempdir().unwrap();
        for i in 0..3 {
            write_file(
                dir.path(),
                &format!("vid_{:012}_keypoints.json", i),
                &record_json(i, 1.0),
            );
        }

        let schema = KeypointSchema::body25();
        let frames = parse_directory(dir.path(), &schema).unwrap();
        let seq = build_sequence(frames, 24.0, 640, 480, schema).unwrap();

        let bytes = kinetrace_wire::encode_to_vec(&seq).unwrap();
        let decoded = kinetrace_wire::decode_from_slice(&bytes).unwrap();

        assert_eq!(decoded.header().fps, 24.0);
        assert_eq!(decoded.header().width, 640);
        assert_eq!(decoded.header().height, 480);
        assert_eq!(decoded.frame_count(), 3);
        for frame in decoded.frames() {
            assert_eq!(frame.person_count(), 1);
            assert_eq!(frame.persons()[0].len(), 25);
        }
    }
}
