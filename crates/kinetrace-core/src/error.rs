//! Error types for kinetrace

use thiserror::Error;

/// Kinetrace errors, grouped by class: input, parse, format, alignment, I/O.
#[derive(Error, Debug)]
pub enum KinetraceError {
    // Input errors
    #[error("Keypoints directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("No detection files found in {0}")]
    NoDetectionFiles(String),

    #[error("Pose file not found: {0}")]
    PoseFileNotFound(String),

    #[error("No numeric frame index in file name: {0}")]
    UnindexedFile(String),

    #[error("Duplicate frame index {index}: {first} and {second}")]
    DuplicateFrameIndex {
        index: u64,
        first: String,
        second: String,
    },

    #[error("Missing detection file for frame index {0}")]
    MissingFrameIndex(u64),

    #[error("Empty frame sequence")]
    EmptySequence,

    #[error("Invalid header field: {0}")]
    InvalidHeaderField(&'static str),

    // Parse errors
    #[error("Cannot read detection file {file}: {source}")]
    UnreadableFile {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed detection record {file}: {reason}")]
    MalformedRecord { file: String, reason: String },

    #[error("Keypoint array in {file} has length {len}, not a multiple of 3")]
    RaggedTripleArray { file: String, len: usize },

    #[error("Schema mismatch in {file}: expected {expected} keypoints, got {actual}")]
    SchemaMismatch {
        file: String,
        expected: usize,
        actual: usize,
    },

    // Format errors
    #[error("Bad magic: not a kinetrace pose file")]
    BadMagic,

    #[error("Unsupported format version {0}")]
    UnsupportedVersion(u8),

    #[error("Unknown schema id {0}")]
    UnknownSchema(u8),

    #[error("Truncated pose stream while reading {0}")]
    TruncatedStream(&'static str),

    #[error("Implausible person count {count} in frame {frame} (ceiling {ceiling})")]
    PersonCountOutOfBounds {
        frame: usize,
        count: usize,
        ceiling: usize,
    },

    // Alignment errors
    #[error("Frame rate mismatch beyond tolerance: pose {pose_fps}, video {video_fps}")]
    FrameRateMismatch { pose_fps: f64, video_fps: f64 },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(String),

    #[error("Video source error: {0}")]
    VideoSource(String),

    #[error("Video sink error: {0}")]
    VideoSink(String),
}

/// Result type for kinetrace operations
pub type KinetraceResult<T> = Result<T, KinetraceError>;
