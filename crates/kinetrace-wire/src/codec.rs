//! Streaming encoder/decoder for pose sequences
//!
//! Both directions are strictly sequential: byte offsets of later
//! fields depend on earlier ones, so neither side buffers the whole
//! sequence and neither side may be parallelized within one stream.

use std::io::{ErrorKind, Read, Write};

use kinetrace_core::{
    Frame, Keypoint, KinetraceError, KinetraceResult, Person, PoseSequence,
};

use crate::{FileHeader, FIXED_HEADER_SIZE};

/// Default ceiling on the per-frame person count accepted on decode.
/// A count above this is treated as corruption, not truncated.
pub const DEFAULT_PERSON_CEILING: usize = 255;

/// Decode-side options.
#[derive(Clone, Copy, Debug)]
pub struct DecodeOptions {
    /// Person counts above this are rejected as corruption
    pub person_ceiling: usize,
    /// Authoritative fps supplied by the caller, overriding the
    /// stored header value for all downstream alignment. The stored
    /// file is never mutated.
    pub fps_override: Option<f64>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            person_ceiling: DEFAULT_PERSON_CEILING,
            fps_override: None,
        }
    }
}

/// Encode a sequence to a writer: fixed header, then frame blocks in
/// sequence order.
pub fn encode<W: Write>(seq: &PoseSequence, writer: &mut W) -> KinetraceResult<()> {
    let file_header = FileHeader::new(*seq.header(), seq.frame_count() as u32);
    writer.write_all(&file_header.to_bytes())?;

    let kpp = seq.header().keypoints_per_person as usize;
    let mut block = Vec::with_capacity(kpp * 12);

    for (index, frame) in seq.frames().iter().enumerate() {
        let count = frame.person_count();
        if count > u16::MAX as usize {
            return Err(KinetraceError::PersonCountOutOfBounds {
                frame: index,
                count,
                ceiling: u16::MAX as usize,
            });
        }
        writer.write_all(&(count as u16).to_le_bytes())?;

        for person in frame.persons() {
            // from_parts does not revalidate, so a person whose length
            // disagrees with the header would otherwise encode into a
            // file whose boundaries decode scrambled
            if person.len() != kpp {
                return Err(KinetraceError::SchemaMismatch {
                    file: "encoder input".to_string(),
                    expected: kpp,
                    actual: person.len(),
                });
            }
            block.clear();
            for kp in person.keypoints() {
                block.extend_from_slice(&kp.x.to_le_bytes());
                block.extend_from_slice(&kp.y.to_le_bytes());
                block.extend_from_slice(&kp.confidence.to_le_bytes());
            }
            writer.write_all(&block)?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Decode a sequence from a reader with default options.
pub fn decode<R: Read>(reader: &mut R) -> KinetraceResult<PoseSequence> {
    decode_with(reader, &DecodeOptions::default())
}

/// Decode a sequence from a reader.
///
/// Validates magic and version before anything else; then streams
/// frame blocks, rebuilding each frame from its person-count prefix.
/// Any read past end-of-stream or person count above the ceiling is
/// corruption, never a silent truncation.
pub fn decode_with<R: Read>(
    reader: &mut R,
    options: &DecodeOptions,
) -> KinetraceResult<PoseSequence> {
    let mut header_buf = [0u8; FIXED_HEADER_SIZE];
    fill(reader, &mut header_buf, "fixed header")?;
    let file_header = FileHeader::parse(&header_buf)?;

    let kpp = file_header.header.keypoints_per_person as usize;
    let frame_count = file_header.frame_count as usize;

    // capacity is capped: the count is untrusted until the stream
    // actually delivers that many frames
    let mut frames = Vec::with_capacity(frame_count.min(4096));
    let mut count_buf = [0u8; 2];
    let mut person_buf = vec![0u8; kpp * 12];

    for frame_index in 0..frame_count {
        fill(reader, &mut count_buf, "person count")?;
        let count = u16::from_le_bytes(count_buf) as usize;
        if count > options.person_ceiling {
            return Err(KinetraceError::PersonCountOutOfBounds {
                frame: frame_index,
                count,
                ceiling: options.person_ceiling,
            });
        }

        let mut persons = Vec::with_capacity(count);
        for _ in 0..count {
            fill(reader, &mut person_buf, "keypoint block")?;
            let mut keypoints = Vec::with_capacity(kpp);
            for triple in person_buf.chunks_exact(12) {
                keypoints.push(Keypoint::new(
                    f32::from_le_bytes(triple[0..4].try_into().unwrap()),
                    f32::from_le_bytes(triple[4..8].try_into().unwrap()),
                    f32::from_le_bytes(triple[8..12].try_into().unwrap()),
                ));
            }
            persons.push(Person::new(keypoints));
        }
        frames.push(Frame::new(persons));
    }

    tracing::debug!(
        frames = frame_count,
        fps = file_header.header.fps,
        "decoded pose sequence"
    );

    let seq = PoseSequence::from_parts(file_header.header, frames);
    Ok(match options.fps_override {
        Some(fps) => seq.with_fps(fps),
        None => seq,
    })
}

/// Encode a sequence to a new Vec
pub fn encode_to_vec(seq: &PoseSequence) -> KinetraceResult<Vec<u8>> {
    let mut buf = Vec::new();
    encode(seq, &mut buf)?;
    Ok(buf)
}

/// Decode a sequence from a byte slice with default options
pub fn decode_from_slice(bytes: &[u8]) -> KinetraceResult<PoseSequence> {
    decode(&mut &bytes[..])
}

/// read_exact with end-of-stream mapped to a format error: a short
/// read mid-stream means the file lies about its own length.
fn fill<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    context: &'static str,
) -> KinetraceResult<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => KinetraceError::TruncatedStream(context),
        _ => KinetraceError::Io(e),
    })
}
