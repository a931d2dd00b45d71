//! Fixed header for the kinetrace pose file format
//!
//! Fixed header is 32 bytes:
//! - Bytes 0-3:   Magic "KTRC"
//! - Byte 4:      Format version
//! - Byte 5:      Schema id
//! - Bytes 6-7:   Reserved (zero)
//! - Bytes 8-15:  fps (f64 LE)
//! - Bytes 16-19: Width (u32 LE)
//! - Bytes 20-23: Height (u32 LE)
//! - Bytes 24-27: Keypoints per person (u32 LE)
//! - Bytes 28-31: Frame count (u32 LE)
//!
//! fps is stored as a float on purpose: an earlier producer of this
//! kind of file truncated it to an integer, which broke exact frame
//! alignment against the source video.

use kinetrace_core::{
    Header, KeypointSchema, KinetraceError, KinetraceResult, FORMAT_VERSION,
};

/// Magic constant at the start of every pose file
pub const MAGIC: [u8; 4] = *b"KTRC";

/// Fixed header size in bytes
pub const FIXED_HEADER_SIZE: usize = 32;

/// Plausibility ceiling for the per-person keypoint count; anything
/// above this is treated as corruption rather than allocated
pub const MAX_KEYPOINTS_PER_PERSON: usize = 1024;

/// File-level header block: the sequence header plus the frame count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FileHeader {
    pub header: Header,
    pub frame_count: u32,
}

impl FileHeader {
    pub fn new(header: Header, frame_count: u32) -> Self {
        FileHeader {
            header,
            frame_count,
        }
    }

    /// Parse the fixed header from bytes.
    ///
    /// Rejects a bad magic, a version newer than this reader, an
    /// unknown schema id, and implausible header fields. Fields are
    /// validated here so the frame-block reader can trust them.
    pub fn parse(buf: &[u8]) -> KinetraceResult<Self> {
        if buf.len() < FIXED_HEADER_SIZE {
            return Err(KinetraceError::TruncatedStream("fixed header"));
        }

        // Bytes 0-3: Magic
        if buf[0..4] != MAGIC {
            return Err(KinetraceError::BadMagic);
        }

        // Byte 4: Version
        let format_version = buf[4];
        if format_version > FORMAT_VERSION {
            return Err(KinetraceError::UnsupportedVersion(format_version));
        }

        // Byte 5: Schema id
        let schema = KeypointSchema::from_id(buf[5])?;

        // Bytes 6-7: Reserved

        // Bytes 8-15: fps
        let fps = f64::from_le_bytes(buf[8..16].try_into().unwrap());
        if !(fps > 0.0) || !fps.is_finite() {
            return Err(KinetraceError::InvalidHeaderField("fps"));
        }

        // Bytes 16-19: Width
        let width = u32::from_le_bytes(buf[16..20].try_into().unwrap());
        if width == 0 {
            return Err(KinetraceError::InvalidHeaderField("width"));
        }

        // Bytes 20-23: Height
        let height = u32::from_le_bytes(buf[20..24].try_into().unwrap());
        if height == 0 {
            return Err(KinetraceError::InvalidHeaderField("height"));
        }

        // Bytes 24-27: Keypoints per person
        let keypoints_per_person = u32::from_le_bytes(buf[24..28].try_into().unwrap());
        if keypoints_per_person == 0
            || keypoints_per_person as usize > MAX_KEYPOINTS_PER_PERSON
        {
            return Err(KinetraceError::InvalidHeaderField("keypoints_per_person"));
        }

        // Bytes 28-31: Frame count
        let frame_count = u32::from_le_bytes(buf[28..32].try_into().unwrap());

        Ok(FileHeader {
            header: Header {
                format_version,
                fps,
                width,
                height,
                schema_id: schema.id(),
                keypoints_per_person,
            },
            frame_count,
        })
    }

    /// Serialize the fixed header into a 32-byte buffer
    pub fn serialize(&self, buf: &mut [u8]) -> KinetraceResult<()> {
        if buf.len() < FIXED_HEADER_SIZE {
            return Err(KinetraceError::TruncatedStream("fixed header"));
        }

        // Bytes 0-3: Magic
        buf[0..4].copy_from_slice(&MAGIC);

        // Byte 4: Version
        buf[4] = self.header.format_version;

        // Byte 5: Schema id
        buf[5] = self.header.schema_id.to_byte();

        // Bytes 6-7: Reserved
        buf[6] = 0;
        buf[7] = 0;

        // Bytes 8-15: fps
        buf[8..16].copy_from_slice(&self.header.fps.to_le_bytes());

        // Bytes 16-19: Width
        buf[16..20].copy_from_slice(&self.header.width.to_le_bytes());

        // Bytes 20-23: Height
        buf[20..24].copy_from_slice(&self.header.height.to_le_bytes());

        // Bytes 24-27: Keypoints per person
        buf[24..28].copy_from_slice(&self.header.keypoints_per_person.to_le_bytes());

        // Bytes 28-31: Frame count
        buf[28..32].copy_from_slice(&self.frame_count.to_le_bytes());

        Ok(())
    }

    /// Serialize the fixed header to a new Vec
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0u8; FIXED_HEADER_SIZE];
        self.serialize(&mut buf).expect("buffer sized above");
        buf
    }
}
