//! `kinetrace convert` - OpenPose JSON directory -> binary pose file

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};

use kinetrace_core::{build_sequence, KeypointSchema, KinetraceResult, PoseSequence};
use kinetrace_media::ImageSequenceSource;
use kinetrace_openpose::parse_directory;
use kinetrace_render::FrameSource;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SchemaArg {
    /// Body keypoints only (25 per person)
    Body25,
    /// Body + face + both hands (137 per person)
    Body25FaceHands,
}

impl From<SchemaArg> for KeypointSchema {
    fn from(arg: SchemaArg) -> Self {
        match arg {
            SchemaArg::Body25 => KeypointSchema::body25(),
            SchemaArg::Body25FaceHands => KeypointSchema::body25_face_hands(),
        }
    }
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Directory containing OpenPose JSON files
    #[arg(long, default_value = "data/output/keypoints")]
    pub directory: PathBuf,

    /// Output pose file path
    #[arg(long, default_value = "data/output/pose_output.pose")]
    pub output: PathBuf,

    /// Video frame rate, used when --video is not given
    #[arg(long, default_value_t = 24.0)]
    pub fps: f64,

    /// Video width in pixels, used when --video is not given
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Video height in pixels, used when --video is not given
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Source video directory; when given, fps/width/height are read
    /// from its metadata
    #[arg(long)]
    pub video: Option<PathBuf>,

    /// Keypoint schema to decode
    #[arg(long, value_enum, default_value_t = SchemaArg::Body25)]
    pub schema: SchemaArg,
}

pub fn run(args: ConvertArgs) -> KinetraceResult<()> {
    let (fps, width, height) = match &args.video {
        Some(video) => {
            let source = ImageSequenceSource::open(video)?;
            (source.fps(), source.width(), source.height())
        }
        None => (args.fps, args.width, args.height),
    };

    println!(
        "Loading OpenPose keypoints from {} ...",
        args.directory.display()
    );
    println!("Video properties: {}x{} @ {} fps", width, height, fps);

    let schema = KeypointSchema::from(args.schema);
    let frames = parse_directory(&args.directory, &schema)?;
    let seq = build_sequence(frames, fps, width, height, schema)?;

    write_pose_file(&seq, &args.output)?;

    let size = fs::metadata(&args.output)?.len();
    println!();
    println!("=== Summary ===");
    println!("Frames: {}", seq.frame_count());
    println!(
        "Output: {} ({:.1} KB)",
        args.output.display(),
        size as f64 / 1024.0
    );
    Ok(())
}

/// Encode through a temp path and rename, so an aborted run never
/// leaves a partial file posing as a pose file.
pub fn write_pose_file(seq: &PoseSequence, output: &Path) -> KinetraceResult<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut tmp = output.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let result = (|| -> KinetraceResult<()> {
        let mut writer = BufWriter::new(File::create(&tmp)?);
        kinetrace_wire::encode(seq, &mut writer)?;
        Ok(())
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    fs::rename(&tmp, output)?;
    Ok(())
}
