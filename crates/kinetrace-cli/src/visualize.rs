//! `kinetrace visualize` - pose file + video -> skeleton overlay video

use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;

use clap::Args;

use kinetrace_core::{KeypointSchema, KinetraceError, KinetraceResult};
use kinetrace_media::{ImageSequenceSink, ImageSequenceSource};
use kinetrace_render::{render, DrawConfig, FrameSource};
use kinetrace_wire::DecodeOptions;

#[derive(Args, Debug)]
pub struct VisualizeArgs {
    /// Input pose file
    #[arg(long, default_value = "data/output/pose_output.pose")]
    pub pose: PathBuf,

    /// Input video directory
    #[arg(long, default_value = "data/input/test_video")]
    pub video: PathBuf,

    /// Output overlay video directory
    #[arg(long, default_value = "data/output/pose_overlay")]
    pub output: PathBuf,

    /// Confidence threshold; keypoints at or above it are drawn
    #[arg(long, default_value_t = 0.5)]
    pub threshold: f32,

    /// Joint circle radius in pixels
    #[arg(long, default_value_t = 3)]
    pub joint_radius: u32,
}

pub fn run(args: VisualizeArgs) -> KinetraceResult<()> {
    if !args.pose.is_file() {
        return Err(KinetraceError::PoseFileNotFound(
            args.pose.display().to_string(),
        ));
    }
    let source = ImageSequenceSource::open(&args.video)?;
    let video_fps = source.fps();

    println!("Loading pose data from {} ...", args.pose.display());
    // Some producers stored a truncated fps; the video's own rate is
    // authoritative for alignment, so it overrides the stored value.
    let mut reader = BufReader::new(File::open(&args.pose)?);
    let options = DecodeOptions {
        fps_override: Some(video_fps),
        ..Default::default()
    };
    let seq = kinetrace_wire::decode_with(&mut reader, &options)?;

    let schema = KeypointSchema::from(seq.header().schema_id);
    let config = DrawConfig::for_schema(&schema)
        .with_threshold(args.threshold)
        .with_joint_radius(args.joint_radius);

    println!(
        "Overlaying skeleton on {} (fps={:.2}) ...",
        args.video.display(),
        video_fps
    );
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut sink = ImageSequenceSink::create(&args.output, video_fps)?;
    let stats = render(&seq, Box::new(source), &mut sink, &config)?;

    println!();
    println!("=== Summary ===");
    println!("Frames: {}", stats.frames_written);
    if stats.frozen_frames > 0 {
        println!(
            "Frozen frames: {} (video longer than pose data)",
            stats.frozen_frames
        );
    }
    println!("Output: {}", args.output.display());
    Ok(())
}
