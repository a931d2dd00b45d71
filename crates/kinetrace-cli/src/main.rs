//! kinetrace - pose file conversion and skeleton overlay tool
//!
//! `kinetrace convert` turns a directory of per-frame OpenPose JSON
//! detections into one binary pose file; `kinetrace visualize` draws
//! a pose file back onto the source video as a skeleton overlay.

mod convert;
mod visualize;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kinetrace", version, about = "OpenPose keypoint archiving and overlay visualization")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert OpenPose JSON keypoints to a binary pose file
    Convert(convert::ConvertArgs),
    /// Overlay pose data as a skeleton on the source video
    Visualize(visualize::VisualizeArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Convert(args) => convert::run(args),
        Command::Visualize(args) => visualize::run(args),
    };

    if let Err(err) = result {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
