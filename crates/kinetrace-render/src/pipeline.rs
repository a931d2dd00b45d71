//! Render pipeline: decode -> overlay -> sink
//!
//! Decode runs on its own thread behind a bounded channel to overlap
//! I/O with drawing; composited frames go to the sink from a single
//! consumer, so output order is the source order by construction.
//! Any stage failure cancels the run and surfaces one terminal error;
//! the sink is only finalized after every frame landed.

use crossbeam_channel::{bounded, Sender};
use image::RgbImage;

use kinetrace_core::{KinetraceError, KinetraceResult, PoseSequence};

use crate::{align_index, overlay_frame, DrawConfig, FrameSink, FrameSource};

/// Bounded queue depth between decode and draw
const PIPELINE_DEPTH: usize = 4;

/// Counters observable after a render run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Composited frames emitted to the sink
    pub frames_written: usize,
    /// Video frames past the end of the pose sequence that reused
    /// the last pose frame's skeleton (the freeze-last-frame
    /// fallback; never silent)
    pub frozen_frames: usize,
}

/// Render the full overlay video.
///
/// Alignment uses the sequence's effective fps, i.e. whatever the
/// caller loaded or overrode; the video's own fps comes from the
/// source. If the video outlives the pose sequence the last pose
/// frame is frozen and counted; trailing unused pose frames are not
/// an error.
pub fn render(
    seq: &PoseSequence,
    source: Box<dyn FrameSource + '_>,
    sink: &mut dyn FrameSink,
    config: &DrawConfig,
) -> KinetraceResult<RenderStats> {
    if seq.frame_count() == 0 {
        return Err(KinetraceError::EmptySequence);
    }

    let pose_fps = seq.header().fps;
    let video_fps = source.fps();
    let last_pose = seq.frame_count() - 1;

    let stats = std::thread::scope(|scope| -> KinetraceResult<RenderStats> {
        let (tx, rx) = bounded::<KinetraceResult<RgbImage>>(PIPELINE_DEPTH);
        scope.spawn(move || decode_loop(source, tx));

        let mut stats = RenderStats::default();
        for (video_index, received) in rx.into_iter().enumerate() {
            let video_frame = received?;

            let target = align_index(video_index, pose_fps, video_fps);
            let pose_index = if target > last_pose {
                stats.frozen_frames += 1;
                if stats.frozen_frames == 1 {
                    tracing::warn!(
                        video_index,
                        pose_frames = seq.frame_count(),
                        "pose sequence exhausted; freezing last pose frame"
                    );
                }
                last_pose
            } else {
                target
            };

            let composited =
                overlay_frame(&video_frame, &seq.frames()[pose_index], config);
            sink.write_frame(&composited)?;
            stats.frames_written += 1;
        }
        Ok(stats)
    })?;

    sink.finish()?;
    tracing::info!(
        frames = stats.frames_written,
        frozen = stats.frozen_frames,
        "overlay render complete"
    );
    Ok(stats)
}

/// Producer side: pull decoded frames until end of stream or error.
/// A failed send means the consumer bailed out; just stop.
fn decode_loop(mut source: Box<dyn FrameSource + '_>, tx: Sender<KinetraceResult<RgbImage>>) {
    loop {
        match source.next_frame() {
            Ok(Some(frame)) => {
                if tx.send(Ok(frame)).is_err() {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                let _ = tx.send(Err(e));
                break;
            }
        }
    }
}
