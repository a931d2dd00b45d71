//! Frame alignment - video frame index -> pose frame index
//!
//! Equal frame rates map 1:1 (the expected case once callers apply
//! the fps override from the codec). Otherwise the pose index for
//! video frame i is round(i * pose_fps / video_fps). The returned
//! index is unclamped; the pipeline clamps and counts frozen frames
//! so the short-sequence fallback stays observable.

/// Pose frame index for a given video frame index, unclamped.
pub fn align_index(video_index: usize, pose_fps: f64, video_fps: f64) -> usize {
    if pose_fps == video_fps {
        return video_index;
    }
    (video_index as f64 * pose_fps / video_fps).round() as usize
}
