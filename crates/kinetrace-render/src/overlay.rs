//! Per-frame skeleton compositing
//!
//! Always draws onto a fresh copy of the decoded frame. Reusing a
//! buffer across frames would bleed one frame's skeleton into the
//! next.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

use kinetrace_core::Frame;

use crate::DrawConfig;

/// Composite one pose frame onto a copy of a video frame.
///
/// A bone is drawn only when both endpoints are at or above the
/// confidence threshold; a joint circle is drawn for each visible
/// keypoint. The `(0, 0, 0)` undetected sentinel is never drawn,
/// even under a zero threshold.
pub fn overlay_frame(video_frame: &RgbImage, pose_frame: &Frame, config: &DrawConfig) -> RgbImage {
    let mut out = video_frame.clone();

    for person in pose_frame.persons() {
        for bone in &config.bones {
            let (Some(a), Some(b)) = (person.keypoint(bone.a), person.keypoint(bone.b)) else {
                continue;
            };
            if a.is_detected()
                && b.is_detected()
                && a.is_visible(config.confidence_threshold)
                && b.is_visible(config.confidence_threshold)
            {
                draw_line_segment_mut(&mut out, (a.x, a.y), (b.x, b.y), Rgb(bone.color));
            }
        }

        for kp in person.keypoints() {
            if kp.is_detected() && kp.is_visible(config.confidence_threshold) {
                draw_filled_circle_mut(
                    &mut out,
                    (kp.x.round() as i32, kp.y.round() as i32),
                    config.joint_radius as i32,
                    Rgb(config.joint_color),
                );
            }
        }
    }

    out
}
