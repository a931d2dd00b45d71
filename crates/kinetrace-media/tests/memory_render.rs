//! Render pipeline driven end to end through the in-memory doubles.

use image::RgbImage;
use kinetrace_core::{build_sequence, Frame, Keypoint, KeypointSchema, Person, PoseSequence};
use kinetrace_media::{MemoryFrameSink, MemoryFrameSource};
use kinetrace_render::{render, DrawConfig};

/// Pose frame i carries a single full-confidence marker at (i+1, 5).
fn marker_sequence(count: usize, fps: f64) -> PoseSequence {
    let frames = (0..count)
        .map(|i| {
            let mut keypoints = vec![Keypoint::undetected(); 25];
            keypoints[0] = Keypoint::new(i as f32 + 1.0, 5.0, 1.0);
            Frame::new(vec![Person::new(keypoints)])
        })
        .collect();
    build_sequence(frames, fps, 32, 32, KeypointSchema::body25()).unwrap()
}

#[test]
fn test_render_through_memory_doubles() {
    // 4 pose frames against 6 video frames at the same rate: the
    // last two video frames freeze pose frame 3
    let seq = marker_sequence(4, 30.0);
    let source = MemoryFrameSource::new(vec![RgbImage::new(32, 32); 6], 30.0);
    let mut sink = MemoryFrameSink::new();

    let config =
        DrawConfig::for_schema(&KeypointSchema::body25()).with_joint_radius(0);
    let stats = render(&seq, Box::new(source), &mut sink, &config).unwrap();

    assert_eq!(stats.frames_written, 6);
    assert_eq!(stats.frozen_frames, 2);
    assert!(sink.is_finished());
    for (i, frame) in sink.frames().iter().enumerate() {
        let marker = (i.min(3) + 1) as u32;
        assert_eq!(
            frame.get_pixel(marker, 5),
            &image::Rgb([255, 255, 255]),
            "frame {}",
            i
        );
    }
}
