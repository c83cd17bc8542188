//! Fixed-viewport scaling.
//!
//! Frames are stretched to exactly the viewport size; aspect ratio is not
//! preserved.

use super::frame_to_rgb;
use crate::error::{CaptureError, Result};
use crate::frame::VideoFrame;
use opencv::core::{Mat, Size};
use opencv::imgproc::{INTER_LINEAR, resize};

/// Resizes `frame` to `width` x `height`, ignoring aspect ratio.
///
/// Returns a copy unchanged when the frame already has that size.
pub fn scale_to_viewport(frame: &VideoFrame, width: i32, height: i32) -> Result<VideoFrame> {
    if width <= 0 || height <= 0 {
        return Err(CaptureError::Transform(format!(
            "invalid viewport {}x{}",
            width, height
        )));
    }
    if frame.size() == (width, height) {
        return Ok(frame.clone());
    }

    let mut scaled = Mat::default();
    resize(
        frame.data(),
        &mut scaled,
        Size::new(width, height),
        0.0,
        0.0,
        INTER_LINEAR,
    )?;
    Ok(VideoFrame::new(scaled))
}

/// Scales to the viewport and converts to RGB in one step.
pub fn to_display_rgb(frame: &VideoFrame, width: i32, height: i32) -> Result<(usize, usize, Vec<u8>)> {
    let scaled = scale_to_viewport(frame, width, height)?;
    frame_to_rgb(&scaled)
}

/// Maps a point inside a `viewport`-sized stretched image back to frame
/// pixel coordinates. `None` when the point lies outside the viewport.
pub fn map_viewport_point(
    point: (f32, f32),
    viewport: (f32, f32),
    frame_size: (i32, i32),
) -> Option<(i32, i32)> {
    let (x, y) = point;
    let (vw, vh) = viewport;
    if vw <= 0.0 || vh <= 0.0 || x < 0.0 || y < 0.0 || x >= vw || y >= vh {
        return None;
    }

    let (fw, fh) = frame_size;
    let fx = ((x / vw) * fw as f32).floor() as i32;
    let fy = ((y / vh) * fh as f32).floor() as i32;
    Some((fx.min(fw - 1), fy.min(fh - 1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_ignores_aspect_ratio() {
        let frame = VideoFrame::filled(1920, 1080, [10, 20, 30]).unwrap();

        let scaled = scale_to_viewport(&frame, 640, 480).unwrap();

        assert_eq!(scaled.size(), (640, 480));
        assert_eq!(scaled.pixel_at(320, 240), Some([10, 20, 30]));
    }

    #[test]
    fn test_scale_up() {
        let frame = VideoFrame::filled(4, 4, [1, 1, 1]).unwrap();
        let scaled = scale_to_viewport(&frame, 640, 480).unwrap();
        assert_eq!(scaled.size(), (640, 480));
    }

    #[test]
    fn test_scale_same_size_is_copy() {
        let frame = VideoFrame::filled(640, 480, [3, 4, 5]).unwrap();
        let scaled = scale_to_viewport(&frame, 640, 480).unwrap();
        assert_eq!(scaled, frame);
    }

    #[test]
    fn test_scale_invalid_viewport() {
        let frame = VideoFrame::blank(4, 4).unwrap();
        assert!(scale_to_viewport(&frame, 0, 480).is_err());
    }

    #[test]
    fn test_to_display_rgb() {
        let frame = VideoFrame::filled(10, 10, [0, 0, 255]).unwrap();

        let (w, h, rgb) = to_display_rgb(&frame, 20, 5).unwrap();

        assert_eq!((w, h), (20, 5));
        assert_eq!(rgb.len(), 20 * 5 * 3);
        assert_eq!(&rgb[..3], &[255, 0, 0]);
    }

    #[test]
    fn test_map_viewport_point() {
        let viewport = (640.0, 480.0);
        assert_eq!(map_viewport_point((0.0, 0.0), viewport, (1280, 720)), Some((0, 0)));
        assert_eq!(
            map_viewport_point((320.0, 240.0), viewport, (1280, 720)),
            Some((640, 360))
        );
        assert_eq!(
            map_viewport_point((639.9, 479.9), viewport, (1280, 720)),
            Some((1279, 719))
        );
        assert_eq!(map_viewport_point((640.0, 10.0), viewport, (1280, 720)), None);
        assert_eq!(map_viewport_point((-1.0, 10.0), viewport, (1280, 720)), None);
    }
}
