//! Frame processing hooks.
//!
//! A [`FrameTransform`] turns one frame into another. The session holds two
//! of them: a cheap preview hook applied to every displayed feed frame and an
//! expensive capture hook run inside a [`CaptureTask`](crate::task::CaptureTask).

use crate::error::{CaptureError, Result};
use crate::frame::VideoFrame;
use opencv::core::{self, Mat};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// A pure frame-to-frame processing step.
///
/// Must be `Send + Sync` because capture tasks share it across threads.
pub trait FrameTransform: Send + Sync {
    fn apply(&self, frame: VideoFrame) -> Result<VideoFrame>;

    /// Short name for logs
    fn name(&self) -> &str;
}

/// Returns the input unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl FrameTransform for Identity {
    fn apply(&self, frame: VideoFrame) -> Result<VideoFrame> {
        Ok(frame)
    }

    fn name(&self) -> &str {
        "identity"
    }
}

/// Horizontal flip, the usual selfie view.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mirror;

impl FrameTransform for Mirror {
    fn apply(&self, frame: VideoFrame) -> Result<VideoFrame> {
        let mut flipped = Mat::default();
        core::flip(frame.data(), &mut flipped, 1)
            .map_err(|e| CaptureError::Transform(format!("mirror failed: {}", e)))?;
        Ok(VideoFrame::new(flipped))
    }

    fn name(&self) -> &str {
        "mirror"
    }
}

/// A transform backed by a closure. See [`from_fn`].
pub struct FnTransform<F> {
    name: String,
    func: F,
}

impl<F> FrameTransform for FnTransform<F>
where
    F: Fn(VideoFrame) -> Result<VideoFrame> + Send + Sync,
{
    fn apply(&self, frame: VideoFrame) -> Result<VideoFrame> {
        (self.func)(frame)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Wraps a closure as a named transform.
pub fn from_fn<F>(name: &str, func: F) -> FnTransform<F>
where
    F: Fn(VideoFrame) -> Result<VideoFrame> + Send + Sync,
{
    FnTransform {
        name: name.to_string(),
        func,
    }
}

/// Runs `transform`, reporting a panic as `CaptureError::Transform`.
pub fn apply_guarded(transform: &dyn FrameTransform, frame: VideoFrame) -> Result<VideoFrame> {
    panic::catch_unwind(AssertUnwindSafe(|| transform.apply(frame))).unwrap_or_else(|payload| {
        Err(CaptureError::Transform(format!(
            "'{}' panicked: {}",
            transform.name(),
            panic_message(payload.as_ref())
        )))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::prelude::*;

    /// 3x1 frame whose blue channel is the column index
    fn gradient_frame() -> VideoFrame {
        let mut mat = VideoFrame::blank(3, 1).unwrap().into_mat();
        let bytes = mat.data_bytes_mut().unwrap();
        for x in 0..3 {
            bytes[x * 3] = x as u8;
        }
        VideoFrame::new(mat)
    }

    #[test]
    fn test_identity_returns_input() {
        let frame = VideoFrame::filled(8, 6, [5, 6, 7]).unwrap();
        let out = Identity.apply(frame.clone()).unwrap();

        assert_eq!(out, frame);
        assert_eq!(Identity.name(), "identity");
    }

    #[test]
    fn test_mirror_flips_horizontally() {
        let out = Mirror.apply(gradient_frame()).unwrap();

        assert_eq!(out.size(), (3, 1));
        assert_eq!(out.pixel_at(0, 0), Some([2, 0, 0]));
        assert_eq!(out.pixel_at(2, 0), Some([0, 0, 0]));
    }

    #[test]
    fn test_mirror_twice_is_identity() {
        let frame = gradient_frame();
        let out = Mirror.apply(Mirror.apply(frame.clone()).unwrap()).unwrap();

        assert_eq!(out, frame);
    }

    #[test]
    fn test_from_fn() {
        let failing = from_fn("fail", |_frame| {
            Err(CaptureError::Transform("nope".to_string()))
        });

        assert_eq!(failing.name(), "fail");
        let frame = VideoFrame::blank(2, 2).unwrap();
        assert!(matches!(failing.apply(frame), Err(CaptureError::Transform(_))));
    }

    #[test]
    fn test_apply_guarded_passes_result_through() {
        let frame = VideoFrame::filled(2, 2, [1, 2, 3]).unwrap();
        assert_eq!(apply_guarded(&Identity, frame.clone()).unwrap(), frame);
    }

    #[test]
    fn test_apply_guarded_catches_panic() {
        let exploding = from_fn("exploding", |_| panic!("lens cracked"));

        let err = apply_guarded(&exploding, VideoFrame::blank(2, 2).unwrap()).unwrap_err();

        match err {
            CaptureError::Transform(msg) => {
                assert!(msg.contains("exploding"));
                assert!(msg.contains("lens cracked"));
            }
            other => panic!("expected transform error, got {:?}", other),
        }
    }
}
