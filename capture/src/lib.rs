//! Camera Capture Module
//!
//! Reads frames from a camera or stream, pumps them to a single consumer on
//! a background thread, runs one-shot processing tasks on captured frames,
//! and prepares frames for display.

pub mod constants;
pub mod converters;
pub mod error;
pub mod frame;
pub mod loader;
pub mod pump;
pub mod source;
pub mod task;
pub mod transform;

pub use error::{CaptureError, Result};
pub use frame::VideoFrame;
pub use pump::{FeedFrame, FeedPump};
pub use source::{
    CaptureSource, DeviceOpener, OpenCvOpener, PendingSwitch, SourceId, SwitchOutcome,
    VideoDevice,
};
pub use task::{CaptureOutcome, CaptureTask};
pub use transform::{FrameTransform, Identity, Mirror};

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
