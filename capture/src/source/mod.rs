//! Video source management.
//!
//! A source is addressed by a [`SourceId`], opened through a
//! [`DeviceOpener`], and read through the resulting [`VideoDevice`].

mod capture_source;
pub mod detection;
mod device;
mod id;

pub use capture_source::{CaptureSource, PendingSwitch, SwitchOutcome};
pub use device::{DeviceOpener, OpenCvDevice, OpenCvOpener, VideoDevice};
pub use id::SourceId;
