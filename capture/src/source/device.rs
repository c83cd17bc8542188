//! Video device abstraction and the OpenCV backend.

use super::SourceId;
use crate::error::{CaptureError, Result};
use crate::frame::VideoFrame;
use logging::Logger;
use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{CAP_ANY, VideoCapture};

/// An opened video device that produces frames on demand.
///
/// Implementations must be `Send` so the device can move into the feed thread.
pub trait VideoDevice: Send {
    /// Reads the next frame, blocking until the backend answers.
    ///
    /// # Returns
    /// * `Ok(Some(frame))` - A decoded frame
    /// * `Ok(None)` - No frame available (end of stream, unplugged camera)
    /// * `Err` - The backend reported a failure
    fn read_frame(&mut self) -> Result<Option<VideoFrame>>;
}

/// Opens [`VideoDevice`]s for a [`SourceId`].
///
/// Shared between the UI thread and the feed pump, hence `Send + Sync`.
pub trait DeviceOpener: Send + Sync {
    /// Opens the device, or fails with [`CaptureError::SourceUnavailable`].
    fn open(&self, source: &SourceId) -> Result<Box<dyn VideoDevice>>;
}

/// Opens sources through OpenCV's `VideoCapture`.
pub struct OpenCvOpener {
    logger: Logger,
}

impl OpenCvOpener {
    pub fn new(logger: Logger) -> Self {
        OpenCvOpener { logger }
    }
}

impl DeviceOpener for OpenCvOpener {
    fn open(&self, source: &SourceId) -> Result<Box<dyn VideoDevice>> {
        self.logger.info(&format!("Opening video source {}", source));

        let capture = match source {
            SourceId::Index(index) => i32::try_from(*index)
                .map_err(|_| CaptureError::SourceUnavailable(source.clone()))
                .and_then(|index| VideoCapture::new(index, CAP_ANY).map_err(CaptureError::from)),
            SourceId::Url(url) => VideoCapture::from_file(url, CAP_ANY).map_err(CaptureError::from),
        };

        let capture = match capture {
            Ok(capture) => capture,
            Err(e) => {
                self.logger
                    .warn(&format!("Backend refused source {}: {}", source, e));
                return Err(CaptureError::SourceUnavailable(source.clone()));
            }
        };

        if !capture.is_opened().unwrap_or(false) {
            self.logger
                .warn(&format!("Video source {} did not open", source));
            return Err(CaptureError::SourceUnavailable(source.clone()));
        }

        self.logger.info(&format!("Video source {} opened", source));
        Ok(Box::new(OpenCvDevice {
            capture,
            source: source.clone(),
            logger: self.logger.clone(),
        }))
    }
}

/// A `VideoCapture` handle. Released when dropped.
pub struct OpenCvDevice {
    capture: VideoCapture,
    source: SourceId,
    logger: Logger,
}

impl VideoDevice for OpenCvDevice {
    fn read_frame(&mut self) -> Result<Option<VideoFrame>> {
        let mut mat = Mat::default();
        if !self.capture.read(&mut mat)? || mat.empty() {
            return Ok(None);
        }
        Ok(Some(VideoFrame::new(mat)))
    }
}

impl Drop for OpenCvDevice {
    fn drop(&mut self) {
        self.logger
            .info(&format!("Releasing video source {}", self.source));
        if let Err(e) = self.capture.release() {
            self.logger
                .error(&format!("Failed to release video source {}: {}", self.source, e));
        }
    }
}
