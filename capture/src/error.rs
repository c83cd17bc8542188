//! Error types for capture operations.

use crate::source::SourceId;
use std::fmt;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, CaptureError>;

/// Error type for capture, decoding and processing
#[derive(Debug)]
pub enum CaptureError {
    /// The camera index or stream URL could not be opened
    SourceUnavailable(SourceId),
    /// Prompt text is not a camera index or URL
    InvalidSource(String),
    /// An image file could not be decoded
    Decode { path: PathBuf, reason: String },
    /// A frame transform failed or panicked
    Transform(String),
    /// A worker thread could not be spawned or was lost
    Thread(String),
    /// OpenCV error
    OpenCv(opencv::Error),
    /// I/O error
    Io(io::Error),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::SourceUnavailable(source) => {
                write!(f, "unable to open video source: {}", source)
            }
            CaptureError::InvalidSource(text) => {
                write!(f, "invalid video source '{}': expected a camera index or URL", text)
            }
            CaptureError::Decode { path, reason } => {
                write!(f, "unable to load image {}: {}", path.display(), reason)
            }
            CaptureError::Transform(msg) => write!(f, "Processing error: {}", msg),
            CaptureError::Thread(msg) => write!(f, "Thread error: {}", msg),
            CaptureError::OpenCv(err) => write!(f, "OpenCV error: {}", err),
            CaptureError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for CaptureError {}

impl From<io::Error> for CaptureError {
    fn from(err: io::Error) -> Self {
        CaptureError::Io(err)
    }
}

impl From<opencv::Error> for CaptureError {
    fn from(err: opencv::Error) -> Self {
        CaptureError::OpenCv(err)
    }
}
