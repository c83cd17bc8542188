//! Camera source addressing

use crate::error::CaptureError;
use std::fmt;
use std::str::FromStr;

/// Identifies a video source: a local camera index or a stream URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceId {
    Index(u32),
    Url(String),
}

impl Default for SourceId {
    fn default() -> Self {
        SourceId::Index(0)
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceId::Index(index) => write!(f, "{}", index),
            SourceId::Url(url) => f.write_str(url),
        }
    }
}

impl FromStr for SourceId {
    type Err = CaptureError;

    /// Digits-only text is a camera index, anything else is a URL.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(CaptureError::InvalidSource(s.to_string()));
        }

        if text.bytes().all(|b| b.is_ascii_digit()) {
            text.parse::<u32>()
                .map(SourceId::Index)
                .map_err(|_| CaptureError::InvalidSource(text.to_string()))
        } else {
            Ok(SourceId::Url(text.to_string()))
        }
    }
}
