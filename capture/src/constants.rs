//! Shared constants for the capture pipeline

use std::time::Duration;

/// Default frame and viewport size
pub mod dimensions {
    /// Default width of the blank placeholder and the display viewport
    pub const DEFAULT_WIDTH: i32 = 640;
    /// Default height of the blank placeholder and the display viewport
    pub const DEFAULT_HEIGHT: i32 = 480;
}

/// Feed loop pacing
pub mod feed {
    use super::Duration;

    /// Sleep after a read that produced no frame
    pub const MISS_BACKOFF: Duration = Duration::from_millis(10);
    /// Sleep after a backend read error
    pub const ERROR_BACKOFF: Duration = Duration::from_millis(100);
    /// Log progress every N delivered frames
    pub const LOG_INTERVAL: u64 = 1000;
    /// Name of the feed loop thread
    pub const THREAD_NAME: &str = "camera-feed";
}
