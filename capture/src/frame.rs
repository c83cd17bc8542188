//! Video frame representation.
//!
//! Provides the core `VideoFrame` type that moves between the feed thread,
//! capture tasks and the UI thread.

use crate::error::Result;
use opencv::core::{CV_8UC3, Mat, Scalar};
use opencv::prelude::*;

/// One decoded image in the capture library's native BGR order.
///
/// Wraps an OpenCV Mat. Cloning copies the pixels, so a clone handed to
/// another thread never aliases the original.
#[derive(Clone)]
pub struct VideoFrame {
    data: Mat,
    width: i32,
    height: i32,
    timestamp: std::time::Instant,
}

impl VideoFrame {
    /// Creates a new video frame from an OpenCV Mat
    pub fn new(mat: Mat) -> Self {
        let width = mat.cols();
        let height = mat.rows();

        VideoFrame {
            data: mat,
            width,
            height,
            timestamp: std::time::Instant::now(),
        }
    }

    /// Creates an all-black 3-channel frame
    pub fn blank(width: i32, height: i32) -> Result<Self> {
        Self::filled(width, height, [0, 0, 0])
    }

    /// Creates a 3-channel frame where every pixel is `bgr`
    pub fn filled(width: i32, height: i32, bgr: [u8; 3]) -> Result<Self> {
        let color = Scalar::new(
            f64::from(bgr[0]),
            f64::from(bgr[1]),
            f64::from(bgr[2]),
            0.0,
        );
        let mat = Mat::new_rows_cols_with_default(height, width, CV_8UC3, color)?;
        Ok(Self::new(mat))
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns (width, height)
    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Number of color channels
    pub fn channels(&self) -> i32 {
        self.data.channels()
    }

    /// Returns the creation timestamp
    pub fn timestamp(&self) -> std::time::Instant {
        self.timestamp
    }

    /// True when every pixel byte is zero
    pub fn is_blank(&self) -> bool {
        self.pixels().is_ok_and(|bytes| bytes.iter().all(|&b| b == 0))
    }

    /// Raw pixel bytes, row-major BGR
    pub fn pixels(&self) -> Result<&[u8]> {
        Ok(self.data.data_bytes()?)
    }

    /// Returns the BGR value at (x, y), if inside the frame
    pub fn pixel_at(&self, x: i32, y: i32) -> Option<[u8; 3]> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        let bytes = self.pixels().ok()?;
        let step = self.channels() as usize;
        let offset = (y as usize * self.width as usize + x as usize) * step;
        bytes
            .get(offset..offset + 3)
            .map(|px| [px[0], px[1], px[2]])
    }

    /// Returns reference to the internal OpenCV matrix
    pub fn data(&self) -> &Mat {
        &self.data
    }

    /// Consumes the frame and returns the internal Mat
    pub fn into_mat(self) -> Mat {
        self.data
    }
}

impl PartialEq for VideoFrame {
    /// Frames are equal when dimensions, pixel type and pixels match.
    /// Timestamps are ignored.
    fn eq(&self, other: &Self) -> bool {
        if self.size() != other.size() || self.data.typ() != other.data.typ() {
            return false;
        }
        match (self.pixels(), other.pixels()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Debug for VideoFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_frame() {
        let frame = VideoFrame::blank(640, 480).unwrap();

        assert_eq!(frame.size(), (640, 480));
        assert_eq!(frame.channels(), 3);
        assert!(frame.is_blank());
    }

    #[test]
    fn test_filled_frame_pixel_order() {
        let frame = VideoFrame::filled(4, 2, [10, 20, 30]).unwrap();

        assert_eq!(frame.pixel_at(0, 0), Some([10, 20, 30]));
        assert_eq!(frame.pixel_at(3, 1), Some([10, 20, 30]));
        assert_eq!(frame.pixel_at(4, 0), None);
        assert_eq!(frame.pixel_at(0, -1), None);
        assert!(!frame.is_blank());
    }

    #[test]
    fn test_clone_is_deep_copy_and_equal() {
        let frame = VideoFrame::filled(8, 8, [1, 2, 3]).unwrap();
        let copy = frame.clone();

        assert_eq!(frame, copy);
        assert_ne!(
            frame.pixels().unwrap().as_ptr(),
            copy.pixels().unwrap().as_ptr()
        );
    }

    #[test]
    fn test_frames_differ_by_content_and_size() {
        let a = VideoFrame::filled(8, 8, [1, 2, 3]).unwrap();
        let b = VideoFrame::filled(8, 8, [3, 2, 1]).unwrap();
        let c = VideoFrame::filled(8, 4, [1, 2, 3]).unwrap();

        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_into_mat() {
        let frame = VideoFrame::blank(64, 48).unwrap();
        let mat = frame.into_mat();

        assert_eq!(mat.cols(), 64);
        assert_eq!(mat.rows(), 48);
    }
}
