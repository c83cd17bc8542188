//! BGR to RGB conversion
//!
//! OpenCV hands out BGR; egui textures want RGB.

use crate::error::Result;
use crate::frame::VideoFrame;

/// Converts a BGR frame to RGB pixel data
///
/// # Returns
/// * `Ok((width, height, rgb_pixels))` - Frame dimensions and RGB pixel data
/// * `Err` - If frame data cannot be accessed
pub fn frame_to_rgb(frame: &VideoFrame) -> Result<(usize, usize, Vec<u8>)> {
    let width = frame.width() as usize;
    let height = frame.height() as usize;
    let bgr = frame.pixels()?;

    Ok((width, height, swap_red_blue(bgr)))
}

fn swap_red_blue(bgr: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(bgr.len());
    for px in bgr.chunks_exact(3) {
        rgb.extend_from_slice(&[px[2], px[1], px[0]]);
    }
    rgb
}
