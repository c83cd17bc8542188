//! Utility Functions
//!
//! Helper functions for frame conversion and other operations.

use capture::VideoFrame;
use capture::converters::to_display_rgb;
use egui::{Color32, ColorImage, Vec2};

/// Converts RGB pixel data to EGUI ColorImage
pub fn rgb_to_color_image(width: usize, height: usize, rgb_pixels: Vec<u8>) -> ColorImage {
    let pixels: Vec<Color32> = rgb_pixels
        .chunks_exact(3)
        .map(|rgb| Color32::from_rgb(rgb[0], rgb[1], rgb[2]))
        .collect();

    ColorImage {
        size: [width, height],
        pixels,
        source_size: Vec2::new(width as f32, height as f32),
    }
}

/// Stretches `frame` to the viewport and wraps it for upload as a texture
pub fn frame_to_color_image(
    frame: &VideoFrame,
    viewport: (i32, i32),
) -> capture::Result<ColorImage> {
    let (width, height, rgb) = to_display_rgb(frame, viewport.0, viewport.1)?;
    Ok(rgb_to_color_image(width, height, rgb))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_color_image() {
        let image = rgb_to_color_image(2, 1, vec![255, 0, 0, 0, 0, 255]);

        assert_eq!(image.size, [2, 1]);
        assert_eq!(image.pixels[0], Color32::from_rgb(255, 0, 0));
        assert_eq!(image.pixels[1], Color32::from_rgb(0, 0, 255));
    }

    #[test]
    fn test_frame_to_color_image_fills_viewport() {
        // BGR red
        let frame = VideoFrame::filled(1280, 720, [0, 0, 255]).unwrap();

        let image = frame_to_color_image(&frame, (640, 480)).unwrap();

        assert_eq!(image.size, [640, 480]);
        assert_eq!(image.pixels.len(), 640 * 480);
        assert_eq!(image.pixels[0], Color32::from_rgb(255, 0, 0));
    }
}
