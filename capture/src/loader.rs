//! Image file loading for the upload path.

use crate::error::{CaptureError, Result};
use crate::frame::VideoFrame;
use opencv::imgcodecs::{IMREAD_COLOR, imread};
use opencv::prelude::*;
use std::path::Path;

/// Extensions OpenCV's `imread` can decode, lowercase and without the dot
pub fn supported_extensions() -> &'static [&'static str] {
    &[
        "bmp", "dib", "jpeg", "jpg", "jpe", "jp2", "png", "webp", "pbm", "pgm", "ppm", "pxm",
        "pnm", "sr", "ras", "tiff", "tif", "exr", "hdr", "pic",
    ]
}

/// True when `path` has one of [`supported_extensions`] (case-insensitive)
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| supported_extensions().contains(&ext.as_str()))
}

/// Decodes an image file into a 3-channel BGR frame.
///
/// # Errors
/// `Decode` when the file is missing, unreadable, has an extension outside
/// [`supported_extensions`] or is not an image.
pub fn load_image(path: &Path) -> Result<VideoFrame> {
    let decode_error = |reason: String| CaptureError::Decode {
        path: path.to_path_buf(),
        reason,
    };

    if !has_supported_extension(path) {
        return Err(decode_error("unsupported file type".to_string()));
    }

    let name = path
        .to_str()
        .ok_or_else(|| decode_error("path is not valid UTF-8".to_string()))?;

    let mat = imread(name, IMREAD_COLOR).map_err(|e| decode_error(e.to_string()))?;
    if mat.empty() {
        return Err(decode_error("file could not be decoded".to_string()));
    }

    Ok(VideoFrame::new(mat))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_supported_extensions_include_common_formats() {
        let exts = supported_extensions();
        for ext in ["png", "jpg", "jpeg", "bmp", "tiff", "webp"] {
            assert!(exts.contains(&ext), "missing {}", ext);
        }
    }

    #[test]
    fn test_has_supported_extension() {
        assert!(has_supported_extension(Path::new("photo.PNG")));
        assert!(has_supported_extension(Path::new("/a/b/scan.tif")));
        assert!(!has_supported_extension(Path::new("notes.txt")));
        assert!(!has_supported_extension(Path::new("README")));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_image(Path::new("/definitely/not/here.png"));
        assert!(matches!(result, Err(CaptureError::Decode { .. })));
    }

    #[test]
    fn test_load_rejects_unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"P6\n1 1\n255\n\x00\x00\x00").unwrap();

        let err = load_image(&path).unwrap_err();
        assert!(matches!(
            &err,
            CaptureError::Decode { reason, .. } if reason == "unsupported file type"
        ));
    }

    #[test]
    fn test_load_garbage_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.png");
        fs::write(&path, b"this is not a png").unwrap();

        let err = load_image(&path).unwrap_err();
        assert!(err.to_string().contains("garbage.png"));
    }

    #[test]
    fn test_load_ppm() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("red.ppm");
        // 2x1 binary PPM, both pixels pure red
        let mut bytes = b"P6\n2 1\n255\n".to_vec();
        bytes.extend_from_slice(&[255, 0, 0, 255, 0, 0]);
        fs::write(&path, bytes).unwrap();

        let frame = load_image(&path).unwrap();
        assert_eq!(frame.size(), (2, 1));
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.pixel_at(1, 0), Some([0, 0, 255]));
    }
}
