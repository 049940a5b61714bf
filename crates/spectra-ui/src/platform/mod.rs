//! Platform-specific implementations.
//!
//! This module provides screen capture and the app activation policy.
//! macOS captures through CoreGraphics and Windows through GDI; elsewhere
//! capture reports `Unsupported` and the intro aborts before opening a window.

use image::RgbaImage;
use spectra_core::CaptureError;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "macos")]
pub use macos::*;

#[cfg(target_os = "windows")]
pub mod win32;

#[cfg(target_os = "windows")]
pub use win32::*;

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub mod unsupported;

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub use unsupported::*;

/// Convert 32-bit BGRA rows (with row padding) to an opaque RGBA image.
///
/// Display captures carry no meaningful transparency, so alpha is forced to
/// 255 and the result is straight RGBA.
pub fn bgra_rows_to_rgba(
    bytes: &[u8],
    width: u32,
    height: u32,
    bytes_per_row: usize,
) -> Result<RgbaImage, CaptureError> {
    if width == 0 || height == 0 {
        return Err(CaptureError::EmptyImage { width, height });
    }

    let row_len = width as usize * 4;
    if bytes_per_row < row_len {
        return Err(CaptureError::InvalidBuffer(format!(
            "row stride {bytes_per_row} shorter than {row_len} bytes"
        )));
    }
    let needed = bytes_per_row * (height as usize - 1) + row_len;
    if bytes.len() < needed {
        return Err(CaptureError::InvalidBuffer(format!(
            "{} bytes for {width}x{height} with stride {bytes_per_row}",
            bytes.len()
        )));
    }

    let mut rgba = Vec::with_capacity(row_len * height as usize);
    for row in bytes.chunks(bytes_per_row).take(height as usize) {
        for px in row[..row_len].chunks_exact(4) {
            rgba.extend_from_slice(&[px[2], px[1], px[0], 255]);
        }
    }

    RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| CaptureError::InvalidBuffer("pixel count mismatch".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bgra_rows_with_padding() {
        // 2x2 image, 12-byte stride (4 bytes of padding per row)
        #[rustfmt::skip]
        let bytes = [
            1, 2, 3, 0,   4, 5, 6, 0,   9, 9, 9, 9,
            7, 8, 9, 0,   10, 11, 12, 0,
        ];
        let image = bgra_rows_to_rgba(&bytes, 2, 2, 12).unwrap();

        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(0, 0).0, [3, 2, 1, 255]);
        assert_eq!(image.get_pixel(1, 0).0, [6, 5, 4, 255]);
        assert_eq!(image.get_pixel(0, 1).0, [9, 8, 7, 255]);
        assert_eq!(image.get_pixel(1, 1).0, [12, 11, 10, 255]);
    }

    #[test]
    fn test_bgra_rows_tight_stride() {
        // Top-down DIB rows with no padding, alpha left at 0 by GDI
        #[rustfmt::skip]
        let bytes = [
            255, 0, 0, 0,   0, 255, 0, 0,   0, 0, 255, 0,
        ];
        let image = bgra_rows_to_rgba(&bytes, 3, 1, 12).unwrap();

        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(image.get_pixel(1, 0).0, [0, 255, 0, 255]);
        assert_eq!(image.get_pixel(2, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_bgra_rows_empty() {
        let err = bgra_rows_to_rgba(&[], 0, 1080, 0).unwrap_err();
        assert!(matches!(err, CaptureError::EmptyImage { width: 0, height: 1080 }));
    }

    #[test]
    fn test_bgra_rows_short_buffer() {
        let err = bgra_rows_to_rgba(&[0; 15], 2, 2, 8).unwrap_err();
        assert!(matches!(err, CaptureError::InvalidBuffer(_)));
    }

    #[test]
    fn test_bgra_rows_short_stride() {
        let err = bgra_rows_to_rgba(&[0; 64], 4, 2, 8).unwrap_err();
        assert!(matches!(err, CaptureError::InvalidBuffer(_)));
    }
}
