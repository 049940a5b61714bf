//! Windows platform support.
//!
//! Captures the primary monitor through GDI: the screen DC is blitted into a
//! compatible bitmap and read back as top-down 32-bit BGRA rows.

use std::mem;

use image::RgbaImage;
use spectra_core::CaptureError;
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC,
    GetDIBits, ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS,
    HBITMAP, HDC, SRCCOPY,
};
use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

use super::bgra_rows_to_rgba;

/// Windows has no activation policy; the pop-up window already stays out of
/// the taskbar.
pub fn set_activation_policy_accessory() {}

// =============================================================================
// GDI Handles
// =============================================================================

/// The whole-screen DC, released on drop.
struct ScreenDc(HDC);

impl Drop for ScreenDc {
    fn drop(&mut self) {
        // SAFETY: obtained from GetDC(None) and released exactly once.
        unsafe {
            ReleaseDC(HWND::default(), self.0);
        }
    }
}

/// A memory DC, deleted on drop.
struct MemoryDc(HDC);

impl Drop for MemoryDc {
    fn drop(&mut self) {
        // SAFETY: created by CreateCompatibleDC and deleted exactly once.
        unsafe {
            let _ = DeleteDC(self.0);
        }
    }
}

/// A GDI bitmap, deleted on drop. Must outlive its selection into a DC.
struct Bitmap(HBITMAP);

impl Drop for Bitmap {
    fn drop(&mut self) {
        // SAFETY: created by CreateCompatibleBitmap and deleted exactly once.
        unsafe {
            let _ = DeleteObject(self.0);
        }
    }
}

// =============================================================================
// Screen Capture
// =============================================================================

/// Capture the primary monitor.
pub fn capture_primary_display() -> Result<RgbaImage, CaptureError> {
    // SAFETY: plain metric queries.
    let (width, height) =
        unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
    if width <= 0 || height <= 0 {
        return Err(CaptureError::NoDisplay);
    }

    // SAFETY: every handle is checked before use and released by its guard;
    // the bitmap guard is declared before the memory DC so the DC is
    // deleted (dropping the selection) first.
    let bytes = unsafe {
        let screen = ScreenDc(GetDC(HWND::default()));
        if screen.0.is_invalid() {
            return Err(CaptureError::Unavailable("GetDC returned no screen DC".into()));
        }

        let bitmap = Bitmap(CreateCompatibleBitmap(screen.0, width, height));
        if bitmap.0.is_invalid() {
            return Err(CaptureError::Unavailable(format!(
                "CreateCompatibleBitmap failed for {width}x{height}"
            )));
        }

        let memory = MemoryDc(CreateCompatibleDC(screen.0));
        if memory.0.is_invalid() {
            return Err(CaptureError::Unavailable("CreateCompatibleDC failed".into()));
        }

        let previous = SelectObject(memory.0, bitmap.0);
        BitBlt(memory.0, 0, 0, width, height, screen.0, 0, 0, SRCCOPY)
            .map_err(|e| CaptureError::Unavailable(format!("BitBlt failed: {e}")))?;
        SelectObject(memory.0, previous);

        let mut info = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: width,
                // Negative height asks for top-down rows.
                biHeight: -height,
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            ..Default::default()
        };

        let mut bytes = vec![0u8; width as usize * height as usize * 4];
        let lines = GetDIBits(
            memory.0,
            bitmap.0,
            0,
            height as u32,
            Some(bytes.as_mut_ptr().cast()),
            &mut info,
            DIB_RGB_COLORS,
        );
        if lines != height {
            return Err(CaptureError::Unavailable(format!(
                "GetDIBits copied {lines} of {height} rows"
            )));
        }
        bytes
    };

    let image = bgra_rows_to_rgba(&bytes, width as u32, height as u32, width as usize * 4)?;
    tracing::debug!("Captured primary monitor at {}x{}", width, height);
    Ok(image)
}
