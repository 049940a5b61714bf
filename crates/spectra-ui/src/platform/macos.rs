//! macOS platform support.
//!
//! This module provides the accessory activation policy and primary display
//! capture through CoreGraphics.

use core_graphics::display::CGDisplay;
use image::RgbaImage;
use objc2_app_kit::{NSApplication, NSApplicationActivationPolicy};
use objc2_foundation::MainThreadMarker;
use spectra_core::CaptureError;

use super::bgra_rows_to_rgba;

// =============================================================================
// Activation Policy (Dock Visibility)
// =============================================================================

/// Set the app to run as an accessory.
///
/// This hides the app from the dock and removes the menu bar, so the overlay
/// behaves like a tool window.
///
/// # Safety
/// This must be called from the main thread (e.g., inside GPUI's run callback).
pub fn set_activation_policy_accessory() {
    // SAFETY: This is called from the GPUI run callback, which runs on the main thread.
    let mtm = unsafe { MainThreadMarker::new_unchecked() };
    let app = NSApplication::sharedApplication(mtm);
    app.setActivationPolicy(NSApplicationActivationPolicy::Accessory);
}

// =============================================================================
// Screen Capture
// =============================================================================

/// Capture the main display at device resolution.
///
/// Requires the Screen Recording permission; without it CoreGraphics returns
/// no image (or only the wallpaper on older systems).
pub fn capture_primary_display() -> Result<RgbaImage, CaptureError> {
    let display = CGDisplay::main();
    let image = display.image().ok_or_else(|| {
        CaptureError::Unavailable(format!(
            "CGDisplayCreateImage returned nothing for display {}",
            display.id
        ))
    })?;

    let width = image.width() as u32;
    let height = image.height() as u32;
    if image.bits_per_pixel() != 32 {
        return Err(CaptureError::InvalidBuffer(format!(
            "expected 32 bits per pixel, got {}",
            image.bits_per_pixel()
        )));
    }

    let data = image.data();
    let result = bgra_rows_to_rgba(data.bytes(), width, height, image.bytes_per_row());
    if let Ok(ref captured) = result {
        tracing::debug!(
            "Captured display {} at {}x{}",
            display.id,
            captured.width(),
            captured.height()
        );
    }
    result
}
