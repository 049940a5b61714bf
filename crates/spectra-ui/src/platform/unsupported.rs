//! Fallback for platforms without a capture backend.

use image::RgbaImage;
use spectra_core::CaptureError;

/// No Dock equivalent to hide from.
pub fn set_activation_policy_accessory() {}

/// Always fails; the intro needs a desktop capture to draw anything.
pub fn capture_primary_display() -> Result<RgbaImage, CaptureError> {
    Err(CaptureError::Unsupported)
}
