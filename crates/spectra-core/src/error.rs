//! Error types for the Spectra intro.

use thiserror::Error;

/// Screen capture errors. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// No capture backend exists for this platform.
    #[error("Screen capture is not supported on this platform")]
    Unsupported,

    /// The windowing system reported no primary display.
    #[error("No primary display found")]
    NoDisplay,

    /// The platform refused or failed the capture.
    #[error("Screen capture failed: {0}")]
    Unavailable(String),

    /// The capture succeeded but has no pixels.
    #[error("Captured image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// Pixel data did not match the reported geometry.
    #[error("Invalid capture buffer: {0}")]
    InvalidBuffer(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A value is outside its allowed range.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level startup errors.
#[derive(Debug, Error)]
pub enum IntroError {
    /// Background capture failed.
    #[error(transparent)]
    Capture(#[from] CaptureError),

    /// Blur parameters cannot produce a level sequence.
    #[error("Invalid blur schedule: {0}")]
    InvalidSchedule(String),

    /// Configuration rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The overlay window could not be opened.
    #[error("Window error: {0}")]
    Window(String),
}
