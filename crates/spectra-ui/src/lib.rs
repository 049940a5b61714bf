//! GPUI frontend for the Spectra intro overlay.
//!
//! This crate provides the native GPUI side of the intro:
//! - Platform screen capture and activation policy
//! - Backdrop frames built from the precomputed blur levels
//! - IntroOverlay view that ticks the sequencer and paints
//! - IntroWindow for the full-screen window lifecycle

pub mod backdrop;
pub mod platform;
pub mod text_measure;
pub mod theme;
pub mod views;
pub mod window;

// Re-export commonly used types
pub use backdrop::Backdrop;
pub use text_measure::WindowTextMeasure;
pub use theme::{Theme, ThemeExt};
pub use views::{IntroOverlay, IntroOverlayEvent};
pub use window::{run_intro, IntroWindow};
