//! UI views for the Spectra intro.

mod intro_overlay;

pub use intro_overlay::{IntroOverlay, IntroOverlayEvent};
