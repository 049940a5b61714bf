//! Core types for the Spectra intro overlay.
//!
//! This crate is GPUI-independent so every piece of the choreography can be
//! unit-tested without a window:
//! - Blur level precomputation
//! - Easing curves and tweens
//! - Word layout and colour gradient
//! - The phase sequencer and the overlay state it writes
//! - Configuration and error types

pub mod blur;
mod config;
mod easing;
mod error;
pub mod layout;
pub mod sequencer;
mod tween;

pub use blur::{prepare_blur_levels, BlurLevel, BlurLevels, BlurSchedule};
pub use config::{
    BlurConfig, GeometryConfig, IntroConfig, PaletteConfig, Rgba, TimingConfig, TypographyConfig,
};
pub use easing::Easing;
pub use error::{CaptureError, ConfigError, IntroError};
pub use layout::{gradient_color, Point, Size, TextMeasure, WordLayout};
pub use sequencer::{LabelState, OverlayState, Phase, Sequencer, TickOutcome};
pub use tween::{Lerp, Tween};
