//! Theme for the Spectra intro.
//!
//! `Theme` is derived once from `IntroConfig` and the display height when the
//! window opens, then read by the paint routine through `ThemeExt`.

use gpui::{font, px, App, Font, FontWeight, Global, Hsla, Pixels};
use spectra_core::{IntroConfig, Rgba};

// =============================================================================
// Theme
// =============================================================================

/// Computed colours and typography for the overlay.
#[derive(Debug, Clone)]
pub struct Theme {
    // -------------------------------------------------------------------------
    // Colours
    // -------------------------------------------------------------------------
    /// Lead glyph and start of the tail gradient.
    pub dark_accent: Rgba,
    /// End of the tail gradient.
    pub light_accent: Rgba,
    /// Drop shadow behind both labels.
    pub shadow: Hsla,

    // -------------------------------------------------------------------------
    // Typography
    // -------------------------------------------------------------------------
    pub font: Font,
    pub font_size: Pixels,
    pub line_height: Pixels,

    // -------------------------------------------------------------------------
    // Drawing
    // -------------------------------------------------------------------------
    pub shadow_offset: i32,
    pub opacity_threshold: f32,
}

impl Theme {
    /// Derive the theme for a display `viewport_height` pixels tall.
    pub fn from_config(config: &IntroConfig, viewport_height: i32) -> Self {
        let typography = &config.typography;
        let palette = &config.palette;
        let font_size = typography.font_size(viewport_height);

        Self {
            dark_accent: palette.dark_accent,
            light_accent: palette.light_accent,
            shadow: to_hsla(palette.shadow),

            font: Font {
                weight: FontWeight::BOLD,
                ..font(typography.font_family.clone())
            },
            font_size: px(font_size),
            line_height: px(font_size * typography.line_height),

            shadow_offset: palette.shadow_offset,
            opacity_threshold: palette.opacity_threshold,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&IntroConfig::default(), 1080)
    }
}

impl Global for Theme {}

/// Convert a straight 8-bit colour to GPUI's `Hsla`.
pub fn to_hsla(color: Rgba) -> Hsla {
    gpui::Rgba {
        r: color.r as f32 / 255.0,
        g: color.g as f32 / 255.0,
        b: color.b as f32 / 255.0,
        a: color.a as f32 / 255.0,
    }
    .into()
}

// =============================================================================
// Theme Extensions
// =============================================================================

/// Extension trait for convenient theme access.
pub trait ThemeExt {
    /// Get the current theme.
    fn theme(&self) -> &Theme;
}

impl ThemeExt for App {
    fn theme(&self) -> &Theme {
        self.global::<Theme>()
    }
}

// =============================================================================
// Tests
// =============================================================================
