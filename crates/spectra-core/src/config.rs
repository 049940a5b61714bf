//! Intro configuration.
//!
//! `IntroConfig::default()` is the stock choreography and is what the
//! `spectra` binary runs. Launchers embedding the intro may deserialize a
//! TOML table instead; every section falls back to its defaults.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::blur::BlurSchedule;
use crate::error::ConfigError;

const SCREEN_DPI: f32 = 96.0;
const POINTS_PER_INCH: f32 = 72.0;

/// Straight (non-premultiplied) 8-bit colour.
///
/// Serialized as `"#rrggbb"` or `"#rrggbbaa"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` / `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(s: &str) -> Result<Self, ConfigError> {
        let hex = s.trim().trim_start_matches('#');
        let invalid = || ConfigError::Invalid(format!("bad colour '{s}'"));

        if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
            return Err(invalid());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

        Ok(Self {
            r: byte(0)?,
            g: byte(2)?,
            b: byte(4)?,
            a: if hex.len() == 8 { byte(6)? } else { 255 },
        })
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Rgba {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgba> for String {
    fn from(value: Rgba) -> Self {
        value.to_string()
    }
}

/// Full intro configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntroConfig {
    #[serde(default)]
    pub blur: BlurConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub typography: TypographyConfig,

    #[serde(default)]
    pub palette: PaletteConfig,

    #[serde(default)]
    pub geometry: GeometryConfig,
}

/// Blur ramp settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurConfig {
    /// Gaussian radius of the most blurred level.
    pub max_radius: f32,
    /// Number of steps between sharp and fully blurred.
    pub steps: u32,
    /// Interval between ramp steps.
    pub tick_ms: u64,
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self {
            max_radius: 16.0,
            steps: 16,
            tick_ms: 40,
        }
    }
}

/// Phase timings, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// From blur-in completion to the lead glyph appearing.
    pub glyph_delay_ms: u64,
    /// From blur-in completion to the fade-out.
    pub hold_ms: u64,
    /// Lead glyph rising to the centre.
    pub rise_ms: u64,
    /// Pause before the lead glyph moves left.
    pub pause_ms: u64,
    /// Lead glyph moving to its place in the word.
    pub shift_ms: u64,
    /// Tail sliding in from the right.
    pub word_slide_ms: u64,
    /// Label fade-out.
    pub fade_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            glyph_delay_ms: 200,
            hold_ms: 3200,
            rise_ms: 800,
            pause_ms: 250,
            shift_ms: 500,
            word_slide_ms: 500,
            fade_ms: 700,
        }
    }
}

impl TimingConfig {
    pub fn glyph_delay(&self) -> Duration {
        Duration::from_millis(self.glyph_delay_ms)
    }

    pub fn hold(&self) -> Duration {
        Duration::from_millis(self.hold_ms)
    }

    pub fn rise(&self) -> Duration {
        Duration::from_millis(self.rise_ms)
    }

    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }

    pub fn shift(&self) -> Duration {
        Duration::from_millis(self.shift_ms)
    }

    pub fn word_slide(&self) -> Duration {
        Duration::from_millis(self.word_slide_ms)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

/// Text settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypographyConfig {
    /// The word; its first grapheme is the lead glyph.
    pub word: String,
    pub font_family: String,
    /// Font pixel size as a fraction of the display height.
    pub font_scale: f32,
    /// Line box height as a multiple of the font size.
    pub line_height: f32,
}

impl Default for TypographyConfig {
    fn default() -> Self {
        Self {
            word: "SPECTRA".to_string(),
            font_family: "Arial".to_string(),
            font_scale: 0.25,
            line_height: 1.2,
        }
    }
}

impl TypographyConfig {
    /// Font pixel size for a display `height` pixels tall.
    ///
    /// `font_scale` gives a whole point size (truncated), drawn at 96 DPI.
    pub fn font_size(&self, height: i32) -> f32 {
        let points = (height as f32 * self.font_scale).trunc();
        points * SCREEN_DPI / POINTS_PER_INCH
    }
}

/// Colours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Lead glyph colour and start of the tail gradient.
    pub dark_accent: Rgba,
    /// End of the tail gradient.
    pub light_accent: Rgba,
    pub shadow: Rgba,
    /// Shadow offset in pixels, applied on both axes.
    pub shadow_offset: i32,
    /// Labels at or below this opacity are not painted.
    pub opacity_threshold: f32,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            dark_accent: Rgba::rgb(80, 0, 120),
            light_accent: Rgba::rgb(180, 120, 255),
            shadow: Rgba::rgba(0, 0, 0, 160),
            shadow_offset: 4,
            opacity_threshold: 0.01,
        }
    }
}

/// Off-screen start positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// How far below the bottom edge the lead glyph starts.
    pub start_below: i32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self { start_below: 100 }
    }
}

impl IntroConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reject values the sequencer cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.blur.steps == 0 {
            return Err(ConfigError::Invalid("blur.steps must be at least 1".into()));
        }
        if self.blur.tick_ms == 0 {
            return Err(ConfigError::Invalid("blur.tick_ms must be positive".into()));
        }
        if !self.blur.max_radius.is_finite() || self.blur.max_radius < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "blur.max_radius must be finite and non-negative, got {}",
                self.blur.max_radius
            )));
        }
        if self.typography.word.graphemes(true).count() < 2 {
            return Err(ConfigError::Invalid(format!(
                "typography.word needs at least two glyphs, got '{}'",
                self.typography.word
            )));
        }
        if !(self.typography.font_scale > 0.0 && self.typography.font_scale <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "typography.font_scale must be in (0, 1], got {}",
                self.typography.font_scale
            )));
        }
        if !(self.palette.opacity_threshold >= 0.0 && self.palette.opacity_threshold < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "palette.opacity_threshold must be in [0, 1), got {}",
                self.palette.opacity_threshold
            )));
        }
        Ok(())
    }

    pub fn blur_schedule(&self) -> BlurSchedule {
        BlurSchedule::new(self.blur.max_radius, self.blur.steps)
    }

    pub fn blur_tick(&self) -> Duration {
        Duration::from_millis(self.blur.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = IntroConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.blur.steps, 16);
        assert_eq!(config.blur_tick(), Duration::from_millis(40));
        assert_eq!(config.timing.hold(), Duration::from_millis(3200));
        assert_eq!(config.typography.word, "SPECTRA");
    }

    #[test]
    fn test_font_size_scales_with_height() {
        let typography = TypographyConfig::default();
        // 270pt and 279pt (279.25 truncated) at 96 DPI
        assert_eq!(typography.font_size(1080), 360.0);
        assert_eq!(typography.font_size(1117), 372.0);
        assert_eq!(typography.font_size(1), 0.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = IntroConfig::from_toml_str(
            r##"
            [timing]
            hold_ms = 1500

            [palette]
            light_accent = "#ffffff"
            "##,
        )
        .unwrap();

        assert_eq!(config.timing.hold_ms, 1500);
        assert_eq!(config.timing.rise_ms, 800);
        assert_eq!(config.palette.light_accent, Rgba::rgb(255, 255, 255));
        assert_eq!(config.palette.dark_accent, Rgba::rgb(80, 0, 120));
        assert_eq!(config.blur, BlurConfig::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = IntroConfig::default();
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("shadow = \"#000000a0\""));
        assert_eq!(IntroConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_zero_steps() {
        let err = IntroConfig::from_toml_str("[blur]\nsteps = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_single_glyph_word() {
        let err = IntroConfig::from_toml_str("[typography]\nword = \"S\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_negative_radius() {
        let err = IntroConfig::from_toml_str("[blur]\nmax_radius = -2.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_colour() {
        let err = IntroConfig::from_toml_str("[palette]\nshadow = \"#12345\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rgba_hex() {
        assert_eq!(Rgba::from_hex("#500078").unwrap(), Rgba::rgb(80, 0, 120));
        assert_eq!(Rgba::from_hex("000000a0").unwrap(), Rgba::rgba(0, 0, 0, 160));
        assert_eq!(Rgba::rgb(180, 120, 255).to_string(), "#b478ff");
        assert!(Rgba::from_hex("#zz0000").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[blur]\nsteps = 8\ntick_ms = 30").unwrap();

        let config = IntroConfig::load(file.path()).unwrap();
        assert_eq!(config.blur.steps, 8);
        assert_eq!(config.blur.tick_ms, 30);
        assert_eq!(config.blur.max_radius, 16.0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = IntroConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
