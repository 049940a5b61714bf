//! Text measurement on top of GPUI's text system.

use std::sync::Arc;

use gpui::{black, Font, Pixels, SharedString, TextRun, WindowTextSystem};
use spectra_core::TextMeasure;

use crate::theme::Theme;

/// Measures advances in the intro font with the window's text system.
pub struct WindowTextMeasure {
    text_system: Arc<WindowTextSystem>,
    font: Font,
    font_size: Pixels,
}

impl WindowTextMeasure {
    pub fn new(text_system: Arc<WindowTextSystem>, theme: &Theme) -> Self {
        Self {
            text_system,
            font: theme.font.clone(),
            font_size: theme.font_size,
        }
    }
}

impl TextMeasure for WindowTextMeasure {
    fn advance(&self, text: &str) -> f32 {
        let run = TextRun {
            len: text.len(),
            font: self.font.clone(),
            color: black(),
            background_color: None,
            underline: None,
            strikethrough: None,
        };
        let line = self.text_system.shape_line(
            SharedString::from(text.to_string()),
            self.font_size,
            &[run],
            None,
        );
        line.width.into()
    }
}
