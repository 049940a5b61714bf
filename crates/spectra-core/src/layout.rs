//! Word layout and per-glyph colouring.
//!
//! The intro word is drawn as two labels: a lead glyph ("S") and a tail
//! ("PECTRA"). Their final positions are derived from measured advances so
//! that the assembled word sits centred on the display.

use unicode_segmentation::UnicodeSegmentation;

use crate::config::Rgba;

/// Integer position in window coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Display size in logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2, self.height / 2)
    }
}

/// Text measurement supplied by the rendering backend.
#[cfg_attr(test, mockall::automock)]
pub trait TextMeasure {
    /// Horizontal advance of `text` in pixels, in the intro font.
    fn advance(&self, text: &str) -> f32;
}

/// Final geometry of the assembled word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordLayout {
    /// Advance of the whole word measured as one string.
    pub word_width: i32,
    pub lead_width: i32,
    pub tail_width: i32,
    /// Left edge of the centred word.
    pub word_left: i32,
    /// Where the lead glyph's centre ends up.
    pub lead_target: Point,
    /// Where the tail's centre enters from (just past the right edge).
    pub tail_start: Point,
    /// Where the tail's centre ends up, flush against the lead glyph.
    pub tail_target: Point,
}

impl WordLayout {
    /// Measure `lead` + `tail` and place both so the word is centred.
    pub fn measure(viewport: Size, lead: &str, tail: &str, measure: &dyn TextMeasure) -> Self {
        let word = format!("{lead}{tail}");
        let word_width = measure.advance(&word).round() as i32;
        let lead_width = measure.advance(lead).round() as i32;
        let tail_width = measure.advance(tail).round() as i32;

        let mid_y = viewport.height / 2;
        let word_left = (viewport.width - word_width).div_euclid(2);
        let lead_x = word_left + lead_width / 2;
        let tail_x = lead_x + lead_width / 2 + tail_width / 2;

        Self {
            word_width,
            lead_width,
            tail_width,
            word_left,
            lead_target: Point::new(lead_x, mid_y),
            tail_start: Point::new(viewport.width + tail_width, mid_y),
            tail_target: Point::new(tail_x, mid_y),
        }
    }

    /// Horizontal centre of the measured word.
    pub fn word_center_x(&self) -> f32 {
        self.word_left as f32 + self.word_width as f32 / 2.0
    }
}

/// Split a word into its first grapheme cluster and the rest.
pub fn split_lead(word: &str) -> (&str, &str) {
    match word.grapheme_indices(true).nth(1) {
        Some((idx, _)) => word.split_at(idx),
        None => (word, ""),
    }
}

/// Colour of glyph `index` in a word of `len` glyphs, dark to light.
///
/// Single-glyph (and empty) words get the dark colour.
pub fn gradient_color(dark: Rgba, light: Rgba, index: usize, len: usize) -> Rgba {
    if len < 2 {
        return dark;
    }
    let t = (index.min(len - 1) as f32) / ((len - 1) as f32);
    let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
    Rgba {
        r: channel(dark.r, light.r),
        g: channel(dark.g, light.g),
        b: channel(dark.b, light.b),
        a: channel(dark.a, light.a),
    }
}

/// One glyph of the tail label, ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphPlacement {
    pub text: String,
    /// Left edge in window coordinates.
    pub left: f32,
    pub color: Rgba,
}

/// Lay out `text` glyph by glyph around `center_x`, each glyph offset by the
/// advance of everything before it and tinted along the gradient.
pub fn gradient_glyphs(
    text: &str,
    center_x: f32,
    measure: &dyn TextMeasure,
    dark: Rgba,
    light: Rgba,
) -> Vec<GlyphPlacement> {
    let left = center_x - measure.advance(text) / 2.0;
    let len = text.graphemes(true).count();

    text.grapheme_indices(true)
        .enumerate()
        .map(|(i, (byte_idx, glyph))| {
            let offset = if byte_idx == 0 {
                0.0
            } else {
                measure.advance(&text[..byte_idx])
            };
            GlyphPlacement {
                text: glyph.to_string(),
                left: left + offset,
                color: gradient_color(dark, light, i, len),
            }
        })
        .collect()
}

/// Top-left origin of a line box of `width` x `line_height` centred on `center`.
pub fn centered_origin(center: Point, width: f32, line_height: f32) -> (f32, f32) {
    (
        center.x as f32 - width / 2.0,
        center.y as f32 - line_height / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const DARK: Rgba = Rgba::rgb(80, 0, 120);
    const LIGHT: Rgba = Rgba::rgb(180, 120, 255);

    /// Every glyph advances by `width` pixels.
    fn monospace(width: f32) -> MockTextMeasure {
        let mut mock = MockTextMeasure::new();
        mock.expect_advance()
            .returning(move |text| text.graphemes(true).count() as f32 * width);
        mock
    }

    #[test]
    fn test_word_centered_on_display() {
        let viewport = Size::new(1920, 1080);
        let layout = WordLayout::measure(viewport, "S", "PECTRA", &monospace(150.0));

        assert_eq!(layout.word_width, 1050);
        assert_eq!(layout.word_left, 435);
        assert!((layout.word_center_x() - 960.0).abs() <= 1.0);
        assert_eq!(layout.lead_target, Point::new(510, 540));
        assert_eq!(layout.tail_target, Point::new(510 + 75 + 450, 540));
        assert_eq!(layout.tail_start, Point::new(1920 + 900, 540));
    }

    #[test]
    fn test_word_centering_odd_widths() {
        for (width, advance) in [(1921, 137.3), (1366, 99.9), (800, 61.0), (3840, 411.5)] {
            let viewport = Size::new(width, 1080);
            let layout = WordLayout::measure(viewport, "S", "PECTRA", &monospace(advance));
            let center = width as f32 / 2.0;
            assert!(
                (layout.word_center_x() - center).abs() <= 1.0,
                "width {width}, advance {advance}"
            );
        }
    }

    #[test]
    fn test_word_uses_whole_word_measurement() {
        // Kerning makes the whole word narrower than its parts.
        let mut mock = MockTextMeasure::new();
        mock.expect_advance().returning(|text| match text {
            "SPECTRA" => 1000.0,
            "S" => 160.0,
            "PECTRA" => 860.0,
            _ => 0.0,
        });

        let layout = WordLayout::measure(Size::new(1920, 1080), "S", "PECTRA", &mock);
        assert_eq!(layout.word_left, 460);
        assert_eq!(layout.lead_target.x, 540);
        assert_eq!(layout.tail_target.x, 540 + 80 + 430);
    }

    #[test]
    fn test_word_wider_than_display() {
        let layout = WordLayout::measure(Size::new(100, 100), "S", "PECTRA", &monospace(50.0));
        assert_eq!(layout.word_left, -125);
        assert!((layout.word_center_x() - 50.0).abs() <= 1.0);
    }

    #[test]
    fn test_split_lead() {
        assert_eq!(split_lead("SPECTRA"), ("S", "PECTRA"));
        assert_eq!(split_lead("S"), ("S", ""));
        assert_eq!(split_lead(""), ("", ""));
        // Combining mark stays with its base.
        assert_eq!(split_lead("e\u{301}cho"), ("e\u{301}", "cho"));
    }

    #[test]
    fn test_gradient_endpoints_exact() {
        assert_eq!(gradient_color(DARK, LIGHT, 0, 6), DARK);
        assert_eq!(gradient_color(DARK, LIGHT, 5, 6), LIGHT);
        assert_eq!(gradient_color(DARK, LIGHT, 0, 2), DARK);
        assert_eq!(gradient_color(DARK, LIGHT, 1, 2), LIGHT);
    }

    #[test]
    fn test_gradient_single_glyph_is_dark() {
        assert_eq!(gradient_color(DARK, LIGHT, 0, 1), DARK);
        assert_eq!(gradient_color(DARK, LIGHT, 0, 0), DARK);
    }

    #[test]
    fn test_gradient_midpoint() {
        // 2/5 of the way: 80 + 100*0.4 = 120, 0 + 120*0.4 = 48, 120 + 135*0.4 = 174
        assert_eq!(gradient_color(DARK, LIGHT, 2, 6), Rgba::rgb(120, 48, 174));
    }

    #[test]
    fn test_gradient_glyphs_positions_and_colors() {
        let glyphs = gradient_glyphs("PECTRA", 1000.0, &monospace(100.0), DARK, LIGHT);

        assert_eq!(glyphs.len(), 6);
        let lefts: Vec<f32> = glyphs.iter().map(|g| g.left).collect();
        assert_eq!(lefts, vec![700.0, 800.0, 900.0, 1000.0, 1100.0, 1200.0]);
        assert_eq!(glyphs[0].text, "P");
        assert_eq!(glyphs[5].text, "A");
        assert_eq!(glyphs[0].color, DARK);
        assert_eq!(glyphs[5].color, LIGHT);
    }

    #[test]
    fn test_gradient_glyphs_single() {
        let glyphs = gradient_glyphs("P", 500.0, &monospace(80.0), DARK, LIGHT);
        assert_eq!(glyphs.len(), 1);
        assert_eq!(glyphs[0].left, 460.0);
        assert_eq!(glyphs[0].color, DARK);
    }

    #[test]
    fn test_centered_origin() {
        let (x, y) = centered_origin(Point::new(960, 540), 200.0, 324.0);
        assert_eq!(x, 860.0);
        assert_eq!(y, 378.0);
    }
}
