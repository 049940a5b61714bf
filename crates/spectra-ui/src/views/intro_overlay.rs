//! Intro overlay view.
//!
//! Owns the backdrop and the sequencer. A frame task ticks the sequencer on
//! the UI thread and notifies when the overlay state changed; `render` hands
//! a snapshot of that state to a canvas that paints the background level and
//! both labels.

use std::sync::Arc;
use std::time::{Duration, Instant};

use gpui::{
    canvas, div, point, prelude::*, px, App, AsyncWindowContext, Bounds, Context, Corners,
    EventEmitter, Hsla, IntoElement, Pixels, Render, RenderImage, SharedString, Styled, Task,
    TextRun, WeakEntity, Window,
};
use spectra_core::layout::{centered_origin, gradient_glyphs};
use spectra_core::{IntroConfig, LabelState, OverlayState, Point, Sequencer, Size};

use crate::backdrop::Backdrop;
use crate::text_measure::WindowTextMeasure;
use crate::theme::{to_hsla, Theme, ThemeExt};

/// Interval between sequencer ticks (~60 Hz).
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

// =============================================================================
// Events
// =============================================================================

/// Events emitted by IntroOverlay.
#[derive(Debug, Clone)]
pub enum IntroOverlayEvent {
    /// The unblur ramp completed and the window was removed.
    Finished,
}

// =============================================================================
// Intro Overlay
// =============================================================================

/// The full-screen intro view.
pub struct IntroOverlay {
    backdrop: Backdrop,
    sequencer: Sequencer,
    started: Instant,
    /// Frame task ticking the sequencer (kept alive).
    _frame_task: Task<()>,
}

impl EventEmitter<IntroOverlayEvent> for IntroOverlay {}

impl IntroOverlay {
    /// Create the overlay and start its frame task.
    pub fn new(
        config: IntroConfig,
        backdrop: Backdrop,
        viewport: Size,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let frame_task = cx.spawn_in(
            window,
            async move |this: WeakEntity<Self>, cx: &mut AsyncWindowContext| {
                loop {
                    cx.background_executor().timer(FRAME_INTERVAL).await;
                    // A dropped entity also ends the loop.
                    let finished = this
                        .update_in(cx, |this, window, cx| this.on_frame(window, cx))
                        .unwrap_or(true);
                    if finished {
                        break;
                    }
                }
            },
        );

        tracing::info!(
            "Intro overlay created: {}x{} viewport, {} blur levels",
            viewport.width,
            viewport.height,
            backdrop.len()
        );

        Self {
            backdrop,
            sequencer: Sequencer::new(config, viewport),
            started: Instant::now(),
            _frame_task: frame_task,
        }
    }

    /// Tick the sequencer. Returns true once the intro is over.
    fn on_frame(&mut self, window: &mut Window, cx: &mut Context<Self>) -> bool {
        let now = self.started.elapsed();
        let measure = WindowTextMeasure::new(window.text_system().clone(), cx.theme());
        let outcome = self.sequencer.tick(now, &measure);

        if outcome.redraw {
            cx.notify();
        }
        if outcome.finished {
            tracing::info!("Intro complete after {:?}, closing overlay", now);
            cx.emit(IntroOverlayEvent::Finished);
            window.remove_window();
        }
        outcome.finished
    }
}

impl Render for IntroOverlay {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let state = *self.sequencer.state();
        let scene = OverlayScene {
            background: self.backdrop.frame(state.blur_index),
            state,
            lead_text: SharedString::from(self.sequencer.lead_text().to_string()),
            tail_text: SharedString::from(self.sequencer.tail_text().to_string()),
            theme: cx.theme().clone(),
        };

        div().size_full().child(
            canvas(
                |_bounds, _window, _cx| {},
                move |bounds, _, window, cx| scene.paint(bounds, window, cx),
            )
            .size_full(),
        )
    }
}

// =============================================================================
// Painting
// =============================================================================

/// Snapshot of everything one frame paints.
struct OverlayScene {
    background: Option<Arc<RenderImage>>,
    state: OverlayState,
    lead_text: SharedString,
    tail_text: SharedString,
    theme: Theme,
}

impl OverlayScene {
    fn paint(self, bounds: Bounds<Pixels>, window: &mut Window, cx: &mut App) {
        if let Some(image) = self.background.clone() {
            let painted = window.paint_image(bounds, Corners::default(), image, 0, false);
            report_paint("background", painted);
        }

        let threshold = self.theme.opacity_threshold;
        if self.state.lead.is_drawn(threshold) {
            self.paint_lead(self.state.lead, bounds, window, cx);
        }
        if self.state.tail.is_drawn(threshold) {
            self.paint_tail(self.state.tail, bounds, window, cx);
        }
    }

    fn paint_lead(
        &self,
        label: LabelState,
        bounds: Bounds<Pixels>,
        window: &mut Window,
        cx: &mut App,
    ) {
        let offset = self.theme.shadow_offset;
        let shadow = self.theme.shadow.opacity(label.opacity);
        let color = to_hsla(self.theme.dark_accent).opacity(label.opacity);
        let shadow_center = label.position.offset(offset, offset);

        self.paint_centered(&self.lead_text, shadow_center, shadow, bounds, window, cx);
        self.paint_centered(&self.lead_text, label.position, color, bounds, window, cx);
    }

    /// Shadow as one run, then each glyph on its own with the gradient colour.
    fn paint_tail(
        &self,
        label: LabelState,
        bounds: Bounds<Pixels>,
        window: &mut Window,
        cx: &mut App,
    ) {
        let offset = self.theme.shadow_offset;
        let shadow = self.theme.shadow.opacity(label.opacity);
        let shadow_center = label.position.offset(offset, offset);
        self.paint_centered(&self.tail_text, shadow_center, shadow, bounds, window, cx);

        let measure = WindowTextMeasure::new(window.text_system().clone(), &self.theme);
        let glyphs = gradient_glyphs(
            &self.tail_text,
            label.position.x as f32,
            &measure,
            self.theme.dark_accent,
            self.theme.light_accent,
        );
        let line_height: f32 = self.theme.line_height.into();
        let top = label.position.y as f32 - line_height / 2.0;

        for glyph in glyphs {
            let color = to_hsla(glyph.color).opacity(label.opacity);
            self.paint_text(glyph.text.into(), (glyph.left, top), color, bounds, window, cx);
        }
    }

    fn paint_centered(
        &self,
        text: &SharedString,
        center: Point,
        color: Hsla,
        bounds: Bounds<Pixels>,
        window: &mut Window,
        cx: &mut App,
    ) {
        let line = window
            .text_system()
            .shape_line(text.clone(), self.theme.font_size, &[self.run(text, color)], None);
        let origin = centered_origin(center, line.width.into(), self.theme.line_height.into());
        let origin = bounds.origin + point(px(origin.0), px(origin.1));
        let painted = line.paint(origin, self.theme.line_height, window, cx);
        report_paint(text, painted);
    }

    fn paint_text(
        &self,
        text: SharedString,
        (left, top): (f32, f32),
        color: Hsla,
        bounds: Bounds<Pixels>,
        window: &mut Window,
        cx: &mut App,
    ) {
        let run = self.run(&text, color);
        let line = window
            .text_system()
            .shape_line(text.clone(), self.theme.font_size, &[run], None);
        let origin = bounds.origin + point(px(left), px(top));
        let painted = line.paint(origin, self.theme.line_height, window, cx);
        report_paint(&text, painted);
    }

    fn run(&self, text: &str, color: Hsla) -> TextRun {
        TextRun {
            len: text.len(),
            font: self.theme.font.clone(),
            color,
            background_color: None,
            underline: None,
            strikethrough: None,
        }
    }
}

/// Log a failed paint call. Returns whether it succeeded.
fn report_paint<E: std::fmt::Debug>(what: &str, result: Result<(), E>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Failed to paint {}: {:?}", what, e);
            false
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_paint() {
        assert!(report_paint("background", Ok::<(), String>(())));
        assert!(!report_paint("S", Err("atlas full".to_string())));
    }
}
