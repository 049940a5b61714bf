//! Intro phase sequencer.
//!
//! One clock-tick function drives the whole choreography. Every transition is
//! placed at its nominal time (the deadline or the end of the tween that
//! caused it), not at the time of the tick that noticed it, so the timeline is
//! the same at any tick cadence.
//!
//! ```text
//! BlurringIn ──► AwaitingGlyph ──► SingleGlyphSlide ──► GlyphSlideHorizontal
//!     │                                                        │
//!     │ arms glyph + fade deadlines                            ▼
//!     │                                   Holding ◄── MultiGlyphSlide
//!     │
//!     └── fade deadline ──────────────► FadeAndUnblur ──► Finished
//! ```
//!
//! The fade deadline is armed together with the glyph deadline when blur-in
//! completes. It does not wait for the slides: if they are still running
//! when it fires they keep running under the fade.

use std::time::Duration;

use crate::config::IntroConfig;
use crate::easing::Easing;
use crate::layout::{split_lead, Point, Size, TextMeasure, WordLayout};
use crate::tween::Tween;

// =============================================================================
// Overlay State
// =============================================================================

/// Visual state of one label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelState {
    pub visible: bool,
    /// Centre of the label in window coordinates.
    pub position: Point,
    /// Always within 0.0-1.0.
    pub opacity: f32,
}

impl LabelState {
    fn hidden_at(position: Point) -> Self {
        Self {
            visible: false,
            position,
            opacity: 1.0,
        }
    }

    /// Whether paint should draw this label at all.
    pub fn is_drawn(&self, threshold: f32) -> bool {
        self.visible && self.opacity > threshold
    }
}

/// Everything the paint routine reads. Written only by [`Sequencer::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayState {
    /// Index into the blur levels; 0 is fully blurred.
    pub blur_index: usize,
    /// The single lead glyph.
    pub lead: LabelState,
    /// The rest of the word.
    pub tail: LabelState,
}

// =============================================================================
// Phases
// =============================================================================

/// Named stage of the intro, derived from the sequencer's internal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Background stepping from sharp to fully blurred.
    BlurringIn,
    /// Blur done, waiting for the lead glyph deadline.
    AwaitingGlyph,
    /// Lead glyph rising from below to the centre.
    SingleGlyphSlide,
    /// Short pause, then the lead glyph moving left into the word.
    GlyphSlideHorizontal,
    /// Tail sliding in from the right.
    MultiGlyphSlide,
    /// Word assembled, waiting for the fade deadline.
    Holding,
    /// Labels fading while the background steps back to sharp.
    FadeAndUnblur,
    /// Terminal; the window should close.
    Finished,
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// The overlay state changed.
    pub redraw: bool,
    /// The unblur ramp completed; tear the window down.
    pub finished: bool,
}

// =============================================================================
// Internal Stages
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RampDirection {
    /// Towards index 0.
    BlurIn,
    /// Towards the sharp end.
    Unblur,
}

#[derive(Debug, Clone, Copy)]
struct BlurRamp {
    direction: RampDirection,
    next_step_at: Duration,
}

#[derive(Debug, Clone, Copy)]
enum LeadStage {
    Hidden,
    Rising(Tween<Point>),
    Pausing { until: Duration },
    Shifting(Tween<Point>),
    Placed,
}

#[derive(Debug, Clone, Copy)]
enum TailStage {
    Hidden,
    Sliding(Tween<Point>),
    Placed,
}

#[derive(Debug, Clone, Copy)]
struct Fades {
    lead: Tween<f32>,
    tail: Tween<f32>,
}

/// Deadlines armed when blur-in completes, both measured from that instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadlines {
    pub glyph_intro: Duration,
    pub fade: Duration,
}

// =============================================================================
// Sequencer
// =============================================================================

/// Drives the intro from first tick to teardown.
#[derive(Debug, Clone)]
pub struct Sequencer {
    config: IntroConfig,
    viewport: Size,
    lead_text: String,
    tail_text: String,
    sharp_index: usize,

    state: OverlayState,
    ramp: Option<BlurRamp>,
    lead: LeadStage,
    tail: TailStage,
    fades: Option<Fades>,

    blur_in_done_at: Option<Duration>,
    deadlines: Option<Deadlines>,
    glyph_started: bool,
    fade_started: bool,
    finished_at: Option<Duration>,
    last_phase: Phase,
}

impl Sequencer {
    /// Create a sequencer for a display of `viewport` size.
    ///
    /// Starts sharp with both labels hidden; the first blur step happens one
    /// tick interval after time zero.
    pub fn new(config: IntroConfig, viewport: Size) -> Self {
        let (lead, tail) = split_lead(&config.typography.word);
        let (lead_text, tail_text) = (lead.to_string(), tail.to_string());
        let sharp_index = config.blur.steps as usize;
        let first_step = config.blur_tick();

        let state = OverlayState {
            blur_index: sharp_index,
            lead: LabelState::hidden_at(Self::lead_start(&config, viewport)),
            tail: LabelState::hidden_at(Point::new(viewport.width, viewport.height / 2)),
        };

        Self {
            config,
            viewport,
            lead_text,
            tail_text,
            sharp_index,
            state,
            ramp: Some(BlurRamp {
                direction: RampDirection::BlurIn,
                next_step_at: first_step,
            }),
            lead: LeadStage::Hidden,
            tail: TailStage::Hidden,
            fades: None,
            blur_in_done_at: None,
            deadlines: None,
            glyph_started: false,
            fade_started: false,
            finished_at: None,
            last_phase: Phase::BlurringIn,
        }
    }

    fn lead_start(config: &IntroConfig, viewport: Size) -> Point {
        Point::new(
            viewport.width / 2,
            viewport.height + config.geometry.start_below,
        )
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn config(&self) -> &IntroConfig {
        &self.config
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn lead_text(&self) -> &str {
        &self.lead_text
    }

    pub fn tail_text(&self) -> &str {
        &self.tail_text
    }

    /// When blur-in completed, if it has.
    pub fn blur_in_done_at(&self) -> Option<Duration> {
        self.blur_in_done_at
    }

    /// The two deadlines armed by blur-in completion.
    pub fn deadlines(&self) -> Option<Deadlines> {
        self.deadlines
    }

    /// When the unblur ramp completed, if it has.
    pub fn finished_at(&self) -> Option<Duration> {
        self.finished_at
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    pub fn phase(&self) -> Phase {
        if self.finished_at.is_some() {
            return Phase::Finished;
        }
        if self.fade_started {
            return Phase::FadeAndUnblur;
        }
        if matches!(self.ramp, Some(r) if r.direction == RampDirection::BlurIn) {
            return Phase::BlurringIn;
        }
        match (self.lead, self.tail) {
            (_, TailStage::Sliding(_)) => Phase::MultiGlyphSlide,
            (_, TailStage::Placed) => Phase::Holding,
            (LeadStage::Rising(_), _) => Phase::SingleGlyphSlide,
            (LeadStage::Pausing { .. } | LeadStage::Shifting(_), _) => {
                Phase::GlyphSlideHorizontal
            }
            (LeadStage::Hidden | LeadStage::Placed, _) => Phase::AwaitingGlyph,
        }
    }

    /// Advance to `now` (elapsed time since the intro started).
    ///
    /// Word geometry is measured with `measure` at the moment each slide
    /// starts. After the sequence has finished, ticks only keep sampling the
    /// label fades.
    pub fn tick(&mut self, now: Duration, measure: &dyn TextMeasure) -> TickOutcome {
        let before = self.state;

        if self.finished_at.is_none() {
            self.advance_blur(now);
            self.start_glyph_if_due(now);
            self.advance_lead(now, measure);
            self.advance_tail(now);
            if self.start_fade_if_due(now) {
                self.advance_blur(now);
            }
        }
        self.sample(now);

        let phase = self.phase();
        if phase != self.last_phase {
            tracing::debug!("Intro phase {:?} -> {:?} at {:?}", self.last_phase, phase, now);
            self.last_phase = phase;
        }

        TickOutcome {
            redraw: self.state != before,
            finished: self.finished_at.is_some(),
        }
    }

    // -------------------------------------------------------------------------
    // Blur Ramps
    // -------------------------------------------------------------------------

    fn advance_blur(&mut self, now: Duration) {
        let interval = self.config.blur_tick();

        while let Some(mut ramp) = self.ramp {
            if now < ramp.next_step_at {
                break;
            }
            let at = ramp.next_step_at;
            ramp.next_step_at += interval;
            self.ramp = Some(ramp);

            match ramp.direction {
                RampDirection::BlurIn => {
                    if self.state.blur_index > 0 {
                        self.state.blur_index -= 1;
                    } else {
                        self.ramp = None;
                        self.complete_blur_in(at);
                    }
                }
                RampDirection::Unblur => {
                    if self.state.blur_index < self.sharp_index {
                        self.state.blur_index += 1;
                    } else {
                        self.ramp = None;
                        self.finished_at = Some(at);
                        tracing::info!("Intro finished at {:?}", at);
                    }
                }
            }
        }
    }

    fn complete_blur_in(&mut self, at: Duration) {
        let timing = &self.config.timing;
        let deadlines = Deadlines {
            glyph_intro: at + timing.glyph_delay(),
            fade: at + timing.hold(),
        };
        tracing::debug!(
            "Blur-in complete at {:?}; glyph at {:?}, fade at {:?}",
            at,
            deadlines.glyph_intro,
            deadlines.fade
        );
        self.blur_in_done_at = Some(at);
        self.deadlines = Some(deadlines);
    }

    // -------------------------------------------------------------------------
    // Slides
    // -------------------------------------------------------------------------

    fn start_glyph_if_due(&mut self, now: Duration) {
        let Some(deadlines) = self.deadlines else {
            return;
        };
        if self.glyph_started || now < deadlines.glyph_intro {
            return;
        }
        self.glyph_started = true;

        let from = Self::lead_start(&self.config, self.viewport);
        let to = self.viewport.center();
        self.state.lead.visible = true;
        self.state.lead.position = from;
        self.lead = LeadStage::Rising(Tween::new(
            from,
            to,
            deadlines.glyph_intro,
            self.config.timing.rise(),
            Easing::OutCubic,
        ));
    }

    fn advance_lead(&mut self, now: Duration, measure: &dyn TextMeasure) {
        loop {
            match self.lead {
                LeadStage::Rising(tween) if tween.is_finished(now) => {
                    self.state.lead.position = tween.to;
                    self.lead = LeadStage::Pausing {
                        until: tween.end() + self.config.timing.pause(),
                    };
                }
                LeadStage::Pausing { until } if now >= until => {
                    let layout = self.measure_word(measure);
                    tracing::debug!("Word layout for shift: {:?}", layout);
                    self.lead = LeadStage::Shifting(Tween::new(
                        self.state.lead.position,
                        layout.lead_target,
                        until,
                        self.config.timing.shift(),
                        Easing::OutCubic,
                    ));
                }
                LeadStage::Shifting(tween) if tween.is_finished(now) => {
                    self.state.lead.position = tween.to;
                    self.lead = LeadStage::Placed;
                    self.start_tail(tween.end(), measure);
                }
                _ => break,
            }
        }
    }

    fn start_tail(&mut self, at: Duration, measure: &dyn TextMeasure) {
        let layout = self.measure_word(measure);
        self.state.tail.visible = true;
        self.state.tail.position = layout.tail_start;
        self.tail = TailStage::Sliding(Tween::new(
            layout.tail_start,
            layout.tail_target,
            at,
            self.config.timing.word_slide(),
            Easing::OutCubic,
        ));
    }

    fn advance_tail(&mut self, now: Duration) {
        if let TailStage::Sliding(tween) = self.tail {
            if tween.is_finished(now) {
                self.state.tail.position = tween.to;
                self.tail = TailStage::Placed;
            }
        }
    }

    fn measure_word(&self, measure: &dyn TextMeasure) -> WordLayout {
        WordLayout::measure(self.viewport, &self.lead_text, &self.tail_text, measure)
    }

    // -------------------------------------------------------------------------
    // Fade
    // -------------------------------------------------------------------------

    /// Returns true if the fade (and the unblur ramp) started on this call.
    fn start_fade_if_due(&mut self, now: Duration) -> bool {
        let Some(deadlines) = self.deadlines else {
            return false;
        };
        if self.fade_started || now < deadlines.fade {
            return false;
        }
        self.fade_started = true;

        let at = deadlines.fade;
        let duration = self.config.timing.fade();
        let fade = |from: f32| Tween::new(from, 0.0, at, duration, Easing::InOutCubic);
        self.fades = Some(Fades {
            lead: fade(self.state.lead.opacity),
            tail: fade(self.state.tail.opacity),
        });
        self.ramp = Some(BlurRamp {
            direction: RampDirection::Unblur,
            next_step_at: at + self.config.blur_tick(),
        });
        true
    }

    // -------------------------------------------------------------------------
    // Sampling
    // -------------------------------------------------------------------------

    fn sample(&mut self, now: Duration) {
        match self.lead {
            LeadStage::Rising(tween) | LeadStage::Shifting(tween) => {
                self.state.lead.position = tween.sample(now);
            }
            LeadStage::Hidden | LeadStage::Pausing { .. } | LeadStage::Placed => {}
        }
        if let TailStage::Sliding(tween) = self.tail {
            self.state.tail.position = tween.sample(now);
        }
        if let Some(fades) = self.fades {
            self.state.lead.opacity = fades.lead.sample(now).clamp(0.0, 1.0);
            self.state.tail.opacity = fades.tail.sample(now).clamp(0.0, 1.0);
        }
        self.state.blur_index = self.state.blur_index.min(self.sharp_index);
    }
}

// =============================================================================
// Tests
// =============================================================================
