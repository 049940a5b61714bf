//! Explicit interpolation records.
//!
//! A `Tween` is sampled against elapsed time on every tick instead of pushing
//! values through setter callbacks. Times are offsets from the start of the
//! sequence so scenarios can be replayed deterministically.

use std::time::Duration;

use crate::easing::Easing;
use crate::layout::Point;

/// Values that can be linearly interpolated.
pub trait Lerp: Copy {
    /// Interpolate from `self` towards `to` by `t` in 0.0-1.0.
    fn lerp(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Point {
    fn lerp(self, to: Self, t: f32) -> Self {
        Point {
            x: self.x + ((to.x - self.x) as f32 * t).round() as i32,
            y: self.y + ((to.y - self.y) as f32 * t).round() as i32,
        }
    }
}

/// One running interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
    /// Elapsed time at which the tween starts.
    pub start: Duration,
    pub duration: Duration,
    pub easing: Easing,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, start: Duration, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing,
        }
    }

    /// Elapsed time at which the tween reaches `to`.
    pub fn end(&self) -> Duration {
        self.start + self.duration
    }

    /// Normalized progress at `now`, before easing.
    pub fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Value at `now`. Exactly `to` once `now >= end()`.
    pub fn sample(&self, now: Duration) -> T {
        if self.is_finished(now) {
            return self.to;
        }
        self.from.lerp(self.to, self.easing.apply(self.progress(now)))
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        now >= self.end()
    }
}
