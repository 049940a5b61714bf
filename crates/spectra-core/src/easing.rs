//! Easing curves.

use serde::{Deserialize, Serialize};

/// Shapes interpolation velocity over normalized time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// `t`
    #[default]
    Linear,
    /// Decelerating: `1 - (1-t)³`
    OutCubic,
    /// Slow start and end.
    InOutCubic,
}

impl Easing {
    /// Apply the curve to a progress value. `t` is clamped to 0.0-1.0.
    ///
    /// Every curve maps 0 to 0 and 1 to 1 exactly.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::OutCubic => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}
