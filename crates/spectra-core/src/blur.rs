//! Blur level precomputation.
//!
//! The captured desktop is blurred once per ramp step up front; the sequencer
//! then only moves an index through the finished levels.

use std::time::Instant;

use image::{imageops, RgbaImage};

use crate::error::{CaptureError, IntroError};

/// Radii for a blur ramp of `steps` steps.
///
/// Level 0 is the most blurred (`max_radius`), level `steps` is sharp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurSchedule {
    pub max_radius: f32,
    pub steps: u32,
}

impl BlurSchedule {
    pub fn new(max_radius: f32, steps: u32) -> Self {
        Self { max_radius, steps }
    }

    pub fn validate(&self) -> Result<(), IntroError> {
        if self.steps == 0 {
            return Err(IntroError::InvalidSchedule("steps must be at least 1".into()));
        }
        if !self.max_radius.is_finite() || self.max_radius < 0.0 {
            return Err(IntroError::InvalidSchedule(format!(
                "max radius must be finite and non-negative, got {}",
                self.max_radius
            )));
        }
        Ok(())
    }

    /// Number of levels, `steps + 1`.
    pub fn level_count(&self) -> usize {
        self.steps as usize + 1
    }

    /// Radius of level `index`; clamps past the sharp end.
    pub fn radius_at(&self, index: usize) -> f32 {
        let steps = self.steps as usize;
        if steps == 0 {
            return 0.0;
        }
        let remaining = steps - index.min(steps);
        self.max_radius * remaining as f32 / steps as f32
    }
}

/// One precomputed rendering of the background.
#[derive(Debug, Clone)]
pub struct BlurLevel {
    pub radius: f32,
    pub image: RgbaImage,
}

/// The full ramp, most blurred first. Never empty.
#[derive(Debug, Clone)]
pub struct BlurLevels {
    levels: Vec<BlurLevel>,
}

impl BlurLevels {
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Index of the sharp level.
    pub fn sharp_index(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    pub fn get(&self, index: usize) -> Option<&BlurLevel> {
        self.levels.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlurLevel> {
        self.levels.iter()
    }

    pub fn into_levels(self) -> Vec<BlurLevel> {
        self.levels
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.levels
            .first()
            .map(|level| level.image.dimensions())
            .unwrap_or((0, 0))
    }
}

/// Blur `source` at every radius of `schedule`.
///
/// Levels are computed one after another on the calling thread, ordered from
/// most blurred to sharp. A zero radius yields an unmodified copy.
pub fn prepare_blur_levels(
    source: &RgbaImage,
    schedule: BlurSchedule,
) -> Result<BlurLevels, IntroError> {
    schedule.validate()?;

    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Err(CaptureError::EmptyImage { width, height }.into());
    }

    let started = Instant::now();
    let levels: Vec<BlurLevel> = (0..schedule.level_count())
        .map(|index| {
            let radius = schedule.radius_at(index);
            BlurLevel {
                radius,
                image: blur_image(source, radius),
            }
        })
        .collect();

    tracing::debug!(
        "Prepared {} blur levels for {}x{} in {:?}",
        levels.len(),
        width,
        height,
        started.elapsed()
    );

    Ok(BlurLevels { levels })
}

fn blur_image(source: &RgbaImage, radius: f32) -> RgbaImage {
    if radius <= 0.0 {
        return source.clone();
    }
    imageops::fast_blur(source, radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// Left half black, right half white.
    fn split_image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        })
    }

    #[test]
    fn test_level_count_and_radii() {
        for (max_radius, steps) in [(16.0, 16), (8.0, 3), (0.0, 4), (5.0, 1)] {
            let schedule = BlurSchedule::new(max_radius, steps);
            let levels = prepare_blur_levels(&split_image(96, 48), schedule).unwrap();

            assert_eq!(levels.len(), steps as usize + 1);
            assert_eq!(levels.sharp_index(), steps as usize);
            assert_eq!(levels.get(0).unwrap().radius, max_radius);
            assert_eq!(levels.get(steps as usize).unwrap().radius, 0.0);

            let radii: Vec<f32> = levels.iter().map(|l| l.radius).collect();
            for pair in radii.windows(2) {
                if max_radius > 0.0 {
                    assert!(pair[0] > pair[1], "{radii:?}");
                } else {
                    assert_eq!(pair[0], pair[1]);
                }
            }
        }
    }

    #[test]
    fn test_radius_formula() {
        let schedule = BlurSchedule::new(16.0, 16);
        assert_eq!(schedule.radius_at(0), 16.0);
        assert_eq!(schedule.radius_at(4), 12.0);
        assert_eq!(schedule.radius_at(16), 0.0);
        assert_eq!(schedule.radius_at(99), 0.0);
    }

    #[test]
    fn test_levels_keep_dimensions() {
        let levels = prepare_blur_levels(&split_image(96, 40), BlurSchedule::new(6.0, 4)).unwrap();
        assert_eq!(levels.dimensions(), (96, 40));
        assert!(levels.iter().all(|l| l.image.dimensions() == (96, 40)));
    }

    #[test]
    fn test_sharp_level_is_unmodified() {
        let source = split_image(96, 48);
        let levels = prepare_blur_levels(&source, BlurSchedule::new(10.0, 5)).unwrap();
        assert_eq!(levels.get(5).unwrap().image, source);
    }

    #[test]
    fn test_blurred_level_softens_edge() {
        let source = split_image(64, 48);
        let levels = prepare_blur_levels(&source, BlurSchedule::new(8.0, 2)).unwrap();
        let blurred = &levels.get(0).unwrap().image;

        // Pixels right at the edge are pulled towards grey.
        let left = blurred.get_pixel(31, 4)[0];
        let right = blurred.get_pixel(32, 4)[0];
        assert!(left > 0, "left edge pixel stayed black");
        assert!(right < 255, "right edge pixel stayed white");
    }

    #[test]
    fn test_levels_sharpen_in_order() {
        let source = split_image(64, 48);
        let levels = prepare_blur_levels(&source, BlurSchedule::new(8.0, 4)).unwrap();

        // Grey bleeding into the black half shrinks level by level.
        let bleed: Vec<u8> = levels.iter().map(|l| l.image.get_pixel(29, 24)[0]).collect();
        for pair in bleed.windows(2) {
            assert!(pair[0] >= pair[1], "{bleed:?}");
        }
        assert!(bleed[0] > 0, "{bleed:?}");
        assert_eq!(bleed[4], 0);
    }

    #[test]
    fn test_empty_source_is_fatal() {
        let err = prepare_blur_levels(&RgbaImage::new(0, 10), BlurSchedule::new(16.0, 16))
            .unwrap_err();
        assert!(matches!(
            err,
            IntroError::Capture(CaptureError::EmptyImage { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_zero_steps_rejected() {
        let err = prepare_blur_levels(&split_image(4, 4), BlurSchedule::new(16.0, 0)).unwrap_err();
        assert!(matches!(err, IntroError::InvalidSchedule(_)));
    }

    #[test]
    fn test_negative_radius_rejected() {
        let err = prepare_blur_levels(&split_image(4, 4), BlurSchedule::new(-1.0, 4)).unwrap_err();
        assert!(matches!(err, IntroError::InvalidSchedule(_)));
    }
}
