//! Background frames for the overlay.
//!
//! GPUI paints `RenderImage` frames in BGRA order, so each blur level is
//! swizzled once when the backdrop is built.

use std::sync::Arc;

use gpui::RenderImage;
use image::{Frame, RgbaImage};
use spectra_core::BlurLevels;

/// Paint-ready blur levels, most blurred first.
pub struct Backdrop {
    frames: Vec<Arc<RenderImage>>,
    pixel_size: (u32, u32),
}

impl Backdrop {
    /// Convert every blur level into a GPUI image.
    pub fn from_levels(levels: BlurLevels) -> Self {
        let pixel_size = levels.dimensions();
        let frames = levels
            .into_levels()
            .into_iter()
            .map(|level| to_render_image(level.image))
            .collect();

        Self { frames, pixel_size }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Size of the captured image in device pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        self.pixel_size
    }

    /// Frame for blur `index`, clamped to the sharp end.
    pub fn frame(&self, index: usize) -> Option<Arc<RenderImage>> {
        let last = self.frames.len().checked_sub(1)?;
        self.frames.get(index.min(last)).cloned()
    }
}

fn to_render_image(mut image: RgbaImage) -> Arc<RenderImage> {
    rgba_to_bgra(&mut image);
    Arc::new(RenderImage::new(vec![Frame::new(image)]))
}

/// Swap red and blue in place.
pub(crate) fn rgba_to_bgra(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        pixel.0.swap(0, 2);
    }
}
