//! Window management for the Spectra intro.
//!
//! `IntroWindow` opens a borderless pop-up covering the primary display and
//! quits the application once the overlay reports that the intro finished.

use gpui::{
    App, AppContext, Entity, WindowBackgroundAppearance, WindowBounds, WindowHandle, WindowKind,
    WindowOptions,
};
use spectra_core::{CaptureError, IntroConfig, IntroError, Size};

use crate::backdrop::Backdrop;
use crate::platform::set_activation_policy_accessory;
use crate::theme::Theme;
use crate::views::{IntroOverlay, IntroOverlayEvent};

// =============================================================================
// Window Configuration
// =============================================================================

/// Base options for the intro window.
///
/// Bounds and display are filled in once the primary display is known.
/// Windowed bounds matching the display keep macOS from opening a new Space.
fn create_window_options() -> WindowOptions {
    WindowOptions {
        window_bounds: None,
        titlebar: None,
        focus: false,
        show: true,
        kind: WindowKind::PopUp,
        is_movable: false,
        window_background: WindowBackgroundAppearance::Opaque,
        ..Default::default()
    }
}

// =============================================================================
// Intro Window
// =============================================================================

/// Owns the intro window for the lifetime of the application.
pub struct IntroWindow {
    window_handle: WindowHandle<IntroOverlay>,
}

impl IntroWindow {
    /// Open the overlay on the primary display.
    pub fn new(config: IntroConfig, backdrop: Backdrop, cx: &mut App) -> Result<Self, IntroError> {
        let display = cx.primary_display().ok_or(CaptureError::NoDisplay)?;
        let bounds = display.bounds();
        let width: f32 = bounds.size.width.into();
        let height: f32 = bounds.size.height.into();
        let viewport = Size::new(width.round() as i32, height.round() as i32);

        let display_id = display.id();
        tracing::info!(
            "Opening intro window: {}x{} on display {:?}",
            viewport.width,
            viewport.height,
            display_id
        );

        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            display_id: Some(display.id()),
            ..create_window_options()
        };

        let mut overlay_entity: Option<Entity<IntroOverlay>> = None;
        let window_handle = cx
            .open_window(options, |window, cx| {
                cx.set_global(Theme::from_config(&config, viewport.height));

                let overlay = cx.new(|inner_cx| {
                    IntroOverlay::new(config, backdrop, viewport, window, inner_cx)
                });
                overlay_entity = Some(overlay.clone());
                overlay
            })
            .map_err(|e| IntroError::Window(e.to_string()))?;

        let overlay_entity = overlay_entity
            .ok_or_else(|| IntroError::Window("overlay view was not created".into()))?;
        cx.subscribe(
            &overlay_entity,
            |_, event: &IntroOverlayEvent, cx| match event {
                IntroOverlayEvent::Finished => {
                    tracing::info!("Intro finished, quitting");
                    cx.quit();
                }
            },
        )
        .detach();

        Ok(Self { window_handle })
    }

    /// Handle of the overlay window.
    pub fn handle(&self) -> WindowHandle<IntroOverlay> {
        self.window_handle
    }
}

// =============================================================================
// Application Entry
// =============================================================================

/// Run the intro until the overlay closes.
///
/// `backdrop` must already hold every blur level; nothing is computed once
/// the window is up.
pub fn run_intro(config: IntroConfig, backdrop: Backdrop) {
    gpui::Application::new().run(move |cx| {
        // No dock icon or menu bar for a splash
        set_activation_policy_accessory();

        match IntroWindow::new(config, backdrop, cx) {
            Ok(intro) => {
                // Keep the window handle alive as a global
                cx.set_global(intro);
            }
            Err(e) => {
                tracing::error!("Failed to create intro window: {}", e);
                cx.quit();
            }
        }
    });
}

// =============================================================================
// Global Storage
// =============================================================================

impl gpui::Global for IntroWindow {}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_options() {
        let options = create_window_options();
        assert!(options.titlebar.is_none());
        assert!(options.show);
        assert!(!options.focus);
        assert!(matches!(options.kind, WindowKind::PopUp));
        assert!(!options.is_movable);
        assert!(matches!(
            options.window_background,
            WindowBackgroundAppearance::Opaque
        ));
    }
}
