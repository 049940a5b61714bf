//! Spectra intro - main entry point.
//!
//! Captures the desktop, precomputes every blur level, then hands the
//! finished backdrop to the GPUI overlay.

use spectra_core::{prepare_blur_levels, IntroConfig, IntroError};
use spectra_ui::platform::capture_primary_display;
use spectra_ui::window::run_intro;
use spectra_ui::Backdrop;

/// Capture the primary display and blur it at every ramp level.
fn prepare_backdrop(config: &IntroConfig) -> Result<Backdrop, IntroError> {
    config.validate()?;

    let screenshot = capture_primary_display()?;
    tracing::info!(
        "Captured primary display: {}x{}",
        screenshot.width(),
        screenshot.height()
    );

    let levels = prepare_blur_levels(&screenshot, config.blur_schedule())?;
    tracing::info!("Prepared {} blur levels", levels.len());

    Ok(Backdrop::from_levels(levels))
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Spectra intro starting...");

    let config = IntroConfig::default();

    // Everything is computed before the window exists
    let backdrop = match prepare_backdrop(&config) {
        Ok(backdrop) => backdrop,
        Err(e) => {
            tracing::error!("Failed to prepare backdrop: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    run_intro(config, backdrop);
}
