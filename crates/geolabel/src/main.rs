mod bootstrap;

use anyhow::Result;
use label_core::config::AppConfig;
use label_core::settings::Settings;
use label_runtime::coordinator::{SessionCommand, SessionCoordinator};
use label_ui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("geolabel v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Theme: {}, Timezone: {}, Time format: {}",
        settings.theme,
        settings.timezone,
        settings.time_format
    );

    let config = match &settings.config {
        Some(path) => AppConfig::load_strict(path)?,
        None => AppConfig::load(),
    };
    tracing::info!(
        classes = config.taxonomy.len(),
        layers = config.imagery.len(),
        "configuration loaded"
    );

    let points_file = bootstrap::resolve_points_file(&settings);

    let coordinator = SessionCoordinator::new(config.imagery);
    let (handle, rx) = coordinator.start();

    if let Some(path) = points_file {
        tracing::info!(file = %path.display(), "queueing initial point load");
        let _ = handle.send(SessionCommand::LoadFile(path)).await;
    } else {
        tracing::warn!("no point file found; starting with an empty session");
    }

    let app = App::new(
        &settings.theme,
        config.taxonomy,
        settings.timezone.clone(),
        settings.twelve_hour(),
    );

    // Run the TUI event loop. The loop exits on 'q' / Ctrl+C inside the TUI.
    // We also listen for Ctrl+C at the OS level so that signals received
    // while the terminal is in raw mode are handled cleanly.
    tokio::select! {
        result = app.run(&handle, rx) => {
            handle.abort();
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received; shutting down session coordinator");
            handle.abort();
        }
    }

    Ok(())
}
