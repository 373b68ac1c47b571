use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use label_core::settings::Settings;
use label_data::ingest;

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the standard `~/.geolabel/` directory hierarchy exists.
///
/// Creates the following directories if absent (including any missing
/// parents):
/// - `~/.geolabel/`
/// - `~/.geolabel/logs/`
/// - `~/.geolabel/points/`
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let app_dir = home.join(".geolabel");
    std::fs::create_dir_all(&app_dir)?;
    std::fs::create_dir_all(app_dir.join("logs"))?;
    std::fs::create_dir_all(app_dir.join("points"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
///
/// The `log_file` parameter is accepted for forward-compatibility but file
/// logging is not yet wired – all output currently goes to stderr.
pub fn setup_logging(log_level: &str, _log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    // tracing uses lowercase level names.
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => other,
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Point-file resolution ──────────────────────────────────────────────────────

/// Resolve the point file to load at startup.
///
/// Order of preference:
/// 1. An explicit `--points` path.
/// 2. The first CSV file discovered under the points directory
///    (`--points-dir` or `~/.geolabel/points`).
///
/// Returns `None` when nothing is found; the session then starts empty.
pub fn resolve_points_file(settings: &Settings) -> Option<PathBuf> {
    if let Some(path) = &settings.points {
        return Some(path.clone());
    }

    let dir = ingest::resolve_points_dir(settings.points_dir.as_deref());
    ingest::find_csv_files(&dir).into_iter().next()
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    // ── test_ensure_directories ───────────────────────────────────────────────

    #[test]
    fn test_ensure_directories() {
        let tmp = TempDir::new().expect("tempdir");

        // Override HOME so that dirs::home_dir() resolves to our temp dir.
        let original_home = std::env::var_os("HOME");
        std::env::set_var("HOME", tmp.path());

        let result = ensure_directories();

        // Restore HOME.
        match original_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }

        result.expect("ensure_directories should succeed");

        let app_dir = tmp.path().join(".geolabel");
        assert!(app_dir.is_dir(), ".geolabel dir must exist");
        assert!(app_dir.join("logs").is_dir(), "logs subdir must exist");
        assert!(app_dir.join("points").is_dir(), "points subdir must exist");
    }

    // ── test_resolve_points_file ──────────────────────────────────────────────

    #[test]
    fn test_resolve_points_file_explicit_path_wins() {
        let mut settings = Settings::parse_from(["geolabel"]);
        settings.points = Some(PathBuf::from("/data/explicit.csv"));
        settings.points_dir = Some(PathBuf::from("/data/ignored"));

        let resolved = resolve_points_file(&settings);
        assert_eq!(resolved, Some(PathBuf::from("/data/explicit.csv")));
    }

    #[test]
    fn test_resolve_points_file_discovers_first_csv() {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::write(tmp.path().join("b.csv"), "id,lat,lon\n").unwrap();
        std::fs::write(tmp.path().join("a.csv"), "id,lat,lon\n").unwrap();

        let mut settings = Settings::parse_from(["geolabel"]);
        settings.points_dir = Some(tmp.path().to_path_buf());

        let resolved = resolve_points_file(&settings).expect("a csv must be found");
        // Discovery is sorted, so a.csv wins.
        assert_eq!(resolved.file_name().unwrap(), "a.csv");
    }

    #[test]
    fn test_resolve_points_file_none_when_dir_empty() {
        let tmp = TempDir::new().expect("tempdir");

        let mut settings = Settings::parse_from(["geolabel"]);
        settings.points_dir = Some(tmp.path().to_path_buf());

        assert!(resolve_points_file(&settings).is_none());
    }
}
