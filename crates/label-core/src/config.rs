//! Static workspace configuration.
//!
//! The taxonomy and the imagery catalog are supplied once at process start
//! from `~/.geolabel/config.json` and consumed read-only by the workflow.
//! A missing or unreadable file falls back to the built-in defaults so a
//! fresh install works without any setup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{LabelError, Result};
use crate::imagery::ImageryCatalog;
use crate::models::Taxonomy;

/// Taxonomy and imagery configuration loaded at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Ordered label taxonomy offered to the operator.
    #[serde(default)]
    pub taxonomy: Taxonomy,
    /// Selectable base-imagery layers.
    #[serde(default)]
    pub imagery: ImageryCatalog,
}

impl AppConfig {
    /// Default path of the configuration file: `~/.geolabel/config.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".geolabel").join("config.json")
    }

    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path.
    ///
    /// An absent file yields the defaults silently; an unreadable or
    /// malformed file yields the defaults with a warning. Configuration
    /// problems are never fatal.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "invalid config file; using defaults");
                Self::default()
            }
        }
    }

    /// Load configuration from an operator-supplied path.
    ///
    /// Unlike [`AppConfig::load_from`], problems with an explicitly named
    /// file are reported instead of papered over with defaults.
    pub fn load_strict(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| LabelError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = serde_json::from_str(&content)?;

        if config.taxonomy.is_empty() {
            return Err(LabelError::Config(
                "taxonomy must define at least one class".to_string(),
            ));
        }

        Ok(config)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
