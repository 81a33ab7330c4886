//! User settings: download mode and quick extension list.
//!
//! Stored as a JSON object with camelCase keys. Keys missing from the file
//! keep their defaults, so older or hand-written files load cleanly.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;

/// Environment variable overriding the settings file location.
pub const SETTINGS_ENV: &str = "CODEGRAB_CONFIG";

/// How a download is offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadMode {
    /// Ask for a file name first.
    #[default]
    Dialog,
    /// Save immediately with the generated name.
    Quick,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub download_mode: DownloadMode,
    /// Extensions offered as one-click downloads, in display order.
    pub quick_extensions: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            download_mode: DownloadMode::Dialog,
            quick_extensions: [".js", ".py", ".ts", ".txt"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsPatch {
    pub download_mode: Option<DownloadMode>,
    pub quick_extensions: Option<Vec<String>>,
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "settings file does not exist; using defaults");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&raw)?;
        info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Like [`Settings::load`], but falls back to the defaults on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "unreadable settings; using defaults");
            Self::default()
        })
    }

    /// Write settings to `path` as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!(path = %path.display(), "saved settings");
        Ok(())
    }

    /// Apply a partial update.
    pub fn update(&mut self, patch: SettingsPatch) {
        if let Some(mode) = patch.download_mode {
            self.download_mode = mode;
        }
        if let Some(quick) = patch.quick_extensions {
            self.quick_extensions = quick;
        }
    }
}

/// Where settings live: `$CODEGRAB_CONFIG`, else the platform config dir.
pub fn default_path() -> PathBuf {
    if let Some(path) = std::env::var_os(SETTINGS_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_default()
        .join("codegrab")
        .join("settings.json")
}
