//! Persisted application settings.
//!
//! A single record holding the service base URL. The value is injected into
//! the client at construction; nothing in the library reads it through a
//! global.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Fallback base URL used when no settings record exists.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Settings errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// The persisted settings record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Base URL of the emoji service.
    pub base_url: String,
    /// When the record was last changed.
    pub updated_at: DateTime<Utc>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            updated_at: Utc::now(),
        }
    }
}

impl AppSettings {
    /// Validate a base URL string: must parse as an absolute URL with a
    /// host. Rejected values never reach the network layer.
    pub fn validate_url(url: &str) -> Result<(), SettingsError> {
        let parsed =
            Url::parse(url).map_err(|e| SettingsError::InvalidUrl(format!("{}: {}", url, e)))?;
        if !parsed.has_host() {
            return Err(SettingsError::InvalidUrl(format!("{}: missing host", url)));
        }
        Ok(())
    }
}

/// JSON-file settings store.
///
/// A missing or unreadable file falls back to defaults; only writes report
/// errors.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Create a store at the given file path, creating parent directories
    /// as needed.
    pub fn new(path: PathBuf) -> Result<Self, SettingsError> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    SettingsError::Io(format!("Failed to create settings directory: {}", e))
                })?;
            }
        }
        Ok(Self { path })
    }

    /// Create a store in the default location.
    ///
    /// On Unix: `~/.local/share/emojidraw/settings.json`
    /// On Windows: `%LOCALAPPDATA%\emojidraw\settings.json`
    pub fn default_location() -> Result<Self, SettingsError> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| SettingsError::Io("Could not determine home directory".to_string()))?;
        Self::new(base.join("emojidraw").join("settings.json"))
    }

    /// Load the settings record, falling back to defaults when the file is
    /// missing or corrupt.
    pub fn load(&self) -> AppSettings {
        match fs::read_to_string(&self.path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Corrupt settings file {}: {}", self.path.display(), e);
                AppSettings::default()
            }),
            Err(_) => AppSettings::default(),
        }
    }

    /// Persist the settings record.
    pub fn save(&self, settings: &AppSettings) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| SettingsError::Serialization(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| {
            SettingsError::Io(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }

    /// Validate and persist a new base URL, returning the updated record.
    pub fn update_base_url(&self, base_url: &str) -> Result<AppSettings, SettingsError> {
        let base_url = base_url.trim();
        AppSettings::validate_url(base_url)?;
        let settings = AppSettings {
            base_url: base_url.to_string(),
            updated_at: Utc::now(),
        };
        self.save(&settings)?;
        Ok(settings)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
