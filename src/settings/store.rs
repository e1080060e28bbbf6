//! Read/write access to the settings file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use super::ini::IniDocument;
use super::schema::{SettingsRecord, SETTINGS_SECTION};

/// Failure modes of a settings write. Reads never fail.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to update settings file: {0}")]
    Io(#[from] std::io::Error),
}

/// Partial update to the stored settings. Absent fields are left untouched.
///
/// `enabled` is deliberately not here: it marks whether the integration is
/// installed at all and is not editable through the widget.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsUpdate {
    pub active: Option<bool>,
    pub cache_enabled: Option<bool>,
    pub cache_duration_days: Option<u32>,
    pub api_key: Option<String>,
}

/// Accessor for the settings file.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current record.
    ///
    /// Never fails: a missing file, missing section, missing key, or
    /// malformed value degrades to the field defaults.
    pub fn read(&self) -> SettingsRecord {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("failed to read {}: {}", self.path.display(), err);
                }
                return SettingsRecord::default();
            }
        };

        let doc = IniDocument::parse(&text);
        SettingsRecord::from_section(|key| doc.get(SETTINGS_SECTION, key))
    }

    /// Apply a partial update to the settings file.
    ///
    /// The file must already exist; the store edits settings in place and
    /// never creates the file from scratch. Keys and sections the update
    /// does not touch are preserved. The new content is built fully in
    /// memory and written in one step, so a concurrent reader sees either
    /// the old or the new record.
    pub fn write(&self, update: &SettingsUpdate) -> Result<(), SettingsError> {
        if !self.path.exists() {
            return Err(SettingsError::NotFound(self.path.clone()));
        }

        let text = std::fs::read_to_string(&self.path)?;
        let mut doc = IniDocument::parse(&text);

        if let Some(active) = update.active {
            doc.set(SETTINGS_SECTION, "active", bool_str(active));
        }
        if let Some(cache_enabled) = update.cache_enabled {
            doc.set(SETTINGS_SECTION, "cache_enabled", bool_str(cache_enabled));
        }
        if let Some(days) = update.cache_duration_days {
            doc.set(SETTINGS_SECTION, "cache_duration_days", &days.to_string());
        }
        if let Some(api_key) = &update.api_key {
            doc.set(SETTINGS_SECTION, "api_key", api_key);
        }

        std::fs::write(&self.path, doc.to_string())?;
        Ok(())
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
