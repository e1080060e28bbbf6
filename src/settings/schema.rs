//! Field schema for the settings section.
//!
//! Every field is declared once with its key and default, and reads apply
//! one uniform fallback path: a missing or malformed value becomes that
//! field's default without affecting the others.

use serde::{Deserialize, Serialize};

/// Section of the settings file this schema covers.
pub const SETTINGS_SECTION: &str = "settings";

/// Typed view of the persisted widget settings.
///
/// A record is always complete: reads substitute defaults for anything the
/// file does not provide, so no field is ever absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRecord {
    pub enabled: bool,
    pub active: bool,
    pub cache_enabled: bool,
    pub cache_duration_days: u32,
    pub api_key: String,
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self {
            enabled: true,
            active: true,
            cache_enabled: true,
            cache_duration_days: 30,
            api_key: String::new(),
        }
    }
}

impl SettingsRecord {
    /// Build a record from a raw key lookup over the settings section.
    pub fn from_section<'a>(mut lookup: impl FnMut(&str) -> Option<&'a str>) -> Self {
        let defaults = Self::default();
        Self {
            enabled: parse_bool(lookup("enabled")).unwrap_or(defaults.enabled),
            active: parse_bool(lookup("active")).unwrap_or(defaults.active),
            cache_enabled: parse_bool(lookup("cache_enabled")).unwrap_or(defaults.cache_enabled),
            cache_duration_days: parse_u32(lookup("cache_duration_days"))
                .unwrap_or(defaults.cache_duration_days),
            api_key: lookup("api_key")
                .map(str::to_string)
                .unwrap_or(defaults.api_key),
        }
    }
}

/// Accepts the textual true/false-like tokens widgets have historically
/// written, case-insensitively.
fn parse_bool(raw: Option<&str>) -> Option<bool> {
    match raw?.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn parse_u32(raw: Option<&str>) -> Option<u32> {
    raw?.trim().parse().ok()
}
