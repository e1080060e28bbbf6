//! Settings persistence.
//!
//! Schema-driven access to the widget settings file. Reads always produce a
//! fully-defaulted [`SettingsRecord`]; writes edit the backing file in place
//! and preserve content the schema does not know about.

mod ini;
mod schema;
mod store;

pub use ini::IniDocument;
pub use schema::{SettingsRecord, SETTINGS_SECTION};
pub use store::{SettingsError, SettingsStore, SettingsUpdate};
