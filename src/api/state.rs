//! Application state shared across handlers.

use std::collections::HashSet;
use std::sync::Arc;

use crate::inventory::SoftwareInventory;
use crate::settings::SettingsStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Store backing the settings endpoints.
    pub settings: Arc<SettingsStore>,
    /// Source of the installed-software inventory.
    pub inventory: Arc<dyn SoftwareInventory>,
    /// Tool names the dependencies endpoint reports.
    pub allowlist: Arc<HashSet<String>>,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        settings: SettingsStore,
        inventory: Arc<dyn SoftwareInventory>,
        allowlist: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            inventory,
            allowlist: Arc::new(allowlist.into_iter().collect()),
        }
    }
}
