//! Software inventory.
//!
//! Contract for fetching the installed-software inventory, plus the filter
//! that reduces it to the tools a widget cares about. The fetch side is a
//! trait so request handling never depends on the subprocess directly; the
//! adapters live in [`command`] (external command) and [`StaticInventory`]
//! (in-process, for tests and development).

mod command;

pub use command::CommandInventory;

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// One entry in the software inventory.
///
/// Only `name` is interpreted; every other descriptive field the inventory
/// reports (version, status, ...) passes through unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Inventory document: category name mapped to the tools in that category.
pub type InventoryMap = Map<String, Value>;

/// Source of the installed-software inventory.
#[async_trait]
pub trait SoftwareInventory: Send + Sync {
    async fn fetch(&self) -> anyhow::Result<InventoryMap>;
}

/// Fixed in-memory inventory.
pub struct StaticInventory {
    map: InventoryMap,
}

impl StaticInventory {
    pub fn new(map: InventoryMap) -> Self {
        Self { map }
    }
}

#[async_trait]
impl SoftwareInventory for StaticInventory {
    async fn fetch(&self) -> anyhow::Result<InventoryMap> {
        Ok(self.map.clone())
    }
}

/// Flatten the inventory into the tools named by the allowlist.
///
/// Categories iterate in document order and list order within a category is
/// kept; the result is never re-sorted. Categories whose value is not a
/// list, and entries without a usable `name`, are skipped.
pub fn filter_tools(inventory: &InventoryMap, allowlist: &HashSet<String>) -> Vec<ToolDescriptor> {
    let mut tools = Vec::new();

    for entries in inventory.values() {
        let Some(entries) = entries.as_array() else {
            continue;
        };
        for entry in entries {
            let Ok(tool) = serde_json::from_value::<ToolDescriptor>(entry.clone()) else {
                continue;
            };
            if allowlist.contains(&tool.name) {
                tools.push(tool);
            }
        }
    }

    tools
}

/// Fetch and filter the inventory.
///
/// Degrades to an empty list on any fetch failure; the request still
/// succeeds with nothing to show.
pub async fn list_dependencies(
    inventory: &dyn SoftwareInventory,
    allowlist: &HashSet<String>,
) -> Vec<ToolDescriptor> {
    match inventory.fetch().await {
        Ok(map) => filter_tools(&map, allowlist),
        Err(err) => {
            warn!("software inventory unavailable: {err:#}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn allow(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn as_map(value: Value) -> InventoryMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_filter_keeps_only_allowlisted_names() {
        let inventory = as_map(json!({
            "tools": [{"name": "requests"}, {"name": "curl"}]
        }));

        let tools = filter_tools(&inventory, &allow(&["requests"]));
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "requests");
    }

    #[test]
    fn test_filter_flattens_categories_in_document_order() {
        let inventory = as_map(json!({
            "runtime": [{"name": "python"}],
            "libraries": [{"name": "requests"}, {"name": "python"}]
        }));

        let tools = filter_tools(&inventory, &allow(&["python", "requests"]));
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["python", "requests", "python"]);
    }

    #[test]
    fn test_filter_passes_extra_fields_through() {
        let inventory = as_map(json!({
            "tools": [{"name": "requests", "installed_version": "2.32.0", "status": "ok"}]
        }));

        let tools = filter_tools(&inventory, &allow(&["requests"]));
        assert_eq!(
            tools[0].details.get("installed_version"),
            Some(&json!("2.32.0"))
        );
        assert_eq!(tools[0].details.get("status"), Some(&json!("ok")));
    }

    #[test]
    fn test_filter_skips_non_list_categories_and_nameless_entries() {
        let inventory = as_map(json!({
            "meta": "not a list",
            "tools": [{"version": "1.0"}, {"name": "requests"}]
        }));

        let tools = filter_tools(&inventory, &allow(&["requests"]));
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "requests");
    }

    #[tokio::test]
    async fn test_list_dependencies_degrades_to_empty_on_error() {
        struct Failing;

        #[async_trait]
        impl SoftwareInventory for Failing {
            async fn fetch(&self) -> anyhow::Result<InventoryMap> {
                anyhow::bail!("inventory exploded")
            }
        }

        let tools = list_dependencies(&Failing, &allow(&["requests"])).await;
        assert!(tools.is_empty());
    }

    #[tokio::test]
    async fn test_list_dependencies_with_static_inventory() {
        let inventory = StaticInventory::new(as_map(json!({
            "tools": [{"name": "requests"}, {"name": "curl"}]
        })));

        let tools = list_dependencies(&inventory, &allow(&["requests"])).await;
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "requests");
    }
}
