//! Plugins operation - catalog listing.

use crate::{
    catalog,
    reports::{PluginInfo, PluginsReport},
};

/// Describe every extension in the catalog, in catalog order.
pub fn plugins() -> PluginsReport {
    let plugins = catalog::entries()
        .iter()
        .map(|entry| PluginInfo {
            name: entry.name.to_string(),
            capability: entry.capability.to_string(),
            description: entry.description.to_string(),
        })
        .collect();

    PluginsReport { plugins }
}
