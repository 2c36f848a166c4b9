//! Plugins command report data structures.

use super::output::{Output, Report};

/// One catalog extension.
#[derive(Debug)]
pub struct PluginInfo {
    pub name: String,
    /// Hook the extension claims (`replace-call` or `transform-ast`).
    pub capability: String,
    pub description: String,
}

/// Report data listing the extension catalog.
#[derive(Debug)]
pub struct PluginsReport {
    pub plugins: Vec<PluginInfo>,
}

impl Report for PluginsReport {
    fn render(&self, out: &mut dyn Output) {
        out.heading("Available plugins");
        for plugin in &self.plugins {
            out.item(&format!(
                "{} [{}]: {}",
                plugin.name, plugin.capability, plugin.description
            ));
        }
        out.blank();
        out.text("Enable them in graft.toml under [compiler] plugins = [...]");
    }
}
