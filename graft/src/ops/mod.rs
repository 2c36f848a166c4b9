//! Core operations.
//!
//! This module contains the business logic for graft commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod compile;
pub mod plugins;

use std::path::Path;

pub use check::check;
pub use compile::compile;
use graft_compiler::{Diagnostic, PluginRegistry, RegistryError};
use graft_config::{CompilerOptions, GraftToml};
pub use plugins::plugins;
use tracing::debug;

use crate::catalog;

/// Load options from `config`, or from a `graft.toml` next to `input`.
///
/// Falls back to the defaults when neither exists.
pub fn load_options(config: Option<&Path>, input: &Path) -> graft_config::Result<CompilerOptions> {
    if let Some(path) = config {
        return GraftToml::open(path).map(GraftToml::into_options);
    }

    let dir = input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    match GraftToml::discover(dir)? {
        Some(toml) => {
            debug!(path = %toml.path().display(), "using discovered config");
            Ok(toml.into_options())
        }
        None => Ok(CompilerOptions::default()),
    }
}

/// Build the registry for the plugins enabled in `options`.
pub fn registry(options: &CompilerOptions) -> Result<PluginRegistry, RegistryError> {
    catalog::select(&options.plugins)
}

/// Diagnostic message with its source location on a second line.
fn describe(diag: &Diagnostic) -> String {
    match &diag.range {
        Some(range) => format!("{}\n  --> {}", diag.message, range),
        None => diag.message.clone(),
    }
}


#[cfg(test)]
pub(crate) mod tests_support {
    pub const DICE: &str = include_str!("../../tests/fixtures/dice.json");
}
