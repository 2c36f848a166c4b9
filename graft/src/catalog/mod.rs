//! Extensions shipped with the CLI.
//!
//! `graft.toml` enables them by name under `compiler.plugins`; the order
//! given there is the registration order, and so the priority order.

mod seeded_random;
mod strip_debug_asserts;

use graft_compiler::{Capability, Extension, PluginRegistry, RegistryError};
pub use seeded_random::SeededRandom;
pub use strip_debug_asserts::StripDebugAsserts;

/// A named extension in the catalog.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub capability: Capability,
    pub description: &'static str,
    make: fn() -> Extension,
}

impl CatalogEntry {
    pub fn extension(&self) -> Extension {
        (self.make)()
    }
}

const ENTRIES: &[CatalogEntry] = &[
    CatalogEntry {
        name: seeded_random::NAME,
        capability: Capability::ReplaceCall,
        description: "Route System.Random.Next through a seedable runtime helper",
        make: || Extension::replace_call(SeededRandom),
    },
    CatalogEntry {
        name: strip_debug_asserts::NAME,
        capability: Capability::TransformAst,
        description: "Remove System.Diagnostics.Debug.Assert calls unless debug is set",
        make: || Extension::transform_ast(StripDebugAsserts),
    },
];

/// Every extension in the catalog.
pub fn entries() -> &'static [CatalogEntry] {
    ENTRIES
}

/// Build a registry from plugin names, keeping their order.
pub fn select(names: &[String]) -> Result<PluginRegistry, RegistryError> {
    let mut builder = PluginRegistry::builder();
    for name in names {
        let entry = ENTRIES
            .iter()
            .find(|e| e.name == name.as_str())
            .ok_or_else(|| RegistryError::UnknownPlugin {
                name: name.clone(),
                available: ENTRIES
                    .iter()
                    .map(|e| e.name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;
        builder = builder.register(entry.extension());
    }
    builder.build()
}
