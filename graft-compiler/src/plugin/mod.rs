//! Extension points and the plugin registry.

mod apply_info;
mod extension;
mod registry;

pub use apply_info::ApplyInfo;
pub use extension::{AstTransformer, CallReplacer, Capability, Extension};
pub use registry::{PluginRegistry, PluginRegistryBuilder, RegistryError};
