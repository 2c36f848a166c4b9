use std::sync::Arc;

use miette::Diagnostic;
use thiserror::Error;

use super::{AstTransformer, CallReplacer, Capability, Extension};

#[derive(Debug, Error, Diagnostic)]
pub enum RegistryError {
    #[error("extension '{name}' is registered twice for {capability}")]
    #[diagnostic(
        code(graft::registry::duplicate),
        help("registration order is priority order; register '{name}' once")
    )]
    DuplicateExtension { name: String, capability: Capability },

    #[error("unknown plugin '{name}'")]
    #[diagnostic(code(graft::registry::unknown), help("available plugins: {available}"))]
    UnknownPlugin { name: String, available: String },
}

/// Ordered, immutable set of extensions.
///
/// Registration order is priority order: for every hook the first
/// registered extension is asked first. The registry cannot change once
/// built, so one instance can be shared by concurrent runs behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    extensions: Vec<Extension>,
}

impl PluginRegistry {
    pub fn builder() -> PluginRegistryBuilder {
        PluginRegistryBuilder::default()
    }

    /// A registry with no extensions: only built-ins and pass-through apply.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Extensions providing `capability`, in registration order.
    pub fn handlers_for(&self, capability: Capability) -> impl Iterator<Item = &Extension> {
        self.extensions
            .iter()
            .filter(move |e| e.capability() == capability)
    }

    /// `ReplaceCall` handlers, in registration order.
    pub fn call_replacers(&self) -> impl Iterator<Item = &Arc<dyn CallReplacer>> {
        self.extensions.iter().filter_map(|e| match e {
            Extension::ReplaceCall(r) => Some(r),
            Extension::TransformAst(_) => None,
        })
    }

    /// `TransformAst` handlers, in registration order.
    pub fn ast_transformers(&self) -> impl Iterator<Item = &Arc<dyn AstTransformer>> {
        self.extensions.iter().filter_map(|e| match e {
            Extension::TransformAst(t) => Some(t),
            Extension::ReplaceCall(_) => None,
        })
    }

    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

/// Collects extensions before a run.
#[derive(Debug, Default)]
pub struct PluginRegistryBuilder {
    extensions: Vec<Extension>,
}

impl PluginRegistryBuilder {
    /// Append an extension; it ranks below everything registered before it.
    pub fn register(mut self, extension: Extension) -> Self {
        self.extensions.push(extension);
        self
    }

    pub fn replace_call(self, replacer: impl CallReplacer + 'static) -> Self {
        self.register(Extension::replace_call(replacer))
    }

    pub fn transform_ast(self, transformer: impl AstTransformer + 'static) -> Self {
        self.register(Extension::transform_ast(transformer))
    }

    /// Freeze the registry.
    ///
    /// # Errors
    ///
    /// Fails when two extensions share both a name and a capability.
    pub fn build(self) -> Result<PluginRegistry, RegistryError> {
        for (i, ext) in self.extensions.iter().enumerate() {
            let duplicate = self.extensions[..i]
                .iter()
                .any(|prev| prev.name() == ext.name() && prev.capability() == ext.capability());
            if duplicate {
                return Err(RegistryError::DuplicateExtension {
                    name: ext.name().to_string(),
                    capability: ext.capability(),
                });
            }
        }

        tracing::debug!(count = self.extensions.len(), "plugin registry built");
        Ok(PluginRegistry {
            extensions: self.extensions,
        })
    }
}

#[cfg(test)]
mod tests {
    use eyre::Result;
    use graft_config::CompilerOptions;
    use graft_source::SourceFile;

    use super::*;

    struct Passthrough(&'static str);

    impl AstTransformer for Passthrough {
        fn name(&self) -> &str {
            self.0
        }

        fn transform_file(&self, _: &CompilerOptions, file: SourceFile) -> Result<SourceFile> {
            Ok(file)
        }
    }

    #[test]
    fn test_registration_order_is_kept() {
        let registry = PluginRegistry::builder()
            .register(Extension::replace_call_fn("first", |_, _| Ok(None)))
            .transform_ast(Passthrough("rewrite"))
            .register(Extension::replace_call_fn("second", |_, _| Ok(None)))
            .build()
            .unwrap();

        let names: Vec<_> = registry.call_replacers().map(|r| r.name()).collect();
        assert_eq!(names, vec!["first", "second"]);

        let names: Vec<_> = registry
            .handlers_for(Capability::TransformAst)
            .map(|e| e.name())
            .collect();
        assert_eq!(names, vec!["rewrite"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_duplicate_name_and_capability_is_rejected() {
        let err = PluginRegistry::builder()
            .register(Extension::replace_call_fn("dup", |_, _| Ok(None)))
            .register(Extension::replace_call_fn("dup", |_, _| Ok(None)))
            .build()
            .unwrap_err();

        assert!(matches!(
            err,
            RegistryError::DuplicateExtension { ref name, capability: Capability::ReplaceCall }
                if name == "dup"
        ));
    }

    #[test]
    fn test_same_name_different_capability_is_allowed() {
        let registry = PluginRegistry::builder()
            .register(Extension::replace_call_fn("debug", |_, _| Ok(None)))
            .transform_ast(Passthrough("debug"))
            .build()
            .unwrap();
        assert_eq!(registry.call_replacers().count(), 1);
        assert_eq!(registry.ast_transformers().count(), 1);
    }

    #[test]
    fn test_empty_registry() {
        let registry = PluginRegistry::empty();
        assert!(registry.is_empty());
        assert_eq!(registry.handlers_for(Capability::ReplaceCall).count(), 0);
    }
}
