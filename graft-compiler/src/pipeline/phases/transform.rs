//! Transform phase - lowers the source tree to IR.

use std::sync::Arc;

use eyre::Result;
use tracing::info;

use crate::{
    BuiltinReplacements, PluginRegistry, Transformer,
    pipeline::{CompilationContext, Phase},
};

/// Phase that runs the transform engine over the source tree.
pub struct TransformPhase {
    registry: Arc<PluginRegistry>,
    builtins: Arc<BuiltinReplacements>,
}

impl TransformPhase {
    pub fn new(registry: Arc<PluginRegistry>, builtins: Arc<BuiltinReplacements>) -> Self {
        Self { registry, builtins }
    }
}

impl Phase for TransformPhase {
    fn name(&self) -> &'static str {
        "transform"
    }

    fn description(&self) -> &'static str {
        "Lower the source tree to IR, resolving call sites"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let mut transformer = Transformer::new(&self.registry, &self.builtins, &ctx.options);
        let file = transformer.transform_file(&ctx.source)?;
        let (resolutions, diagnostics) = transformer.finish();

        info!(
            declarations = file.declarations.len(),
            calls = resolutions.len(),
            "lowered source file"
        );

        ctx.ir = Some(file);
        ctx.resolutions = resolutions;
        ctx.diagnostics.extend(diagnostics);
        Ok(())
    }
}
