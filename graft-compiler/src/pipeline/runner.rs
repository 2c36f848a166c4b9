//! Pipeline orchestrator.

use std::sync::Arc;

use eyre::Result;
use graft_config::CompilerOptions;
use graft_source::SourceFile;
use tracing::{debug, info_span};

use super::{
    CompilationContext, Phase,
    phases::{RewritePhase, TransformPhase},
};
use crate::{BuiltinReplacements, PluginRegistry};

/// The compilation pipeline orchestrator.
///
/// Runs the built-in phases (rewrite, transform) followed by any user
/// phases. The registry and built-in table are shared read-only, so one
/// pipeline can serve several runs, each with its own options.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new(Arc::new(registry));
/// let mut ctx = pipeline.run(source, options)?;
/// let ir = ctx.take_ir()?;
/// ```
pub struct Pipeline {
    registry: Arc<PluginRegistry>,
    builtins: Arc<BuiltinReplacements>,
    phases: Vec<Box<dyn Phase>>,
}

impl Pipeline {
    /// Create a pipeline using the standard built-in replacements.
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self {
            registry,
            builtins: Arc::new(BuiltinReplacements::standard()),
            phases: Vec::new(),
        }
    }

    /// Replace the built-in replacement table.
    pub fn with_builtins(mut self, builtins: BuiltinReplacements) -> Self {
        self.builtins = Arc::new(builtins);
        self
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Run the pipeline on a source file.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error; no partial context is returned.
    pub fn run(&self, source: SourceFile, options: CompilerOptions) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(source, options);

        let builtin_phases: Vec<Box<dyn Phase>> = vec![
            Box::new(RewritePhase::new(self.registry.clone())),
            Box::new(TransformPhase::new(
                self.registry.clone(),
                self.builtins.clone(),
            )),
        ];

        for phase in builtin_phases.iter().chain(self.phases.iter()) {
            let span = info_span!("pipeline.phase", phase = phase.name());
            let _enter = span.enter();
            debug!(description = phase.description(), "phase started");
            phase.run(&mut ctx)?;
            debug!(diagnostics = ctx.diagnostics.len(), "phase finished");
        }

        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use graft_source::SourceFile;

    use super::*;

    struct CountingPhase(Arc<AtomicUsize>);

    impl Phase for CountingPhase {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn description(&self) -> &'static str {
            "Counts invocations"
        }

        fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
            assert!(ctx.ir.is_some(), "user phases run after transform");
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn empty_source() -> SourceFile {
        SourceFile {
            path: "Empty.fs".into(),
            declarations: Vec::new(),
        }
    }

    #[test]
    fn test_pipeline_populates_ir() {
        let pipeline = Pipeline::new(Arc::new(PluginRegistry::empty()));
        let mut ctx = pipeline
            .run(empty_source(), CompilerOptions::default())
            .expect("pipeline should succeed");

        let ir = ctx.take_ir().unwrap();
        assert_eq!(ir.source_path, "Empty.fs");
        assert!(ir.declarations.is_empty());
    }

    #[test]
    fn test_user_phase_runs_last() {
        let count = Arc::new(AtomicUsize::new(0));
        let pipeline =
            Pipeline::new(Arc::new(PluginRegistry::empty())).phase(CountingPhase(count.clone()));

        pipeline
            .run(empty_source(), CompilerOptions::default())
            .unwrap();
        pipeline
            .run(empty_source(), CompilerOptions::default().with_debug(true))
            .unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
