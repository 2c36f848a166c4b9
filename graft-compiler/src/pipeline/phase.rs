//! The unit of work a [`Pipeline`](super::Pipeline) runs.

use eyre::Result;

use super::CompilationContext;

/// One step over a [`CompilationContext`].
///
/// Every pipeline starts with:
/// - `RewritePhase` - applies `TransformAst` extensions to the source tree
/// - `TransformPhase` - lowers the source tree to IR, resolving call sites
///
/// Custom phases run after the built-in ones.
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and tracing spans).
    fn name(&self) -> &'static str;

    /// One-line summary, shown in debug logs.
    fn description(&self) -> &'static str;

    /// An `Err` aborts the run. Anything the caller can continue past
    /// belongs in `ctx.diagnostics`.
    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;
}
