//! Compile operation - typed AST to JavaScript.

use std::sync::Arc;

use eyre::{Context, Result};
use graft_compiler::{Pipeline, PluginRegistry};
use graft_config::CompilerOptions;
use graft_emit_js::JsEmitter;
use graft_source::SourceFile;
use tracing::info;

use crate::reports::{CompileReport, ResolutionSummary};

/// Execute the compile operation.
///
/// Runs the pipeline and renders the resulting IR as JavaScript.
pub fn compile(
    source: SourceFile,
    options: CompilerOptions,
    registry: PluginRegistry,
) -> Result<CompileReport> {
    let source_path = source.path.clone();
    let emitter = JsEmitter::from_options(&options);

    let mut ctx = Pipeline::new(Arc::new(registry))
        .run(source, options)
        .wrap_err_with(|| format!("Failed to compile {}", source_path))?;

    let ir = ctx.take_ir()?;
    let js = emitter.emit_file(&ir);
    info!(
        path = %source_path,
        bytes = js.len(),
        format = emitter.module_format().as_str(),
        "emitted module"
    );

    Ok(CompileReport {
        source_path,
        warnings: ctx.warnings().map(super::describe).collect(),
        resolutions: ResolutionSummary::from(ctx.resolution_counts()),
        js,
    })
}
