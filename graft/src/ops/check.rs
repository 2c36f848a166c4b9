//! Check operation - resolve every call site without emitting.

use std::sync::Arc;

use eyre::{Context, Result};
use graft_compiler::{Handler, Pipeline, PluginRegistry, Severity};
use graft_config::CompilerOptions;
use graft_source::SourceFile;

use crate::reports::{CheckReport, ResolutionSummary};

/// Execute the check operation.
///
/// Runs the pipeline and returns its diagnostics and per-call resolutions.
pub fn check(
    source: SourceFile,
    options: CompilerOptions,
    registry: PluginRegistry,
) -> Result<CheckReport> {
    let source_path = source.path.clone();
    let ctx = Pipeline::new(Arc::new(registry))
        .run(source, options)
        .wrap_err_with(|| format!("Failed to compile {}", source_path))?;

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for diag in &ctx.diagnostics {
        let msg = super::describe(diag);

        match diag.severity {
            Severity::Error => errors.push(msg),
            Severity::Warning => warnings.push(msg),
            Severity::Info => infos.push(msg),
        }
    }

    let calls = ctx
        .resolutions
        .iter()
        .map(|r| {
            let handler = match &r.handler {
                Handler::Plugin(name) => name.clone(),
                other => other.to_string(),
            };
            format!("{}.{} → {}", r.owner, r.member, handler)
        })
        .collect();

    Ok(CheckReport {
        source_path,
        errors,
        warnings,
        infos,
        resolutions: ResolutionSummary::from(ctx.resolution_counts()),
        calls,
    })
}
