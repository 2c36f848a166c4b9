//! Mutable state shared by the phases of one run.

use eyre::{Result, eyre};
use graft_config::CompilerOptions;
use graft_ir::File;
use graft_source::SourceFile;

use super::diagnostic::{Diagnostic, Severity};
use crate::transform::{Handler, ResolvedCall};

/// State of one compilation run.
///
/// Phases read and extend the context in order. The options are fixed when
/// the context is created and are only exposed by shared reference.
#[derive(Debug)]
pub struct CompilationContext {
    /// The source tree; `TransformAst` extensions may replace it.
    pub source: SourceFile,
    pub(crate) options: CompilerOptions,
    /// The lowered IR (populated by the transform phase).
    pub ir: Option<File>,
    /// Which handler produced each call site, in traversal order.
    pub resolutions: Vec<ResolvedCall>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    pub fn new(source: SourceFile, options: CompilerOptions) -> Self {
        Self {
            source,
            options,
            ir: None,
            resolutions: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Record a non-fatal message.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity == severity)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    /// Count resolved call sites per handler kind: `(plugin, builtin, pass-through)`.
    pub fn resolution_counts(&self) -> (usize, usize, usize) {
        self.resolutions
            .iter()
            .fold((0, 0, 0), |(p, b, t), r| match r.handler {
                Handler::Plugin(_) => (p + 1, b, t),
                Handler::Builtin => (p, b + 1, t),
                Handler::PassThrough => (p, b, t + 1),
            })
    }

    /// Take the IR out of the context.
    ///
    /// # Errors
    ///
    /// Fails if the transform phase has not run.
    pub fn take_ir(&mut self) -> Result<File> {
        self.ir
            .take()
            .ok_or_else(|| eyre!("no IR in context; the transform phase has not run"))
    }
}
