//! Extension traits and the capability-tagged extension type.

use std::{fmt, sync::Arc};

use eyre::Result;
use graft_config::CompilerOptions;
use graft_ir::Expr;
use graft_source::SourceFile;

use super::ApplyInfo;

/// The hook points an extension can claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Replace a call to an external member with an IR expression.
    ReplaceCall,
    /// Rewrite the whole source tree once, before lowering.
    TransformAst,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ReplaceCall => "replace-call",
            Capability::TransformAst => "transform-ast",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A handler for the [`Capability::ReplaceCall`] hook.
///
/// # Example
///
/// ```ignore
/// struct ConsoleToLogger;
///
/// impl CallReplacer for ConsoleToLogger {
///     fn name(&self) -> &str { "console-to-logger" }
///
///     fn try_replace_call(&self, _: &CompilerOptions, info: &ApplyInfo) -> Result<Option<Expr>> {
///         if info.owner != "System.Console" || info.member != "WriteLine" {
///             return Ok(None);
///         }
///         let log = Expr::import("log", "./logger.js", Type::Any);
///         Ok(Some(Expr::call(log, info.args.clone(), Type::Unit)))
///     }
/// }
/// ```
pub trait CallReplacer: Send + Sync {
    /// Name used in diagnostics and logs.
    fn name(&self) -> &str;

    /// Return `Ok(None)` to decline, `Ok(Some(expr))` to claim the call site.
    ///
    /// # Errors
    ///
    /// Any error aborts the run and is reported with this replacer's name
    /// and the call site's owner, member and range. Report unsupported
    /// shapes by returning `Err` (see [`ApplyInfo::unsupported_shape`]), never
    /// by panicking: a panic unwinds past the engine without a call site.
    fn try_replace_call(&self, options: &CompilerOptions, info: &ApplyInfo)
    -> Result<Option<Expr>>;
}

/// A handler for the [`Capability::TransformAst`] hook.
pub trait AstTransformer: Send + Sync {
    /// Name used in diagnostics and logs.
    fn name(&self) -> &str;

    /// Return the rewritten tree. Called once per run, before lowering.
    ///
    /// # Errors
    ///
    /// Any error aborts the run.
    fn transform_file(&self, options: &CompilerOptions, file: SourceFile) -> Result<SourceFile>;
}

/// A registered extension, tagged by the capability it provides.
#[derive(Clone)]
pub enum Extension {
    ReplaceCall(Arc<dyn CallReplacer>),
    TransformAst(Arc<dyn AstTransformer>),
}

impl Extension {
    pub fn replace_call(replacer: impl CallReplacer + 'static) -> Self {
        Extension::ReplaceCall(Arc::new(replacer))
    }

    pub fn transform_ast(transformer: impl AstTransformer + 'static) -> Self {
        Extension::TransformAst(Arc::new(transformer))
    }

    /// Wrap a closure as a named `ReplaceCall` extension.
    pub fn replace_call_fn<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&CompilerOptions, &ApplyInfo) -> Result<Option<Expr>> + Send + Sync + 'static,
    {
        Self::replace_call(FnCallReplacer {
            name: name.into(),
            f,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Extension::ReplaceCall(r) => r.name(),
            Extension::TransformAst(t) => t.name(),
        }
    }

    pub fn capability(&self) -> Capability {
        match self {
            Extension::ReplaceCall(_) => Capability::ReplaceCall,
            Extension::TransformAst(_) => Capability::TransformAst,
        }
    }
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extension")
            .field("name", &self.name())
            .field("capability", &self.capability())
            .finish()
    }
}

struct FnCallReplacer<F> {
    name: String,
    f: F,
}

impl<F> CallReplacer for FnCallReplacer<F>
where
    F: Fn(&CompilerOptions, &ApplyInfo) -> Result<Option<Expr>> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn try_replace_call(
        &self,
        options: &CompilerOptions,
        info: &ApplyInfo,
    ) -> Result<Option<Expr>> {
        (self.f)(options, info)
    }
}
