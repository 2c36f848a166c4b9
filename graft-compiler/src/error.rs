use graft_ir::SourceRange;
use miette::Diagnostic;
use thiserror::Error;

/// Fatal compilation errors.
///
/// Handlers and phases return [`eyre::Result`]; these errors travel inside an
/// [`eyre::Report`] and can be recovered with `report.downcast_ref::<CompileError>()`.
#[derive(Debug, Error, Diagnostic)]
pub enum CompileError {
    #[error("unresolvable call shape: {owner}.{member} called with {count} argument(s){}", at(.range))]
    #[diagnostic(
        code(graft::compile::call_shape),
        help("no replacement for {owner}.{member} accepts {count} argument(s)")
    )]
    CallShape {
        owner: String,
        member: String,
        count: usize,
        range: Option<SourceRange>,
    },

    #[error("handler '{handler}' failed on {owner}.{member}{}", at(.range))]
    #[diagnostic(code(graft::compile::handler))]
    Handler {
        handler: String,
        owner: String,
        member: String,
        range: Option<SourceRange>,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("AST transformer '{handler}' failed on '{file}'")]
    #[diagnostic(code(graft::compile::rewrite))]
    Rewrite {
        handler: String,
        file: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

fn at(range: &Option<SourceRange>) -> String {
    match range {
        Some(range) => format!(" at {range}"),
        None => String::new(),
    }
}
