use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for source loading (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(graft::source::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse typed AST")]
    #[diagnostic(
        code(graft::source::parse),
        help("the typed AST must be the JSON produced by the front end")
    )]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("{source}")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate declaration '{name}'")]
    #[diagnostic(
        code(graft::source::duplicate_declaration),
        help("every module-level binding must have a unique name")
    )]
    DuplicateDeclaration { file: String, name: String },

    #[error("constructor call to '{entity}' has a receiver")]
    #[diagnostic(
        code(graft::source::constructor_receiver),
        help("constructors are static; the front end must not attach a receiver")
    )]
    ConstructorReceiver {
        file: String,
        entity: String,
        range: Option<String>,
    },
}

impl Error {
    /// Create a parse error pointing at the location serde_json reported.
    pub fn parse(source: serde_json::Error, src: &str, filename: &str) -> Box<Self> {
        let span = offset_of(src, source.line(), source.column()).map(SourceSpan::from);
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }
}

/// Byte offset of a 1-based line/column pair.
///
/// Returns `None` when serde_json reports no position (line 0).
fn offset_of(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    let offset = line_start + column.saturating_sub(1);
    Some(offset.min(src.len()))
}
