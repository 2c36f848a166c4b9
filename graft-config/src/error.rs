use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for configuration loading (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("pass --config or create a graft.toml next to the input"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse graft.toml")]
    #[diagnostic(code(graft::config::parse))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("plugin '{name}' is listed more than once")]
    #[diagnostic(
        code(graft::config::duplicate_plugin),
        help("plugins run in the listed order; keep a single entry for '{name}'")
    )]
    DuplicatePlugin {
        #[source_code]
        src: NamedSource<String>,
        #[label("duplicate entry")]
        span: Option<SourceSpan>,
        name: String,
    },

    #[error("invalid define symbol '{symbol}'")]
    #[diagnostic(
        code(graft::config::invalid_define),
        help("{reason}. Use only letters, digits and underscores, starting with a letter or underscore.")
    )]
    InvalidDefine {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid symbol")]
        span: Option<SourceSpan>,
        symbol: String,
        reason: String,
    },

    #[error("{message}")]
    #[diagnostic(code(graft::config::validation))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}

impl Error {
    /// Create a parse error from a toml error with source context
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }
}
