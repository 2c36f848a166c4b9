//! Source locations carried by IR nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A line/column position in a source file.
///
/// Lines are 1-based, columns are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A range in a source file, used for diagnostics and source maps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRange {
    /// File the range belongs to, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub start: Position,
    pub end: Position,
}

impl SourceRange {
    /// Create a range without a file.
    pub fn new(start: Position, end: Position) -> Self {
        Self {
            file: None,
            start,
            end,
        }
    }

    /// Attach a file name to this range.
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Smallest range covering both `self` and `other`.
    ///
    /// The file of `self` wins when both carry one.
    pub fn union(&self, other: &SourceRange) -> SourceRange {
        SourceRange {
            file: self.file.clone().or_else(|| other.file.clone()),
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:", file)?;
        }
        write!(
            f,
            "{}:{}-{}:{}",
            self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}
