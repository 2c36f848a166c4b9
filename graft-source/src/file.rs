use std::{collections::HashSet, path::Path, str::FromStr};

use serde::Deserialize;

use crate::{Error, Result, SourceDeclaration, SourceExpr};

/// A typed source file, as produced by the front end.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SourceFile {
    /// Path of the original source file (used in ranges and diagnostics).
    pub path: String,
    #[serde(default)]
    pub declarations: Vec<SourceDeclaration>,
}

impl FromStr for SourceFile {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json_str(s, "ast.json")
    }
}

impl SourceFile {
    /// Load a typed AST from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_json_str(&content, &path.display().to_string())
    }

    /// Parse a typed AST with a custom filename for error reporting.
    pub fn from_json_str(content: &str, filename: &str) -> Result<Self> {
        let file: Self =
            serde_json::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        file.validate()?;
        Ok(file)
    }

    /// Iterate over every call site in the file, parents before children.
    pub fn calls(&self) -> Vec<&SourceExpr> {
        let mut calls = Vec::new();
        for decl in &self.declarations {
            decl.body.visit(&mut |e| {
                if matches!(e, SourceExpr::Call { .. }) {
                    calls.push(e);
                }
            });
        }
        calls
    }

    /// Check the invariants the compiler relies on.
    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for decl in &self.declarations {
            if !seen.insert(decl.name.as_str()) {
                return Err(Box::new(Error::DuplicateDeclaration {
                    file: self.path.clone(),
                    name: decl.name.clone(),
                }));
            }
        }

        for call in self.calls() {
            if let SourceExpr::Call {
                member,
                receiver: Some(_),
                range,
                ..
            } = call
                && member.is_constructor()
            {
                return Err(Box::new(Error::ConstructorReceiver {
                    file: self.path.clone(),
                    entity: member.entity.clone(),
                    range: range.as_ref().map(|r| r.to_string()),
                }));
            }
        }

        Ok(())
    }
}
