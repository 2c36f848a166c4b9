//! Whole-file IR.

use serde::Serialize;

use crate::{Expr, ImportInfo, SourceRange};

/// A module-level binding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    pub name: String,
    pub body: Expr,
    /// Whether the binding is visible outside the module.
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<SourceRange>,
}

/// The IR of one compiled source file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct File {
    /// Path of the source file this IR was produced from.
    pub source_path: String,
    pub declarations: Vec<Declaration>,
}

impl File {
    /// Every import referenced anywhere in the file, in first-use order.
    pub fn imports(&self) -> Vec<&ImportInfo> {
        let mut imports: Vec<&ImportInfo> = Vec::new();
        for decl in &self.declarations {
            decl.body.visit(&mut |e| {
                if let crate::ExprKind::Import(info) = e.kind()
                    && !imports.contains(&info)
                {
                    imports.push(info);
                }
            });
        }
        imports
    }

    /// Find a declaration by name.
    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name == name)
    }
}
