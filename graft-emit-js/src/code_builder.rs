//! Line buffer for emitted modules.

use crate::Indent;

/// Accumulates output lines at a tracked nesting depth.
///
/// # Example
///
/// ```
/// use graft_emit_js::CodeBuilder;
///
/// let mut out = CodeBuilder::javascript();
/// out.line("function main() {")
///     .nested(|body| {
///         body.line("console.log(\"hi\");");
///     })
///     .line("}");
///
/// assert_eq!(out.finish(), "function main() {\n  console.log(\"hi\");\n}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    indent: Indent,
    depth: usize,
    lines: Vec<String>,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            indent,
            depth: 0,
            lines: Vec::new(),
        }
    }

    pub fn javascript() -> Self {
        Self::new(Indent::JAVASCRIPT)
    }

    /// Append `text` at the current depth. Each embedded line is prefixed,
    /// empty ones stay empty.
    pub fn line(&mut self, text: &str) -> &mut Self {
        let prefix = self.indent.repeat(self.depth);
        self.lines.extend(text.split('\n').map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{prefix}{line}")
            }
        }));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    /// Run `f` one level deeper.
    pub fn nested(&mut self, f: impl FnOnce(&mut Self)) -> &mut Self {
        self.depth += 1;
        f(self);
        self.depth -= 1;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join the lines, newline-terminated.
    pub fn finish(self) -> String {
        self.lines
            .into_iter()
            .fold(String::new(), |mut out, line| {
                out.push_str(&line);
                out.push('\n');
                out
            })
    }
}
