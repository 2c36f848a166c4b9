//! Compile command report data structures.

use super::output::{Output, Report};

/// How many call sites each kind of handler owned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionSummary {
    pub plugin: usize,
    pub builtin: usize,
    pub pass_through: usize,
}

impl ResolutionSummary {
    pub fn total(&self) -> usize {
        self.plugin + self.builtin + self.pass_through
    }

    pub(crate) fn render(&self, out: &mut dyn Output) {
        out.heading(&format!("  {} call site{}", self.total(), plural(self.total())));
        out.field("  plugin", &self.plugin.to_string());
        out.field("  builtin", &self.builtin.to_string());
        out.field("  pass-through", &self.pass_through.to_string());
    }
}

impl From<(usize, usize, usize)> for ResolutionSummary {
    fn from((plugin, builtin, pass_through): (usize, usize, usize)) -> Self {
        Self {
            plugin,
            builtin,
            pass_through,
        }
    }
}

/// Report data from compiling one file.
#[derive(Debug)]
pub struct CompileReport {
    /// Path of the compiled source file.
    pub source_path: String,
    /// Warning messages from the pipeline.
    pub warnings: Vec<String>,
    pub resolutions: ResolutionSummary,
    /// Emitted JavaScript.
    pub js: String,
}

impl Report for CompileReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }
        if !self.warnings.is_empty() {
            out.blank();
        }

        out.text(&format!("✓ compiled {}", self.source_path));
        self.resolutions.render(out);
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
