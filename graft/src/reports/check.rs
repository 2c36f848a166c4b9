//! Result of `graft check`.

use super::{
    ResolutionSummary,
    output::{Output, Report},
};

/// Report data from a compile run that did not emit.
#[derive(Debug)]
pub struct CheckReport {
    pub source_path: String,
    /// Rendered diagnostics, split by severity.
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub resolutions: ResolutionSummary,
    /// One `Owner.Member → handler` line per call site, in resolution order.
    pub calls: Vec<String>,
}

impl CheckReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        self.errors.iter().for_each(|e| out.error(e));
        self.warnings.iter().for_each(|w| out.warning(w));
        self.infos
            .iter()
            .for_each(|i| out.text(&format!("info: {i}")));

        if self.errors.len() + self.warnings.len() > 0 {
            out.blank();
        }

        if !self.is_valid() {
            return;
        }

        out.text(&format!("✓ {} compiles", self.source_path));
        self.resolutions.render(out);

        if !self.calls.is_empty() {
            out.blank();
            out.heading("  Calls");
            for call in &self.calls {
                out.item(call);
            }
        }
    }
}
