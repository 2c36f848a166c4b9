//! Report values built by `ops` and rendered by `commands`.

mod check;
mod compile;
mod output;
mod plugins;

pub use check::CheckReport;
pub use compile::{CompileReport, ResolutionSummary};
pub use output::{Report, TerminalOutput};
pub use plugins::{PluginInfo, PluginsReport};

#[cfg(test)]
pub(crate) use output::tests::RecordingOutput;
