use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use graft_source::SourceFile;

use super::OrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Typed AST produced by the front end
    pub input: PathBuf,

    /// Path to graft.toml (defaults to the one next to the input, if any)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let source = SourceFile::from_file(&self.input).or_exit();
        let options = ops::load_options(self.config.as_deref(), &self.input).or_exit();
        let registry = ops::registry(&options).or_exit();

        let report = ops::check(source, options, registry)?;
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }

        Ok(())
    }
}
