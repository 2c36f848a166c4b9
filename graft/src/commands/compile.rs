use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use graft_source::SourceFile;

use super::OrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CompileCommand {
    /// Typed AST produced by the front end
    pub input: PathBuf,

    /// Path to graft.toml (defaults to the one next to the input, if any)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CompileCommand {
    pub fn run(&self) -> Result<()> {
        let source = SourceFile::from_file(&self.input).or_exit();
        let options = ops::load_options(self.config.as_deref(), &self.input).or_exit();
        let registry = ops::registry(&options).or_exit();

        let report = ops::compile(source, options, registry)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &report.js)
                    .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
                report.render(&mut TerminalOutput::new());
                println!("  → {}", path.display());
            }
            None => {
                for warning in &report.warnings {
                    eprintln!("warning: {}", warning);
                }
                print!("{}", report.js);
            }
        }

        Ok(())
    }
}
