mod check;
mod compile;
mod plugins;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use compile::CompileCommand;
use eyre::Result;
use plugins::PluginsCommand;

/// Loader and registry errors the CLI prints as diagnostics and exits on.
pub(crate) trait IntoReport {
    fn into_report(self) -> miette::Report;
}

impl IntoReport for Box<graft_source::Error> {
    fn into_report(self) -> miette::Report {
        miette::Report::new(*self)
    }
}

impl IntoReport for Box<graft_config::Error> {
    fn into_report(self) -> miette::Report {
        miette::Report::new(*self)
    }
}

impl IntoReport for graft_compiler::RegistryError {
    fn into_report(self) -> miette::Report {
        miette::Report::new(self)
    }
}

pub(crate) trait OrExit<T> {
    fn or_exit(self) -> T;
}

impl<T, E: IntoReport> OrExit<T> for std::result::Result<T, E> {
    fn or_exit(self) -> T {
        self.unwrap_or_else(|err| {
            eprintln!("{:?}", err.into_report());
            std::process::exit(1)
        })
    }
}

#[derive(Parser)]
#[command(name = "graft")]
#[command(version)]
#[command(about = "Compile typed ASTs to JavaScript with pluggable call replacement")]
pub(crate) struct Cli {
    /// Log progress (info level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log every resolution decision (debug level)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Compile(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Plugins(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a typed AST to JavaScript
    Compile(CompileCommand),

    /// Run the compiler without emitting and report how calls resolve
    Check(CheckCommand),

    /// List the extensions that can be enabled in graft.toml
    Plugins(PluginsCommand),
}
