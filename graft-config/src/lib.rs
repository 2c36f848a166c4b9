// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! `graft.toml` parsing and validation.
//!
//! The configuration file is turned into [`CompilerOptions`], the immutable
//! per-run settings threaded through every compiler hook.
//!
//! ```toml
//! [compiler]
//! module_format = "esm"
//! debug = false
//! define = ["TRACE"]
//! plugins = ["seeded-random"]
//!
//! [diagnostics]
//! warn_passthrough = ["System."]
//! ```

mod error;
mod file;
mod options;
mod validate;

pub use error::{Error, Result};
pub use file::GraftToml;
pub use options::{CompilerOptions, ModuleFormat};
