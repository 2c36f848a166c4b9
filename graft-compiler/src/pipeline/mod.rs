//! A [`Pipeline`] runs named [`Phase`]s over a [`CompilationContext`], in
//! the order rewrite, transform, then any user phases. Options are fixed
//! for the whole run and every phase appends to the same diagnostics list.
//!
//! # Example
//!
//! ```ignore
//! use graft_compiler::pipeline::Pipeline;
//!
//! let ctx = Pipeline::new(registry).run(source, options)?;
//!
//! for diag in ctx.warnings() {
//!     eprintln!("{diag}");
//! }
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod runner;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use runner::Pipeline;
