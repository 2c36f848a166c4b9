//! Built-in pipeline phases.
//!
//! - [`RewritePhase`] - applies `TransformAst` extensions to the source tree
//! - [`TransformPhase`] - lowers the source tree to IR

mod rewrite;
mod transform;

pub use rewrite::RewritePhase;
pub use transform::TransformPhase;
