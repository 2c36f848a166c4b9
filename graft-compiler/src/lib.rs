// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Extensible call-replacement compiler core.
//!
//! The compiler lowers a typed [`SourceFile`](graft_source::SourceFile) into
//! the [`graft_ir`] representation. At every call site it builds an
//! [`ApplyInfo`] and asks, in order:
//!
//! 1. each `ReplaceCall` extension in the [`PluginRegistry`], by registration order;
//! 2. the [`BuiltinReplacements`] table;
//! 3. the pass-through fallback, which emits a direct call.
//!
//! The first concrete answer wins, so exactly one handler owns every call site.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use graft_compiler::{Pipeline, PluginRegistry};
//!
//! let registry = PluginRegistry::builder()
//!     .replace_call(MyReplacer)
//!     .build()?;
//! let ctx = Pipeline::new(Arc::new(registry)).run(source, options)?;
//! let ir = ctx.ir.expect("transform phase populates the IR");
//! ```

mod error;
pub mod pipeline;
pub mod plugin;
pub mod replacements;
pub mod transform;

pub use error::CompileError;
pub use pipeline::{CompilationContext, Diagnostic, Phase, Pipeline, Severity};
pub use plugin::{
    ApplyInfo, AstTransformer, CallReplacer, Capability, Extension, PluginRegistry,
    PluginRegistryBuilder, RegistryError,
};
pub use replacements::BuiltinReplacements;
pub use transform::{Handler, Resolution, ResolvedCall, Transformer};
