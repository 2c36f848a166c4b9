//! Intermediate representation for the graft compiler.
//!
//! This crate provides the expression IR that sits between the typed source
//! AST produced by a front end and the text produced by a target emitter.
//! Every transformation in the compiler, including third-party call
//! replacements, reads and writes these types.
//!
//! # Architecture
//!
//! ```text
//! typed source AST → graft-compiler (transform + plugins) → graft-ir → emitter
//! ```
//!
//! The IR types are designed to be:
//! - Independent of the source language and of the target syntax
//! - Immutable once built (nodes are only exposed through shared references)
//! - Annotated with a resolved [`Type`] and an optional [`SourceRange`]

mod expr;
mod file;
mod range;
mod types;

pub use expr::{
    BinaryOp, CallKind, EmitInfo, Expr, ExprKind, GetKey, Ident, ImportInfo, Literal, LogicalOp,
    Operation, UnaryOp,
};
pub use file::{Declaration, File};
pub use range::{Position, SourceRange};
pub use types::{NumberKind, Type};
