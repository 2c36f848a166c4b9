// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Typed source AST consumed by the graft compiler.
//!
//! The front end (parser and type checker) is a black box: it hands graft a
//! fully typed tree with symbols already resolved, serialized as JSON. This
//! crate models that tree and exposes the read-only queries the compiler needs
//! to build IR and call-site descriptors: member full names, member kinds,
//! attributes, generic arguments, declared types and source ranges.
//!
//! # Example
//!
//! ```
//! use graft_source::{SourceExpr, SourceFile};
//!
//! let file = SourceFile::from_json_str(
//!     r#"{
//!         "path": "App.fs",
//!         "declarations": [{
//!             "name": "rng",
//!             "body": {
//!                 "kind": "call",
//!                 "member": {
//!                     "entity": "System.Random",
//!                     "name": ".ctor",
//!                     "kind": "constructor",
//!                     "return_type": { "type": "declared", "full_name": "System.Random" }
//!                 }
//!             }
//!         }]
//!     }"#,
//!     "App.json",
//! )
//! .unwrap();
//!
//! let SourceExpr::Call { member, .. } = &file.declarations[0].body else {
//!     panic!("expected a call");
//! };
//! assert_eq!(member.full_name(), "System.Random..ctor");
//! assert!(member.is_constructor());
//! ```

mod ast;
mod error;
mod file;
mod member;

pub use ast::{Param, RecordField, SourceDeclaration, SourceExpr};
pub use error::{Error, Result};
pub use file::SourceFile;
pub use member::{Attribute, CONSTRUCTOR_NAME, MemberKind, MemberRef};
