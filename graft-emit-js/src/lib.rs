//! JavaScript emitter for graft IR.
//!
//! Renders a finished [`graft_ir::File`] as an ES module or a CommonJS
//! module. Runtime imports referenced anywhere in the IR are hoisted into
//! the module header, raw-emit templates are expanded, and parentheses are
//! inserted only where JavaScript precedence requires them.
//!
//! # Example
//!
//! ```
//! use graft_config::ModuleFormat;
//! use graft_emit_js::JsEmitter;
//! use graft_ir::{Declaration, Expr, File, Type};
//!
//! let file = File {
//!     source_path: "App.fs".into(),
//!     declarations: vec![Declaration {
//!         name: "answer".into(),
//!         body: Expr::int(42),
//!         is_public: true,
//!         range: None,
//!     }],
//! };
//!
//! let js = JsEmitter::new(ModuleFormat::Esm).emit_file(&file);
//! assert_eq!(js, "export const answer = 42;\n");
//! ```

mod code_builder;
mod imports;
mod indent;
mod renderer;
mod template;

pub use code_builder::CodeBuilder;
pub use imports::ImportCollector;
pub use indent::Indent;
pub use renderer::JsEmitter;
