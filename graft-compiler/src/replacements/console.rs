//! `System.Console`.

use eyre::Result;
use graft_config::CompilerOptions;
use graft_ir::Expr;

use super::{BuiltinReplacements, global_call};
use crate::ApplyInfo;

pub(super) fn register(table: &mut BuiltinReplacements) {
    table.register("System.Console", "WriteLine", write_line);
}

/// `WriteLine()` and `WriteLine(value)`; format-string overloads are not mapped.
fn write_line(_: &CompilerOptions, info: &ApplyInfo) -> Result<Option<Expr>> {
    match info.args.as_slice() {
        [] | [_] => Ok(Some(global_call(
            "console",
            "log",
            info.args.clone(),
            info.return_type.clone(),
        ))),
        _ => Err(info.unsupported_shape().into()),
    }
}
