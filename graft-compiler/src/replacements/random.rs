//! `System.Random`.
//!
//! Random instances carry no state on the target side: the constructor
//! yields an empty object and every draw goes through `Math.random()`.

use eyre::Result;
use graft_config::CompilerOptions;
use graft_ir::{Expr, Type};

use super::{BuiltinReplacements, global_call};
use crate::ApplyInfo;

const OWNER: &str = "System.Random";

/// Upper bound of the parameterless `Next()`.
const MAX_INT: i64 = i32::MAX as i64;

/// Draws an integer in `[$0, $1)`.
const NEXT_TEMPLATE: &str = "Math.floor(Math.random() * ($1 - $0)) + $0";

pub(super) fn register(table: &mut BuiltinReplacements) {
    table
        .register(OWNER, ".ctor", constructor)
        .register(OWNER, "Next", next)
        .register(OWNER, "NextDouble", next_double);
}

/// `new Random()` and `new Random(seed)`; the seed has no target-side meaning.
fn constructor(_: &CompilerOptions, info: &ApplyInfo) -> Result<Option<Expr>> {
    match info.args.as_slice() {
        [] | [_] => Ok(Some(Expr::object(Vec::new(), info.return_type.clone()))),
        _ => Err(info.unsupported_shape().into()),
    }
}

/// `Next()`, `Next(max)` and `Next(min, max)`, all half-open.
fn next(_: &CompilerOptions, info: &ApplyInfo) -> Result<Option<Expr>> {
    let (min, max) = match info.args.as_slice() {
        [] => (Expr::int(0), Expr::int(MAX_INT)),
        [max] => (Expr::int(0), max.clone()),
        [min, max] => (min.clone(), max.clone()),
        _ => return Err(info.unsupported_shape().into()),
    };
    Ok(Some(Expr::emit(
        NEXT_TEMPLATE,
        vec![min, max],
        info.return_type.clone(),
    )))
}

fn next_double(_: &CompilerOptions, info: &ApplyInfo) -> Result<Option<Expr>> {
    match info.args.as_slice() {
        [] => Ok(Some(global_call("Math", "random", Vec::new(), Type::float64()))),
        _ => Err(info.unsupported_shape().into()),
    }
}
