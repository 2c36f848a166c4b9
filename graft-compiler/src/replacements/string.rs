//! `System.String`.

use eyre::Result;
use graft_config::CompilerOptions;
use graft_ir::{Expr, ExprKind, Type};

use super::BuiltinReplacements;
use crate::ApplyInfo;

const OWNER: &str = "System.String";

pub(super) fn register(table: &mut BuiltinReplacements) {
    table
        .register(OWNER, "IsNullOrEmpty", is_null_or_empty)
        .register(OWNER, "Length", length)
        .register(OWNER, "ToUpper", to_upper)
        .register(OWNER, "ToLower", to_lower);
}

/// Inline test for names and literals, which are safe to read twice.
const NULL_OR_EMPTY_INLINE: &str = "$0 == null || $0.length === 0";
/// Any other argument is evaluated exactly once, as the arrow's parameter.
const NULL_OR_EMPTY_BOUND: &str = "((s) => s == null || s.length === 0)($0)";

fn is_null_or_empty(_: &CompilerOptions, info: &ApplyInfo) -> Result<Option<Expr>> {
    let [arg] = info.args.as_slice() else {
        return Err(info.unsupported_shape().into());
    };
    let template = match arg.kind() {
        ExprKind::Ident(_) | ExprKind::Value(_) => NULL_OR_EMPTY_INLINE,
        _ => NULL_OR_EMPTY_BOUND,
    };
    Ok(Some(Expr::emit(template, info.args.clone(), Type::Boolean)))
}

fn length(_: &CompilerOptions, info: &ApplyInfo) -> Result<Option<Expr>> {
    match (&info.receiver, info.args.as_slice()) {
        (Some(receiver), []) => Ok(Some(Expr::get_field(
            receiver.clone(),
            "length",
            info.return_type.clone(),
        ))),
        _ => Err(info.unsupported_shape().into()),
    }
}

fn to_upper(_: &CompilerOptions, info: &ApplyInfo) -> Result<Option<Expr>> {
    string_method(info, "toUpperCase")
}

fn to_lower(_: &CompilerOptions, info: &ApplyInfo) -> Result<Option<Expr>> {
    string_method(info, "toLowerCase")
}

/// A parameterless instance method call on the receiver.
fn string_method(info: &ApplyInfo, js_name: &str) -> Result<Option<Expr>> {
    match (&info.receiver, info.args.as_slice()) {
        (Some(receiver), []) => {
            let callee = Expr::get_field(receiver.clone(), js_name, Type::Any);
            Ok(Some(Expr::call(callee, Vec::new(), Type::String)))
        }
        // Culture-specific overloads are left to pass-through.
        (Some(_), [_]) => Ok(None),
        _ => Err(info.unsupported_shape().into()),
    }
}
