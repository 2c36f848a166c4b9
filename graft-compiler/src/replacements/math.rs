//! `System.Math`, mapped onto the target's `Math` object.

use eyre::Result;
use graft_config::CompilerOptions;
use graft_ir::{Expr, Type};

use super::{BuiltinReplacements, global_call, global_member};
use crate::ApplyInfo;

const OWNER: &str = "System.Math";

pub(super) fn register(table: &mut BuiltinReplacements) {
    table
        .register(OWNER, "Abs", abs)
        .register(OWNER, "Floor", floor)
        .register(OWNER, "Ceiling", ceiling)
        .register(OWNER, "Sqrt", sqrt)
        .register(OWNER, "Pow", pow)
        .register(OWNER, "Max", max)
        .register(OWNER, "Min", min)
        .register(OWNER, "PI", pi);
}

fn unary(info: &ApplyInfo, js_name: &str) -> Result<Option<Expr>> {
    match info.args.as_slice() {
        [_] => Ok(Some(global_call(
            "Math",
            js_name,
            info.args.clone(),
            info.return_type.clone(),
        ))),
        _ => Err(info.unsupported_shape().into()),
    }
}

fn binary(info: &ApplyInfo, js_name: &str) -> Result<Option<Expr>> {
    match info.args.as_slice() {
        [_, _] => Ok(Some(global_call(
            "Math",
            js_name,
            info.args.clone(),
            info.return_type.clone(),
        ))),
        _ => Err(info.unsupported_shape().into()),
    }
}

fn abs(_: &CompilerOptions, info: &ApplyInfo) -> Result<Option<Expr>> {
    unary(info, "abs")
}

fn floor(_: &CompilerOptions, info: &ApplyInfo) -> Result<Option<Expr>> {
    unary(info, "floor")
}

fn ceiling(_: &CompilerOptions, info: &ApplyInfo) -> Result<Option<Expr>> {
    unary(info, "ceil")
}

fn sqrt(_: &CompilerOptions, info: &ApplyInfo) -> Result<Option<Expr>> {
    unary(info, "sqrt")
}

fn pow(_: &CompilerOptions, info: &ApplyInfo) -> Result<Option<Expr>> {
    binary(info, "pow")
}

fn max(_: &CompilerOptions, info: &ApplyInfo) -> Result<Option<Expr>> {
    binary(info, "max")
}

fn min(_: &CompilerOptions, info: &ApplyInfo) -> Result<Option<Expr>> {
    binary(info, "min")
}

fn pi(_: &CompilerOptions, info: &ApplyInfo) -> Result<Option<Expr>> {
    match info.args.as_slice() {
        [] => Ok(Some(global_member("Math", "PI", Type::float64()))),
        _ => Err(info.unsupported_shape().into()),
    }
}

#[cfg(test)]
mod tests {
    use graft_ir::{ExprKind, GetKey};

    use super::*;
    use crate::replacements::test_support::static_call;

    fn callee_name(expr: &Expr) -> &str {
        let ExprKind::Call { callee, .. } = expr.kind() else {
            panic!("expected call, got {:?}", expr.kind());
        };
        match callee.kind() {
            ExprKind::Get {
                key: GetKey::Field(name),
                ..
            } => name,
            other => panic!("expected member access, got {other:?}"),
        }
    }

    #[test]
    fn test_ceiling_maps_to_ceil() {
        let info = static_call(OWNER, "Ceiling", vec![Expr::float(1.5)], Type::float64());
        let expr = ceiling(&CompilerOptions::default(), &info)
            .unwrap()
            .unwrap();
        assert_eq!(callee_name(&expr), "ceil");
        assert_eq!(expr.ty(), &Type::float64());
    }

    #[test]
    fn test_max_needs_two_arguments() {
        let options = CompilerOptions::default();
        let ok = static_call(OWNER, "Max", vec![Expr::int(1), Expr::int(2)], Type::int32());
        assert_eq!(callee_name(&max(&options, &ok).unwrap().unwrap()), "max");

        let bad = static_call(OWNER, "Max", vec![Expr::int(1)], Type::int32());
        assert!(max(&options, &bad).is_err());
    }

    #[test]
    fn test_pi_is_member_read() {
        let info = static_call(OWNER, "PI", vec![], Type::float64());
        let expr = pi(&CompilerOptions::default(), &info).unwrap().unwrap();
        assert!(matches!(
            expr.kind(),
            ExprKind::Get { key: GetKey::Field(name), .. } if name == "PI"
        ));
    }
}
