use std::fmt;

use graft_ir::{Expr, SourceRange, Type};
use serde::Serialize;

use crate::ApplyInfo;

/// Which link of the chain produced a call site's replacement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Handler {
    /// A registered `ReplaceCall` extension, by name.
    Plugin(String),
    /// The built-in replacement table.
    Builtin,
    /// No handler claimed the call; it was emitted as a direct call.
    PassThrough,
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Plugin(name) => write!(f, "plugin '{}'", name),
            Handler::Builtin => write!(f, "builtin"),
            Handler::PassThrough => write!(f, "pass-through"),
        }
    }
}

/// The single authoritative outcome for one call site.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub handler: Handler,
    pub expr: Expr,
}

/// Record of a resolved call site, kept for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCall {
    pub owner: String,
    pub member: String,
    pub handler: Handler,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<SourceRange>,
}

impl ResolvedCall {
    pub(crate) fn new(info: &ApplyInfo, handler: Handler) -> Self {
        Self {
            owner: info.owner.clone(),
            member: info.member.clone(),
            handler,
            range: info.range.clone(),
        }
    }
}

/// Emit an unclaimed call as written.
///
/// - constructor: `new Owner(args)`
/// - property or field read: `target.member`
/// - otherwise: `target.member(args)`
///
/// where `target` is the receiver, or `Owner` (the last segment of the
/// owner name) for static members.
pub fn pass_through(info: &ApplyInfo) -> Expr {
    let ty = info.return_type.clone();
    let owner = Expr::ident(info.owner_name(), Type::declared(&info.owner));

    let expr = if info.is_constructor() {
        Expr::construct(owner, info.args.clone(), ty)
    } else {
        let target = info.receiver.clone().unwrap_or(owner);
        if info.kind.is_accessor() && info.args.is_empty() {
            Expr::get_field(target, &info.member, ty)
        } else {
            let callee_ty = Type::lambda(info.signature_arg_types.clone(), ty.clone());
            let callee = Expr::get_field(target, &info.member, callee_ty);
            Expr::call(callee, info.args.clone(), ty)
        }
    };

    expr.with_range(info.range.clone())
}

#[cfg(test)]
mod tests {
    use graft_ir::{CallKind, ExprKind, GetKey};
    use graft_source::{MemberKind, MemberRef};

    use super::*;

    fn member(entity: &str, name: &str, kind: MemberKind) -> MemberRef {
        MemberRef {
            entity: entity.into(),
            name: name.into(),
            kind,
            is_instance: false,
            attributes: Vec::new(),
            generic_args: Vec::new(),
            signature_arg_types: Vec::new(),
            return_type: Type::String,
        }
    }

    fn callee_parts(expr: &Expr) -> (&Expr, &str) {
        match expr.kind() {
            ExprKind::Get {
                expr,
                key: GetKey::Field(name),
            } => (expr, name),
            other => panic!("expected member access, got {other:?}"),
        }
    }

    #[test]
    fn test_static_call_uses_owner_name() {
        let info = ApplyInfo::new(
            &member("MyApp.Text.Formatter", "Pad", MemberKind::Method),
            None,
            vec![Expr::string("x"), Expr::int(3)],
        );

        let expr = pass_through(&info);
        let ExprKind::Call { callee, args, kind } = expr.kind() else {
            panic!("expected call");
        };
        assert_eq!(*kind, CallKind::Direct);
        assert_eq!(args, &info.args);

        let (target, name) = callee_parts(callee);
        assert_eq!(name, "Pad");
        assert!(matches!(target.kind(), ExprKind::Ident(id) if id.name == "Formatter"));
    }

    #[test]
    fn test_instance_call_uses_receiver() {
        let receiver = Expr::ident("sb", Type::declared("System.Text.StringBuilder"));
        let info = ApplyInfo::new(
            &member("System.Text.StringBuilder", "Append", MemberKind::Method),
            Some(receiver.clone()),
            vec![Expr::string("!")],
        );

        let expr = pass_through(&info);
        let ExprKind::Call { callee, .. } = expr.kind() else {
            panic!("expected call");
        };
        let (target, name) = callee_parts(callee);
        assert_eq!(name, "Append");
        assert_eq!(target, &receiver);
    }

    #[test]
    fn test_constructor_is_construct_call() {
        let info = ApplyInfo::new(
            &member("System.Text.StringBuilder", "StringBuilder", MemberKind::Constructor),
            None,
            vec![],
        );

        let expr = pass_through(&info);
        assert!(matches!(
            expr.kind(),
            ExprKind::Call { kind: CallKind::Construct, args, .. } if args.is_empty()
        ));
    }

    #[test]
    fn test_property_read_has_no_call() {
        let receiver = Expr::ident("list", Type::Any);
        let info = ApplyInfo::new(
            &member("System.Collections.Generic.List", "Count", MemberKind::Property),
            Some(receiver),
            vec![],
        );

        let expr = pass_through(&info);
        let (_, name) = callee_parts(&expr);
        assert_eq!(name, "Count");
        assert_eq!(expr.ty(), &Type::String);
    }

    #[test]
    fn test_handler_display() {
        assert_eq!(Handler::Plugin("x".into()).to_string(), "plugin 'x'");
        assert_eq!(Handler::Builtin.to_string(), "builtin");
        assert_eq!(Handler::PassThrough.to_string(), "pass-through");
    }

    #[test]
    fn test_resolved_call_serializes_for_reports() {
        let info = ApplyInfo::new(
            &member("System.Random", "Next", MemberKind::Method),
            None,
            vec![],
        );
        let call = ResolvedCall::new(&info, Handler::Plugin("dice".into()));

        assert_eq!(
            serde_json::to_value(&call).unwrap(),
            serde_json::json!({
                "owner": "System.Random",
                "member": "Next",
                "handler": { "kind": "plugin", "name": "dice" }
            })
        );
        assert_eq!(
            serde_json::to_value(Handler::PassThrough).unwrap(),
            serde_json::json!({ "kind": "pass_through" })
        );
    }
}
