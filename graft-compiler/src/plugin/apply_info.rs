use graft_ir::{Expr, SourceRange, Type};
use graft_source::{Attribute, MemberKind, MemberRef};

use crate::CompileError;

/// Everything a handler needs to know about one call site.
///
/// Built fresh for every call or member access, after the receiver and
/// arguments have been lowered. Handlers only ever see it by shared
/// reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyInfo {
    /// Full name of the declaring entity, e.g. `System.Random`.
    pub owner: String,
    /// Member name; constructors report `.ctor`.
    pub member: String,
    pub kind: MemberKind,
    /// Lowered receiver. `None` for static members and constructors.
    pub receiver: Option<Expr>,
    /// Lowered arguments, in call order.
    pub args: Vec<Expr>,
    pub return_type: Type,
    pub range: Option<SourceRange>,
    /// Attributes on the called member.
    pub attributes: Vec<Attribute>,
    /// Generic arguments supplied at the call site.
    pub call_generic_args: Vec<Type>,
    /// Generic parameters of the declaring member.
    pub member_generic_args: Vec<Type>,
    /// Declared parameter types of the selected overload.
    pub signature_arg_types: Vec<Type>,
    /// Arity of each argument that is a function value, `None` otherwise.
    pub lambda_arities: Vec<Option<usize>>,
}

impl ApplyInfo {
    /// Describe a call to `member` with already-lowered parts.
    pub fn new(member: &MemberRef, receiver: Option<Expr>, args: Vec<Expr>) -> Self {
        let lambda_arities = args.iter().map(|a| a.ty().lambda_arity()).collect();
        Self {
            owner: member.entity.clone(),
            member: member.member_name().to_string(),
            kind: member.kind,
            receiver,
            args,
            return_type: member.return_type.clone(),
            range: None,
            attributes: member.attributes.clone(),
            call_generic_args: Vec::new(),
            member_generic_args: member.generic_args.clone(),
            signature_arg_types: member.signature_arg_types.clone(),
            lambda_arities,
        }
    }

    pub fn with_range(mut self, range: Option<SourceRange>) -> Self {
        self.range = range;
        self
    }

    pub fn with_call_generic_args(mut self, generic_args: Vec<Type>) -> Self {
        self.call_generic_args = generic_args;
        self
    }

    /// Override the per-argument lambda arities.
    ///
    /// The source tree knows arities the lowered argument types may have lost.
    pub fn with_lambda_arities(mut self, arities: Vec<Option<usize>>) -> Self {
        self.lambda_arities = arities;
        self
    }

    /// Last segment of the owner name (`Random` for `System.Random`).
    pub fn owner_name(&self) -> &str {
        self.owner.rsplit('.').next().unwrap_or(&self.owner)
    }

    /// `Owner.Member`, e.g. `System.Random.Next`.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.owner, self.member)
    }

    pub fn is_constructor(&self) -> bool {
        self.kind == MemberKind::Constructor
    }

    /// True when the call has no receiver.
    pub fn is_static(&self) -> bool {
        self.receiver.is_none()
    }

    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    /// Arity of argument `index` when it is a function value.
    pub fn lambda_arity(&self, index: usize) -> Option<usize> {
        self.lambda_arities.get(index).copied().flatten()
    }

    pub fn has_attribute(&self, full_name: &str) -> bool {
        self.attributes.iter().any(|a| a.full_name == full_name)
    }

    /// The error a handler returns when it recognizes the member but not the
    /// argument list.
    pub fn unsupported_shape(&self) -> CompileError {
        CompileError::CallShape {
            owner: self.owner.clone(),
            member: self.member.clone(),
            count: self.args.len(),
            range: self.range.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use graft_ir::Position;

    use super::*;

    fn member(kind: MemberKind, name: &str) -> MemberRef {
        MemberRef {
            entity: "System.Random".into(),
            name: name.into(),
            kind,
            is_instance: kind != MemberKind::Constructor,
            attributes: vec![Attribute {
                full_name: "System.ObsoleteAttribute".into(),
                args: Vec::new(),
            }],
            generic_args: Vec::new(),
            signature_arg_types: vec![Type::int32()],
            return_type: Type::int32(),
        }
    }

    #[test]
    fn test_descriptor_from_member() {
        let info = ApplyInfo::new(
            &member(MemberKind::Method, "Next"),
            Some(Expr::ident("rng", Type::declared("System.Random"))),
            vec![Expr::int(10)],
        );

        assert_eq!(info.full_name(), "System.Random.Next");
        assert_eq!(info.owner_name(), "Random");
        assert!(!info.is_static());
        assert!(!info.is_constructor());
        assert_eq!(info.arg_count(), 1);
        assert!(info.has_attribute("System.ObsoleteAttribute"));
        assert_eq!(info.lambda_arity(0), None);
    }

    #[test]
    fn test_constructor_uses_sentinel_name() {
        let info = ApplyInfo::new(&member(MemberKind::Constructor, "Random"), None, vec![]);
        assert_eq!(info.member, ".ctor");
        assert!(info.is_static());
        assert!(info.is_constructor());
    }

    #[test]
    fn test_lambda_arity_from_argument_type() {
        let callback = Expr::ident(
            "f",
            Type::lambda(vec![Type::int32(), Type::int32()], Type::Boolean),
        );
        let info = ApplyInfo::new(&member(MemberKind::Method, "Sort"), None, vec![callback]);
        assert_eq!(info.lambda_arity(0), Some(2));
        assert_eq!(info.lambda_arity(1), None);
    }

    #[test]
    fn test_unsupported_shape_names_call_site() {
        let range = SourceRange::new(Position::new(2, 0), Position::new(2, 12));
        let info = ApplyInfo::new(
            &member(MemberKind::Method, "Next"),
            None,
            vec![Expr::int(1), Expr::int(2), Expr::int(3)],
        )
        .with_range(Some(range.clone()));

        match info.unsupported_shape() {
            CompileError::CallShape {
                owner,
                member,
                count,
                range: got,
            } => {
                assert_eq!(owner, "System.Random");
                assert_eq!(member, "Next");
                assert_eq!(count, 3);
                assert_eq!(got, Some(range));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
