//! Typed source expressions.
//!
//! The tree is a plain data model. Queries never mutate it; rewrites
//! ([`SourceExpr::rewrite`]) consume a tree and return a new one.

use graft_ir::{BinaryOp, Literal, LogicalOp, SourceRange, Type, UnaryOp};
use serde::Deserialize;

use crate::MemberRef;

/// A lambda parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(default)]
    pub ty: Type,
}

/// A field in a record construction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordField {
    pub name: String,
    pub value: SourceExpr,
}

/// A module-level binding in a source file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceDeclaration {
    pub name: String,
    #[serde(default = "default_public")]
    pub is_public: bool,
    pub body: SourceExpr,
    #[serde(default)]
    pub range: Option<SourceRange>,
}

fn default_public() -> bool {
    true
}

/// A typed source expression.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceExpr {
    Const {
        value: Literal,
        #[serde(default)]
        ty: Type,
        #[serde(default)]
        range: Option<SourceRange>,
    },
    Ident {
        name: String,
        #[serde(default)]
        ty: Type,
        #[serde(default)]
        range: Option<SourceRange>,
    },
    /// Call or member access resolved to a member of a declared entity.
    Call {
        member: MemberRef,
        #[serde(default)]
        receiver: Option<Box<SourceExpr>>,
        #[serde(default)]
        args: Vec<SourceExpr>,
        /// Generic arguments supplied at the call site.
        #[serde(default)]
        generic_args: Vec<Type>,
        #[serde(default)]
        range: Option<SourceRange>,
    },
    /// Application of a function value (a local lambda, a parameter, ...).
    Apply {
        callee: Box<SourceExpr>,
        #[serde(default)]
        args: Vec<SourceExpr>,
        #[serde(default)]
        ty: Type,
        #[serde(default)]
        range: Option<SourceRange>,
    },
    /// Field access on a value that is not a resolved member.
    Get {
        expr: Box<SourceExpr>,
        field: String,
        #[serde(default)]
        ty: Type,
        #[serde(default)]
        range: Option<SourceRange>,
    },
    Lambda {
        params: Vec<Param>,
        body: Box<SourceExpr>,
        #[serde(default)]
        range: Option<SourceRange>,
    },
    Let {
        name: String,
        #[serde(default)]
        ty: Type,
        value: Box<SourceExpr>,
        body: Box<SourceExpr>,
        #[serde(default)]
        range: Option<SourceRange>,
    },
    If {
        guard: Box<SourceExpr>,
        then: Box<SourceExpr>,
        otherwise: Box<SourceExpr>,
        #[serde(default)]
        range: Option<SourceRange>,
    },
    Sequential {
        exprs: Vec<SourceExpr>,
        #[serde(default)]
        range: Option<SourceRange>,
    },
    Record {
        fields: Vec<RecordField>,
        #[serde(default)]
        ty: Type,
        #[serde(default)]
        range: Option<SourceRange>,
    },
    Binary {
        op: BinaryOp,
        left: Box<SourceExpr>,
        right: Box<SourceExpr>,
        #[serde(default)]
        ty: Type,
        #[serde(default)]
        range: Option<SourceRange>,
    },
    Logical {
        op: LogicalOp,
        left: Box<SourceExpr>,
        right: Box<SourceExpr>,
        #[serde(default)]
        range: Option<SourceRange>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<SourceExpr>,
        #[serde(default)]
        ty: Type,
        #[serde(default)]
        range: Option<SourceRange>,
    },
    /// Upcast/downcast to the given type.
    Coerce {
        expr: Box<SourceExpr>,
        ty: Type,
        #[serde(default)]
        range: Option<SourceRange>,
    },
}

impl SourceExpr {
    /// Source range of this node, if the front end recorded one.
    pub fn range(&self) -> Option<&SourceRange> {
        match self {
            SourceExpr::Const { range, .. }
            | SourceExpr::Ident { range, .. }
            | SourceExpr::Call { range, .. }
            | SourceExpr::Apply { range, .. }
            | SourceExpr::Get { range, .. }
            | SourceExpr::Lambda { range, .. }
            | SourceExpr::Let { range, .. }
            | SourceExpr::If { range, .. }
            | SourceExpr::Sequential { range, .. }
            | SourceExpr::Record { range, .. }
            | SourceExpr::Binary { range, .. }
            | SourceExpr::Logical { range, .. }
            | SourceExpr::Unary { range, .. }
            | SourceExpr::Coerce { range, .. } => range.as_ref(),
        }
    }

    /// Resolved type of this node.
    pub fn ty(&self) -> Type {
        match self {
            SourceExpr::Const { value, ty, .. } => match ty {
                Type::Any => value.natural_type(),
                ty => ty.clone(),
            },
            SourceExpr::Call { member, .. } => member.return_type.clone(),
            SourceExpr::Ident { ty, .. }
            | SourceExpr::Apply { ty, .. }
            | SourceExpr::Get { ty, .. }
            | SourceExpr::Record { ty, .. }
            | SourceExpr::Binary { ty, .. }
            | SourceExpr::Unary { ty, .. }
            | SourceExpr::Coerce { ty, .. } => ty.clone(),
            SourceExpr::Lambda { params, body, .. } => {
                Type::lambda(params.iter().map(|p| p.ty.clone()).collect(), body.ty())
            }
            SourceExpr::Let { body, .. } => body.ty(),
            SourceExpr::If { then, .. } => then.ty(),
            SourceExpr::Sequential { exprs, .. } => {
                exprs.last().map(|e| e.ty()).unwrap_or(Type::Unit)
            }
            SourceExpr::Logical { .. } => Type::Boolean,
        }
    }

    /// Number of parameters if this expression is a function value.
    pub fn lambda_arity(&self) -> Option<usize> {
        match self {
            SourceExpr::Lambda { params, .. } => Some(params.len()),
            other => other.ty().lambda_arity(),
        }
    }

    /// Direct children, in evaluation order.
    pub fn children(&self) -> Vec<&SourceExpr> {
        match self {
            SourceExpr::Const { .. } | SourceExpr::Ident { .. } => Vec::new(),
            SourceExpr::Call { receiver, args, .. } => {
                receiver.iter().map(|r| &**r).chain(args.iter()).collect()
            }
            SourceExpr::Apply { callee, args, .. } => {
                std::iter::once(callee.as_ref()).chain(args.iter()).collect()
            }
            SourceExpr::Get { expr, .. } | SourceExpr::Coerce { expr, .. } => vec![expr.as_ref()],
            SourceExpr::Lambda { body, .. } => vec![body.as_ref()],
            SourceExpr::Let { value, body, .. } => vec![value.as_ref(), body.as_ref()],
            SourceExpr::If {
                guard,
                then,
                otherwise,
                ..
            } => vec![guard.as_ref(), then.as_ref(), otherwise.as_ref()],
            SourceExpr::Sequential { exprs, .. } => exprs.iter().collect(),
            SourceExpr::Record { fields, .. } => fields.iter().map(|f| &f.value).collect(),
            SourceExpr::Binary { left, right, .. } | SourceExpr::Logical { left, right, .. } => {
                vec![left.as_ref(), right.as_ref()]
            }
            SourceExpr::Unary { operand, .. } => vec![operand.as_ref()],
        }
    }

    /// Visit this node and its descendants, parents first.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a SourceExpr)) {
        f(self);
        for child in self.children() {
            child.visit(f);
        }
    }

    /// Rebuild the tree bottom-up, passing every rebuilt node through `f`.
    pub fn rewrite(self, f: &mut impl FnMut(SourceExpr) -> SourceExpr) -> SourceExpr {
        let rebuilt = match self {
            leaf @ (SourceExpr::Const { .. } | SourceExpr::Ident { .. }) => leaf,
            SourceExpr::Call {
                member,
                receiver,
                args,
                generic_args,
                range,
            } => SourceExpr::Call {
                member,
                receiver: receiver.map(|r| Box::new(r.rewrite(f))),
                args: rewrite_all(args, f),
                generic_args,
                range,
            },
            SourceExpr::Apply {
                callee,
                args,
                ty,
                range,
            } => SourceExpr::Apply {
                callee: Box::new(callee.rewrite(f)),
                args: rewrite_all(args, f),
                ty,
                range,
            },
            SourceExpr::Get {
                expr,
                field,
                ty,
                range,
            } => SourceExpr::Get {
                expr: Box::new(expr.rewrite(f)),
                field,
                ty,
                range,
            },
            SourceExpr::Lambda {
                params,
                body,
                range,
            } => SourceExpr::Lambda {
                params,
                body: Box::new(body.rewrite(f)),
                range,
            },
            SourceExpr::Let {
                name,
                ty,
                value,
                body,
                range,
            } => SourceExpr::Let {
                name,
                ty,
                value: Box::new(value.rewrite(f)),
                body: Box::new(body.rewrite(f)),
                range,
            },
            SourceExpr::If {
                guard,
                then,
                otherwise,
                range,
            } => SourceExpr::If {
                guard: Box::new(guard.rewrite(f)),
                then: Box::new(then.rewrite(f)),
                otherwise: Box::new(otherwise.rewrite(f)),
                range,
            },
            SourceExpr::Sequential { exprs, range } => SourceExpr::Sequential {
                exprs: rewrite_all(exprs, f),
                range,
            },
            SourceExpr::Record { fields, ty, range } => SourceExpr::Record {
                fields: fields
                    .into_iter()
                    .map(|field| RecordField {
                        name: field.name,
                        value: field.value.rewrite(f),
                    })
                    .collect(),
                ty,
                range,
            },
            SourceExpr::Binary {
                op,
                left,
                right,
                ty,
                range,
            } => SourceExpr::Binary {
                op,
                left: Box::new(left.rewrite(f)),
                right: Box::new(right.rewrite(f)),
                ty,
                range,
            },
            SourceExpr::Logical {
                op,
                left,
                right,
                range,
            } => SourceExpr::Logical {
                op,
                left: Box::new(left.rewrite(f)),
                right: Box::new(right.rewrite(f)),
                range,
            },
            SourceExpr::Unary {
                op,
                operand,
                ty,
                range,
            } => SourceExpr::Unary {
                op,
                operand: Box::new(operand.rewrite(f)),
                ty,
                range,
            },
            SourceExpr::Coerce { expr, ty, range } => SourceExpr::Coerce {
                expr: Box::new(expr.rewrite(f)),
                ty,
                range,
            },
        };
        f(rebuilt)
    }
}

fn rewrite_all(
    exprs: Vec<SourceExpr>,
    f: &mut impl FnMut(SourceExpr) -> SourceExpr,
) -> Vec<SourceExpr> {
    exprs.into_iter().map(|e| e.rewrite(f)).collect()
}
