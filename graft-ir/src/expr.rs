//! IR expressions.
//!
//! An [`Expr`] pairs an [`ExprKind`] with its resolved [`Type`] and an optional
//! [`SourceRange`]. Nodes are immutable: fields are private and only exposed
//! by shared reference, so a transformation that wants a different node has to
//! build a new one.
//!
//! # Example
//!
//! ```
//! use graft_ir::{BinaryOp, Expr, Type};
//!
//! // floor(Math.random() * 10)
//! let random = Expr::call(
//!     Expr::get_field(Expr::ident("Math", Type::Any), "random", Type::Any),
//!     Vec::new(),
//!     Type::float64(),
//! );
//! let scaled = Expr::binary(BinaryOp::Multiply, random, Expr::int(10), Type::float64());
//!
//! assert_eq!(scaled.ty(), &Type::float64());
//! ```

use serde::{Deserialize, Serialize};

use crate::{SourceRange, Type};

/// A literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Literal {
    Null,
    Unit,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Char(char),
}

impl Literal {
    /// The type a literal has when nothing more specific is known.
    pub fn natural_type(&self) -> Type {
        match self {
            Literal::Null => Type::Any,
            Literal::Unit => Type::Unit,
            Literal::Bool(_) => Type::Boolean,
            Literal::Int(_) => Type::int32(),
            Literal::Float(_) => Type::float64(),
            Literal::String(_) => Type::String,
            Literal::Char(_) => Type::Char,
        }
    }
}

/// A named binding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ident {
    pub name: String,
    pub ty: Type,
}

impl Ident {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A value imported from a runtime module.
///
/// Emitters hoist these into the module header.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ImportInfo {
    /// Exported member to import (e.g. `randomNext`).
    pub selector: String,
    /// Module path (e.g. `./runtime/util.js`).
    pub path: String,
}

/// Raw target syntax with positional placeholders.
///
/// The template uses `$0`, `$1`, ... for the arguments in [`EmitInfo::args`].
/// Substitution and parenthesization are done by the emitter, not here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmitInfo {
    pub template: String,
    pub args: Vec<Expr>,
}

/// How a member is selected by [`ExprKind::Get`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GetKey {
    /// Named field or property (`expr.name`).
    Field(String),
    /// Computed index (`expr[index]`).
    Index(Box<Expr>),
}

/// Whether a call is a plain application or an instance construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CallKind {
    Direct,
    Construct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Negate,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalOp {
    And,
    Or,
}

/// Operator application.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Operation {
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

/// The closed set of IR expression shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExprKind {
    Value(Literal),
    Ident(Ident),
    Import(ImportInfo),
    Get {
        expr: Box<Expr>,
        key: GetKey,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        kind: CallKind,
    },
    /// Record construction; field order is preserved.
    Object(Vec<(String, Expr)>),
    /// The inner expression, re-annotated with the outer node's type.
    TypeCast(Box<Expr>),
    Emit(EmitInfo),
    Operation(Operation),
    Lambda {
        params: Vec<Ident>,
        body: Box<Expr>,
    },
    Let {
        ident: Ident,
        value: Box<Expr>,
        body: Box<Expr>,
    },
    IfThenElse {
        guard: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    /// Evaluates each expression in order; the value is the last one.
    Sequential(Vec<Expr>),
}

/// An immutable IR node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expr {
    kind: ExprKind,
    ty: Type,
    #[serde(skip_serializing_if = "Option::is_none")]
    range: Option<SourceRange>,
}

impl Expr {
    /// Create a node from its parts.
    pub fn new(kind: ExprKind, ty: Type) -> Self {
        Self {
            kind,
            ty,
            range: None,
        }
    }

    /// Return the same node carrying `range`.
    pub fn with_range(self, range: Option<SourceRange>) -> Self {
        Self { range, ..self }
    }

    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn range(&self) -> Option<&SourceRange> {
        self.range.as_ref()
    }

    /// Decompose the node, e.g. to rebuild it with different children.
    pub fn into_parts(self) -> (ExprKind, Type, Option<SourceRange>) {
        (self.kind, self.ty, self.range)
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    /// A literal with its natural type.
    pub fn value(literal: Literal) -> Self {
        let ty = literal.natural_type();
        Self::new(ExprKind::Value(literal), ty)
    }

    /// A literal with an explicit type (e.g. a typed `null`).
    pub fn typed_value(literal: Literal, ty: Type) -> Self {
        Self::new(ExprKind::Value(literal), ty)
    }

    pub fn int(v: i64) -> Self {
        Self::value(Literal::Int(v))
    }

    pub fn float(v: f64) -> Self {
        Self::value(Literal::Float(v))
    }

    pub fn string(v: impl Into<String>) -> Self {
        Self::value(Literal::String(v.into()))
    }

    pub fn bool(v: bool) -> Self {
        Self::value(Literal::Bool(v))
    }

    pub fn unit() -> Self {
        Self::value(Literal::Unit)
    }

    pub fn ident(name: impl Into<String>, ty: Type) -> Self {
        let ident = Ident::new(name, ty.clone());
        Self::new(ExprKind::Ident(ident), ty)
    }

    pub fn import(selector: impl Into<String>, path: impl Into<String>, ty: Type) -> Self {
        Self::new(
            ExprKind::Import(ImportInfo {
                selector: selector.into(),
                path: path.into(),
            }),
            ty,
        )
    }

    pub fn get_field(expr: Expr, field: impl Into<String>, ty: Type) -> Self {
        Self::new(
            ExprKind::Get {
                expr: Box::new(expr),
                key: GetKey::Field(field.into()),
            },
            ty,
        )
    }

    pub fn get_index(expr: Expr, index: Expr, ty: Type) -> Self {
        Self::new(
            ExprKind::Get {
                expr: Box::new(expr),
                key: GetKey::Index(Box::new(index)),
            },
            ty,
        )
    }

    pub fn call(callee: Expr, args: Vec<Expr>, ty: Type) -> Self {
        Self::new(
            ExprKind::Call {
                callee: Box::new(callee),
                args,
                kind: CallKind::Direct,
            },
            ty,
        )
    }

    pub fn construct(callee: Expr, args: Vec<Expr>, ty: Type) -> Self {
        Self::new(
            ExprKind::Call {
                callee: Box::new(callee),
                args,
                kind: CallKind::Construct,
            },
            ty,
        )
    }

    pub fn object(fields: Vec<(String, Expr)>, ty: Type) -> Self {
        Self::new(ExprKind::Object(fields), ty)
    }

    pub fn type_cast(expr: Expr, ty: Type) -> Self {
        Self::new(ExprKind::TypeCast(Box::new(expr)), ty)
    }

    pub fn emit(template: impl Into<String>, args: Vec<Expr>, ty: Type) -> Self {
        Self::new(
            ExprKind::Emit(EmitInfo {
                template: template.into(),
                args,
            }),
            ty,
        )
    }

    pub fn unary(op: UnaryOp, operand: Expr, ty: Type) -> Self {
        Self::new(
            ExprKind::Operation(Operation::Unary {
                op,
                operand: Box::new(operand),
            }),
            ty,
        )
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr, ty: Type) -> Self {
        Self::new(
            ExprKind::Operation(Operation::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            }),
            ty,
        )
    }

    pub fn logical(op: LogicalOp, left: Expr, right: Expr) -> Self {
        Self::new(
            ExprKind::Operation(Operation::Logical {
                op,
                left: Box::new(left),
                right: Box::new(right),
            }),
            Type::Boolean,
        )
    }

    /// An anonymous function; its type is derived from the parameters and body.
    pub fn lambda(params: Vec<Ident>, body: Expr) -> Self {
        let ty = Type::lambda(
            params.iter().map(|p| p.ty.clone()).collect(),
            body.ty().clone(),
        );
        Self::new(
            ExprKind::Lambda {
                params,
                body: Box::new(body),
            },
            ty,
        )
    }

    pub fn let_in(ident: Ident, value: Expr, body: Expr) -> Self {
        let ty = body.ty().clone();
        Self::new(
            ExprKind::Let {
                ident,
                value: Box::new(value),
                body: Box::new(body),
            },
            ty,
        )
    }

    pub fn if_then_else(guard: Expr, then: Expr, otherwise: Expr) -> Self {
        let ty = then.ty().clone();
        Self::new(
            ExprKind::IfThenElse {
                guard: Box::new(guard),
                then: Box::new(then),
                otherwise: Box::new(otherwise),
            },
            ty,
        )
    }

    pub fn sequential(exprs: Vec<Expr>) -> Self {
        let ty = exprs.last().map(|e| e.ty().clone()).unwrap_or(Type::Unit);
        Self::new(ExprKind::Sequential(exprs), ty)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Direct children of this node, in evaluation order.
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::Value(_) | ExprKind::Ident(_) | ExprKind::Import(_) => Vec::new(),
            ExprKind::Get { expr, key } => match key {
                GetKey::Field(_) => vec![expr.as_ref()],
                GetKey::Index(index) => vec![expr.as_ref(), index.as_ref()],
            },
            ExprKind::Call { callee, args, .. } => {
                std::iter::once(callee.as_ref()).chain(args.iter()).collect()
            }
            ExprKind::Object(fields) => fields.iter().map(|(_, e)| e).collect(),
            ExprKind::TypeCast(inner) => vec![inner.as_ref()],
            ExprKind::Emit(info) => info.args.iter().collect(),
            ExprKind::Operation(op) => match op {
                Operation::Unary { operand, .. } => vec![operand.as_ref()],
                Operation::Binary { left, right, .. } | Operation::Logical { left, right, .. } => {
                    vec![left.as_ref(), right.as_ref()]
                }
            },
            ExprKind::Lambda { body, .. } => vec![body.as_ref()],
            ExprKind::Let { value, body, .. } => vec![value.as_ref(), body.as_ref()],
            ExprKind::IfThenElse {
                guard,
                then,
                otherwise,
            } => vec![guard.as_ref(), then.as_ref(), otherwise.as_ref()],
            ExprKind::Sequential(exprs) => exprs.iter().collect(),
        }
    }

    /// Visit this node and all of its descendants, parents first.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Expr)) {
        f(self);
        for child in self.children() {
            child.visit(f);
        }
    }

    /// Returns true for an `Object` with no fields.
    pub fn is_empty_object(&self) -> bool {
        matches!(&self.kind, ExprKind::Object(fields) if fields.is_empty())
    }
}
