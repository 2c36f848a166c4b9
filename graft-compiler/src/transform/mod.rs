//! The transform engine: source tree to IR.
//!
//! Lowering is depth-first. Receivers and arguments are lowered before the
//! call site that uses them, so handlers always see finished IR.

mod resolution;

use eyre::{Report, Result};
use graft_config::CompilerOptions;
use graft_ir::{Declaration, Expr, File, Ident, Type};
use graft_source::{SourceDeclaration, SourceExpr, SourceFile};
use tracing::{debug, trace};

pub use resolution::{Handler, Resolution, ResolvedCall, pass_through};

use crate::{ApplyInfo, BuiltinReplacements, CompileError, Diagnostic, PluginRegistry};

const PHASE: &str = "transform";

/// Lowers one source file, resolving every call site.
///
/// Resolution order per call site: registered `ReplaceCall` extensions in
/// registration order, then the built-in table, then pass-through. The
/// first `Some` wins and nothing after it is consulted.
pub struct Transformer<'a> {
    registry: &'a PluginRegistry,
    builtins: &'a BuiltinReplacements,
    options: &'a CompilerOptions,
    resolutions: Vec<ResolvedCall>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Transformer<'a> {
    pub fn new(
        registry: &'a PluginRegistry,
        builtins: &'a BuiltinReplacements,
        options: &'a CompilerOptions,
    ) -> Self {
        Self {
            registry,
            builtins,
            options,
            resolutions: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Consume the transformer, returning the resolution log and diagnostics.
    pub fn finish(self) -> (Vec<ResolvedCall>, Vec<Diagnostic>) {
        (self.resolutions, self.diagnostics)
    }

    /// Lower a whole file.
    ///
    /// # Errors
    ///
    /// Stops at the first failing call site.
    pub fn transform_file(&mut self, file: &SourceFile) -> Result<File> {
        let declarations = file
            .declarations
            .iter()
            .map(|decl| self.transform_declaration(decl))
            .collect::<Result<Vec<_>>>()?;

        Ok(File {
            source_path: file.path.clone(),
            declarations,
        })
    }

    fn transform_declaration(&mut self, decl: &SourceDeclaration) -> Result<Declaration> {
        trace!(name = %decl.name, "lowering declaration");
        Ok(Declaration {
            name: decl.name.clone(),
            body: self.transform_expr(&decl.body)?,
            is_public: decl.is_public,
            range: decl.range.clone(),
        })
    }

    /// Lower one expression and everything below it.
    pub fn transform_expr(&mut self, expr: &SourceExpr) -> Result<Expr> {
        let range = expr.range().cloned();
        let lowered = match expr {
            SourceExpr::Const { value, .. } => Expr::typed_value(value.clone(), expr.ty()),
            SourceExpr::Ident { name, ty, .. } => Expr::ident(name, ty.clone()),
            SourceExpr::Call {
                member,
                receiver,
                args,
                generic_args,
                ..
            } => {
                let receiver = receiver
                    .as_deref()
                    .map(|r| self.transform_expr(r))
                    .transpose()?;
                let lowered_args = self.transform_all(args)?;
                let info = ApplyInfo::new(member, receiver, lowered_args)
                    .with_range(range.clone())
                    .with_call_generic_args(generic_args.clone())
                    .with_lambda_arities(args.iter().map(SourceExpr::lambda_arity).collect());
                return self.lower_call(&info);
            }
            SourceExpr::Apply { callee, args, ty, .. } => {
                let callee = self.transform_expr(callee)?;
                Expr::call(callee, self.transform_all(args)?, ty.clone())
            }
            SourceExpr::Get {
                expr: inner,
                field,
                ty,
                ..
            } => Expr::get_field(self.transform_expr(inner)?, field, ty.clone()),
            SourceExpr::Lambda { params, body, .. } => {
                let params = params
                    .iter()
                    .map(|p| Ident::new(&p.name, p.ty.clone()))
                    .collect();
                Expr::lambda(params, self.transform_expr(body)?)
            }
            SourceExpr::Let {
                name,
                ty,
                value,
                body,
                ..
            } => {
                let value = self.transform_expr(value)?;
                let ty = match ty {
                    Type::Any => value.ty().clone(),
                    ty => ty.clone(),
                };
                Expr::let_in(Ident::new(name, ty), value, self.transform_expr(body)?)
            }
            SourceExpr::If {
                guard,
                then,
                otherwise,
                ..
            } => Expr::if_then_else(
                self.transform_expr(guard)?,
                self.transform_expr(then)?,
                self.transform_expr(otherwise)?,
            ),
            SourceExpr::Sequential { exprs, .. } => Expr::sequential(self.transform_all(exprs)?),
            SourceExpr::Record { fields, ty, .. } => {
                let fields = fields
                    .iter()
                    .map(|f| -> Result<(String, Expr)> {
                        Ok((f.name.clone(), self.transform_expr(&f.value)?))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Expr::object(fields, ty.clone())
            }
            SourceExpr::Binary {
                op,
                left,
                right,
                ty,
                ..
            } => Expr::binary(
                *op,
                self.transform_expr(left)?,
                self.transform_expr(right)?,
                ty.clone(),
            ),
            SourceExpr::Logical {
                op, left, right, ..
            } => Expr::logical(*op, self.transform_expr(left)?, self.transform_expr(right)?),
            SourceExpr::Unary {
                op, operand, ty, ..
            } => Expr::unary(*op, self.transform_expr(operand)?, ty.clone()),
            SourceExpr::Coerce { expr: inner, ty, .. } => {
                Expr::type_cast(self.transform_expr(inner)?, ty.clone())
            }
        };

        Ok(lowered.with_range(range))
    }

    fn transform_all(&mut self, exprs: &[SourceExpr]) -> Result<Vec<Expr>> {
        exprs.iter().map(|e| self.transform_expr(e)).collect()
    }

    fn lower_call(&mut self, info: &ApplyInfo) -> Result<Expr> {
        let resolution = self.resolve_call(info)?;
        debug!(
            owner = %info.owner,
            member = %info.member,
            handler = %resolution.handler,
            "resolved call"
        );

        let unclaimed = resolution.handler == Handler::PassThrough;
        if unclaimed && self.options.warns_on_passthrough(&info.owner) {
            self.diagnostics.push(
                Diagnostic::warning(
                    PHASE,
                    format!(
                        "no replacement for {}; emitting a direct call",
                        info.full_name()
                    ),
                )
                .at(info.range.clone()),
            );
        }

        self.resolutions.push(ResolvedCall::new(info, resolution.handler));
        Ok(resolution.expr)
    }

    /// Pick the single handler that owns `info`.
    ///
    /// Never mutates the descriptor or the transformer.
    ///
    /// # Errors
    ///
    /// A failing handler aborts resolution; later handlers are not asked.
    pub fn resolve_call(&self, info: &ApplyInfo) -> Result<Resolution> {
        for replacer in self.registry.call_replacers() {
            let name = replacer.name();
            match replacer.try_replace_call(self.options, info) {
                Ok(Some(expr)) => {
                    return Ok(Resolution {
                        handler: Handler::Plugin(name.to_string()),
                        expr: at_call_site(expr, info),
                    });
                }
                Ok(None) => trace!(plugin = name, "declined"),
                Err(err) => return Err(handler_failure(name, info, err)),
            }
        }

        match self.builtins.try_replace(self.options, info) {
            Ok(Some(expr)) => Ok(Resolution {
                handler: Handler::Builtin,
                expr: at_call_site(expr, info),
            }),
            Ok(None) => Ok(Resolution {
                handler: Handler::PassThrough,
                expr: pass_through(info),
            }),
            Err(err) => Err(handler_failure("builtin", info, err)),
        }
    }
}

/// Give a replacement the call site's range unless the handler set one.
fn at_call_site(expr: Expr, info: &ApplyInfo) -> Expr {
    if expr.range().is_some() {
        expr
    } else {
        expr.with_range(info.range.clone())
    }
}

/// Attach the handler and call site to a handler error.
///
/// Errors that are already a [`CompileError`] keep their own shape.
fn handler_failure(handler: &str, info: &ApplyInfo, err: Report) -> Report {
    if err.downcast_ref::<CompileError>().is_some() {
        return err;
    }
    CompileError::Handler {
        handler: handler.to_string(),
        owner: info.owner.clone(),
        member: info.member.clone(),
        range: info.range.clone(),
        source: err.into(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use graft_ir::{BinaryOp, ExprKind, Literal, Position, SourceRange};
    use graft_source::{MemberKind, MemberRef, Param, RecordField};

    use super::*;

    fn lower(expr: &SourceExpr) -> Expr {
        let registry = PluginRegistry::empty();
        let builtins = BuiltinReplacements::standard();
        let options = CompilerOptions::default();
        Transformer::new(&registry, &builtins, &options)
            .transform_expr(expr)
            .unwrap()
    }

    fn int(v: i64) -> SourceExpr {
        SourceExpr::Const {
            value: Literal::Int(v),
            ty: Type::Any,
            range: None,
        }
    }

    fn ident(name: &str) -> SourceExpr {
        SourceExpr::Ident {
            name: name.into(),
            ty: Type::int32(),
            range: None,
        }
    }

    #[test]
    fn test_const_gets_natural_type() {
        let expr = lower(&int(5));
        assert_eq!(expr.kind(), &ExprKind::Value(Literal::Int(5)));
        assert_eq!(expr.ty(), &Type::int32());
    }

    #[test]
    fn test_range_is_carried() {
        let range = SourceRange::new(Position::new(1, 4), Position::new(1, 9));
        let expr = lower(&SourceExpr::Ident {
            name: "x".into(),
            ty: Type::Any,
            range: Some(range.clone()),
        });
        assert_eq!(expr.range(), Some(&range));
    }

    #[test]
    fn test_let_infers_binding_type() {
        let expr = lower(&SourceExpr::Let {
            name: "x".into(),
            ty: Type::Any,
            value: Box::new(int(1)),
            body: Box::new(ident("x")),
            range: None,
        });
        let ExprKind::Let { ident, .. } = expr.kind() else {
            panic!("expected let");
        };
        assert_eq!(ident.ty, Type::int32());
    }

    #[test]
    fn test_lambda_and_binary() {
        let expr = lower(&SourceExpr::Lambda {
            params: vec![Param {
                name: "x".into(),
                ty: Type::int32(),
            }],
            body: Box::new(SourceExpr::Binary {
                op: BinaryOp::Add,
                left: Box::new(ident("x")),
                right: Box::new(int(1)),
                ty: Type::int32(),
                range: None,
            }),
            range: None,
        });
        assert_eq!(expr.ty().lambda_arity(), Some(1));
        assert!(matches!(expr.kind(), ExprKind::Lambda { params, .. } if params[0].name == "x"));
    }

    #[test]
    fn test_record_keeps_field_order() {
        let expr = lower(&SourceExpr::Record {
            fields: vec![
                RecordField {
                    name: "b".into(),
                    value: int(2),
                },
                RecordField {
                    name: "a".into(),
                    value: int(1),
                },
            ],
            ty: Type::declared("App.Pair"),
            range: None,
        });
        let ExprKind::Object(fields) = expr.kind() else {
            panic!("expected object");
        };
        let names: Vec<_> = fields.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_passthrough_warning_respects_prefixes() {
        let call = SourceExpr::Call {
            member: MemberRef {
                entity: "System.IO.File".into(),
                name: "ReadAllText".into(),
                kind: MemberKind::Method,
                is_instance: false,
                attributes: Vec::new(),
                generic_args: Vec::new(),
                signature_arg_types: vec![Type::String],
                return_type: Type::String,
            },
            receiver: None,
            args: vec![SourceExpr::Const {
                value: Literal::String("a.txt".into()),
                ty: Type::Any,
                range: None,
            }],
            generic_args: Vec::new(),
            range: None,
        };

        let registry = PluginRegistry::empty();
        let builtins = BuiltinReplacements::standard();

        let options = CompilerOptions::default();
        let mut transformer = Transformer::new(&registry, &builtins, &options);
        transformer.transform_expr(&call).unwrap();
        let (resolutions, diagnostics) = transformer.finish();
        assert_eq!(resolutions[0].handler, Handler::PassThrough);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("System.IO.File.ReadAllText"));

        let options = CompilerOptions::default().with_warn_passthrough(["App."]);
        let mut transformer = Transformer::new(&registry, &builtins, &options);
        transformer.transform_expr(&call).unwrap();
        let (_, diagnostics) = transformer.finish();
        assert!(diagnostics.is_empty());
    }
}
