//! `strip-debug-asserts`: drops `System.Diagnostics.Debug.Assert` calls from
//! release builds before any call is resolved.

use eyre::Result;
use graft_compiler::AstTransformer;
use graft_config::CompilerOptions;
use graft_ir::{Literal, SourceRange, Type};
use graft_source::{SourceExpr, SourceFile};
use tracing::debug;

pub const NAME: &str = "strip-debug-asserts";

const DEBUG_ENTITY: &str = "System.Diagnostics.Debug";

pub struct StripDebugAsserts;

impl AstTransformer for StripDebugAsserts {
    fn name(&self) -> &str {
        NAME
    }

    fn transform_file(
        &self,
        options: &CompilerOptions,
        mut file: SourceFile,
    ) -> Result<SourceFile> {
        if options.debug {
            return Ok(file);
        }

        let mut stripped = 0usize;
        for decl in &mut file.declarations {
            let body = std::mem::replace(&mut decl.body, unit(None));
            decl.body = body.rewrite(&mut |expr| strip(expr, &mut stripped));
        }
        debug!(path = %file.path, stripped, "removed debug assertions");

        Ok(file)
    }
}

fn is_assert(expr: &SourceExpr) -> bool {
    matches!(
        expr,
        SourceExpr::Call { member, .. } if member.entity == DEBUG_ENTITY && member.name == "Assert"
    )
}

fn is_unit(expr: &SourceExpr) -> bool {
    matches!(
        expr,
        SourceExpr::Const {
            value: Literal::Unit,
            ..
        }
    )
}

fn unit(range: Option<SourceRange>) -> SourceExpr {
    SourceExpr::Const {
        value: Literal::Unit,
        ty: Type::Unit,
        range,
    }
}

/// Replace an assertion by unit, and drop unit statements a strip left
/// behind in sequences (the value of a sequence is kept).
fn strip(expr: SourceExpr, stripped: &mut usize) -> SourceExpr {
    if is_assert(&expr) {
        *stripped += 1;
        return unit(expr.range().cloned());
    }

    match expr {
        SourceExpr::Sequential { exprs, range } => {
            let last = exprs.len().saturating_sub(1);
            let mut exprs: Vec<SourceExpr> = exprs
                .into_iter()
                .enumerate()
                .filter(|(i, e)| *i == last || !is_unit(e))
                .map(|(_, e)| e)
                .collect();
            match exprs.len() {
                1 => exprs.remove(0),
                _ => SourceExpr::Sequential { exprs, range },
            }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use graft_ir::BinaryOp;
    use graft_source::{MemberKind, MemberRef, SourceDeclaration};

    use super::*;

    fn call(entity: &str, name: &str, args: Vec<SourceExpr>) -> SourceExpr {
        SourceExpr::Call {
            member: MemberRef {
                entity: entity.into(),
                name: name.into(),
                kind: MemberKind::Method,
                is_instance: false,
                attributes: Vec::new(),
                generic_args: Vec::new(),
                signature_arg_types: Vec::new(),
                return_type: Type::Unit,
            },
            receiver: None,
            args,
            generic_args: Vec::new(),
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

    fn assert_positive(name: &str) -> SourceExpr {
        let guard = SourceExpr::Binary {
            op: BinaryOp::Greater,
            left: Box::new(ident(name)),
            right: Box::new(SourceExpr::Const {
                value: Literal::Int(0),
                ty: Type::int32(),
                range: None,
            }),
            ty: Type::Boolean,
            range: None,
        };
        call(DEBUG_ENTITY, "Assert", vec![guard])
    }

    fn file(body: SourceExpr) -> SourceFile {
        SourceFile {
            path: "Dice.fs".into(),
            declarations: vec![SourceDeclaration {
                name: "main".into(),
                is_public: true,
                body,
                range: None,
            }],
        }
    }

    fn sequence(exprs: Vec<SourceExpr>) -> SourceExpr {
        SourceExpr::Sequential { exprs, range: None }
    }

    #[test]
    fn test_asserts_are_removed_from_sequences() {
        let log = call("System.Console", "WriteLine", vec![ident("x")]);
        let body = sequence(vec![
            assert_positive("x"),
            log.clone(),
            assert_positive("y"),
            ident("x"),
        ]);

        let out = StripDebugAsserts
            .transform_file(&CompilerOptions::default(), file(body))
            .unwrap();
        assert_eq!(out.declarations[0].body, sequence(vec![log, ident("x")]));
    }

    #[test]
    fn test_single_survivor_is_unwrapped() {
        let log = call("System.Console", "WriteLine", vec![ident("x")]);
        let body = sequence(vec![assert_positive("x"), log.clone()]);

        let out = StripDebugAsserts
            .transform_file(&CompilerOptions::default(), file(body))
            .unwrap();
        assert_eq!(out.declarations[0].body, log);
    }

    #[test]
    fn test_trailing_assert_leaves_unit_value() {
        let out = StripDebugAsserts
            .transform_file(&CompilerOptions::default(), file(assert_positive("x")))
            .unwrap();
        assert!(is_unit(&out.declarations[0].body));
    }

    #[test]
    fn test_debug_builds_keep_asserts() {
        let body = sequence(vec![assert_positive("x"), ident("x")]);
        let options = CompilerOptions::default().with_debug(true);

        let out = StripDebugAsserts
            .transform_file(&options, file(body.clone()))
            .unwrap();
        assert_eq!(out.declarations[0].body, body);
    }

    #[test]
    fn test_other_debug_members_are_kept() {
        let body = call(DEBUG_ENTITY, "WriteLine", vec![ident("x")]);
        let out = StripDebugAsserts
            .transform_file(&CompilerOptions::default(), file(body.clone()))
            .unwrap();
        assert_eq!(out.declarations[0].body, body);
    }
}
