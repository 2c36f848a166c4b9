//! Rewrite phase - applies `TransformAst` extensions to the source tree.

use std::sync::Arc;

use eyre::Result;
use tracing::debug;

use crate::{
    CompileError, PluginRegistry,
    pipeline::{CompilationContext, Phase},
};

/// Runs every `TransformAst` extension once, in registration order.
pub struct RewritePhase {
    registry: Arc<PluginRegistry>,
}

impl RewritePhase {
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self { registry }
    }
}

impl Phase for RewritePhase {
    fn name(&self) -> &'static str {
        "rewrite"
    }

    fn description(&self) -> &'static str {
        "Apply AST transformers to the source tree"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        for transformer in self.registry.ast_transformers() {
            debug!(transformer = transformer.name(), "applying AST transformer");
            let source = std::mem::take(&mut ctx.source);
            let file = source.path.clone();
            ctx.source = transformer
                .transform_file(&ctx.options, source)
                .map_err(|e| CompileError::Rewrite {
                    handler: transformer.name().to_string(),
                    file,
                    source: e.into(),
                })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use graft_config::CompilerOptions;
    use graft_source::{SourceDeclaration, SourceExpr, SourceFile};

    use super::*;
    use crate::AstTransformer;

    struct DropPrivate;

    impl AstTransformer for DropPrivate {
        fn name(&self) -> &str {
            "drop-private"
        }

        fn transform_file(&self, _: &CompilerOptions, mut file: SourceFile) -> Result<SourceFile> {
            file.declarations.retain(|d| d.is_public);
            Ok(file)
        }
    }

    struct Failing;

    impl AstTransformer for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn transform_file(&self, _: &CompilerOptions, _: SourceFile) -> Result<SourceFile> {
            eyre::bail!("cannot rewrite")
        }
    }

    fn decl(name: &str, is_public: bool) -> SourceDeclaration {
        SourceDeclaration {
            name: name.into(),
            is_public,
            body: SourceExpr::Const {
                value: graft_ir::Literal::Int(1),
                ty: graft_ir::Type::Any,
                range: None,
            },
            range: None,
        }
    }

    fn context() -> CompilationContext {
        CompilationContext::new(
            SourceFile {
                path: "Lib.fs".into(),
                declarations: vec![decl("shown", true), decl("hidden", false)],
            },
            CompilerOptions::default(),
        )
    }

    #[test]
    fn test_transformers_rewrite_source() {
        let registry = PluginRegistry::builder()
            .transform_ast(DropPrivate)
            .build()
            .unwrap();
        let mut ctx = context();

        RewritePhase::new(Arc::new(registry)).run(&mut ctx).unwrap();

        assert_eq!(ctx.source.path, "Lib.fs");
        assert_eq!(ctx.source.declarations.len(), 1);
        assert_eq!(ctx.source.declarations[0].name, "shown");
    }

    #[test]
    fn test_transformer_failure_is_fatal() {
        let registry = PluginRegistry::builder()
            .transform_ast(Failing)
            .build()
            .unwrap();
        let mut ctx = context();

        let err = RewritePhase::new(Arc::new(registry))
            .run(&mut ctx)
            .unwrap_err();
        match err.downcast_ref::<CompileError>() {
            Some(CompileError::Rewrite { handler, file, .. }) => {
                assert_eq!(handler, "failing");
                assert_eq!(file, "Lib.fs");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
