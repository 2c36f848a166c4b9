//! Snapshot tests for whole-module emission.
//!
//! Run `cargo insta review` to update snapshots after intentional changes.

use std::sync::Arc;

use graft_compiler::{ApplyInfo, BuiltinReplacements, Extension, Pipeline, PluginRegistry};
use graft_config::{CompilerOptions, ModuleFormat};
use graft_emit_js::JsEmitter;
use graft_ir::{Declaration, Expr, File, Type};
use graft_source::{MemberKind, MemberRef, SourceFile};

const DICE: &str = include_str!("fixtures/dice.json");

fn compile(registry: PluginRegistry, options: CompilerOptions) -> String {
    let source = SourceFile::from_json_str(DICE, "dice.json").expect("fixture should parse");
    let emitter = JsEmitter::from_options(&options);
    let mut ctx = Pipeline::new(Arc::new(registry))
        .run(source, options)
        .expect("pipeline should succeed");
    emitter.emit_file(&ctx.take_ir().expect("transform phase produces IR"))
}

/// Claims `System.Random.Next` with a runtime helper.
fn seeded_random() -> Extension {
    Extension::replace_call_fn("seeded-random", |_, info| {
        if info.owner != "System.Random" || info.member != "Next" {
            return Ok(None);
        }
        let helper = Expr::import("randomNext", "./runtime/random.js", Type::Any);
        Ok(Some(Expr::call(
            helper,
            info.args.clone(),
            info.return_type.clone(),
        )))
    })
}

#[test]
fn builtins_as_es_module() {
    let js = compile(PluginRegistry::empty(), CompilerOptions::default());
    insta::assert_snapshot!("builtins_esm", js);
}

#[test]
fn plugin_import_as_commonjs() {
    let registry = PluginRegistry::builder()
        .register(seeded_random())
        .build()
        .unwrap();
    let options = CompilerOptions::default().with_module_format(ModuleFormat::CommonJs);

    let js = compile(registry, options);
    insta::assert_snapshot!("plugin_commonjs", js);
}

#[test]
fn emission_is_deterministic() {
    let first = compile(PluginRegistry::empty(), CompilerOptions::default());
    let second = compile(PluginRegistry::empty(), CompilerOptions::default());
    assert_eq!(first, second);
}

fn declaration(name: &str, body: Expr) -> Declaration {
    Declaration {
        name: name.into(),
        body,
        is_public: true,
        range: None,
    }
}

#[test]
fn null_or_empty_reads_its_argument_once() {
    let member = MemberRef {
        entity: "System.String".into(),
        name: "IsNullOrEmpty".into(),
        kind: MemberKind::Method,
        is_instance: false,
        attributes: Vec::new(),
        generic_args: Vec::new(),
        signature_arg_types: Vec::new(),
        return_type: Type::Boolean,
    };
    let read_line = Expr::call(Expr::ident("readLine", Type::Any), vec![], Type::String);
    let info = ApplyInfo::new(&member, None, vec![read_line]);

    let handler = BuiltinReplacements::standard()
        .handler("System.String", "IsNullOrEmpty")
        .unwrap();
    let expr = handler(&CompilerOptions::default(), &info).unwrap().unwrap();
    let js = JsEmitter::default().emit_expr(&expr);

    assert_eq!(js.matches("readLine()").count(), 1, "{js}");
}

#[test]
fn imports_never_shadow_declarations() {
    let helper = Expr::import("randomNext", "./runtime/random.js", Type::Any);
    let roll = Expr::call(helper, vec![Expr::int(1), Expr::int(7)], Type::Any);
    let file = File {
        source_path: "Dice.fs".into(),
        declarations: vec![declaration("randomNext", Expr::int(1)), declaration("roll", roll)],
    };

    let js = JsEmitter::default().emit_file(&file);
    insta::assert_snapshot!("import_alias_avoids_declaration", js);
}
