//! IR to JavaScript rendering.

use graft_config::{CompilerOptions, ModuleFormat};
use graft_ir::{
    BinaryOp, CallKind, Expr, ExprKind, File, GetKey, Ident, Literal, LogicalOp, Operation,
    UnaryOp,
};

use crate::{CodeBuilder, ImportCollector, Indent, template};

/// Binding strength of a rendered expression, loosely following the
/// JavaScript operator table. Higher binds tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Precedence(u8);

impl Precedence {
    pub const SEQUENCE: Self = Self(1);
    /// Conditional, arrow functions and raw-emit templates.
    pub const ASSIGN: Self = Self(2);
    pub const OR: Self = Self(3);
    pub const AND: Self = Self(4);
    pub const EQUALITY: Self = Self(8);
    pub const RELATIONAL: Self = Self(9);
    pub const ADDITIVE: Self = Self(11);
    pub const MULTIPLICATIVE: Self = Self(12);
    pub const UNARY: Self = Self(14);
    /// Member access, calls and `new`.
    pub const CALL: Self = Self(17);
    pub const PRIMARY: Self = Self(18);

    fn tighter(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Rendered expression text with the precedence of its outermost operator.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Rendered {
    pub text: String,
    pub precedence: Precedence,
}

impl Rendered {
    pub fn new(text: impl Into<String>, precedence: Precedence) -> Self {
        Self {
            text: text.into(),
            precedence,
        }
    }

    fn primary(text: impl Into<String>) -> Self {
        Self::new(text, Precedence::PRIMARY)
    }

    /// The text, parenthesized if it binds looser than `min`.
    pub fn wrap(&self, min: Precedence) -> String {
        if self.precedence < min {
            format!("({})", self.text)
        } else {
            self.text.clone()
        }
    }
}

/// JavaScript emitter for finished IR.
///
/// # Example
///
/// ```
/// use graft_config::ModuleFormat;
/// use graft_emit_js::JsEmitter;
/// use graft_ir::{BinaryOp, Expr, Type};
///
/// let emitter = JsEmitter::new(ModuleFormat::Esm);
/// let expr = Expr::binary(
///     BinaryOp::Multiply,
///     Expr::binary(BinaryOp::Add, Expr::int(1), Expr::int(2), Type::int32()),
///     Expr::int(3),
///     Type::int32(),
/// );
///
/// assert_eq!(emitter.emit_expr(&expr), "(1 + 2) * 3");
/// ```
#[derive(Debug, Clone)]
pub struct JsEmitter {
    module_format: ModuleFormat,
    indent: Indent,
}

impl JsEmitter {
    pub fn new(module_format: ModuleFormat) -> Self {
        Self {
            module_format,
            indent: Indent::JAVASCRIPT,
        }
    }

    pub fn from_options(options: &CompilerOptions) -> Self {
        Self::new(options.module_format)
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn module_format(&self) -> ModuleFormat {
        self.module_format
    }

    /// Render a whole module: hoisted imports, then one binding per
    /// declaration, then (for CommonJS) the exports object.
    pub fn emit_file(&self, file: &File) -> String {
        let mut imports = ImportCollector::new();
        imports
            .reserve(file.declarations.iter().map(|d| d.name.as_str()))
            .extend(file.imports());
        let renderer = ExprRenderer {
            indent: self.indent,
            imports: &imports,
        };

        let mut builder = CodeBuilder::new(self.indent);
        for line in imports.render(self.module_format) {
            builder.line(&line);
        }
        if !imports.is_empty() && !file.declarations.is_empty() {
            builder.blank();
        }

        for decl in &file.declarations {
            let keyword = match self.module_format {
                ModuleFormat::Esm if decl.is_public => "export const",
                _ => "const",
            };
            let value = renderer.render(&decl.body, 0).wrap(Precedence::ASSIGN);
            builder.line(&format!("{} {} = {};", keyword, decl.name, value));
        }

        if self.module_format == ModuleFormat::CommonJs {
            let exports: Vec<&str> = file
                .declarations
                .iter()
                .filter(|d| d.is_public)
                .map(|d| d.name.as_str())
                .collect();
            if !exports.is_empty() {
                builder.blank();
                builder.line(&format!("module.exports = {{ {} }};", exports.join(", ")));
            }
        }

        builder.finish()
    }

    /// Render a single expression. Imports are referenced by selector.
    pub fn emit_expr(&self, expr: &Expr) -> String {
        let imports = ImportCollector::new();
        let renderer = ExprRenderer {
            indent: self.indent,
            imports: &imports,
        };
        renderer.render(expr, 0).text
    }
}

impl Default for JsEmitter {
    fn default() -> Self {
        Self::new(ModuleFormat::default())
    }
}

struct ExprRenderer<'a> {
    indent: Indent,
    imports: &'a ImportCollector,
}

impl ExprRenderer<'_> {
    /// `depth` is the indent level of the line the expression starts on.
    fn render(&self, expr: &Expr, depth: usize) -> Rendered {
        match expr.kind() {
            ExprKind::Value(literal) => literal_text(literal),
            ExprKind::Ident(ident) => Rendered::primary(&ident.name),
            ExprKind::Import(info) => Rendered::primary(self.imports.local_name(info)),
            ExprKind::Get { expr: target, key } => {
                let target = self.member_target(target, depth);
                let text = match key {
                    GetKey::Field(name) if is_identifier(name) => format!("{}.{}", target, name),
                    GetKey::Field(name) => format!("{}[{}]", target, quote(name)),
                    GetKey::Index(index) => {
                        format!("{}[{}]", target, self.render(index, depth).text)
                    }
                };
                Rendered::new(text, Precedence::CALL)
            }
            ExprKind::Call { callee, args, kind } => {
                let callee_text = match kind {
                    CallKind::Construct if matches!(callee.kind(), ExprKind::Call { .. }) => {
                        format!("({})", self.render(callee, depth).text)
                    }
                    _ => self.render(callee, depth).wrap(Precedence::CALL),
                };
                let args = self.list(args, depth);
                let text = match kind {
                    CallKind::Direct => format!("{}({})", callee_text, args),
                    CallKind::Construct => format!("new {}({})", callee_text, args),
                };
                Rendered::new(text, Precedence::CALL)
            }
            ExprKind::Object(fields) if fields.is_empty() => Rendered::primary("{}"),
            ExprKind::Object(fields) => {
                let fields: Vec<String> = fields
                    .iter()
                    .map(|(name, value)| {
                        let key = if is_identifier(name) {
                            name.clone()
                        } else {
                            quote(name)
                        };
                        let value = self.render(value, depth).wrap(Precedence::ASSIGN);
                        format!("{}: {}", key, value)
                    })
                    .collect();
                Rendered::primary(format!("{{ {} }}", fields.join(", ")))
            }
            ExprKind::TypeCast(inner) => self.render(inner, depth),
            ExprKind::Emit(info) => {
                let args: Vec<Rendered> =
                    info.args.iter().map(|a| self.render(a, depth)).collect();
                Rendered::new(
                    template::substitute(&info.template, &args),
                    Precedence::ASSIGN,
                )
            }
            ExprKind::Operation(op) => self.operation(op, depth),
            ExprKind::Lambda { params, body } => {
                let params: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
                let body = self.render(body, depth);
                let body = if body.text.starts_with('{') {
                    format!("({})", body.text)
                } else {
                    body.wrap(Precedence::ASSIGN)
                };
                Rendered::new(
                    format!("({}) => {}", params.join(", "), body),
                    Precedence::ASSIGN,
                )
            }
            ExprKind::Let { .. } => self.iife(expr, depth),
            ExprKind::IfThenElse {
                guard,
                then,
                otherwise,
            } => {
                let text = format!(
                    "{} ? {} : {}",
                    self.render(guard, depth).wrap(Precedence::OR),
                    self.render(then, depth).wrap(Precedence::ASSIGN),
                    self.render(otherwise, depth).wrap(Precedence::ASSIGN),
                );
                Rendered::new(text, Precedence::ASSIGN)
            }
            ExprKind::Sequential(exprs) => match exprs.as_slice() {
                [] => Rendered::primary("undefined"),
                [single] => self.render(single, depth),
                _ => Rendered::new(self.list(exprs, depth), Precedence::SEQUENCE),
            },
        }
    }

    fn operation(&self, op: &Operation, depth: usize) -> Rendered {
        match op {
            Operation::Unary { op, operand } => {
                let operand = self.render(operand, depth).wrap(Precedence::UNARY);
                let text = match op {
                    // `- -x` must not collapse into a decrement.
                    UnaryOp::Negate if operand.starts_with('-') => format!("-({})", operand),
                    UnaryOp::Negate => format!("-{}", operand),
                    UnaryOp::Not => format!("!{}", operand),
                };
                Rendered::new(text, Precedence::UNARY)
            }
            Operation::Binary { op, left, right } => {
                let (symbol, precedence) = binary_operator(*op);
                self.infix(symbol, precedence, left, right, depth)
            }
            Operation::Logical { op, left, right } => {
                let (symbol, precedence) = match op {
                    LogicalOp::And => ("&&", Precedence::AND),
                    LogicalOp::Or => ("||", Precedence::OR),
                };
                self.infix(symbol, precedence, left, right, depth)
            }
        }
    }

    /// Left-associative infix operator.
    fn infix(
        &self,
        symbol: &str,
        precedence: Precedence,
        left: &Expr,
        right: &Expr,
        depth: usize,
    ) -> Rendered {
        let left = self.render(left, depth).wrap(precedence);
        let right = self.render(right, depth).wrap(precedence.tighter());
        Rendered::new(format!("{} {} {}", left, symbol, right), precedence)
    }

    fn member_target(&self, target: &Expr, depth: usize) -> String {
        let rendered = self.render(target, depth);
        match target.kind() {
            // `1.toString` does not parse.
            ExprKind::Value(Literal::Int(_) | Literal::Float(_)) => format!("({})", rendered.text),
            _ => rendered.wrap(Precedence::CALL),
        }
    }

    fn list(&self, exprs: &[Expr], depth: usize) -> String {
        exprs
            .iter()
            .map(|e| self.render(e, depth).wrap(Precedence::ASSIGN))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// A chain of `Let`s as one arrow IIFE with a `const` per binding.
    fn iife(&self, expr: &Expr, depth: usize) -> Rendered {
        let inner = self.indent.repeat(depth + 1);
        let mut bindings: Vec<(&Ident, &Expr)> = Vec::new();
        let mut body = expr;
        while let ExprKind::Let {
            ident,
            value,
            body: next,
        } = body.kind()
        {
            bindings.push((ident, value));
            body = next;
        }

        let mut text = String::from("(() => {\n");
        for (ident, value) in bindings {
            let value = self.render(value, depth + 1).wrap(Precedence::ASSIGN);
            text.push_str(&format!("{}const {} = {};\n", inner, ident.name, value));
        }
        let result = self.render(body, depth + 1).text;
        text.push_str(&format!("{}return {};\n", inner, result));
        text.push_str(&format!("{}}})()", self.indent.repeat(depth)));
        Rendered::new(text, Precedence::CALL)
    }
}

fn binary_operator(op: BinaryOp) -> (&'static str, Precedence) {
    match op {
        BinaryOp::Add => ("+", Precedence::ADDITIVE),
        BinaryOp::Subtract => ("-", Precedence::ADDITIVE),
        BinaryOp::Multiply => ("*", Precedence::MULTIPLICATIVE),
        BinaryOp::Divide => ("/", Precedence::MULTIPLICATIVE),
        BinaryOp::Modulus => ("%", Precedence::MULTIPLICATIVE),
        BinaryOp::Equal => ("===", Precedence::EQUALITY),
        BinaryOp::NotEqual => ("!==", Precedence::EQUALITY),
        BinaryOp::Less => ("<", Precedence::RELATIONAL),
        BinaryOp::LessOrEqual => ("<=", Precedence::RELATIONAL),
        BinaryOp::Greater => (">", Precedence::RELATIONAL),
        BinaryOp::GreaterOrEqual => (">=", Precedence::RELATIONAL),
    }
}

fn literal_text(literal: &Literal) -> Rendered {
    match literal {
        Literal::Null => Rendered::primary("null"),
        Literal::Unit => Rendered::primary("undefined"),
        Literal::Bool(b) => Rendered::primary(b.to_string()),
        Literal::Int(v) if *v < 0 => Rendered::new(v.to_string(), Precedence::UNARY),
        Literal::Int(v) => Rendered::primary(v.to_string()),
        Literal::Float(v) if v.is_nan() => Rendered::primary("NaN"),
        Literal::Float(v) if v.is_infinite() && *v > 0.0 => Rendered::primary("Infinity"),
        Literal::Float(v) if v.is_infinite() => Rendered::new("-Infinity", Precedence::UNARY),
        Literal::Float(v) if v.is_sign_negative() => {
            Rendered::new(v.to_string(), Precedence::UNARY)
        }
        Literal::Float(v) => Rendered::primary(v.to_string()),
        Literal::String(s) => Rendered::primary(quote(s)),
        Literal::Char(c) => Rendered::primary(quote(&c.to_string())),
    }
}

/// A double-quoted JavaScript string literal.
fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use graft_ir::{Declaration, Type};

    use super::*;

    fn emit(expr: &Expr) -> String {
        JsEmitter::default().emit_expr(expr)
    }

    fn x() -> Expr {
        Expr::ident("x", Type::int32())
    }

    fn add(l: Expr, r: Expr) -> Expr {
        Expr::binary(BinaryOp::Add, l, r, Type::int32())
    }

    fn sub(l: Expr, r: Expr) -> Expr {
        Expr::binary(BinaryOp::Subtract, l, r, Type::int32())
    }

    fn decl(name: &str, body: Expr, is_public: bool) -> Declaration {
        Declaration {
            name: name.into(),
            body,
            is_public,
            range: None,
        }
    }

    #[test]
    fn test_literals() {
        assert_eq!(emit(&Expr::typed_value(Literal::Null, Type::Any)), "null");
        assert_eq!(emit(&Expr::unit()), "undefined");
        assert_eq!(emit(&Expr::bool(false)), "false");
        assert_eq!(emit(&Expr::float(0.5)), "0.5");
        assert_eq!(emit(&Expr::float(f64::NAN)), "NaN");
        assert_eq!(emit(&Expr::float(f64::NEG_INFINITY)), "-Infinity");
        assert_eq!(emit(&Expr::string("say \"hi\"\n")), r#""say \"hi\"\n""#);
        assert_eq!(emit(&Expr::value(Literal::Char('a'))), "\"a\"");
    }

    #[test]
    fn test_binary_associativity() {
        assert_eq!(emit(&sub(sub(x(), Expr::int(1)), Expr::int(2))), "x - 1 - 2");
        assert_eq!(emit(&sub(x(), sub(Expr::int(1), Expr::int(2)))), "x - (1 - 2)");
        assert_eq!(emit(&sub(x(), Expr::int(-2))), "x - -2");
    }

    #[test]
    fn test_unary() {
        let neg = |e| Expr::unary(UnaryOp::Negate, e, Type::int32());
        assert_eq!(emit(&neg(x())), "-x");
        assert_eq!(emit(&neg(neg(x()))), "-(-x)");
        assert_eq!(emit(&neg(add(x(), Expr::int(1)))), "-(x + 1)");

        let not = Expr::unary(UnaryOp::Not, Expr::bool(true), Type::Boolean);
        assert_eq!(emit(&not), "!true");
    }

    #[test]
    fn test_logical_mixing() {
        let a = Expr::ident("a", Type::Boolean);
        let b = Expr::ident("b", Type::Boolean);
        let c = Expr::ident("c", Type::Boolean);
        let and = Expr::logical(LogicalOp::And, Expr::logical(LogicalOp::Or, a, b), c);
        assert_eq!(emit(&and), "(a || b) && c");
    }

    #[test]
    fn test_member_access() {
        let scores = Expr::ident("scores", Type::Any);
        assert_eq!(
            emit(&Expr::get_field(scores.clone(), "Add", Type::Any)),
            "scores.Add"
        );
        assert_eq!(
            emit(&Expr::get_field(scores.clone(), "my-key", Type::Any)),
            "scores[\"my-key\"]"
        );
        assert_eq!(
            emit(&Expr::get_index(scores, add(x(), Expr::int(1)), Type::Any)),
            "scores[x + 1]"
        );
        assert_eq!(
            emit(&Expr::get_field(Expr::int(1), "toString", Type::Any)),
            "(1).toString"
        );
        assert_eq!(
            emit(&Expr::get_field(add(x(), Expr::int(1)), "toFixed", Type::Any)),
            "(x + 1).toFixed"
        );
    }

    #[test]
    fn test_construct() {
        let random = Expr::ident("Random", Type::Any);
        assert_eq!(
            emit(&Expr::construct(random, vec![Expr::int(42)], Type::Any)),
            "new Random(42)"
        );

        let factory = Expr::call(Expr::ident("factory", Type::Any), vec![], Type::Any);
        assert_eq!(
            emit(&Expr::construct(factory, vec![], Type::Any)),
            "new (factory())()"
        );
    }

    #[test]
    fn test_objects_and_lambdas() {
        assert_eq!(emit(&Expr::object(Vec::new(), Type::Any)), "{}");

        let point = Expr::object(
            vec![("x".into(), Expr::int(1)), ("y-z".into(), Expr::int(2))],
            Type::Any,
        );
        assert_eq!(emit(&point), "{ x: 1, \"y-z\": 2 }");

        let make = Expr::lambda(Vec::new(), point);
        assert_eq!(emit(&make), "() => ({ x: 1, \"y-z\": 2 })");

        let inc = Expr::lambda(vec![Ident::new("x", Type::int32())], add(x(), Expr::int(1)));
        assert_eq!(emit(&inc), "(x) => x + 1");

        let applied = Expr::call(inc, vec![Expr::int(2)], Type::int32());
        assert_eq!(emit(&applied), "((x) => x + 1)(2)");
    }

    #[test]
    fn test_conditional_and_sequence() {
        let cond = Expr::if_then_else(
            Expr::binary(BinaryOp::Greater, x(), Expr::int(0), Type::Boolean),
            x(),
            Expr::int(0),
        );
        assert_eq!(emit(&cond), "x > 0 ? x : 0");
        assert_eq!(emit(&add(cond, Expr::int(1))), "(x > 0 ? x : 0) + 1");

        let log = Expr::call(Expr::ident("log", Type::Any), vec![x()], Type::Unit);
        assert_eq!(emit(&Expr::sequential(vec![log.clone(), x()])), "log(x), x");
        assert_eq!(emit(&Expr::sequential(vec![x()])), "x");
        assert_eq!(emit(&Expr::sequential(Vec::new())), "undefined");

        let f = Expr::call(
            Expr::ident("f", Type::Any),
            vec![Expr::sequential(vec![log, x()])],
            Type::Any,
        );
        assert_eq!(emit(&f), "f((log(x), x))");
    }

    #[test]
    fn test_emit_is_parenthesized_as_operand() {
        let draw = Expr::emit(
            "Math.floor(Math.random() * ($1 - $0)) + $0",
            vec![Expr::int(0), x()],
            Type::int32(),
        );
        assert_eq!(emit(&draw), "Math.floor(Math.random() * (x - 0)) + 0");
        assert_eq!(
            emit(&Expr::binary(BinaryOp::Multiply, draw.clone(), Expr::int(2), Type::int32())),
            "(Math.floor(Math.random() * (x - 0)) + 0) * 2"
        );
        assert_eq!(
            emit(&Expr::call(Expr::ident("f", Type::Any), vec![draw], Type::Any)),
            "f(Math.floor(Math.random() * (x - 0)) + 0)"
        );
    }

    #[test]
    fn test_let_chain_is_one_iife() {
        let body = Expr::let_in(
            Ident::new("a", Type::int32()),
            Expr::int(1),
            Expr::let_in(
                Ident::new("b", Type::int32()),
                Expr::int(2),
                add(Expr::ident("a", Type::int32()), Expr::ident("b", Type::int32())),
            ),
        );
        assert_eq!(
            emit(&body),
            "(() => {\n  const a = 1;\n  const b = 2;\n  return a + b;\n})()"
        );
    }

    #[test]
    fn test_type_cast_is_transparent() {
        let cast = Expr::type_cast(x(), Type::float64());
        assert_eq!(emit(&add(cast, Expr::int(1))), "x + 1");
    }

    #[test]
    fn test_emit_file_esm() {
        let file = File {
            source_path: "App.fs".into(),
            declarations: vec![
                decl(
                    "roll",
                    Expr::call(
                        Expr::import("randomNext", "./runtime/random.js", Type::Any),
                        vec![Expr::int(1), Expr::int(7)],
                        Type::int32(),
                    ),
                    true,
                ),
                decl("hidden", Expr::int(3), false),
            ],
        };

        assert_eq!(
            JsEmitter::new(ModuleFormat::Esm).emit_file(&file),
            "import { randomNext } from \"./runtime/random.js\";\n\
             \n\
             export const roll = randomNext(1, 7);\n\
             const hidden = 3;\n"
        );
    }

    #[test]
    fn test_emit_file_commonjs() {
        let file = File {
            source_path: "App.fs".into(),
            declarations: vec![
                decl("a", Expr::import("seed", "./s.js", Type::Any), true),
                decl("b", Expr::int(2), false),
                decl("c", Expr::int(3), true),
            ],
        };

        assert_eq!(
            JsEmitter::new(ModuleFormat::CommonJs).emit_file(&file),
            "const { seed } = require(\"./s.js\");\n\
             \n\
             const a = seed;\n\
             const b = 2;\n\
             const c = 3;\n\
             \n\
             module.exports = { a, c };\n"
        );
    }

    #[test]
    fn test_conflicting_imports_are_aliased() {
        let file = File {
            source_path: "App.fs".into(),
            declarations: vec![decl(
                "pair",
                Expr::sequential(vec![
                    Expr::import("next", "./a.js", Type::Any),
                    Expr::import("next", "./b.js", Type::Any),
                ]),
                true,
            )],
        };

        let out = JsEmitter::default().emit_file(&file);
        assert!(out.contains("import { next as next_1 } from \"./b.js\";"));
        assert!(out.contains("export const pair = (next, next_1);"));
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("length"));
        assert!(is_identifier("_x$1"));
        assert!(!is_identifier("1x"));
        assert!(!is_identifier(".ctor"));
        assert!(!is_identifier(""));
    }
}
