//! `seeded-random`: draws from a seedable runtime helper instead of
//! `Math.random()`, so test runs can replay the same rolls.

use eyre::Result;
use graft_compiler::{ApplyInfo, CallReplacer};
use graft_config::CompilerOptions;
use graft_ir::{Expr, Type};

pub const NAME: &str = "seeded-random";

/// Runtime module exporting `randomNext(min, max)`.
pub const RUNTIME_MODULE: &str = "./runtime/random.js";

const HELPER: &str = "randomNext";

pub struct SeededRandom;

impl CallReplacer for SeededRandom {
    fn name(&self) -> &str {
        NAME
    }

    fn try_replace_call(&self, _: &CompilerOptions, info: &ApplyInfo) -> Result<Option<Expr>> {
        if info.owner != "System.Random" || info.member != "Next" {
            return Ok(None);
        }

        let (min, max) = match info.args.as_slice() {
            [] => (Expr::int(0), Expr::int(i32::MAX as i64)),
            [max] => (Expr::int(0), max.clone()),
            [min, max] => (min.clone(), max.clone()),
            _ => return Err(info.unsupported_shape().into()),
        };

        let helper = Expr::import(
            HELPER,
            RUNTIME_MODULE,
            Type::lambda(vec![Type::int32(), Type::int32()], Type::int32()),
        );
        Ok(Some(Expr::call(
            helper,
            vec![min, max],
            info.return_type.clone(),
        )))
    }
}
