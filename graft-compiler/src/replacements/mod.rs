//! Built-in call replacements.
//!
//! The table is keyed by owner full name, then member name, and is the last
//! link of the resolution chain: it is only asked after every registered
//! `ReplaceCall` extension has declined.
//!
//! The shipped entries are a scaffold, not a complete standard library:
//!
//! | Owner | Members |
//! |---|---|
//! | `System.Random` | `.ctor`, `Next`, `NextDouble` |
//! | `System.Math` | `Abs`, `Floor`, `Ceiling`, `Sqrt`, `Pow`, `Max`, `Min`, `PI` |
//! | `System.Console` | `WriteLine` |
//! | `System.String` | `IsNullOrEmpty`, `Length`, `ToUpper`, `ToLower` |

mod console;
mod math;
mod random;
mod string;

use eyre::Result;
use graft_config::CompilerOptions;
use graft_ir::{Expr, Type};
use indexmap::IndexMap;

use crate::ApplyInfo;

/// Signature shared by every built-in handler; same contract as
/// [`CallReplacer::try_replace_call`](crate::CallReplacer::try_replace_call).
pub type ReplaceFn = fn(&CompilerOptions, &ApplyInfo) -> Result<Option<Expr>>;

/// Default replacement table.
#[derive(Debug, Clone, Default)]
pub struct BuiltinReplacements {
    owners: IndexMap<String, IndexMap<String, ReplaceFn>>,
}

impl BuiltinReplacements {
    /// A table with no entries; every call falls through to pass-through.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The shipped table.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        random::register(&mut table);
        math::register(&mut table);
        console::register(&mut table);
        string::register(&mut table);
        table
    }

    /// Add or replace the handler for `owner`/`member`.
    pub fn register(
        &mut self,
        owner: impl Into<String>,
        member: impl Into<String>,
        handler: ReplaceFn,
    ) -> &mut Self {
        self.owners
            .entry(owner.into())
            .or_default()
            .insert(member.into(), handler);
        self
    }

    /// Look up the handler for a member.
    pub fn handler(&self, owner: &str, member: &str) -> Option<ReplaceFn> {
        self.owners.get(owner)?.get(member).copied()
    }

    pub fn contains(&self, owner: &str, member: &str) -> bool {
        self.handler(owner, member).is_some()
    }

    /// Every `(owner, member)` pair in registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.owners.iter().flat_map(|(owner, members)| {
            members
                .keys()
                .map(move |member| (owner.as_str(), member.as_str()))
        })
    }

    /// Replace `info` if the table knows its member.
    ///
    /// # Errors
    ///
    /// Propagates handler errors, e.g. unsupported argument counts.
    pub fn try_replace(&self, options: &CompilerOptions, info: &ApplyInfo) -> Result<Option<Expr>> {
        match self.handler(&info.owner, &info.member) {
            Some(handler) => handler(options, info),
            None => Ok(None),
        }
    }
}

/// A member of a target-side global object, e.g. `Math.floor`.
fn global_member(global: &str, member: &str, ty: Type) -> Expr {
    Expr::get_field(Expr::ident(global, Type::Any), member, ty)
}

/// A call to a target-side global function, e.g. `Math.floor(x)`.
fn global_call(global: &str, member: &str, args: Vec<Expr>, ty: Type) -> Expr {
    Expr::call(global_member(global, member, Type::Any), args, ty)
}
