//! Resolved member references.

use graft_ir::{Literal, Type};
use serde::Deserialize;

/// Member name used for constructors.
///
/// The leading dot keeps it distinct from every valid source identifier.
pub const CONSTRUCTOR_NAME: &str = ".ctor";

/// What kind of member a call site refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Method,
    Constructor,
    Property,
    Field,
}

impl MemberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Method => "method",
            MemberKind::Constructor => "constructor",
            MemberKind::Property => "property",
            MemberKind::Field => "field",
        }
    }

    /// Properties and fields are read without an argument list.
    pub fn is_accessor(&self) -> bool {
        matches!(self, MemberKind::Property | MemberKind::Field)
    }
}

/// An attribute (decorator) attached to a member declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Attribute {
    /// Full name of the attribute type (e.g. `System.ObsoleteAttribute`).
    pub full_name: String,
    #[serde(default)]
    pub args: Vec<Literal>,
}

/// A member resolved by the front end.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemberRef {
    /// Full name of the declaring entity (e.g. `System.Random`).
    pub entity: String,
    /// Compiled member name (e.g. `Next`).
    pub name: String,
    pub kind: MemberKind,
    /// Whether the member is called on a receiver.
    #[serde(default)]
    pub is_instance: bool,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    /// Generic parameters of the declaring member.
    #[serde(default)]
    pub generic_args: Vec<Type>,
    /// Declared parameter types, in order.
    #[serde(default)]
    pub signature_arg_types: Vec<Type>,
    #[serde(default)]
    pub return_type: Type,
}

impl MemberRef {
    /// Member name as seen by call-replacement handlers.
    ///
    /// Constructors always report [`CONSTRUCTOR_NAME`].
    pub fn member_name(&self) -> &str {
        if self.is_constructor() {
            CONSTRUCTOR_NAME
        } else {
            &self.name
        }
    }

    /// `Entity.Member`, e.g. `System.Random.Next`.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.entity, self.member_name())
    }

    /// Last segment of the declaring entity (`Random` for `System.Random`).
    pub fn entity_name(&self) -> &str {
        self.entity.rsplit('.').next().unwrap_or(&self.entity)
    }

    pub fn is_constructor(&self) -> bool {
        self.kind == MemberKind::Constructor
    }

    pub fn has_attribute(&self, full_name: &str) -> bool {
        self.attributes.iter().any(|a| a.full_name == full_name)
    }
}
