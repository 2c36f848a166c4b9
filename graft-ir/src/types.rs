//! Resolved semantic types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric representation of a [`Type::Number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberKind {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    Decimal,
}

impl NumberKind {
    /// Get the lowercase string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberKind::Int8 => "int8",
            NumberKind::UInt8 => "uint8",
            NumberKind::Int16 => "int16",
            NumberKind::UInt16 => "uint16",
            NumberKind::Int32 => "int32",
            NumberKind::UInt32 => "uint32",
            NumberKind::Int64 => "int64",
            NumberKind::UInt64 => "uint64",
            NumberKind::Float32 => "float32",
            NumberKind::Float64 => "float64",
            NumberKind::Decimal => "decimal",
        }
    }

    /// Returns true for the integral kinds.
    pub fn is_integer(&self) -> bool {
        !matches!(
            self,
            NumberKind::Float32 | NumberKind::Float64 | NumberKind::Decimal
        )
    }
}

/// The resolved type of an IR node.
///
/// Types are semantic: they say what a value *is*, not how a target spells it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Type {
    /// Unknown or dynamically typed.
    #[default]
    Any,
    Unit,
    Boolean,
    Char,
    String,
    Number {
        kind: NumberKind,
    },
    Array {
        element: Box<Type>,
    },
    Option {
        inner: Box<Type>,
    },
    Tuple {
        elements: Vec<Type>,
    },
    /// Function value with the given argument and return types.
    Lambda {
        args: Vec<Type>,
        ret: Box<Type>,
    },
    /// An unresolved generic parameter (e.g. `'T`).
    GenericParam {
        name: String,
    },
    /// A nominal type declared in the source ecosystem (e.g. `System.Random`).
    Declared {
        full_name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        generic_args: Vec<Type>,
    },
}

impl Type {
    /// Create a number type.
    pub fn number(kind: NumberKind) -> Self {
        Self::Number { kind }
    }

    /// Shorthand for a 32-bit integer type.
    pub fn int32() -> Self {
        Self::number(NumberKind::Int32)
    }

    /// Shorthand for a 64-bit float type.
    pub fn float64() -> Self {
        Self::number(NumberKind::Float64)
    }

    /// Create a declared (nominal) type without generic arguments.
    pub fn declared(full_name: impl Into<String>) -> Self {
        Self::Declared {
            full_name: full_name.into(),
            generic_args: Vec::new(),
        }
    }

    /// Create an array type.
    pub fn array(element: Type) -> Self {
        Self::Array {
            element: Box::new(element),
        }
    }

    /// Create a function type.
    pub fn lambda(args: Vec<Type>, ret: Type) -> Self {
        Self::Lambda {
            args,
            ret: Box::new(ret),
        }
    }

    /// Number of parameters if this is a function type.
    pub fn lambda_arity(&self) -> Option<usize> {
        match self {
            Type::Lambda { args, .. } => Some(args.len()),
            _ => None,
        }
    }

    /// Full name of a declared type.
    pub fn full_name(&self) -> Option<&str> {
        match self {
            Type::Declared { full_name, .. } => Some(full_name),
            _ => None,
        }
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Type::Unit)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Any => write!(f, "any"),
            Type::Unit => write!(f, "unit"),
            Type::Boolean => write!(f, "bool"),
            Type::Char => write!(f, "char"),
            Type::String => write!(f, "string"),
            Type::Number { kind } => write!(f, "{}", kind.as_str()),
            Type::Array { element } => write!(f, "{}[]", element),
            Type::Option { inner } => write!(f, "{} option", inner),
            Type::Tuple { elements } => {
                let parts: Vec<String> = elements.iter().map(|t| t.to_string()).collect();
                write!(f, "({})", parts.join(" * "))
            }
            Type::Lambda { args, ret } => {
                let parts: Vec<String> = args.iter().map(|t| t.to_string()).collect();
                write!(f, "({}) -> {}", parts.join(", "), ret)
            }
            Type::GenericParam { name } => write!(f, "'{}", name),
            Type::Declared {
                full_name,
                generic_args,
            } => {
                write!(f, "{}", full_name)?;
                if !generic_args.is_empty() {
                    let parts: Vec<String> = generic_args.iter().map(|t| t.to_string()).collect();
                    write!(f, "<{}>", parts.join(", "))?;
                }
                Ok(())
            }
        }
    }
}
