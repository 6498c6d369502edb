//! Type tags and the registry mapping each tag to its string coercion.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{CoerceError, Error, Result};
use crate::value::Value;

/// Identifies the kind of value an option carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Type {
    Any,
    Bool,
    Int,
    Int64,
    Uint,
    Uint64,
    Float32,
    Float64,
    String,
}

impl Type {
    pub fn name(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int64 => "int64",
            Self::Uint => "uint",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::String => "string",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Type {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "bool" | "boolean" => Ok(Self::Bool),
            "int" => Ok(Self::Int),
            "int64" => Ok(Self::Int64),
            "uint" => Ok(Self::Uint),
            "uint64" => Ok(Self::Uint64),
            "float32" => Ok(Self::Float32),
            "float64" | "float" => Ok(Self::Float64),
            "string" | "str" => Ok(Self::String),
            other => Err(format!("unknown type name: {other:?}")),
        }
    }
}

/// A pure string to value conversion.
pub type CoerceFn = fn(&str) -> std::result::Result<Value, CoerceError>;

/// Maps type tags to their coercion functions.
///
/// The default registry covers `bool`, `int`, `uint`, `float32`, `float64`
/// and `string`. The 64-bit integer tags and `any` are left unregistered.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    coercions: HashMap<Type, CoerceFn>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        let mut reg = Self::empty();
        reg.register(Type::Bool, coerce_bool);
        reg.register(Type::Int, coerce_int);
        reg.register(Type::Uint, coerce_uint);
        reg.register(Type::Float32, coerce_float32);
        reg.register(Type::Float64, coerce_float64);
        reg.register(Type::String, coerce_string);
        reg
    }
}

impl TypeRegistry {
    /// A registry with no coercions at all.
    pub fn empty() -> Self {
        Self {
            coercions: HashMap::new(),
        }
    }

    /// Install `coerce` for `ty`, returning the function it replaced.
    pub fn register(&mut self, ty: Type, coerce: CoerceFn) -> Option<CoerceFn> {
        self.coercions.insert(ty, coerce)
    }

    pub fn is_registered(&self, ty: Type) -> bool {
        self.coercions.contains_key(&ty)
    }

    pub fn resolve(&self, ty: Type) -> Result<CoerceFn> {
        self.coercions
            .get(&ty)
            .copied()
            .ok_or(Error::UnknownType(ty))
    }
}

// Same accepted spellings as the classic strconv-style boolean parser.
fn coerce_bool(s: &str) -> std::result::Result<Value, CoerceError> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(Value::Bool(true)),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(Value::Bool(false)),
        _ => Err(CoerceError::InvalidBool(s.to_string())),
    }
}

fn coerce_int(s: &str) -> std::result::Result<Value, CoerceError> {
    Ok(Value::Int(s.parse::<i32>()?))
}

fn coerce_uint(s: &str) -> std::result::Result<Value, CoerceError> {
    Ok(Value::Uint(s.parse::<u32>()?))
}

fn coerce_float32(s: &str) -> std::result::Result<Value, CoerceError> {
    let v = s.parse::<f32>()?;
    if v.is_infinite() && !is_infinity_literal(s) {
        return Err(CoerceError::OutOfRange);
    }
    Ok(Value::Float32(v))
}

fn coerce_float64(s: &str) -> std::result::Result<Value, CoerceError> {
    let v = s.parse::<f64>()?;
    if v.is_infinite() && !is_infinity_literal(s) {
        return Err(CoerceError::OutOfRange);
    }
    Ok(Value::Float64(v))
}

fn coerce_string(s: &str) -> std::result::Result<Value, CoerceError> {
    Ok(Value::String(s.to_string()))
}

fn is_infinity_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}
