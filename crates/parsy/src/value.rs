use std::fmt;

use crate::types::Type;

/// A typed option value, either coerced from a token or supplied as a default.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Uint(u32),
    Float32(f32),
    Float64(f64),
    String(String),
}

impl Value {
    /// The zero value of a type tag, or `None` for tags without a value kind.
    pub fn zero(ty: Type) -> Option<Self> {
        match ty {
            Type::Bool => Some(Self::Bool(false)),
            Type::Int => Some(Self::Int(0)),
            Type::Uint => Some(Self::Uint(0)),
            Type::Float32 => Some(Self::Float32(0.0)),
            Type::Float64 => Some(Self::Float64(0.0)),
            Type::String => Some(Self::String(String::new())),
            Type::Any | Type::Int64 | Type::Uint64 => None,
        }
    }

    /// The type tag this value carries.
    pub fn ty(&self) -> Type {
        match self {
            Self::Bool(_) => Type::Bool,
            Self::Int(_) => Type::Int,
            Self::Uint(_) => Type::Uint,
            Self::Float32(_) => Type::Float32,
            Self::Float64(_) => Type::Float64,
            Self::String(_) => Type::String,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u32> {
        match self {
            Self::Uint(u) => Some(*u),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Float32(f) => Some(*f),
            _ => None,
        }
    }

    /// Widening float accessor; `Float32` values are converted.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float32(f) => Some(f64::from(*f)),
            Self::Float64(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Uint(u) => write!(f, "{u}"),
            Self::Float32(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Uint(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_matches_tag() {
        for ty in [Type::Bool, Type::Int, Type::Uint, Type::Float32, Type::Float64, Type::String] {
            let zero = Value::zero(ty).unwrap();
            assert_eq!(zero.ty(), ty);
        }
        assert_eq!(Value::zero(Type::Int64), None);
        assert_eq!(Value::zero(Type::Any), None);
    }

    #[test]
    fn accessors_reject_other_kinds() {
        let v = Value::from(7);
        assert_eq!(v.as_int(), Some(7));
        assert_eq!(v.as_uint(), None);
        assert_eq!(v.as_str(), None);
        assert_eq!(Value::from(1.5f32).as_f64(), Some(1.5));
    }

    #[test]
    fn display_is_plain() {
        assert_eq!(Value::from("outf.txt").to_string(), "outf.txt");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(-1).to_string(), "-1");
    }
}
