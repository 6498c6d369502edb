use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::types::Type;

pub type Result<T> = std::result::Result<T, Error>;

/// The short or long key namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Short,
    Long,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Short => f.write_str("short"),
            Self::Long => f.write_str("long"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// Both the short and the long key were empty after trimming.
    #[error("option declares neither a short nor a long key")]
    Config,

    #[error("duplicate {namespace} key: {key}")]
    DuplicateKey { namespace: Namespace, key: String },

    #[error("unknown type: {0}")]
    UnknownType(Type),

    #[error("cannot parse {value:?} as {ty} for '{key}': {source}")]
    Parse {
        key: String,
        value: String,
        ty: Type,
        #[source]
        source: CoerceError,
    },

    #[error("no value for key: {0}")]
    NotFound(String),
}

/// Failure of a single string to value coercion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    #[error("invalid boolean syntax: {0:?}")]
    InvalidBool(String),

    #[error(transparent)]
    Int(#[from] ParseIntError),

    #[error(transparent)]
    Float(#[from] ParseFloatError),

    #[error("value out of range")]
    OutOfRange,
}
