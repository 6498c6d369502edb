use crate::error::{Error, Result};
use crate::types::{Type, TypeRegistry};
use crate::value::Value;

/// One declared option and its per-parse captured state.
#[derive(Debug, Clone)]
pub struct ArgDef {
    short: String,
    long: String,
    ty: Type,
    default: Value,
    help: String,
    captured: String,
}

impl ArgDef {
    /// Declare an option. `default` is returned untouched when nothing is
    /// captured, so it must already carry the intended type.
    pub fn new(
        short: impl Into<String>,
        long: impl Into<String>,
        ty: Type,
        default: impl Into<Value>,
        help: impl Into<String>,
    ) -> Self {
        Self {
            short: short.into(),
            long: long.into(),
            ty,
            default: default.into(),
            help: help.into(),
            captured: String::new(),
        }
    }

    pub fn short(&self) -> &str {
        &self.short
    }

    pub fn long(&self) -> &str {
        &self.long
    }

    pub fn ty(&self) -> Type {
        self.ty
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// The raw string taken from the token vector; empty until seen.
    pub fn captured(&self) -> &str {
        &self.captured
    }

    /// Long key if present, otherwise the short key.
    pub fn display_name(&self) -> &str {
        if self.long.is_empty() {
            &self.short
        } else {
            &self.long
        }
    }

    /// Trim both keys and reject a descriptor that has neither.
    pub fn validate(&mut self) -> Result<()> {
        self.short = self.short.trim().to_string();
        self.long = self.long.trim().to_string();
        if self.short.is_empty() && self.long.is_empty() {
            return Err(Error::Config);
        }
        Ok(())
    }

    pub(crate) fn capture(&mut self, raw: String) {
        self.captured = raw;
    }

    /// Resolve the value for this option.
    ///
    /// The first non-empty of `supplied` and the captured string is coerced
    /// through `types`. When both are empty the default is returned as is.
    pub fn resolve(&self, supplied: &str, types: &TypeRegistry) -> Result<Value> {
        let raw = if supplied.is_empty() {
            self.captured.as_str()
        } else {
            supplied
        };
        if raw.is_empty() {
            return Ok(self.default.clone());
        }

        let coerce = types.resolve(self.ty)?;
        coerce(raw).map_err(|source| Error::Parse {
            key: self.display_name().to_string(),
            value: raw.to_string(),
            ty: self.ty,
            source,
        })
    }
}
