use anyhow::{Context, Result, bail};
use parsy::{ArgDef, Type, TypeRegistry, Value};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_MANIFEST_NAME: &str = "parsy.json";

/// Option declarations for a program, as loaded from JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,

    /// Program name shown in rendered usage.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionDef {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub short: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub long: String,

    /// Type tag name (`bool`, `int`, `uint`, `float32`, `float64`, `string`, ...).
    #[serde(rename = "type")]
    pub ty: String,

    /// Default value. Omitted means the zero value of the type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help: String,
}

impl OptionDef {
    fn label(&self) -> String {
        match (self.short.trim(), self.long.trim()) {
            ("", "") => "<unnamed>".to_string(),
            (short, "") => format!("-{short}"),
            (_, long) => format!("--{long}"),
        }
    }

    pub fn to_arg_def(&self) -> Result<ArgDef> {
        let ty: Type = self
            .ty
            .parse()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("option {}", self.label()))?;
        let default = default_value(ty, self.default.as_ref())
            .with_context(|| format!("invalid default for option {}", self.label()))?;
        Ok(ArgDef::new(
            self.short.as_str(),
            self.long.as_str(),
            ty,
            default,
            self.help.as_str(),
        ))
    }
}

fn default_value(ty: Type, raw: Option<&serde_json::Value>) -> Result<Value> {
    use serde_json::Value as Json;

    let zero = || Value::zero(ty).with_context(|| format!("type {ty} needs an explicit default"));
    let value = match (ty, raw) {
        (_, None | Some(Json::Null)) => zero()?,
        (Type::Bool, Some(Json::Bool(b))) => Value::Bool(*b),
        (Type::Int, Some(Json::Number(n))) => {
            let n = n.as_i64().with_context(|| format!("{n} is not an integer"))?;
            Value::Int(i32::try_from(n).with_context(|| format!("{n} does not fit in int"))?)
        }
        (Type::Uint, Some(Json::Number(n))) => {
            let n = n.as_u64().with_context(|| format!("{n} is not an unsigned integer"))?;
            Value::Uint(u32::try_from(n).with_context(|| format!("{n} does not fit in uint"))?)
        }
        (Type::Float32, Some(Json::Number(n))) => {
            Value::Float32(n.as_f64().with_context(|| format!("{n} is not a float"))? as f32)
        }
        (Type::Float64, Some(Json::Number(n))) => {
            Value::Float64(n.as_f64().with_context(|| format!("{n} is not a float"))?)
        }
        (Type::String, Some(Json::String(s))) => Value::String(s.clone()),
        // Strings go through the regular coercion for the type.
        (_, Some(Json::String(s))) => {
            let coerce = TypeRegistry::default().resolve(ty)?;
            coerce(s).with_context(|| format!("cannot parse {s:?} as {ty}"))?
        }
        (_, Some(other)) => bail!("{other} is not a valid {ty} default"),
    };
    Ok(value)
}

pub fn load_manifest(path: &Path) -> Result<Manifest> {
    if !path.exists() {
        bail!("manifest not found: {}", path.display());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest: {}", path.display()))?;
    let manifest: Manifest = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse manifest JSON: {}", path.display()))?;
    Ok(manifest)
}

/// Convert a parsed value to JSON for reports.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    use serde_json::Value as Json;

    match value {
        Value::Bool(b) => Json::Bool(*b),
        Value::Int(i) => Json::from(*i),
        Value::Uint(u) => Json::from(*u),
        Value::Float32(f) => serde_json::Number::from_f64(f64::from(*f))
            .map(Json::Number)
            .unwrap_or(Json::Null),
        Value::Float64(f) => serde_json::Number::from_f64(*f)
            .map(Json::Number)
            .unwrap_or(Json::Null),
        Value::String(s) => Json::String(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn option(value: serde_json::Value) -> OptionDef {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn manifest_parses_camel_case() {
        let manifest: Manifest = serde_json::from_value(json!({
            "schemaVersion": 1,
            "name": "influx",
            "options": [
                { "short": "d", "long": "depth", "type": "int", "default": 2, "help": "depth" },
                { "long": "name", "type": "string" }
            ]
        }))
        .unwrap();
        assert_eq!(manifest.schema_version, Some(1));
        assert_eq!(manifest.options.len(), 2);

        let depth = manifest.options[0].to_arg_def().unwrap();
        assert_eq!(depth.default_value(), &Value::Int(2));
        let name = manifest.options[1].to_arg_def().unwrap();
        assert_eq!(name.default_value(), &Value::from(""));
    }

    #[test]
    fn defaults_follow_the_type() {
        let def = option(json!({ "long": "f", "type": "float32", "default": 10 }));
        assert_eq!(def.to_arg_def().unwrap().default_value(), &Value::Float32(10.0));

        let def = option(json!({ "long": "b", "type": "bool", "default": "T" }));
        assert_eq!(def.to_arg_def().unwrap().default_value(), &Value::Bool(true));

        let def = option(json!({ "long": "u", "type": "uint", "default": -1 }));
        assert!(def.to_arg_def().is_err());

        let def = option(json!({ "long": "i", "type": "int", "default": true }));
        assert!(def.to_arg_def().is_err());
    }

    #[test]
    fn unknown_type_name_is_rejected() {
        let def = option(json!({ "long": "x", "type": "complex" }));
        let err = def.to_arg_def().unwrap_err();
        assert!(format!("{err:#}").contains("--x"));
    }

    #[test]
    fn sixty_four_bit_tags_need_a_default() {
        let def = option(json!({ "long": "big", "type": "int64" }));
        assert!(def.to_arg_def().is_err());
    }

    #[test]
    fn values_render_as_json() {
        assert_eq!(value_to_json(&Value::Int(-1)), json!(-1));
        assert_eq!(value_to_json(&Value::Float32(0.5)), json!(0.5));
        assert_eq!(value_to_json(&Value::Float64(f64::NAN)), json!(null));
        assert_eq!(value_to_json(&Value::from("x")), json!("x"));
    }
}
