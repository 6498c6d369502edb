//! Declarative, typed long-option parsing over a raw token vector.
//!
//! Options are declared with a short and/or long key, a [`Type`] tag, a
//! default [`Value`] and help text. [`Parser::parse`] pulls every long option
//! out of the token vector (`--key value` or `--key=value`), coerces the
//! captured strings and caches the typed results. Whatever was not consumed is
//! available from [`Parser::args`] in its original order.
//!
//! ```
//! use parsy::{Config, Parser, Type, Value};
//!
//! let config = Config { env_fallback: false, ..Config::default() };
//! let parser = Parser::with_config(["a/b", "--depth", "5", "c"], config);
//! parser.add("depth", Type::Int, 2, "the traversal depth")?;
//! parser.parse()?;
//!
//! assert_eq!(parser.get("depth"), Some(Value::Int(5)));
//! assert_eq!(parser.args(), ["a/b", "c"]);
//! # Ok::<(), parsy::Error>(())
//! ```
//!
//! See [`scanner`] for the accepted syntaxes and the forms that are not
//! recognized.

mod descriptor;
mod error;
mod help;
mod parser;
mod registry;
pub mod scanner;
mod types;
mod value;

pub use descriptor::ArgDef;
pub use error::{CoerceError, Error, Namespace, Result};
pub use parser::{Config, Parser};
pub use scanner::{Extraction, MatchMode, Scanner};
pub use types::{CoerceFn, Type, TypeRegistry};
pub use value::Value;
