use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::descriptor::ArgDef;
use crate::error::{Error, Namespace, Result};
use crate::help;
use crate::registry::Registry;
use crate::scanner::{MatchMode, Scanner};
use crate::types::{Type, TypeRegistry};
use crate::value::Value;

/// Parser construction options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// How long keys are matched against `--` tokens.
    pub match_mode: MatchMode,
    /// Use the process arguments when the supplied tokens are all empty.
    pub env_fallback: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::Prefix,
            env_fallback: true,
        }
    }
}

#[derive(Debug, Default)]
struct State {
    registry: Registry,
    types: TypeRegistry,
    tokens: Vec<String>,
}

/// Owns the declared options, the working token vector and the parsed values.
///
/// All methods take `&self`; the parser can be shared across threads. A
/// [`Parser::parse`] call holds the registry exclusively for its whole
/// scan, so registrations never interleave with extraction.
#[derive(Debug)]
pub struct Parser {
    config: Config,
    state: RwLock<State>,
    cache: RwLock<HashMap<(Namespace, String), Value>>,
}

impl Parser {
    /// Create a parser over `args` with the default [`Config`].
    ///
    /// Empty tokens are discarded. If nothing remains, the process arguments
    /// (without the program name) are used instead.
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(args, Config::default())
    }

    pub fn with_config<I, S>(args: I, config: Config) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens = Scanner::new(args, config.match_mode).into_tokens();
        if tokens.is_empty() && config.env_fallback {
            let process_args = std::env::args_os()
                .skip(1)
                .map(|a| a.to_string_lossy().into_owned());
            tokens = Scanner::new(process_args, config.match_mode).into_tokens();
            tracing::debug!(count = tokens.len(), "using process arguments");
        }

        Self {
            config,
            state: RwLock::new(State {
                tokens,
                ..State::default()
            }),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> Config {
        self.config
    }

    /// Replace the coercion table used by subsequent [`Parser::parse`] calls.
    pub fn set_types(&self, types: TypeRegistry) {
        self.write_state().types = types;
    }

    /// Declare an option with both spellings.
    pub fn add_command(
        &self,
        short: &str,
        long: &str,
        ty: Type,
        default: impl Into<Value>,
        help: &str,
    ) -> Result<()> {
        self.register(ArgDef::new(short, long, ty, default, help))
    }

    /// Declare a long-only option.
    pub fn add(&self, long: &str, ty: Type, default: impl Into<Value>, help: &str) -> Result<()> {
        self.add_command("", long, ty, default, help)
    }

    pub fn register(&self, def: ArgDef) -> Result<()> {
        let mut state = self.write_state();
        let short = def.short().trim().to_string();
        let long = def.long().trim().to_string();
        state.registry.insert(def)?;
        tracing::debug!(short = %short, long = %long, "registered option");
        Ok(())
    }

    /// Scan the token vector for every long key, then resolve and cache the
    /// value of every key.
    ///
    /// A coercion failure stops the call; values cached for keys handled
    /// before the failing one stay in place.
    pub fn parse(&self) -> Result<()> {
        let mut state = self.write_state();
        let State {
            registry,
            types,
            tokens,
        } = &mut *state;

        tracing::debug!(tokens = tokens.len(), "parsing");
        let mut scanner = Scanner::new(std::mem::take(tokens), self.config.match_mode);
        for key in registry.long_keys() {
            let Some(extraction) = scanner.extract_long(&key) else {
                continue;
            };
            if let (Some(value), Some(def)) = (extraction.value(), registry.by_long_mut(&key)) {
                def.capture(value.to_string());
            }
        }
        *tokens = scanner.into_tokens();

        for (namespace, key, def) in registry.entries() {
            let value = def.resolve("", types)?;
            self.write_cache().insert((namespace, key.to_string()), value);
        }

        tracing::debug!(remainder = tokens.len(), "parse complete");
        Ok(())
    }

    /// The parsed value for `key`, trying the long namespace first.
    ///
    /// Returns `None` rather than a zero value when nothing is cached: a
    /// zero cannot be told apart from a parsed `0`/`false`/`""`, and tags
    /// such as `int64` have no zero at all. Use [`Value::zero`] with the
    /// descriptor's type when a fallback is wanted.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.get_in(Namespace::Long, key)
            .or_else(|| self.get_in(Namespace::Short, key))
    }

    /// The parsed value for `key` in one namespace only.
    pub fn get_in(&self, namespace: Namespace, key: &str) -> Option<Value> {
        self.read_cache()
            .get(&(namespace, key.to_string()))
            .cloned()
    }

    pub fn value(&self, key: &str) -> Result<Value> {
        self.get(key).ok_or_else(|| Error::NotFound(key.to_string()))
    }

    /// Tokens not consumed by any option, in their original order.
    pub fn args(&self) -> Vec<String> {
        self.read_state().tokens.clone()
    }

    /// A snapshot of the descriptor registered under `key` (long key first).
    pub fn arg(&self, key: &str) -> Option<ArgDef> {
        self.read_state().registry.get(key).cloned()
    }

    /// Registered keys: short keys then long keys, each sorted.
    pub fn keys(&self) -> Vec<String> {
        self.read_state()
            .registry
            .entries()
            .map(|(_, key, _)| key.to_string())
            .collect()
    }

    /// Render a usage line and option table.
    pub fn help(&self, program: &str) -> String {
        help::render(program, self.read_state().registry.defs())
    }

    fn read_state(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_cache(&self) -> RwLockReadGuard<'_, HashMap<(Namespace, String), Value>> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_cache(&self) -> RwLockWriteGuard<'_, HashMap<(Namespace, String), Value>> {
        self.cache.write().unwrap_or_else(PoisonError::into_inner)
    }
}
