use std::collections::BTreeMap;

use crate::descriptor::ArgDef;
use crate::error::{Error, Namespace, Result};

/// Short and long key namespaces over a shared descriptor arena.
///
/// A descriptor registered with both keys occupies one slot in each map and
/// both slots point at the same captured state.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    defs: Vec<ArgDef>,
    short: BTreeMap<String, usize>,
    long: BTreeMap<String, usize>,
}

impl Registry {
    /// Validate `def` and claim its keys. Nothing is inserted unless both
    /// namespaces accept it.
    pub(crate) fn insert(&mut self, mut def: ArgDef) -> Result<()> {
        def.validate()?;

        if !def.short().is_empty() && self.short.contains_key(def.short()) {
            return Err(Error::DuplicateKey {
                namespace: Namespace::Short,
                key: def.short().to_string(),
            });
        }
        if !def.long().is_empty() && self.long.contains_key(def.long()) {
            return Err(Error::DuplicateKey {
                namespace: Namespace::Long,
                key: def.long().to_string(),
            });
        }

        let idx = self.defs.len();
        if !def.short().is_empty() {
            self.short.insert(def.short().to_string(), idx);
        }
        if !def.long().is_empty() {
            self.long.insert(def.long().to_string(), idx);
        }
        self.defs.push(def);
        Ok(())
    }

    /// Descriptors in registration order.
    pub(crate) fn defs(&self) -> &[ArgDef] {
        &self.defs
    }

    /// Long keys in lexicographic order.
    pub(crate) fn long_keys(&self) -> Vec<String> {
        self.long.keys().cloned().collect()
    }

    pub(crate) fn by_long_mut(&mut self, key: &str) -> Option<&mut ArgDef> {
        let idx = *self.long.get(key)?;
        self.defs.get_mut(idx)
    }

    /// Look up a key, trying the long namespace first.
    pub(crate) fn get(&self, key: &str) -> Option<&ArgDef> {
        let idx = self.long.get(key).or_else(|| self.short.get(key))?;
        self.defs.get(*idx)
    }

    /// Every `(namespace, key, descriptor)` triple: short keys first, then
    /// long keys, each in lexicographic order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (Namespace, &str, &ArgDef)> {
        let short = self.short.iter().map(|(k, &idx)| (Namespace::Short, k, idx));
        let long = self.long.iter().map(|(k, &idx)| (Namespace::Long, k, idx));
        short
            .chain(long)
            .filter_map(|(ns, key, idx)| self.defs.get(idx).map(|def| (ns, key.as_str(), def)))
    }
}
