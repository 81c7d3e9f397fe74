use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Index;

use log::trace;

use crate::change_log::{ChangeLog, ChangeOp};
use crate::error::ScopeError;

#[derive(Debug)]
pub struct ScopeMap<K, V> {
    bindings: HashMap<K, V>,
    log: ChangeLog<K, V>,
    default: V,
}

impl<K, V> ScopeMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(default: V) -> ScopeMap<K, V> {
        ScopeMap {
            bindings: HashMap::new(),
            log: ChangeLog::new(),
            default,
        }
    }

    pub fn get(&mut self, key: &K) -> &V {
        // First-ever materialization of a key is permanent, it never
        // enters the log and survives every scope pop.
        let default = &self.default;
        self.bindings
            .entry(key.clone())
            .or_insert_with(|| default.clone())
    }

    pub fn lookup(&self, key: &K) -> Option<&V> {
        self.bindings.get(key)
    }

    pub fn set(&mut self, key: K, value: V) {
        match self.bindings.insert(key.clone(), value) {
            Some(prior) => self.log.record(ChangeOp::Set { key, prior }),
            None => self.log.record(ChangeOp::Unset { key }),
        }
    }

    pub fn set_local(&mut self, key: K, value: V) {
        // Caller-intent hint: reverted when the declaring scope closes,
        // same as an ordinary set.
        self.set(key, value)
    }

    pub fn push_scope(&mut self) {
        self.log.open_scope();
        trace!("scope opened, depth {}", self.log.depth());
    }

    pub fn pop_scope(&mut self) -> Result<(), ScopeError> {
        let undone = self.log.close_scope()?;
        trace!(
            "scope closed, depth {}, undoing {} changes",
            self.log.depth(),
            undone.len()
        );
        for op in undone {
            match op {
                ChangeOp::Set { key, prior } => {
                    self.bindings.insert(key, prior);
                }
                ChangeOp::Unset { key } => {
                    self.bindings.remove(&key);
                }
            }
        }
        Ok(())
    }

    pub fn depth(&self) -> usize {
        self.log.depth()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<K, V> Default for ScopeMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + Default,
{
    fn default() -> Self {
        Self::new(V::default())
    }
}

impl<K, V> Index<&K> for ScopeMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    type Output = V;

    // Read-only probe: unbound keys read as the default without
    // being materialized.
    fn index(&self, key: &K) -> &V {
        self.bindings.get(key).unwrap_or(&self.default)
    }
}
