//! Pattern registry: one entry per pattern identity, in registration order.
//!
//! Entries live in a `Vec` so enumeration and scoring follow registration
//! order, with a side index from pattern identity to slot. Overwriting an
//! identity keeps its slot; a new identity (including one re-added after
//! removal) appends.

use crate::config::InvalidGlobPolicy;
use crate::matcher::CompiledPattern;
use crate::pattern::Pattern;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A registered pattern, its compiled form and its payload.
#[derive(Debug, Clone)]
pub struct Entry<T> {
    pattern: Pattern,
    compiled: CompiledPattern,
    data: T,
}

impl<T> Entry<T> {
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn compiled(&self) -> &CompiledPattern {
        &self.compiled
    }

    pub fn data(&self) -> &T {
        &self.data
    }
}

/// Serialized form of one registration: `{"match": {...}, "data": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEntry<T> {
    #[serde(rename = "match")]
    pub pattern: Pattern,
    pub data: T,
}

impl<T> MatchEntry<T> {
    pub fn new(pattern: impl Into<Pattern>, data: T) -> Self {
        Self {
            pattern: pattern.into(),
            data,
        }
    }
}

/// Ordered map from pattern identity to [`Entry`].
///
/// # Examples
///
/// ```rust
/// use pattern_recognition::{InvalidGlobPolicy, Pattern, Registry};
///
/// let mut registry = Registry::new(InvalidGlobPolicy::Literal);
/// registry.insert(Pattern::from([("a", "1")]), "A");
/// registry.insert(Pattern::from([("b", "2")]), "B");
///
/// // overwrite keeps the original slot
/// assert_eq!(registry.insert(Pattern::from([("a", "1")]), "A2"), Some("A"));
///
/// let data: Vec<&str> = registry.iter().map(|e| *e.data()).collect();
/// assert_eq!(data, vec!["A2", "B"]);
/// ```
#[derive(Debug, Clone)]
pub struct Registry<T> {
    entries: Vec<Entry<T>>,
    index: HashMap<Pattern, usize>,
    policy: InvalidGlobPolicy,
}

impl<T> Registry<T> {
    /// Create an empty registry compiling globs with `policy`.
    pub fn new(policy: InvalidGlobPolicy) -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            policy,
        }
    }

    /// Insert or overwrite the entry for `pattern`'s identity.
    ///
    /// Returns the previous payload when the identity was already present.
    pub fn insert(&mut self, pattern: Pattern, data: T) -> Option<T> {
        if let Some(&slot) = self.index.get(&pattern) {
            return Some(std::mem::replace(&mut self.entries[slot].data, data));
        }

        let compiled = CompiledPattern::compile(&pattern, self.policy);
        self.index.insert(pattern.clone(), self.entries.len());
        self.entries.push(Entry {
            pattern,
            compiled,
            data,
        });
        None
    }

    /// Remove the entry for `pattern`'s identity, returning its payload.
    pub fn remove(&mut self, pattern: &Pattern) -> Option<T> {
        let slot = self.index.remove(pattern)?;
        let entry = self.entries.remove(slot);

        for other in self.index.values_mut() {
            if *other > slot {
                *other -= 1;
            }
        }

        Some(entry.data)
    }

    pub fn get(&self, pattern: &Pattern) -> Option<&Entry<T>> {
        self.index.get(pattern).map(|&slot| &self.entries[slot])
    }

    pub fn contains(&self, pattern: &Pattern) -> bool {
        self.index.contains_key(pattern)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    pub fn policy(&self) -> InvalidGlobPolicy {
        self.policy
    }

    /// Entries in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry<T>> {
        self.entries.iter()
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new(InvalidGlobPolicy::default())
    }
}

impl<'a, T> IntoIterator for &'a Registry<T> {
    type Item = &'a Entry<T>;
    type IntoIter = std::slice::Iter<'a, Entry<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
