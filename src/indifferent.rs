//! Insertion-ordered map with indifferent key access.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::key::{canonical_key, AsKey};

/// An insertion-ordered map whose keys are normalized through [`AsKey`].
///
/// Lookups, writes, membership checks and slicing all canonicalize the key
/// first, so callers can mix `&str`, `String` and integer keys freely.
///
/// # Examples
///
/// ```
/// use strong_params::IndifferentMap;
///
/// let mut map = IndifferentMap::new();
/// map.insert("0", "first");
/// map.insert(String::from("name"), "alice");
///
/// assert_eq!(map.get(0usize), Some(&"first"));
/// assert!(map.contains_key("name"));
///
/// let sliced = map.slice(["name", "missing"]);
/// assert_eq!(sliced.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IndifferentMap<V> {
    entries: IndexMap<String, V>,
}

impl<V> IndifferentMap<V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Creates an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: impl AsKey) -> Option<&V> {
        self.entries.get(&*key.as_key())
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: impl AsKey) -> Option<&mut V> {
        self.entries.get_mut(&*key.as_key())
    }

    /// Stores `value` under `key`.
    ///
    /// An existing entry keeps its position and its previous value is returned.
    pub fn insert(&mut self, key: impl AsKey, value: V) -> Option<V> {
        self.entries.insert(canonical_key(key), value)
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: impl AsKey) -> bool {
        self.entries.contains_key(&*key.as_key())
    }

    /// Removes `key`, returning its value if it was present.
    ///
    /// Remaining entries keep their relative order.
    pub fn remove(&mut self, key: impl AsKey) -> Option<V> {
        self.entries.shift_remove(&*key.as_key())
    }

    /// Returns the canonical keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates mutably over entries in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut V)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates mutably over values in insertion order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.values_mut()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> IndifferentMap<V> {
    /// Returns a new map containing only the requested keys that are present.
    ///
    /// Entries keep the order of the source map, not the order of `keys`.
    pub fn slice<K: AsKey>(&self, keys: impl IntoIterator<Item = K>) -> Self {
        let wanted: HashSet<String> = keys.into_iter().map(canonical_key).collect();
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(k, _)| wanted.contains(k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

impl<V> Default for IndifferentMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: AsKey, V> FromIterator<(K, V)> for IndifferentMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
