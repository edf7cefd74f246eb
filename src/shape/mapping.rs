//! Insertion-ordered key/value mapping.
//!
//! [`Mapping`] keeps its entries in a `Vec` in insertion order and indexes
//! them by key through a hash table. Overwriting an existing key replaces
//! the value in place, so the key keeps its original position.
//!
//! # Time Complexity
//!
//! | Operation  | Cost            |
//! |------------|-----------------|
//! | `get`      | O(1) expected   |
//! | `insert`   | O(1) amortized  |
//! | `remove`   | O(n)            |
//! | `iter`     | O(n)            |
//!
//! # Examples
//!
//! ```rust
//! use shapefold::{Key, Mapping, Value};
//!
//! let mut mapping = Mapping::new();
//! mapping.insert(Key::from("a"), Value::from(1));
//! mapping.insert(Key::from("b"), Value::from(2));
//! mapping.insert(Key::from("a"), Value::from(3));
//!
//! let keys: Vec<&Key> = mapping.keys().collect();
//! assert_eq!(keys, vec![&Key::from("a"), &Key::from("b")]);
//! assert_eq!(mapping.get(&Key::from("a")), Some(&Value::from(3)));
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

use super::{Key, Value};
use crate::hashing::FastHashMap;

/// An insertion-ordered mapping from [`Key`] to `V`.
#[derive(Clone)]
pub struct Mapping<V = Value> {
    entries: Vec<(Key, V)>,
    index: FastHashMap<Key, usize>,
}

impl<V> Mapping<V> {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: FastHashMap::default(),
        }
    }

    /// Creates an empty mapping with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut index = FastHashMap::default();
        index.reserve(capacity);
        Self {
            entries: Vec::with_capacity(capacity),
            index,
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the mapping has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value bound to `key`.
    pub fn get(&self, key: &Key) -> Option<&V> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    /// Returns a mutable reference to the value bound to `key`.
    pub fn get_mut(&mut self, key: &Key) -> Option<&mut V> {
        let position = *self.index.get(key)?;
        Some(&mut self.entries[position].1)
    }

    /// Returns `true` if `key` is bound.
    pub fn contains_key(&self, key: &Key) -> bool {
        self.index.contains_key(key)
    }

    /// Binds `key` to `value`, returning the previous value if any.
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn insert(&mut self, key: Key, value: V) -> Option<V> {
        if let Some(&position) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[position].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Returns the value bound to `key`, inserting `default()` first if the
    /// key is new.
    pub fn get_or_insert_with<F>(&mut self, key: Key, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let position = match self.index.get(&key) {
            Some(&position) => position,
            None => {
                let position = self.entries.len();
                self.index.insert(key.clone(), position);
                self.entries.push((key, default()));
                position
            }
        };
        &mut self.entries[position].1
    }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &Key) -> Option<V> {
        let position = self.index.remove(key)?;
        let (_, value) = self.entries.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Some(value)
    }

    /// Consumes the mapping and returns the value bound to `key`.
    pub fn take(mut self, key: &Key) -> Option<V> {
        let position = *self.index.get(key)?;
        Some(self.entries.swap_remove(position).1)
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &V)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Iterates over the values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Iterates mutably over the values in insertion order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.iter_mut().map(|(_, value)| value)
    }

    /// Consumes the mapping, yielding its values in insertion order.
    pub fn into_values(self) -> impl Iterator<Item = V> {
        self.entries.into_iter().map(|(_, value)| value)
    }

    /// Reverses the entry order.
    pub fn reverse(&mut self) {
        self.entries.reverse();
        let last = self.entries.len().saturating_sub(1);
        for slot in self.index.values_mut() {
            *slot = last - *slot;
        }
    }
}

impl<V> Default for Mapping<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: PartialEq> PartialEq for Mapping<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<V: Eq> Eq for Mapping<V> {}

impl<V: Hash> Hash for Mapping<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entries.hash(state);
    }
}

impl<V: fmt::Debug> fmt::Debug for Mapping<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<V> FromIterator<(Key, V)> for Mapping<V> {
    /// Builds a mapping; later duplicate keys overwrite earlier ones.
    fn from_iter<I: IntoIterator<Item = (Key, V)>>(iterable: I) -> Self {
        let mut mapping = Self::new();
        mapping.extend(iterable);
        mapping
    }
}

impl<V> Extend<(Key, V)> for Mapping<V> {
    fn extend<I: IntoIterator<Item = (Key, V)>>(&mut self, iterable: I) {
        for (key, value) in iterable {
            self.insert(key, value);
        }
    }
}

impl<V> IntoIterator for Mapping<V> {
    type Item = (Key, V);
    type IntoIter = std::vec::IntoIter<(Key, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
