// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A `Vec`-backed [`VirtualItemKeys`] implementation for lazy lists.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::VirtualItemKeys;

/// A growable, hash-indexed window of keys.
///
/// `KeyWindow` is the adapter most lazy lists want: the data layer fetches a
/// page of keys, appends it with [`KeyWindow::extend`], and keyboard navigation
/// can immediately address every fetched row by ordinal or key.
///
/// Keys are unique. Appending a key that is already present is ignored (the
/// earlier ordinal wins) and logged, since it indicates a paging bug in the
/// data layer.
#[derive(Clone, Debug)]
pub struct KeyWindow<K> {
    keys: Vec<K>,
    index: HashMap<K, usize>,
}

impl<K> Default for KeyWindow<K> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K> KeyWindow<K>
where
    K: Hash + Eq + Clone,
{
    /// Creates an empty window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a window from `keys`, skipping duplicates.
    #[must_use]
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut window = Self::new();
        window.extend(keys);
        window
    }

    /// Returns the keys in ordinal order.
    #[must_use]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Appends `key`, returning `false` if it was already present.
    pub fn push(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            log::warn!(
                "KeyWindow: ignoring duplicate key appended at ordinal {}",
                self.keys.len()
            );
            return false;
        }
        self.index.insert(key.clone(), self.keys.len());
        self.keys.push(key);
        true
    }

    /// Appends a page of keys, returning how many were actually added.
    pub fn extend<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
    {
        let iter = keys.into_iter();
        let (lower, _) = iter.size_hint();
        self.keys.reserve(lower);
        self.index.reserve(lower);

        let before = self.keys.len();
        for key in iter {
            self.push(key);
        }
        self.keys.len() - before
    }

    /// Shortens the window to `len` items; no-op if it is already shorter.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.keys.len() {
            return;
        }
        for key in self.keys.drain(len..) {
            self.index.remove(&key);
        }
    }

    /// Replaces the whole window, e.g. after the query behind a lazy list changed.
    pub fn replace<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
    {
        self.clear();
        self.extend(keys);
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.index.clear();
    }
}

impl<K> VirtualItemKeys for KeyWindow<K>
where
    K: Hash + Eq,
{
    type Key = K;

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn at(&self, index: usize) -> Option<&K> {
        self.keys.get(index)
    }

    fn index_of(&self, key: &K) -> Option<usize> {
        self.index.get(key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_keys_keep_first_ordinal() {
        let mut window = KeyWindow::new();
        assert_eq!(window.extend(["a", "b", "a", "c"]), 3);
        assert_eq!(window.keys(), &["a", "b", "c"]);
        assert_eq!(window.index_of(&"a"), Some(0));
        assert!(!window.push("b"));
    }

    #[test]
    fn truncate_drops_index_entries() {
        let mut window = KeyWindow::from_keys(["a", "b", "c"]);
        window.truncate(1);
        assert_eq!(window.len(), 1);
        assert_eq!(window.index_of(&"b"), None);
        // Dropped keys can be appended again.
        assert!(window.push("c"));
        assert_eq!(window.index_of(&"c"), Some(1));

        window.truncate(10);
        assert_eq!(window.len(), 2);
    }

    #[test]
    fn replace_resets_ordinals() {
        let mut window = KeyWindow::from_keys(["a", "b"]);
        window.replace(["b", "z"]);
        assert_eq!(window.index_of(&"b"), Some(0));
        assert_eq!(window.index_of(&"a"), None);
        assert_eq!(window.at(1), Some(&"z"));
    }
}
