// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`VirtualItemKeys`] addressing trait.

use alloc::boxed::Box;
use alloc::vec::Vec;

/// A read-only addressing table over a dense strip of keyed items `0..len`.
///
/// The table does not need every item to be rendered, only addressable. A
/// 10,000-row list windowed down to 100 visible rows can still expose all
/// 10,000 keys here so that Home/End or type-ahead can reach rows that are not
/// on screen.
///
/// Contract:
/// - [`at`](Self::at) returns `None` for `index >= len()`.
/// - [`index_of`](Self::index_of) returns `None` for keys that are not in the table.
/// - `index_of(at(i)) == Some(i)` for every `i < len()`; keys are unique.
pub trait VirtualItemKeys {
    /// Key type stored in the table.
    type Key;

    /// Number of addressable items.
    fn len(&self) -> usize;

    /// Returns the key at ordinal `index`.
    fn at(&self, index: usize) -> Option<&Self::Key>;

    /// Returns the ordinal of `key`.
    fn index_of(&self, key: &Self::Key) -> Option<usize>;

    /// Returns `true` if the table has no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the ordinal of the last item, if any.
    fn last_index(&self) -> Option<usize> {
        self.len().checked_sub(1)
    }

    /// Returns `true` if `index` addresses an item.
    fn contains_index(&self, index: usize) -> bool {
        index < self.len()
    }

    /// Iterates `(ordinal, key)` pairs in ordinal order.
    fn iter_keys(&self) -> WindowIter<'_, Self>
    where
        Self: Sized,
    {
        iter_window(self)
    }
}

/// Iterates `(ordinal, key)` pairs of `window`, including unsized windows such
/// as `dyn VirtualItemKeys<Key = K>`.
pub fn iter_window<W>(window: &W) -> WindowIter<'_, W>
where
    W: VirtualItemKeys + ?Sized,
{
    WindowIter {
        window,
        front: 0,
        back: window.len(),
    }
}

/// Iterator returned by [`VirtualItemKeys::iter_keys`] and [`iter_window`].
///
/// Ordinals the window cannot name (a sparse caller adapter returning `None`
/// from `at`) are skipped.
#[derive(Debug)]
pub struct WindowIter<'a, W: ?Sized> {
    window: &'a W,
    front: usize,
    back: usize,
}

impl<'a, W> Iterator for WindowIter<'a, W>
where
    W: VirtualItemKeys + ?Sized,
{
    type Item = (usize, &'a W::Key);

    fn next(&mut self) -> Option<Self::Item> {
        while self.front < self.back {
            let index = self.front;
            self.front += 1;
            if let Some(key) = self.window.at(index) {
                return Some((index, key));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.back - self.front))
    }
}

impl<W> DoubleEndedIterator for WindowIter<'_, W>
where
    W: VirtualItemKeys + ?Sized,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        while self.front < self.back {
            self.back -= 1;
            let index = self.back;
            if let Some(key) = self.window.at(index) {
                return Some((index, key));
            }
        }
        None
    }
}

impl<W> VirtualItemKeys for &W
where
    W: VirtualItemKeys + ?Sized,
{
    type Key = W::Key;

    fn len(&self) -> usize {
        (**self).len()
    }

    fn at(&self, index: usize) -> Option<&Self::Key> {
        (**self).at(index)
    }

    fn index_of(&self, key: &Self::Key) -> Option<usize> {
        (**self).index_of(key)
    }
}

impl<W> VirtualItemKeys for Box<W>
where
    W: VirtualItemKeys + ?Sized,
{
    type Key = W::Key;

    fn len(&self) -> usize {
        (**self).len()
    }

    fn at(&self, index: usize) -> Option<&Self::Key> {
        (**self).at(index)
    }

    fn index_of(&self, key: &Self::Key) -> Option<usize> {
        (**self).index_of(key)
    }
}

/// Slices are addressable windows with a linear `index_of`.
///
/// Handy for small static lists and tests; prefer [`crate::KeyWindow`] for
/// anything large.
impl<K: PartialEq> VirtualItemKeys for [K] {
    type Key = K;

    fn len(&self) -> usize {
        <[K]>::len(self)
    }

    fn at(&self, index: usize) -> Option<&K> {
        self.get(index)
    }

    fn index_of(&self, key: &K) -> Option<usize> {
        self.iter().position(|k| k == key)
    }
}

impl<K: PartialEq> VirtualItemKeys for Vec<K> {
    type Key = K;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn at(&self, index: usize) -> Option<&K> {
        self.get(index)
    }

    fn index_of(&self, key: &K) -> Option<usize> {
        self.as_slice().iter().position(|k| k == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn slice_window_contract() {
        let keys = ["a", "b", "c"];
        let window: &[&str] = &keys;
        assert_eq!(VirtualItemKeys::len(window), 3);
        assert_eq!(window.at(0), Some(&"a"));
        assert_eq!(window.at(3), None);
        assert_eq!(window.index_of(&"c"), Some(2));
        assert_eq!(window.index_of(&"z"), None);
        assert_eq!(window.last_index(), Some(2));
    }

    #[test]
    fn iter_walks_both_ends() {
        let window = vec![10_u32, 20, 30];
        let forward: Vec<_> = window.iter_keys().collect();
        assert_eq!(forward, vec![(0, &10), (1, &20), (2, &30)]);
        let backward: Vec<_> = iter_window(&window).rev().map(|(i, _)| i).collect();
        assert_eq!(backward, vec![2, 1, 0]);
    }

    #[test]
    fn vec_windows_keep_their_element_iterator() {
        let window = vec!["a", "b"];
        assert_eq!(window.iter().position(|k| *k == "b"), Some(1));
        assert_eq!(window.iter_keys().last(), Some((1, &"b")));
    }

    #[test]
    fn empty_window_has_no_last_index() {
        let window: Vec<u32> = Vec::new();
        assert!(VirtualItemKeys::is_empty(&window));
        assert_eq!(window.last_index(), None);
        assert_eq!(iter_window(&window).next(), None);
    }

    #[test]
    fn dyn_window_is_addressable() {
        let window: Box<dyn VirtualItemKeys<Key = u32>> = Box::new(vec![1_u32, 2]);
        assert_eq!(window.at(1), Some(&2));
        assert_eq!(window.index_of(&1), Some(0));
        assert_eq!(iter_window(&*window).count(), 2);
    }
}
