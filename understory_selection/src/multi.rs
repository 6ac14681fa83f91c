// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi selection with range extension.

use alloc::vec::Vec;

use understory_virtual_list::{VirtualItemKeys, iter_window};

use crate::Revisioned;

/// A set of selected keys plus a primary key, an anchor key, and a revision.
///
/// Keys are stored in a `Vec<T>` in the order they were selected, with
/// uniqueness enforced by equality; `T` needs neither `Hash` nor `Ord`. The
/// order is not meaningful for list semantics, only membership is.
///
/// - The **primary** key is the most recently selected key still in the set.
/// - The **anchor** is the pivot for [`extend_range`](Self::extend_range). It
///   is the last key the user clicked or toggled, and it survives that key
///   being deselected (ctrl-click off, then shift-click, still ranges from
///   there).
#[derive(Clone, Debug)]
pub struct Selection<T> {
    items: Vec<T>,
    primary: Option<usize>,
    anchor: Option<T>,
    revision: u64,
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Selection<T> {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            primary: None,
            anchor: None,
            revision: 0,
        }
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of selected keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The selected keys, in selection order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Iterates the selected keys.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// The primary key, if any.
    #[must_use]
    pub fn primary(&self) -> Option<&T> {
        self.primary.and_then(|idx| self.items.get(idx))
    }

    /// The anchor key, if any. It need not be selected.
    #[must_use]
    pub fn anchor(&self) -> Option<&T> {
        self.anchor.as_ref()
    }

    /// Revision counter; bumps only when keys, primary, or anchor change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Deselects everything and forgets the anchor.
    pub fn clear(&mut self) {
        if self.items.is_empty() && self.anchor.is_none() {
            return;
        }
        self.items.clear();
        self.primary = None;
        self.anchor = None;
        self.bump();
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<T: PartialEq> Selection<T> {
    /// Returns `true` if `key` is selected.
    #[must_use]
    pub fn contains(&self, key: &T) -> bool {
        self.position_of(key).is_some()
    }

    /// Replaces the selection with `key` alone, which also becomes primary
    /// and anchor. This is a plain click.
    pub fn select_only(&mut self, key: T)
    where
        T: Clone,
    {
        if self.items.len() == 1
            && self.items.first() == Some(&key)
            && self.anchor.as_ref() == Some(&key)
        {
            return;
        }
        self.anchor = Some(key.clone());
        self.items.clear();
        self.items.push(key);
        self.primary = Some(0);
        self.bump();
    }

    /// Adds `key` if absent or removes it if present, and moves the anchor to
    /// it. This is a ctrl-click. Returns `true` if `key` is now selected.
    pub fn toggle(&mut self, key: T) -> bool
    where
        T: Clone,
    {
        self.anchor = Some(key.clone());
        let selected = match self.position_of(&key) {
            Some(idx) => {
                self.remove_at(idx);
                false
            }
            None => {
                self.push(key);
                true
            }
        };
        self.bump();
        selected
    }

    /// Adds `key`, making it primary. The anchor is left alone.
    ///
    /// Returns `true` if the selection changed.
    pub fn add(&mut self, key: T) -> bool {
        match self.position_of(&key) {
            Some(idx) if self.primary == Some(idx) => false,
            Some(idx) => {
                self.primary = Some(idx);
                self.bump();
                true
            }
            None => {
                self.push(key);
                self.bump();
                true
            }
        }
    }

    /// Removes `key`. Returns `true` if it was selected.
    pub fn remove(&mut self, key: &T) -> bool {
        let Some(idx) = self.position_of(key) else {
            return false;
        };
        self.remove_at(idx);
        self.bump();
        true
    }

    /// Replaces the selection with `keys`, ignoring duplicates.
    ///
    /// The first key becomes primary. The anchor is kept if it is still
    /// selected, otherwise it moves to the first key.
    pub fn replace_with<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = T>,
        T: Clone,
    {
        let mut items: Vec<T> = Vec::new();
        for key in keys {
            if !items.contains(&key) {
                items.push(key);
            }
        }
        let anchor = match &self.anchor {
            Some(anchor) if items.contains(anchor) => Some(anchor.clone()),
            _ => items.first().cloned(),
        };
        let primary = (!items.is_empty()).then_some(0);
        if items == self.items && anchor == self.anchor && primary == self.primary {
            return;
        }
        self.items = items;
        self.primary = primary;
        self.anchor = anchor;
        self.bump();
    }

    /// Sets the selected keys to `keys`, ignoring duplicates, and keeps the
    /// anchor wherever it was.
    ///
    /// The primary key stays primary while it is still selected; otherwise
    /// the last key becomes primary. This is how an owner's copy of a
    /// controlled selection is applied.
    pub fn set_items<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = T>,
        T: Clone,
    {
        let mut items: Vec<T> = Vec::new();
        for key in keys {
            if !items.contains(&key) {
                items.push(key);
            }
        }
        let primary = self
            .primary()
            .and_then(|key| items.iter().position(|k| k == key))
            .or_else(|| items.len().checked_sub(1));
        if items == self.items && primary == self.primary {
            return;
        }
        self.items = items;
        self.primary = primary;
        self.bump();
    }

    /// Selects every key the window can name, in ordinal order.
    ///
    /// Primary and anchor follow [`replace_with`](Self::replace_with).
    pub fn select_all<W>(&mut self, window: &W)
    where
        W: VirtualItemKeys<Key = T> + ?Sized,
        T: Clone,
    {
        self.replace_with(iter_window(window).map(|(_, key)| key.clone()));
    }

    /// Adds every key between the anchor and `key`, inclusive, by ordinal in
    /// `window`. This is a shift-click or shift-arrow.
    ///
    /// With no anchor, or an anchor the window does not know, the range is
    /// `key` alone and `key` becomes the anchor. Keys outside the range stay
    /// selected. `key` becomes primary. Returns `true` if the selection
    /// changed; `false` as well when `key` is not in the window.
    pub fn extend_range<W>(&mut self, key: T, window: &W) -> bool
    where
        W: VirtualItemKeys<Key = T> + ?Sized,
        T: Clone,
    {
        let Some(to) = window.index_of(&key) else {
            return false;
        };
        let mut changed = false;
        let from = match self.anchor.as_ref().and_then(|a| window.index_of(a)) {
            Some(from) => from,
            None => {
                self.anchor = Some(key.clone());
                changed = true;
                to
            }
        };
        let (lo, hi) = if from <= to { (from, to) } else { (to, from) };

        let before = (self.items.len(), self.primary);
        for ordinal in lo..=hi {
            if let Some(k) = window.at(ordinal)
                && !self.contains(k)
            {
                self.items.push(k.clone());
            }
        }
        self.primary = self.position_of(&key);
        changed |= before != (self.items.len(), self.primary);
        if changed {
            log::trace!("selection range extended over ordinals {lo}..={hi}");
            self.bump();
            return true;
        }
        false
    }

    fn position_of(&self, key: &T) -> Option<usize> {
        self.items.iter().position(|k| k == key)
    }

    fn push(&mut self, key: T) {
        self.items.push(key);
        self.primary = Some(self.items.len() - 1);
    }

    fn remove_at(&mut self, idx: usize) {
        self.items.remove(idx);
        self.primary = match self.primary {
            Some(p) if p == idx => None,
            Some(p) if p > idx => Some(p - 1),
            other => other,
        };
    }
}

impl<T> Revisioned for Selection<T> {
    fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use understory_virtual_list::KeyWindow;

    fn window() -> KeyWindow<u32> {
        KeyWindow::from_keys(0..10)
    }

    #[test]
    fn extend_range_without_anchor_selects_one() {
        let mut sel = Selection::new();
        assert!(sel.extend_range(4, &window()));
        assert_eq!(sel.items(), &[4]);
        assert_eq!(sel.anchor(), Some(&4));
    }

    #[test]
    fn extend_range_backwards() {
        let mut sel = Selection::new();
        sel.select_only(6);
        assert!(sel.extend_range(3, &window()));
        assert_eq!(sel.items(), &[6, 3, 4, 5]);
        assert_eq!(sel.primary(), Some(&3));
        assert_eq!(sel.anchor(), Some(&6));
    }

    #[test]
    fn extend_range_to_unknown_key_is_a_no_op() {
        let mut sel = Selection::new();
        sel.select_only(1);
        let rev = sel.revision();
        assert!(!sel.extend_range(99, &window()));
        assert_eq!(sel.revision(), rev);
    }

    #[test]
    fn anchor_survives_deselection() {
        let mut sel = Selection::new();
        sel.toggle(2);
        sel.toggle(2);
        assert!(sel.is_empty());
        assert_eq!(sel.anchor(), Some(&2));
        sel.extend_range(4, &window());
        assert_eq!(sel.items(), &[2, 3, 4]);
    }

    #[test]
    fn remove_fixes_primary() {
        let mut sel = Selection::new();
        sel.replace_with([1, 2, 3]);
        sel.add(3);
        assert_eq!(sel.primary(), Some(&3));
        assert!(sel.remove(&1));
        assert_eq!(sel.primary(), Some(&3));
        assert!(sel.remove(&3));
        assert_eq!(sel.primary(), None);
        assert!(!sel.remove(&3));
    }

    #[test]
    fn select_all_follows_window_order() {
        let mut sel = Selection::new();
        sel.select_all(&KeyWindow::from_keys([5_u32, 6, 7]));
        assert_eq!(sel.items(), &[5, 6, 7]);
        assert_eq!(sel.primary(), Some(&5));
    }
}
