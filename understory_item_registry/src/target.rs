// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item targets and the target resolver.
//!
//! An [`ItemTarget`] addresses an item without holding on to it: either by key,
//! or by a signed ordinal where negative values count from the end. Targets are
//! always resolved against the item set as it is *at the time of the query*; a
//! target naming an item that has since gone away simply resolves to nothing.

use understory_virtual_list::VirtualItemKeys;

use crate::ItemKey;

/// Abstract address of a list item.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemTarget {
    /// Address an item by its key.
    Key(ItemKey),
    /// Address an item by ordinal. Negative values count from the end, so `-1`
    /// is the last item; they need a known item count to resolve.
    Index(isize),
}

impl ItemTarget {
    /// Target for the first item.
    pub const FIRST: Self = Self::Index(0);
    /// Target for the last item.
    pub const LAST: Self = Self::Index(-1);

    /// Returns the key if this is a key target.
    #[must_use]
    pub fn key(&self) -> Option<&ItemKey> {
        match self {
            Self::Key(key) => Some(key),
            Self::Index(_) => None,
        }
    }

    /// Returns the ordinal this target names, given the total item count.
    ///
    /// Key targets return `None`: their ordinal depends on a window, see
    /// [`ItemTarget::resolve_ordinal`].
    #[must_use]
    pub fn ordinal(&self, total_items: Option<usize>) -> Option<usize> {
        match *self {
            Self::Key(_) => None,
            Self::Index(index) if index >= 0 => Some(index.unsigned_abs()),
            Self::Index(index) => total_items?.checked_sub(index.unsigned_abs()),
        }
    }

    /// Resolves this target to an ordinal within `window`.
    ///
    /// `total_items` is the count used for negative indices; pass `None` when
    /// the total is not known yet (for example, a lazy list that has not loaded
    /// its first page) and negative targets will fail closed.
    ///
    /// The ordinal must also be addressable in `window`; an index past the
    /// materialized end resolves to `None` until the window grows.
    #[must_use]
    pub fn resolve_ordinal<W>(&self, window: &W, total_items: Option<usize>) -> Option<usize>
    where
        W: VirtualItemKeys<Key = ItemKey> + ?Sized,
    {
        let ordinal = match self {
            Self::Key(key) => window.index_of(key)?,
            Self::Index(_) => self.ordinal(total_items)?,
        };
        window.contains_index(ordinal).then_some(ordinal)
    }

    /// Resolves this target to the key it addresses within `window`.
    #[must_use]
    pub fn resolve_key<'w, W>(
        &self,
        window: &'w W,
        total_items: Option<usize>,
    ) -> Option<&'w ItemKey>
    where
        W: VirtualItemKeys<Key = ItemKey> + ?Sized,
    {
        let ordinal = self.resolve_ordinal(window, total_items)?;
        window.at(ordinal)
    }

    /// [`resolve_ordinal`](Self::resolve_ordinal) using the window length as the total.
    #[must_use]
    pub fn resolve_ordinal_in<W>(&self, window: &W) -> Option<usize>
    where
        W: VirtualItemKeys<Key = ItemKey> + ?Sized,
    {
        self.resolve_ordinal(window, Some(window.len()))
    }

    /// [`resolve_key`](Self::resolve_key) using the window length as the total.
    #[must_use]
    pub fn resolve_key_in<'w, W>(&self, window: &'w W) -> Option<&'w ItemKey>
    where
        W: VirtualItemKeys<Key = ItemKey> + ?Sized,
    {
        self.resolve_key(window, Some(window.len()))
    }
}

impl From<ItemKey> for ItemTarget {
    fn from(key: ItemKey) -> Self {
        Self::Key(key)
    }
}

impl From<&ItemKey> for ItemTarget {
    fn from(key: &ItemKey) -> Self {
        Self::Key(key.clone())
    }
}

impl From<&str> for ItemTarget {
    fn from(key: &str) -> Self {
        Self::Key(ItemKey::from(key))
    }
}

impl From<isize> for ItemTarget {
    fn from(index: isize) -> Self {
        Self::Index(index)
    }
}

/// The parts of an item a target is matched against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemAddress<'a> {
    /// The item's key.
    pub key: &'a ItemKey,
    /// The item's ordinal, if it has one.
    pub item_pos: Option<usize>,
}

/// Returns `true` if `target` addresses `item`.
///
/// - Key targets match on key equality.
/// - Non-negative index targets match `item.item_pos`.
/// - Negative index targets match `item.item_pos == total_items + target`, and
///   never match when `total_items` is unknown.
/// - Index targets never match an item without an ordinal.
///
/// This is total and side-effect free.
#[must_use]
pub fn matches_target(
    target: &ItemTarget,
    item: ItemAddress<'_>,
    total_items: Option<usize>,
) -> bool {
    match target {
        ItemTarget::Key(key) => key == item.key,
        ItemTarget::Index(_) => match (target.ordinal(total_items), item.item_pos) {
            (Some(ordinal), Some(pos)) => ordinal == pos,
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn address(key: &ItemKey, pos: Option<usize>) -> ItemAddress<'_> {
        ItemAddress { key, item_pos: pos }
    }

    #[test]
    fn key_targets_ignore_position() {
        let key = ItemKey::from("a");
        assert!(matches_target(&ItemTarget::from("a"), address(&key, None), None));
        assert!(!matches_target(
            &ItemTarget::from("b"),
            address(&key, Some(0)),
            Some(1)
        ));
    }

    #[test]
    fn index_targets_need_a_position() {
        let key = ItemKey::from("a");
        assert!(matches_target(&ItemTarget::Index(2), address(&key, Some(2)), None));
        assert!(!matches_target(&ItemTarget::Index(2), address(&key, None), Some(3)));
        assert!(!matches_target(&ItemTarget::Index(1), address(&key, Some(2)), Some(3)));
    }

    #[test]
    fn negative_targets_fail_closed_without_total() {
        let key = ItemKey::from("a");
        assert!(!matches_target(&ItemTarget::LAST, address(&key, Some(4)), None));
        assert!(matches_target(&ItemTarget::LAST, address(&key, Some(4)), Some(5)));
        // `-6` over five items is out of range.
        assert!(!matches_target(
            &ItemTarget::Index(-6),
            address(&key, Some(0)),
            Some(5)
        ));
        // `-1` over an empty list addresses nothing.
        assert!(!matches_target(&ItemTarget::LAST, address(&key, Some(0)), Some(0)));
    }

    #[test]
    fn resolve_against_window() {
        let window: Vec<ItemKey> = ["item-1", "item-2", "item-3"]
            .into_iter()
            .map(ItemKey::from)
            .collect();
        assert_eq!(ItemTarget::LAST.resolve_ordinal_in(&window), Some(2));
        assert_eq!(ItemTarget::Index(3).resolve_ordinal_in(&window), None);
        assert_eq!(ItemTarget::LAST.resolve_ordinal(&window, None), None);
        assert_eq!(
            ItemTarget::from("item-2").resolve_key_in(&window),
            Some(&ItemKey::from("item-2"))
        );
        assert_eq!(ItemTarget::from("gone").resolve_ordinal_in(&window), None);
    }

    #[test]
    fn negative_target_beyond_materialized_window_is_unresolved() {
        // Total known to be 10, but only 3 keys fetched so far.
        let window: Vec<ItemKey> = ["a", "b", "c"].into_iter().map(ItemKey::from).collect();
        assert_eq!(ItemTarget::LAST.resolve_ordinal(&window, Some(10)), None);
        assert_eq!(ItemTarget::Index(-10).resolve_ordinal(&window, Some(10)), Some(0));
    }
}
