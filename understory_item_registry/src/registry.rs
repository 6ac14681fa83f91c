// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered item registry.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use hashbrown::DefaultHashBuilder;
use indexmap::IndexMap;
use understory_virtual_list::VirtualItemKeys;

use crate::{ItemAddress, ItemDef, ItemKey, ItemTarget, matches_target};

/// Identifies one registration of a key.
///
/// Ids are never reused within a registry, so an id outliving its entry (for
/// example a disposer dropped after the key was removed and registered again)
/// can be detected and ignored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistrationId(u64);

/// Reasons a registration is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The key is already registered. The existing entry is kept.
    #[error("item key `{key}` is already registered")]
    DuplicateKey {
        /// The conflicting key.
        key: ItemKey,
    },
    /// Another item already claims the explicit ordinal. The existing entry is kept.
    #[error("item `{key}` claims position {item_pos}, already held by `{existing}`")]
    DuplicatePosition {
        /// The rejected key.
        key: ItemKey,
        /// The contested ordinal.
        item_pos: usize,
        /// The key already holding the ordinal.
        existing: ItemKey,
    },
}

#[derive(Clone, Debug)]
struct Entry {
    def: ItemDef,
    id: RegistrationId,
}

/// A registered item together with its effective ordinal.
#[derive(Clone, Copy, Debug)]
pub struct RegisteredItem<'a> {
    /// The item's definition.
    pub def: &'a ItemDef,
    /// Effective ordinal: the explicit `item_pos`, or the slot registration
    /// order gives it.
    pub item_pos: usize,
    /// Id of the registration.
    pub id: RegistrationId,
}

impl<'a> RegisteredItem<'a> {
    /// The item's key.
    #[must_use]
    pub fn key(&self) -> &'a ItemKey {
        &self.def.item_key
    }

    /// Address used by [`matches_target`].
    #[must_use]
    pub fn address(&self) -> ItemAddress<'a> {
        ItemAddress {
            key: &self.def.item_key,
            item_pos: Some(self.item_pos),
        }
    }
}

/// Ordered `ItemKey → ItemDef` map with disposer-friendly registration.
///
/// Items are ordered by their effective ordinal. An explicit
/// [`ItemDef::item_pos`] is authoritative. Items without one take the
/// ordinals no explicit item claims, lowest first, in registration order:
/// with `b` registered at position 0, implicit items `a` and `c` land on 1
/// and 2. Explicit positions may be sparse (rows 100 and 101 of a virtualized
/// list); the ordinals between them name no item.
///
/// The registry keeps a revision counter that bumps on every change, which
/// hosts can use to invalidate derived state.
#[derive(Clone, Debug, Default)]
pub struct ItemRegistry {
    items: IndexMap<ItemKey, Entry, DefaultHashBuilder>,
    explicit: BTreeMap<usize, ItemKey>,
    next_id: u64,
    revision: u64,
}

impl ItemRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live registrations, which is also the number of distinct keys.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Revision counter, bumped on every successful register/unregister/update.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Registers an item.
    ///
    /// Registering a live key, or claiming an explicit ordinal that is already
    /// taken, is rejected and the existing entry is left untouched.
    pub fn register(&mut self, def: ItemDef) -> Result<RegistrationId, RegistryError> {
        if self.items.contains_key(&def.item_key) {
            return Err(RegistryError::DuplicateKey { key: def.item_key });
        }
        if let Some(item_pos) = def.item_pos
            && let Some(existing) = self.explicit.get(&item_pos)
        {
            return Err(RegistryError::DuplicatePosition {
                key: def.item_key,
                item_pos,
                existing: existing.clone(),
            });
        }

        let id = RegistrationId(self.next_id);
        self.next_id += 1;
        if let Some(item_pos) = def.item_pos {
            self.explicit.insert(item_pos, def.item_key.clone());
        }
        self.items.insert(def.item_key.clone(), Entry { def, id });
        self.bump_revision();
        Ok(id)
    }

    /// Removes the registration `id` of `key`.
    ///
    /// Returns `None`, and changes nothing, if `key` is not registered or is
    /// currently held by a different registration.
    pub fn unregister(&mut self, key: &str, id: RegistrationId) -> Option<ItemDef> {
        let held = self.items.get(key).is_some_and(|entry| entry.id == id);
        if held { self.remove(key) } else { None }
    }

    /// Removes `key` regardless of which registration holds it.
    pub fn remove(&mut self, key: &str) -> Option<ItemDef> {
        let entry = self.items.shift_remove(key)?;
        if let Some(item_pos) = entry.def.item_pos {
            self.explicit.remove(&item_pos);
        }
        self.bump_revision();
        Some(entry.def)
    }

    /// Updates the label, kind or disabled flag of a live registration.
    ///
    /// The key and explicit ordinal of an item cannot change in place; those
    /// require unregistering and registering again. Returns `false` if `id` no
    /// longer holds `key`.
    pub fn update(
        &mut self,
        key: &str,
        id: RegistrationId,
        f: impl FnOnce(&mut ItemDef),
    ) -> bool {
        let Some(entry) = self.items.get_mut(key) else {
            return false;
        };
        if entry.id != id {
            return false;
        }
        let before = entry.def.clone();
        f(&mut entry.def);
        entry.def.item_key = before.item_key.clone();
        entry.def.item_pos = before.item_pos;
        if entry.def != before {
            self.bump_revision();
        }
        true
    }

    /// Removes every registration.
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.explicit.clear();
        self.bump_revision();
    }

    /// Returns the definition registered under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ItemDef> {
        self.items.get(key).map(|entry| &entry.def)
    }

    /// Returns `true` if `key` is registered.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// Returns the registration id currently holding `key`.
    #[must_use]
    pub fn registration_of(&self, key: &str) -> Option<RegistrationId> {
        self.items.get(key).map(|entry| entry.id)
    }

    /// Returns the effective ordinal of `key`.
    #[must_use]
    pub fn position_of(&self, key: &str) -> Option<usize> {
        let (index, _, entry) = self.items.get_full(key)?;
        Some(self.ordinal_of(index, entry))
    }

    /// Returns the key whose effective ordinal is `ordinal`.
    #[must_use]
    pub fn key_at(&self, ordinal: usize) -> Option<&ItemKey> {
        if let Some(key) = self.explicit.get(&ordinal) {
            return Some(key);
        }
        let rank = ordinal - self.explicit.range(..ordinal).count();
        if self.explicit.is_empty() {
            return self.items.get_index(rank).map(|(key, _)| key);
        }
        self.items
            .iter()
            .filter(|(_, entry)| entry.def.item_pos.is_none())
            .nth(rank)
            .map(|(key, _)| key)
    }

    /// One past the highest effective ordinal.
    ///
    /// Equal to [`total_items`](Self::total_items) unless explicit positions
    /// leave gaps.
    #[must_use]
    pub fn ordinal_len(&self) -> usize {
        let implicit = self.items.len() - self.explicit.len();
        let explicit_end = self.explicit.last_key_value().map_or(0, |(pos, _)| pos + 1);
        let implicit_end = implicit
            .checked_sub(1)
            .map_or(0, |rank| self.free_slot(rank) + 1);
        explicit_end.max(implicit_end)
    }

    /// Ordinal of the entry stored at `index`.
    fn ordinal_of(&self, index: usize, entry: &Entry) -> usize {
        if let Some(item_pos) = entry.def.item_pos {
            return item_pos;
        }
        if self.explicit.is_empty() {
            return index;
        }
        let rank = self
            .items
            .values()
            .take(index)
            .filter(|entry| entry.def.item_pos.is_none())
            .count();
        self.free_slot(rank)
    }

    /// The `rank`-th ordinal, counting from zero, that no explicit item claims.
    fn free_slot(&self, rank: usize) -> usize {
        let mut slot = rank;
        for &taken in self.explicit.keys() {
            if taken > slot {
                break;
            }
            slot += 1;
        }
        slot
    }

    /// Returns the first item addressed by `target`, using [`matches_target`].
    ///
    /// Negative indices count back from [`ordinal_len`](Self::ordinal_len).
    #[must_use]
    pub fn find(&self, target: &ItemTarget) -> Option<RegisteredItem<'_>> {
        let total = Some(self.ordinal_len());
        match target {
            ItemTarget::Key(key) => self.item(key.as_str()),
            ItemTarget::Index(_) => self
                .iter()
                .find(|item| matches_target(target, item.address(), total)),
        }
    }

    /// Returns the registered item for `key`.
    #[must_use]
    pub fn item(&self, key: &str) -> Option<RegisteredItem<'_>> {
        let (index, _, entry) = self.items.get_full(key)?;
        Some(RegisteredItem {
            def: &entry.def,
            item_pos: self.ordinal_of(index, entry),
            id: entry.id,
        })
    }

    /// Iterates registered items in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = RegisteredItem<'_>> + '_ {
        let mut rank = 0;
        let mut items: Vec<RegisteredItem<'_>> = self
            .items
            .values()
            .map(|entry| {
                let item_pos = entry.def.item_pos.unwrap_or_else(|| {
                    rank += 1;
                    self.free_slot(rank - 1)
                });
                RegisteredItem {
                    def: &entry.def,
                    item_pos,
                    id: entry.id,
                }
            })
            .collect();
        if !self.explicit.is_empty() {
            items.sort_by_key(|item| item.item_pos);
        }
        items.into_iter()
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl VirtualItemKeys for ItemRegistry {
    type Key = ItemKey;

    fn len(&self) -> usize {
        self.ordinal_len()
    }

    fn at(&self, index: usize) -> Option<&ItemKey> {
        self.key_at(index)
    }

    fn index_of(&self, key: &ItemKey) -> Option<usize> {
        self.position_of(key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_positions_order_iteration() {
        let mut registry = ItemRegistry::new();
        registry.register(ItemDef::new("c").with_item_pos(2)).unwrap();
        registry.register(ItemDef::new("a").with_item_pos(0)).unwrap();
        registry.register(ItemDef::new("b").with_item_pos(1)).unwrap();

        let keys: Vec<&str> = registry.iter().map(|item| item.key().as_str()).collect();
        assert_eq!(keys, ["a", "b", "c"]);
        assert_eq!(registry.key_at(0).map(ItemKey::as_str), Some("a"));
        assert_eq!(registry.position_of("c"), Some(2));
    }

    #[test]
    fn implicit_items_fill_the_free_ordinals() {
        let mut registry = ItemRegistry::new();
        registry.register(ItemDef::new("a")).unwrap();
        registry.register(ItemDef::new("b").with_item_pos(0)).unwrap();
        registry.register(ItemDef::new("c")).unwrap();

        assert_eq!(registry.position_of("b"), Some(0));
        assert_eq!(registry.position_of("a"), Some(1));
        assert_eq!(registry.position_of("c"), Some(2));
        assert_eq!(registry.key_at(1).map(ItemKey::as_str), Some("a"));
        assert_eq!(registry.ordinal_len(), 3);

        registry.remove("b");
        assert_eq!(registry.position_of("a"), Some(0));
        assert_eq!(registry.key_at(1).map(ItemKey::as_str), Some("c"));
    }

    #[test]
    fn sparse_positions_leave_unnamed_ordinals() {
        let mut registry = ItemRegistry::new();
        registry.register(ItemDef::new("row-100").with_item_pos(100)).unwrap();
        registry.register(ItemDef::new("row-101").with_item_pos(101)).unwrap();

        assert_eq!(registry.total_items(), 2);
        assert_eq!(VirtualItemKeys::len(&registry), 102);
        assert_eq!(registry.key_at(0), None);
        assert_eq!(registry.key_at(100).map(ItemKey::as_str), Some("row-100"));
        assert_eq!(registry.index_of(&ItemKey::from("row-101")), Some(101));
        assert_eq!(registry.find(&ItemTarget::LAST).map(|item| item.item_pos), Some(101));
    }

    #[test]
    fn duplicate_position_is_rejected() {
        let mut registry = ItemRegistry::new();
        registry.register(ItemDef::new("a").with_item_pos(3)).unwrap();
        let err = registry
            .register(ItemDef::new("b").with_item_pos(3))
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicatePosition {
                key: ItemKey::from("b"),
                item_pos: 3,
                existing: ItemKey::from("a"),
            }
        );
        assert!(!registry.contains("b"));
    }

    #[test]
    fn update_keeps_identity() {
        let mut registry = ItemRegistry::new();
        let id = registry.register(ItemDef::new("a")).unwrap();
        let rev = registry.revision();
        assert!(registry.update("a", id, |def| {
            def.disabled = true;
            def.item_key = ItemKey::from("hijacked");
        }));
        assert!(registry.revision() > rev);
        let def = registry.get("a").unwrap();
        assert!(def.disabled);
        assert_eq!(def.item_key, "a");
    }

    #[test]
    fn find_by_negative_index() {
        let mut registry = ItemRegistry::new();
        for key in ["x", "y", "z"] {
            registry.register(ItemDef::new(key)).unwrap();
        }
        let found = registry.find(&ItemTarget::LAST).unwrap();
        assert_eq!(found.key().as_str(), "z");
        assert!(registry.find(&ItemTarget::Index(-4)).is_none());
        assert!(registry.find(&ItemTarget::from("gone")).is_none());
    }
}
