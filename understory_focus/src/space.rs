// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The snapshot focus decisions are made over.

use core::fmt;

use understory_item_registry::{ItemKey, ItemRegistry, ItemTarget};
use understory_virtual_list::VirtualItemKeys;

/// Per-item focus properties.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FocusProps {
    /// Whether the item is enabled. Disabled items are still focusable unless
    /// the policy skips them.
    pub enabled: bool,
}

impl Default for FocusProps {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Lookup for per-item [`FocusProps`].
///
/// `key` is `None` for ordinals the window cannot name yet (rows of a lazy
/// list that have not been fetched).
pub trait FocusPropsLookup {
    /// Return focus properties for the item at `ordinal`.
    fn props(&self, ordinal: usize, key: Option<&ItemKey>) -> FocusProps;
}

/// Every item is enabled.
impl FocusPropsLookup for () {
    fn props(&self, _ordinal: usize, _key: Option<&ItemKey>) -> FocusProps {
        FocusProps::default()
    }
}

/// Registered items report their `disabled` flag; unregistered keys are enabled.
impl FocusPropsLookup for ItemRegistry {
    fn props(&self, _ordinal: usize, key: Option<&ItemKey>) -> FocusProps {
        key.and_then(|key| self.get(key.as_str()))
            .map(|def| FocusProps {
                enabled: !def.disabled,
            })
            .unwrap_or_default()
    }
}

/// A view of a list for focus navigation.
#[derive(Clone, Copy)]
pub struct FocusSpace<'a> {
    /// Item order.
    pub window: &'a dyn VirtualItemKeys<Key = ItemKey>,
    /// Per-item properties.
    pub props: &'a dyn FocusPropsLookup,
    /// Total used to resolve negative targets; `None` while unknown.
    pub total_items: Option<usize>,
}

impl<'a> FocusSpace<'a> {
    /// Creates a space over an arbitrary window.
    #[must_use]
    pub fn new(
        window: &'a dyn VirtualItemKeys<Key = ItemKey>,
        props: &'a dyn FocusPropsLookup,
        total_items: Option<usize>,
    ) -> Self {
        Self {
            window,
            props,
            total_items,
        }
    }

    /// Creates a space over a fully materialized registry.
    #[must_use]
    pub fn from_registry(registry: &'a ItemRegistry) -> Self {
        Self::new(registry, registry, Some(registry.ordinal_len()))
    }

    /// Number of addressable items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Returns `true` if there is nothing to focus.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Returns `true` if the item at `ordinal` is enabled.
    #[must_use]
    pub fn is_enabled(&self, ordinal: usize) -> bool {
        self.props.props(ordinal, self.window.at(ordinal)).enabled
    }

    /// Resolves `target` to an ordinal of this space.
    #[must_use]
    pub fn resolve(&self, target: &ItemTarget) -> Option<usize> {
        target.resolve_ordinal(self.window, self.total_items)
    }

    /// Returns the most stable target for `ordinal`: its key when the window
    /// can name it, the bare ordinal otherwise.
    #[must_use]
    pub fn target_for(&self, ordinal: usize) -> ItemTarget {
        match self.window.at(ordinal) {
            Some(key) => ItemTarget::Key(key.clone()),
            None => ItemTarget::Index(isize::try_from(ordinal).unwrap_or(isize::MAX)),
        }
    }
}

impl fmt::Debug for FocusSpace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusSpace")
            .field("len", &self.window.len())
            .field("total_items", &self.total_items)
            .finish_non_exhaustive()
    }
}
