// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus state for a single list.

use understory_item_registry::{ItemAddress, ItemKey, ItemTarget, matches_target};

use crate::{FocusPolicy, FocusSpace, Navigation};

/// What to do with focus when the focused item goes away.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StaleFocusPolicy {
    /// Keep the target. It resolves to nothing until a matching item registers again.
    #[default]
    Retain,
    /// Drop focus.
    Clear,
    /// Move to the item now occupying the removed ordinal (or the new last item).
    Nearest,
}

/// At most one focused item, addressed by an [`ItemTarget`].
///
/// The state is only the target; whether it currently resolves is always a
/// question asked of a [`FocusSpace`] at query time. A revision counter bumps
/// whenever the target changes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListFocus {
    focused: Option<ItemTarget>,
    revision: u64,
}

impl ListFocus {
    /// Creates an unfocused state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            focused: None,
            revision: 0,
        }
    }

    /// The current target, which may be stale.
    #[must_use]
    pub fn focused(&self) -> Option<&ItemTarget> {
        self.focused.as_ref()
    }

    /// Revision counter; bumps only when the target changes.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Sets the target, returning `true` if it changed.
    pub fn set(&mut self, target: Option<ItemTarget>) -> bool {
        if self.focused == target {
            return false;
        }
        self.focused = target;
        self.revision = self.revision.wrapping_add(1);
        true
    }

    /// Clears focus, returning `true` if something was focused.
    pub fn clear(&mut self) -> bool {
        self.set(None)
    }

    /// Applies `nav` under `policy`, returning `true` if the target changed.
    pub fn navigate<P>(&mut self, policy: &P, nav: Navigation, space: &FocusSpace<'_>) -> bool
    where
        P: FocusPolicy + ?Sized,
    {
        match policy.next(self.focused.as_ref(), nav, space) {
            Some(target) => self.set(Some(target)),
            None => false,
        }
    }

    /// Resolves the target to an ordinal of `space`.
    #[must_use]
    pub fn resolve_ordinal(&self, space: &FocusSpace<'_>) -> Option<usize> {
        space.resolve(self.focused.as_ref()?)
    }

    /// Resolves the target to a key of `space`.
    #[must_use]
    pub fn resolve_key<'s>(&self, space: &FocusSpace<'s>) -> Option<&'s ItemKey> {
        let window = space.window;
        window.at(self.resolve_ordinal(space)?)
    }

    /// Returns `true` if the focused target addresses `key` in `space`.
    ///
    /// A key that is not in `space` is never focused, even if the target
    /// names it.
    #[must_use]
    pub fn is_focused(&self, key: &ItemKey, space: &FocusSpace<'_>) -> bool {
        let Some(target) = &self.focused else {
            return false;
        };
        let Some(item_pos) = space.window.index_of(key) else {
            return false;
        };
        let item = ItemAddress {
            key,
            item_pos: Some(item_pos),
        };
        matches_target(target, item, space.total_items)
    }

    /// Applies `policy` after the item at `removed_ordinal` left the list.
    ///
    /// Only acts when the target no longer resolves in `space`. Returns `true`
    /// if the target changed.
    pub fn reconcile(
        &mut self,
        policy: StaleFocusPolicy,
        removed_ordinal: Option<usize>,
        space: &FocusSpace<'_>,
    ) -> bool {
        if self.focused.is_none() || self.resolve_ordinal(space).is_some() {
            return false;
        }
        match policy {
            StaleFocusPolicy::Retain => false,
            StaleFocusPolicy::Clear => self.clear(),
            StaleFocusPolicy::Nearest => {
                let target = space
                    .len()
                    .checked_sub(1)
                    .map(|last| removed_ordinal.unwrap_or(0).min(last))
                    .map(|ordinal| space.target_for(ordinal));
                log::debug!("focused item left the list, moving focus to {target:?}");
                self.set(target)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DefaultPolicy;
    use understory_item_registry::{ItemDef, ItemRegistry};

    fn registry(keys: &[&str]) -> ItemRegistry {
        let mut registry = ItemRegistry::new();
        for key in keys {
            registry.register(ItemDef::new(*key)).unwrap();
        }
        registry
    }

    #[test]
    fn set_bumps_revision_only_on_change() {
        let mut focus = ListFocus::new();
        assert!(focus.set(Some(ItemTarget::from("a"))));
        assert_eq!(focus.revision(), 1);
        assert!(!focus.set(Some(ItemTarget::from("a"))));
        assert_eq!(focus.revision(), 1);
        assert!(focus.clear());
        assert!(!focus.clear());
    }

    #[test]
    fn stale_target_resolves_to_nothing() {
        let mut reg = registry(&["a", "b"]);
        let mut focus = ListFocus::new();
        focus.set(Some(ItemTarget::from("b")));
        reg.remove("b");
        let space = FocusSpace::from_registry(&reg);
        assert_eq!(focus.resolve_ordinal(&space), None);
        assert!(!focus.is_focused(&ItemKey::from("b"), &space));
        // Retained target is still there.
        assert_eq!(focus.focused(), Some(&ItemTarget::from("b")));
    }

    #[test]
    fn next_from_stale_target_starts_over() {
        let reg = registry(&["a", "b", "c"]);
        let space = FocusSpace::from_registry(&reg);
        let mut focus = ListFocus::new();
        focus.set(Some(ItemTarget::from("gone")));
        focus.navigate(&DefaultPolicy::default(), Navigation::Next, &space);
        assert_eq!(focus.resolve_key(&space), Some(&ItemKey::from("a")));
    }

    #[test]
    fn reconcile_policies() {
        let mut reg = registry(&["a", "b", "c"]);
        let removed = reg.position_of("c");
        reg.remove("c");
        let space = FocusSpace::from_registry(&reg);

        let mut retain = ListFocus::new();
        retain.set(Some(ItemTarget::from("c")));
        assert!(!retain.reconcile(StaleFocusPolicy::Retain, removed, &space));
        assert_eq!(retain.focused(), Some(&ItemTarget::from("c")));

        let mut clear = retain.clone();
        assert!(clear.reconcile(StaleFocusPolicy::Clear, removed, &space));
        assert_eq!(clear.focused(), None);

        let mut nearest = retain.clone();
        assert!(nearest.reconcile(StaleFocusPolicy::Nearest, removed, &space));
        assert_eq!(nearest.focused(), Some(&ItemTarget::from("b")));
    }

    #[test]
    fn index_targets_are_focused_by_position() {
        let reg = registry(&["a", "b", "c"]);
        let space = FocusSpace::from_registry(&reg);
        let mut focus = ListFocus::new();
        focus.set(Some(ItemTarget::LAST));
        assert!(focus.is_focused(&ItemKey::from("c"), &space));
        assert!(!focus.is_focused(&ItemKey::from("a"), &space));
    }
}
