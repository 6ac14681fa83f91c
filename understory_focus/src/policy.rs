// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation intents and focus policies.

use understory_item_registry::ItemTarget;

use crate::FocusSpace;

/// A navigation intent, usually mapped from a key press.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Next item in ordinal order (ArrowDown / ArrowRight).
    Next,
    /// Previous item in ordinal order (ArrowUp / ArrowLeft).
    Prev,
    /// First item (Home).
    First,
    /// Last item (End).
    Last,
}

/// What happens when `Next`/`Prev` runs off either end.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WrapMode {
    /// Stay on the boundary item.
    #[default]
    Clamp,
    /// Continue from the opposite end.
    Wrap,
}

/// Chooses the next focus target.
pub trait FocusPolicy {
    /// Returns the target focus should move to from `current`, or `None` if
    /// there is nothing to focus.
    ///
    /// `current` may be stale (its item gone); policies treat that like no
    /// focus at all.
    fn next(
        &self,
        current: Option<&ItemTarget>,
        nav: Navigation,
        space: &FocusSpace<'_>,
    ) -> Option<ItemTarget>;
}

/// Linear list policy.
///
/// - `Next` from no focus goes to the first item, `Prev` from no focus to the last.
/// - `First`/`Last` jump to the ends.
/// - At the ends, `wrap` decides between clamping and wrapping around.
/// - With `skip_disabled`, disabled items are stepped over. If every candidate
///   in the direction of travel is disabled, focus stays where it is; `First`
///   and `Last` fall back to the plain end item.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefaultPolicy {
    /// Behavior at the ends of the list.
    pub wrap: WrapMode,
    /// Step over disabled items.
    pub skip_disabled: bool,
}

impl DefaultPolicy {
    /// Ordinal-level decision behind [`FocusPolicy::next`].
    #[must_use]
    pub fn next_ordinal(
        &self,
        current: Option<usize>,
        nav: Navigation,
        space: &FocusSpace<'_>,
    ) -> Option<usize> {
        let last = space.len().checked_sub(1)?;
        let usable = |ordinal: usize| !self.skip_disabled || space.is_enabled(ordinal);

        match (nav, current) {
            (Navigation::First, _) | (Navigation::Next, None) => {
                Some((0..=last).find(|&o| usable(o)).unwrap_or(0))
            }
            (Navigation::Last, _) | (Navigation::Prev, None) => {
                Some((0..=last).rev().find(|&o| usable(o)).unwrap_or(last))
            }
            (Navigation::Next, Some(current)) => {
                let current = current.min(last);
                let ahead = current + 1..=last;
                let wrapped = match self.wrap {
                    WrapMode::Clamp => 0..0,
                    WrapMode::Wrap => 0..current,
                };
                Some(
                    ahead
                        .chain(wrapped)
                        .find(|&o| usable(o))
                        .unwrap_or(current),
                )
            }
            (Navigation::Prev, Some(current)) => {
                let current = current.min(last);
                let behind = (0..current).rev();
                let wrapped = match self.wrap {
                    WrapMode::Clamp => (0..0).rev(),
                    WrapMode::Wrap => (current + 1..last + 1).rev(),
                };
                Some(
                    behind
                        .chain(wrapped)
                        .find(|&o| usable(o))
                        .unwrap_or(current),
                )
            }
        }
    }
}

impl FocusPolicy for DefaultPolicy {
    fn next(
        &self,
        current: Option<&ItemTarget>,
        nav: Navigation,
        space: &FocusSpace<'_>,
    ) -> Option<ItemTarget> {
        let current = current.and_then(|target| space.resolve(target));
        let ordinal = self.next_ordinal(current, nav, space)?;
        log::trace!("focus {nav:?}: {current:?} -> {ordinal}");
        Some(space.target_for(ordinal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use understory_item_registry::{ItemDef, ItemKey, ItemRegistry};

    fn registry(disabled: &[&str]) -> ItemRegistry {
        let mut registry = ItemRegistry::new();
        for key in ["a", "b", "c", "d"] {
            registry
                .register(ItemDef::new(key).with_disabled(disabled.contains(&key)))
                .unwrap();
        }
        registry
    }

    fn walk(
        policy: DefaultPolicy,
        registry: &ItemRegistry,
        from: usize,
        nav: Navigation,
    ) -> usize {
        let space = FocusSpace::from_registry(registry);
        policy.next_ordinal(Some(from), nav, &space).unwrap()
    }

    #[test]
    fn clamp_stays_on_boundaries() {
        let reg = registry(&[]);
        let policy = DefaultPolicy::default();
        assert_eq!(walk(policy, &reg, 3, Navigation::Next), 3);
        assert_eq!(walk(policy, &reg, 0, Navigation::Prev), 0);
        assert_eq!(walk(policy, &reg, 1, Navigation::Next), 2);
    }

    #[test]
    fn wrap_goes_around() {
        let reg = registry(&[]);
        let policy = DefaultPolicy {
            wrap: WrapMode::Wrap,
            skip_disabled: false,
        };
        assert_eq!(walk(policy, &reg, 3, Navigation::Next), 0);
        assert_eq!(walk(policy, &reg, 0, Navigation::Prev), 3);
    }

    #[test]
    fn skip_disabled_steps_over() {
        let reg = registry(&["b", "c"]);
        let policy = DefaultPolicy {
            wrap: WrapMode::Clamp,
            skip_disabled: true,
        };
        assert_eq!(walk(policy, &reg, 0, Navigation::Next), 3);
        assert_eq!(walk(policy, &reg, 3, Navigation::Prev), 0);
    }

    #[test]
    fn skip_disabled_with_nothing_ahead_stays() {
        let reg = registry(&["c", "d"]);
        let policy = DefaultPolicy {
            wrap: WrapMode::Clamp,
            skip_disabled: true,
        };
        assert_eq!(walk(policy, &reg, 1, Navigation::Next), 1);
        let space = FocusSpace::from_registry(&reg);
        assert_eq!(policy.next_ordinal(None, Navigation::Last, &space), Some(1));
    }

    #[test]
    fn all_disabled_end_jumps_fall_back_to_ends() {
        let reg = registry(&["a", "b", "c", "d"]);
        let policy = DefaultPolicy {
            wrap: WrapMode::Wrap,
            skip_disabled: true,
        };
        let space = FocusSpace::from_registry(&reg);
        assert_eq!(policy.next_ordinal(None, Navigation::First, &space), Some(0));
        assert_eq!(policy.next_ordinal(None, Navigation::Last, &space), Some(3));
    }

    #[test]
    fn empty_space_has_no_target() {
        let reg = ItemRegistry::new();
        let space = FocusSpace::from_registry(&reg);
        assert_eq!(
            DefaultPolicy::default().next(None, Navigation::Next, &space),
            None
        );
    }

    #[test]
    fn unnamed_ordinals_become_index_targets() {
        // A sparse window: ordinal 1 is known to exist but has no key yet.
        struct Sparse(Vec<Option<ItemKey>>);
        impl understory_virtual_list::VirtualItemKeys for Sparse {
            type Key = ItemKey;
            fn len(&self) -> usize {
                self.0.len()
            }
            fn at(&self, index: usize) -> Option<&ItemKey> {
                self.0.get(index)?.as_ref()
            }
            fn index_of(&self, key: &ItemKey) -> Option<usize> {
                self.0.iter().position(|k| k.as_ref() == Some(key))
            }
        }
        let window = Sparse(alloc::vec![Some(ItemKey::from("a")), None]);
        let space = FocusSpace::new(&window, &(), Some(2));
        let target = DefaultPolicy::default().next(
            Some(&ItemTarget::from("a")),
            Navigation::Next,
            &space,
        );
        assert_eq!(target, Some(ItemTarget::Index(1)));
    }
}
