// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controlled and uncontrolled ownership of a selection value.

/// A value with a revision counter that bumps on every real change.
pub trait Revisioned {
    /// The current revision.
    fn revision(&self) -> u64;
}

/// Who owns a [`Control`]'s value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ControlMode {
    /// The owner holds the value; changes are only proposed.
    Controlled,
    /// The control holds the value and applies changes itself.
    Uncontrolled,
}

/// Errors from [`Control`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ControlError {
    /// [`Control::sync`] was called on an uncontrolled value.
    #[error("cannot sync an uncontrolled selection; it owns its value")]
    NotControlled,
    /// Both a controlled value and a default value were supplied.
    #[error("a selection is either controlled or seeded with a default, not both")]
    Conflicting,
}

/// A selection value plus the rule for who may change it.
///
/// The mode is chosen once, by the constructor, and never changes.
#[derive(Clone, Debug)]
pub struct Control<S> {
    mode: ControlMode,
    value: S,
    /// Last proposal of a controlled value, until the owner syncs.
    proposed: Option<S>,
}

impl<S> Control<S> {
    /// A value owned elsewhere. `value` is the owner's current value.
    #[must_use]
    pub const fn controlled(value: S) -> Self {
        Self {
            mode: ControlMode::Controlled,
            value,
            proposed: None,
        }
    }

    /// A value owned by the control, starting from `default_value`.
    #[must_use]
    pub const fn uncontrolled(default_value: S) -> Self {
        Self {
            mode: ControlMode::Uncontrolled,
            value: default_value,
            proposed: None,
        }
    }

    /// Picks the mode from which values the owner supplied.
    ///
    /// `selected` makes the control controlled, `default_value` seeds an
    /// uncontrolled one, and neither seeds an uncontrolled one with
    /// `S::default()`.
    ///
    /// # Errors
    ///
    /// [`ControlError::Conflicting`] if both are supplied.
    pub fn from_values(selected: Option<S>, default_value: Option<S>) -> Result<Self, ControlError>
    where
        S: Default,
    {
        match (selected, default_value) {
            (Some(_), Some(_)) => Err(ControlError::Conflicting),
            (Some(value), None) => Ok(Self::controlled(value)),
            (None, default_value) => Ok(Self::uncontrolled(default_value.unwrap_or_default())),
        }
    }

    /// The ownership mode.
    #[must_use]
    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Returns `true` if the value is owned elsewhere.
    #[must_use]
    pub fn is_controlled(&self) -> bool {
        self.mode == ControlMode::Controlled
    }

    /// The current value.
    #[must_use]
    pub fn value(&self) -> &S {
        &self.value
    }

    /// Replaces the value with the owner's latest one.
    ///
    /// # Errors
    ///
    /// [`ControlError::NotControlled`] if this control owns its value.
    pub fn sync(&mut self, value: S) -> Result<(), ControlError> {
        if !self.is_controlled() {
            log::warn!("sync called on an uncontrolled selection");
            return Err(ControlError::NotControlled);
        }
        self.value = value;
        self.proposed = None;
        Ok(())
    }

    /// The last proposal the owner has not synced yet. Always `None` when
    /// uncontrolled.
    #[must_use]
    pub fn proposed(&self) -> Option<&S> {
        self.proposed.as_ref()
    }
}

impl<S: Clone> Control<S> {
    /// Applies the owner's latest value on top of the last proposal.
    ///
    /// `apply` starts from the pending proposal, or from the current value
    /// when there is none, and rewrites it to match the owner. State the
    /// owner's value does not carry, such as a range anchor, comes along.
    ///
    /// # Errors
    ///
    /// [`ControlError::NotControlled`] if this control owns its value.
    pub fn sync_with<F>(&mut self, apply: F) -> Result<(), ControlError>
    where
        F: FnOnce(&mut S),
    {
        if !self.is_controlled() {
            log::warn!("sync called on an uncontrolled selection");
            return Err(ControlError::NotControlled);
        }
        let mut next = self.proposed.take().unwrap_or_else(|| self.value.clone());
        apply(&mut next);
        self.value = next;
        Ok(())
    }
}

impl<S: Clone + Revisioned> Control<S> {
    /// Runs `change` against a copy of the value.
    ///
    /// Returns the changed copy, or `None` if `change` left the revision
    /// untouched. An uncontrolled control also adopts the copy; a controlled
    /// one keeps its value until [`sync`](Self::sync).
    pub fn propose<F>(&mut self, change: F) -> Option<S>
    where
        F: FnOnce(&mut S),
    {
        let mut next = self.value.clone();
        change(&mut next);
        if next.revision() == self.value.revision() {
            return None;
        }
        match self.mode {
            ControlMode::Uncontrolled => self.value = next.clone(),
            ControlMode::Controlled => self.proposed = Some(next.clone()),
        }
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Selection, SingleSelection};

    #[test]
    fn uncontrolled_applies_changes() {
        let mut control = Control::uncontrolled(Selection::new());
        let next = control.propose(|s| {
            s.toggle(1_u32);
        });
        assert_eq!(next.map(|s| s.len()), Some(1));
        assert!(control.value().contains(&1));
    }

    #[test]
    fn controlled_only_proposes() {
        let mut control = Control::controlled(Selection::new());
        let next = control
            .propose(|s| {
                s.toggle(1_u32);
            })
            .unwrap();
        assert!(next.contains(&1));
        assert!(control.value().is_empty());
        control.sync(next).unwrap();
        assert!(control.value().contains(&1));
    }

    #[test]
    fn no_op_changes_propose_nothing() {
        let mut control = Control::uncontrolled(SingleSelection::with_value(Some(5)));
        let next = control.propose(|s| {
            s.select(Some(5));
        });
        assert!(next.is_none());
    }

    #[test]
    fn from_values_picks_mode() {
        let control = Control::from_values(Some(SingleSelection::with_value(Some(1))), None);
        assert!(control.unwrap().is_controlled());
        let control = Control::<SingleSelection<u8>>::from_values(None, None).unwrap();
        assert_eq!(control.mode(), ControlMode::Uncontrolled);
        let both = Control::from_values(Some(Selection::<u8>::new()), Some(Selection::new()));
        assert_eq!(both.map(|_| ()), Err(ControlError::Conflicting));
    }

    #[test]
    fn sync_with_builds_on_the_pending_proposal() {
        let mut seed = Selection::new();
        seed.replace_with([1_u32]);
        let mut control = Control::controlled(seed);
        control.propose(|s| {
            s.toggle(4);
        });
        assert_eq!(control.proposed().and_then(Selection::anchor), Some(&4));

        control.sync_with(|s| s.set_items([1, 4])).unwrap();
        assert!(control.proposed().is_none());
        assert_eq!(control.value().items(), &[1, 4]);
        assert_eq!(control.value().anchor(), Some(&4));
    }

    #[test]
    fn sync_requires_controlled() {
        let mut control = Control::uncontrolled(SingleSelection::<u8>::new());
        assert_eq!(
            control.sync(SingleSelection::new()),
            Err(ControlError::NotControlled)
        );
        assert_eq!(control.mode(), ControlMode::Uncontrolled);
    }
}
