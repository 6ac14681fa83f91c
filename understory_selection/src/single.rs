// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single selection.

use crate::Revisioned;

/// At most one selected value, plus a revision counter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SingleSelection<T> {
    selected: Option<T>,
    revision: u64,
}

impl<T> Default for SingleSelection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SingleSelection<T> {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selected: None,
            revision: 0,
        }
    }

    /// Creates a selection seeded with `selected`, at revision zero.
    #[must_use]
    pub const fn with_value(selected: Option<T>) -> Self {
        Self {
            selected,
            revision: 0,
        }
    }

    /// The selected value.
    #[must_use]
    pub fn selected(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }

    /// Revision counter; bumps only on change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Takes the selected value out, leaving the selection empty.
    pub fn take(&mut self) -> Option<T> {
        let taken = self.selected.take();
        if taken.is_some() {
            self.revision = self.revision.wrapping_add(1);
        }
        taken
    }
}

impl<T: PartialEq> SingleSelection<T> {
    /// Replaces the selected value. Returns `true` if it changed.
    ///
    /// Selecting the value that is already selected does nothing.
    pub fn select(&mut self, value: Option<T>) -> bool {
        if self.selected == value {
            return false;
        }
        self.selected = value;
        self.revision = self.revision.wrapping_add(1);
        true
    }

    /// Clears the selection. Returns `true` if something was selected.
    pub fn clear(&mut self) -> bool {
        self.select(None)
    }

    /// Returns `true` if `value` is the selected value.
    #[must_use]
    pub fn is_selected(&self, value: &T) -> bool {
        self.selected.as_ref() == Some(value)
    }
}

impl<T> Revisioned for SingleSelection<T> {
    fn revision(&self) -> u64 {
        self.revision
    }
}
