// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_item_registry::RegistryError;
use understory_selection::ControlError;

use crate::SelectionMode;

/// Errors surfaced by list providers and their handles.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// A list context was requested outside of any provider.
    #[error("list context used outside of a list provider")]
    MissingProvider,
    /// The item registry rejected a registration.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// Controlled/uncontrolled selection misuse.
    #[error(transparent)]
    Control(#[from] ControlError),
    /// A selection value of the wrong shape for the list's mode.
    #[error("selection value does not fit a {expected:?} selection list")]
    SelectionMode {
        /// The mode the list was built with.
        expected: SelectionMode,
    },
    /// The provider behind a handle has been dropped.
    #[error("the list provider has been dropped")]
    ProviderDropped,
}
