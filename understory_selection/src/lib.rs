// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_selection --heading-base-level=0

//! Understory Selection: selection state for lists.
//!
//! This crate keeps the _bookkeeping_ of a list selection. It does not know
//! how items are drawn; ordering questions (which keys lie between two others)
//! are answered by a [`VirtualItemKeys`](understory_virtual_list::VirtualItemKeys)
//! window passed in by the caller.
//!
//! There are two containers:
//!
//! - [`SingleSelection`]: at most one value. Selecting the value that is
//!   already selected is a no-op.
//! - [`Selection`]: a set of keys with a **primary** key (the most recently
//!   selected one) and an **anchor** key (the pivot for range extension).
//!
//! Both carry a revision counter that bumps only when their contents change,
//! and both implement [`Revisioned`], which is what [`Control`] uses to tell
//! real changes from no-ops.
//!
//! [`Control`] decides who owns the value. An _uncontrolled_ control owns it
//! and applies every change. A _controlled_ control only proposes changes; the
//! owner decides and reports back with [`Control::sync`]. The mode is fixed at
//! construction.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_selection::Selection;
//! use understory_virtual_list::KeyWindow;
//!
//! let window = KeyWindow::from_keys(["a", "b", "c", "d", "e"]);
//! let mut selection = Selection::new();
//!
//! // Click on "b".
//! selection.select_only("b");
//! // Shift-click on "d": everything from the anchor to "d".
//! selection.extend_range("d", &window);
//! assert_eq!(selection.items(), &["b", "c", "d"]);
//!
//! // Ctrl-click twice is a round trip.
//! selection.toggle("e");
//! selection.toggle("e");
//! assert_eq!(selection.items(), &["b", "c", "d"]);
//! ```
//!
//! ## Controlled selection
//!
//! ```rust
//! use understory_selection::{Control, ControlError, SingleSelection};
//!
//! let mut control = Control::controlled(SingleSelection::<&str>::new());
//! // The user picks "x"; the proposal is returned but not applied.
//! let proposed = control.propose(|s| {
//!     s.select(Some("x"));
//! });
//! assert_eq!(proposed.unwrap().selected(), Some(&"x"));
//! assert_eq!(control.value().selected(), None);
//!
//! // The owner accepts and syncs back.
//! control.sync(SingleSelection::with_value(Some("x"))).unwrap();
//! assert_eq!(control.value().selected(), Some(&"x"));
//!
//! let mut owned = Control::uncontrolled(SingleSelection::<&str>::new());
//! assert_eq!(owned.sync(SingleSelection::new()), Err(ControlError::NotControlled));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod control;
mod multi;
mod single;

pub use control::{Control, ControlError, ControlMode, Revisioned};
pub use multi::Selection;
pub use single::SingleSelection;
