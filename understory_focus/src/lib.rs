// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_focus --heading-base-level=0

//! Understory Focus: keyboard focus navigation for linear lists.
//!
//! This crate decides *where focus goes next* in a list, given a snapshot of
//! the list and a navigation intent. It does not render focus rings or listen
//! to keyboards; hosts translate key presses into [`Navigation`] values and
//! apply the result.
//!
//! The main pieces are:
//!
//! - [`FocusSpace`]: the snapshot a decision is made over. It pairs a
//!   [`VirtualItemKeys`](understory_virtual_list::VirtualItemKeys) window
//!   (the item order) with a [`FocusPropsLookup`] (which items are disabled)
//!   and the total item count used to resolve negative targets.
//! - [`FocusPolicy`] and its [`DefaultPolicy`] implementation, configured with a
//!   [`WrapMode`] and whether disabled items are skipped.
//! - [`ListFocus`]: the focus state itself, an `Option<ItemTarget>` plus a
//!   revision counter, with helpers to navigate, resolve, and reconcile after
//!   the focused item unregisters ([`StaleFocusPolicy`]).
//!
//! Disabled items are focusable by default. Skipping them is a policy choice
//! ([`DefaultPolicy::skip_disabled`]).
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_focus::{DefaultPolicy, FocusSpace, ListFocus, Navigation, WrapMode};
//! use understory_item_registry::{ItemDef, ItemRegistry};
//!
//! let mut registry = ItemRegistry::new();
//! for key in ["apple", "banana", "cherry"] {
//!     registry.register(ItemDef::new(key)).unwrap();
//! }
//!
//! let space = FocusSpace::from_registry(&registry);
//! let policy = DefaultPolicy { wrap: WrapMode::Clamp, skip_disabled: false };
//! let mut focus = ListFocus::new();
//!
//! // Nothing focused yet: `Next` lands on the first item.
//! focus.navigate(&policy, Navigation::Next, &space);
//! assert_eq!(focus.resolve_key(&space).map(|k| k.as_str()), Some("apple"));
//!
//! // `Last`, then `Next` clamps at the end.
//! focus.navigate(&policy, Navigation::Last, &space);
//! focus.navigate(&policy, Navigation::Next, &space);
//! assert_eq!(focus.resolve_key(&space).map(|k| k.as_str()), Some("cherry"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod policy;
mod space;
mod state;

pub use policy::{DefaultPolicy, FocusPolicy, Navigation, WrapMode};
pub use space::{FocusProps, FocusPropsLookup, FocusSpace};
pub use state::{ListFocus, StaleFocusPolicy};
