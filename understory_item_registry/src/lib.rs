// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_item_registry --heading-base-level=0

//! Understory Item Registry: dynamic item registration and target resolution.
//!
//! List-like widgets (list boxes, combo boxes, menus, segmented controls) are
//! built from item components that come and go as the list is filtered,
//! scrolled, or paged. This crate keeps the bookkeeping for that:
//!
//! - [`ItemKey`]: an opaque, caller-assigned string identifying an item.
//! - [`ItemTarget`]: an abstract address, either a key or a signed ordinal
//!   (`-1` is the last item).
//! - [`ItemDef`]: what an item tells the list about itself when it registers.
//! - [`ItemRegistry`]: the ordered `ItemKey → ItemDef` map, with
//!   generation-stamped [`RegistrationId`]s so a stale disposer can never
//!   remove a newer registration of the same key.
//! - [`matches_target`]: the single pure predicate that decides whether a
//!   target addresses an item. Focus and selection both go through it, so the
//!   two always agree on what a target means.
//!
//! The registry implements [`VirtualItemKeys`](understory_virtual_list::VirtualItemKeys),
//! so fully materialized lists can be navigated with the same code as virtual
//! ones.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_item_registry::{ItemDef, ItemRegistry, ItemTarget};
//!
//! let mut registry = ItemRegistry::new();
//! for n in 1..=5 {
//!     registry.register(ItemDef::new(format!("item-{n}"))).unwrap();
//! }
//! assert_eq!(registry.total_items(), 5);
//!
//! // `-2` addresses the second-to-last item.
//! let key = ItemTarget::Index(-2).resolve_key_in(&registry);
//! assert_eq!(key.map(|k| k.as_str()), Some("item-4"));
//!
//! // Registering a live key again is rejected; the first registrant wins.
//! assert!(registry.register(ItemDef::new("item-1")).is_err());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod item;
mod key;
mod registry;
mod target;

pub use item::{ItemDef, ItemKind};
pub use key::ItemKey;
pub use registry::{ItemRegistry, RegisteredItem, RegistrationId, RegistryError};
pub use target::{ItemAddress, ItemTarget, matches_target};
