// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_virtual_list --heading-base-level=0

//! Understory Virtual List: virtual item windows for keyboard-navigable lists.
//!
//! A list that only renders a slice of its rows (or that has not fetched all
//! of them yet) still needs to answer two questions for keyboard navigation:
//! "which key lives at ordinal `i`?" and "which ordinal does key `k` have?".
//! This crate provides a small, renderer-agnostic answer to both.
//!
//! The core concepts are:
//!
//! - [`VirtualItemKeys`]: a read-only addressing table with a length, an
//!   ordinal → key lookup ([`VirtualItemKeys::at`]) and a key → ordinal lookup
//!   ([`VirtualItemKeys::index_of`]). Implementations must keep the two lookups
//!   consistent: `index_of(at(i)) == Some(i)` for every `i < len()`.
//! - [`KeyWindow`]: a ready-made implementation backed by a `Vec` of keys plus
//!   a hash index, meant for lazy lists that append fetched pages over time.
//! - [`WindowIter`]: iterates `(ordinal, key)` pairs of any window.
//!
//! This crate deliberately does **not** know about widgets, fetching, or any
//! particular UI framework. Host frameworks are responsible for:
//!
//! - Owning the actual data and fetching more of it.
//! - Appending fetched keys to a [`KeyWindow`] (or keeping their own adapter
//!   up to date).
//! - Rendering whichever rows are currently visible.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_virtual_list::{KeyWindow, VirtualItemKeys};
//!
//! let mut window = KeyWindow::new();
//! window.extend(["alpha", "beta"]);
//!
//! assert_eq!(window.len(), 2);
//! assert_eq!(window.at(1), Some(&"beta"));
//! assert_eq!(window.index_of(&"alpha"), Some(0));
//! assert_eq!(window.at(2), None);
//! assert_eq!(window.index_of(&"gamma"), None);
//!
//! // A second page arrives.
//! window.extend(["gamma"]);
//! assert_eq!(window.last_index(), Some(2));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod key_window;
mod keys;

pub use key_window::KeyWindow;
pub use keys::{VirtualItemKeys, WindowIter, iter_window};
