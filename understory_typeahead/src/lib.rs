// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_typeahead --heading-base-level=0

//! Understory Typeahead: jump to list items by typing the start of their label.
//!
//! [`TypeAhead`] accumulates printable characters into a buffer and finds the
//! first candidate, in ordinal order, whose label starts with it. Characters
//! are case-folded and stripped of Latin diacritics before they are buffered,
//! and labels are compared the same way, so typing `e` finds `Éclair`.
//!
//! The buffer expires [`TypeAheadConfig::timeout_ms`] milliseconds after the
//! last character. There is no timer inside this crate: the host reads
//! [`TypeAhead::deadline`], schedules a wake-up however it likes, and calls
//! [`TypeAhead::on_timer`] (or [`TypeAhead::cancel`] when the list goes away).
//! Timestamps are plain millisecond counters supplied by the host.
//!
//! Search rules:
//!
//! - A single character searches from just after the current item, so
//!   pressing the same key again moves to the next match.
//! - Longer buffers search from the current item inclusive, so refining
//!   `a` to `ap` keeps focus on `Apple` instead of skipping to `Apricot`.
//! - A buffer of one repeated character (`aaa`) that matches nothing cycles
//!   through items starting with that character.
//! - Enabled items win over disabled ones; a disabled item is only returned
//!   when no enabled item matches (unless [`TypeAheadConfig::skip_disabled`]
//!   is off, in which case the first match wins).
//! - When the grown buffer matches nothing, it restarts from the new
//!   character alone. If that fails as well the buffer is cleared.
//!
//! ## Example
//!
//! ```rust
//! use understory_typeahead::{Candidate, TypeAhead, TypeAheadConfig};
//!
//! let fruit = ["Apple", "Apricot", "Blueberry"];
//! let candidates: Vec<_> = fruit
//!     .iter()
//!     .enumerate()
//!     .map(|(ordinal, label)| Candidate::new(ordinal, label))
//!     .collect();
//!
//! let mut typeahead = TypeAhead::new(TypeAheadConfig::default());
//! let mut focus = None;
//! focus = typeahead.on_char('a', 0, &candidates, focus).or(focus);
//! focus = typeahead.on_char('p', 100, &candidates, focus).or(focus);
//! assert_eq!(focus, Some(0));
//! assert_eq!(typeahead.buffer(), "ap");
//!
//! // Half a second of silence later the buffer is gone.
//! assert!(typeahead.on_timer(600));
//! assert_eq!(typeahead.buffer(), "");
//! ```

mod buffer;

pub use buffer::{Candidate, TypeAhead, TypeAheadConfig};
