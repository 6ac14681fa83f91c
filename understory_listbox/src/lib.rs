// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_listbox --heading-base-level=0

//! Understory Listbox: headless list boxes, menus, and combo boxes.
//!
//! A [`ListProvider`] owns one list and composes the lower Understory crates:
//!
//! - items register through a [`ListContext`] and stay registered while
//!   their [`ItemRegistration`] guard lives
//!   ([`understory_item_registry`]);
//! - the host may order the list by a virtual window of keys instead, so rows
//!   that are not rendered can still be focused and selected
//!   ([`understory_virtual_list`]);
//! - arrow keys, Home and End move a focus target that survives the focused
//!   row scrolling away ([`understory_focus`]);
//! - printable keys jump by label ([`understory_typeahead`]);
//! - Enter and Space select, in single or multiple mode, controlled or not
//!   ([`understory_selection`]).
//!
//! Nothing here draws. The host forwards decoded key presses to
//! [`ListProvider::handle_key`], reads [`ListProvider::aria`] and
//! [`ListContext::item_state`] to render, and hears about changes through the
//! callbacks set on the [`ListBuilder`]. Callbacks run after the list has
//! released its internal borrow, so they may call back into the list.
//!
//! ## Lazy lists
//!
//! A list built with a [`LazyWindow`] never fetches anything. When keyboard
//! navigation reaches the end of the loaded rows it asks for a larger limit
//! through `on_update_limit`; the data layer installs the new rows with
//! [`ListProvider::set_virtual_keys`] and reports with
//! [`ListProvider::update_window`]. End keeps asking until the data layer
//! says there is nothing more, then focuses the true last row.
//!
//! ## Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use understory_item_registry::{ItemDef, ItemKey, ItemTarget};
//! use understory_listbox::{Key, KeyOutcome, ListPreset, ListProvider, Modifiers};
//!
//! let picked = Rc::new(RefCell::new(None));
//! let sink = Rc::clone(&picked);
//! let list = ListProvider::builder("fruit")
//!     .with_preset(ListPreset::ListBox)
//!     .on_select(move |event| *sink.borrow_mut() = event.item.clone())
//!     .build()
//!     .unwrap();
//!
//! let context = list.context();
//! let _items: Vec<_> = ["Apple", "Apricot", "Banana"]
//!     .into_iter()
//!     .enumerate()
//!     .map(|(pos, label)| {
//!         context.register_item(
//!             ItemDef::new(label.to_lowercase())
//!                 .with_label(label)
//!                 .with_item_pos(pos),
//!         )
//!     })
//!     .collect();
//!
//! // Type "ap", then "r": Apricot.
//! for (now, ch) in [(0, 'a'), (50, 'p'), (100, 'r')] {
//!     list.handle_key(Key::Character(ch), Modifiers::empty(), now);
//! }
//! assert_eq!(context.focused_item(), Some(ItemTarget::from("apricot")));
//!
//! let outcome = list.handle_key(Key::Enter, Modifiers::empty(), 200);
//! assert_eq!(outcome, KeyOutcome::Handled);
//! assert_eq!(*picked.borrow(), Some(ItemKey::from("apricot")));
//! assert_eq!(
//!     list.aria().active_descendant.as_deref(),
//!     Some("fruit-item-apricot")
//! );
//! ```

mod aria;
mod config;
mod error;
mod event;
mod input;
mod provider;
mod state;

pub use aria::{ItemRole, ItemState, ListAria, item_dom_id};
pub use config::{
    FormConfig, LazyWindow, ListConfig, ListPreset, ListRole, LoadMoreTrigger, Orientation,
    SelectionMode,
};
pub use error::ListError;
pub use event::{SelectEvent, SelectionValue};
pub use input::{Key, KeyOutcome, Modifiers};
pub use provider::{
    ItemRegistration, ListBuilder, ListContext, ListHandle, ListProvider, use_list_context,
};
