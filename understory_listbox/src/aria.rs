// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accessibility state derived from the list engine.

use understory_item_registry::{ItemKey, ItemKind};

use crate::{ListRole, Orientation};

/// Accessibility role of one item.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ItemRole {
    /// `option`.
    Option,
    /// `menuitem`.
    MenuItem,
    /// `menuitemcheckbox`.
    MenuItemCheckbox,
    /// `radio`.
    Radio,
}

impl ItemRole {
    /// The role an item of `kind` takes in a list of `role`.
    #[must_use]
    pub fn for_item(role: ListRole, kind: ItemKind, multiselectable: bool) -> Self {
        match (role, kind) {
            (ListRole::ListBox, _) => Self::Option,
            (ListRole::Menu, ItemKind::Option) if multiselectable => Self::MenuItemCheckbox,
            (ListRole::Menu, _) => Self::MenuItem,
            (ListRole::RadioGroup, _) => Self::Radio,
        }
    }

    /// The ARIA role string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Option => "option",
            Self::MenuItem => "menuitem",
            Self::MenuItemCheckbox => "menuitemcheckbox",
            Self::Radio => "radio",
        }
    }
}

impl ListRole {
    /// The ARIA role string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ListBox => "listbox",
            Self::Menu => "menu",
            Self::RadioGroup => "radiogroup",
        }
    }
}

/// Attributes of the list container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListAria {
    /// Element id of the list.
    pub id: String,
    /// Container role.
    pub role: ListRole,
    /// Layout axis.
    pub orientation: Orientation,
    /// More than one item can be selected.
    pub multiselectable: bool,
    /// The whole list is disabled.
    pub disabled: bool,
    /// Element id of the focused item, if it is rendered.
    pub active_descendant: Option<String>,
    /// Total number of items, when known.
    pub set_size: Option<usize>,
    /// A lazy list is fetching rows.
    pub busy: bool,
}

/// Attributes of one item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemState {
    /// Element id of the item.
    pub dom_id: String,
    /// Item role.
    pub role: ItemRole,
    /// The item is selected.
    pub selected: bool,
    /// The item has keyboard focus.
    pub focused: bool,
    /// The item or the whole list is disabled.
    pub disabled: bool,
    /// One-based position in the set, when known.
    pub pos_in_set: Option<usize>,
}

/// Element id of `key` in list `list_id`.
#[must_use]
pub fn item_dom_id(list_id: &str, key: &ItemKey) -> String {
    format!("{list_id}-item-{key}")
}
