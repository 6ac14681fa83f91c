// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use crate::ItemKey;

/// What an item does when it is activated (Enter, Space, click).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// A selectable option.
    #[default]
    Option,
    /// A focusable command (menu action, footer action); activating it does
    /// not change the selection.
    Action,
}

/// Description of an item, handed to the registry when the item mounts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDef {
    /// Unique key of the item within its list.
    pub item_key: ItemKey,
    /// Human readable label, used for type-ahead. Falls back to the key.
    pub label: Option<String>,
    /// Option or action.
    pub kind: ItemKind,
    /// Disabled items stay focusable but cannot be activated.
    pub disabled: bool,
    /// Explicit ordinal. When present it is authoritative; otherwise the
    /// ordinal is the registration order.
    pub item_pos: Option<usize>,
}

impl ItemDef {
    /// Creates an enabled option with no label and no explicit ordinal.
    #[must_use]
    pub fn new(item_key: impl Into<ItemKey>) -> Self {
        Self {
            item_key: item_key.into(),
            label: None,
            kind: ItemKind::Option,
            disabled: false,
            item_pos: None,
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the kind.
    #[must_use]
    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets whether the item is disabled.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Sets an explicit ordinal.
    #[must_use]
    pub fn with_item_pos(mut self, item_pos: usize) -> Self {
        self.item_pos = Some(item_pos);
        self
    }

    /// Returns the label, or the key when no label was given.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(self.item_key.as_str())
    }

    /// Returns `true` if activating the item selects it.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.kind == ItemKind::Option && !self.disabled
    }
}
