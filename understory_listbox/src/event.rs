// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection values and the events a list reports.

use std::fmt;
use std::rc::Rc;

use understory_item_registry::{ItemKey, ItemTarget};
use understory_selection::{Selection, SingleSelection};

use crate::SelectionMode;

/// A selection, in the shape of its list's [`SelectionMode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionValue {
    /// Single selection: at most one target.
    Single(Option<ItemTarget>),
    /// Multiple selection: the selected keys.
    Multiple(Vec<ItemKey>),
}

impl SelectionValue {
    /// The mode this value belongs to.
    #[must_use]
    pub fn mode(&self) -> SelectionMode {
        match self {
            Self::Single(_) => SelectionMode::Single,
            Self::Multiple(_) => SelectionMode::Multiple,
        }
    }

    /// An empty value for `mode`.
    #[must_use]
    pub fn empty(mode: SelectionMode) -> Self {
        match mode {
            SelectionMode::Single => Self::Single(None),
            SelectionMode::Multiple => Self::Multiple(Vec::new()),
        }
    }

    pub(crate) fn into_single(self) -> Option<SingleSelection<ItemTarget>> {
        match self {
            Self::Single(target) => Some(SingleSelection::with_value(target)),
            Self::Multiple(_) => None,
        }
    }

    pub(crate) fn into_multiple(self) -> Option<Selection<ItemKey>> {
        match self {
            Self::Multiple(keys) => {
                let mut selection = Selection::new();
                selection.replace_with(keys);
                Some(selection)
            }
            Self::Single(_) => None,
        }
    }
}

impl From<ItemTarget> for SelectionValue {
    fn from(target: ItemTarget) -> Self {
        Self::Single(Some(target))
    }
}

impl From<&SingleSelection<ItemTarget>> for SelectionValue {
    fn from(selection: &SingleSelection<ItemTarget>) -> Self {
        Self::Single(selection.selected().cloned())
    }
}

impl From<&Selection<ItemKey>> for SelectionValue {
    fn from(selection: &Selection<ItemKey>) -> Self {
        Self::Multiple(selection.items().to_vec())
    }
}

/// A selection change, proposed or applied.
///
/// In a controlled list `value` is only a proposal; the owner applies it with
/// [`ListProvider::sync_selected`](crate::ListProvider::sync_selected).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectEvent {
    /// The item the user acted on, if the change came from one item.
    pub item: Option<ItemKey>,
    /// The selection after the change.
    pub value: SelectionValue,
}

type SelectFn = Rc<dyn Fn(&SelectEvent)>;
type FocusFn = Rc<dyn Fn(Option<&ItemTarget>)>;
type ActionFn = Rc<dyn Fn(&ItemKey)>;
type LimitFn = Rc<dyn Fn(usize)>;
type LabelFn = Rc<dyn Fn(&ItemKey) -> String>;

/// Host callbacks.
#[derive(Clone, Default)]
pub(crate) struct Callbacks {
    pub(crate) on_select: Option<SelectFn>,
    pub(crate) on_focus: Option<FocusFn>,
    pub(crate) on_action: Option<ActionFn>,
    pub(crate) on_update_limit: Option<LimitFn>,
    pub(crate) format_item_label: Option<LabelFn>,
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_select", &self.on_select.is_some())
            .field("on_focus", &self.on_focus.is_some())
            .field("on_action", &self.on_action.is_some())
            .field("on_update_limit", &self.on_update_limit.is_some())
            .field("format_item_label", &self.format_item_label.is_some())
            .finish()
    }
}

/// Something a state change asks the host to hear about.
///
/// Effects are collected while the list state is borrowed and delivered
/// after the borrow ends, so callbacks may call back into the list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Effect {
    Focus(Option<ItemTarget>),
    Select(SelectEvent),
    Action(ItemKey),
    UpdateLimit(usize),
}

impl Callbacks {
    pub(crate) fn deliver(&self, effect: Effect) {
        match effect {
            Effect::Focus(target) => {
                if let Some(on_focus) = &self.on_focus {
                    on_focus(target.as_ref());
                }
            }
            Effect::Select(event) => {
                if let Some(on_select) = &self.on_select {
                    on_select(&event);
                }
            }
            Effect::Action(key) => {
                if let Some(on_action) = &self.on_action {
                    on_action(&key);
                }
            }
            Effect::UpdateLimit(limit) => match &self.on_update_limit {
                Some(on_update_limit) => on_update_limit(limit),
                None => log::warn!("lazy list wants {limit} rows but has no on_update_limit"),
            },
        }
    }
}
