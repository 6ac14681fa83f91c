// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The list engine behind a provider.
//!
//! Everything here runs under one `RefCell` borrow. State changes that the
//! host must hear about are pushed onto an [`Effects`] queue and delivered by
//! the provider once the borrow has ended.

use std::collections::HashMap;
use std::fmt;

use smallvec::SmallVec;
use understory_focus::{FocusSpace, ListFocus, Navigation};
use understory_item_registry::{
    ItemAddress, ItemKey, ItemKind, ItemRegistry, ItemTarget, RegistrationId, matches_target,
};
use understory_selection::{Control, Selection, SingleSelection};
use understory_typeahead::{Candidate, TypeAhead};
use understory_virtual_list::{VirtualItemKeys, iter_window};

use crate::aria::item_dom_id;
use crate::event::{Callbacks, Effect};
use crate::{
    FormConfig, ItemRole, ItemState, Key, KeyOutcome, LazyWindow, ListAria, ListConfig, ListError,
    LoadMoreTrigger, Modifiers, SelectEvent, SelectionMode, SelectionValue,
};

pub(crate) type Effects = SmallVec<[Effect; 4]>;

/// Type-ahead labels produced by `format_item_label` for unregistered rows.
pub(crate) type RowLabels = HashMap<ItemKey, String>;

/// Selection storage in the shape of the list's mode.
#[derive(Debug)]
pub(crate) enum ListSelection {
    Single(Control<SingleSelection<ItemTarget>>),
    Multiple(Control<Selection<ItemKey>>),
}

impl ListSelection {
    fn mode(&self) -> SelectionMode {
        match self {
            Self::Single(_) => SelectionMode::Single,
            Self::Multiple(_) => SelectionMode::Multiple,
        }
    }
}

/// What the list is made of: registered items, an optional virtual window
/// over rows that need not be registered, and the lazy loading state.
pub(crate) struct ListModel {
    pub(crate) registry: ItemRegistry,
    pub(crate) virtual_keys: Option<Box<dyn VirtualItemKeys<Key = ItemKey>>>,
    pub(crate) lazy: Option<LazyWindow>,
}

impl fmt::Debug for ListModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListModel")
            .field("registry", &self.registry)
            .field("virtual_keys", &self.virtual_keys.as_ref().map(|keys| keys.len()))
            .field("lazy", &self.lazy)
            .finish()
    }
}

impl ListModel {
    /// Item order: the virtual window when there is one, the registry otherwise.
    pub(crate) fn window(&self) -> &dyn VirtualItemKeys<Key = ItemKey> {
        match &self.virtual_keys {
            Some(keys) => &**keys,
            None => &self.registry,
        }
    }

    /// Item count used for negative targets. Unknown while a lazy list is
    /// still fetching its first rows.
    pub(crate) fn total_items(&self) -> Option<usize> {
        let len = self.window().len();
        match &self.lazy {
            Some(lazy) if lazy.is_loading && len == 0 => None,
            _ => Some(len),
        }
    }

    pub(crate) fn space(&self) -> FocusSpace<'_> {
        FocusSpace::new(self.window(), &self.registry, self.total_items())
    }

    fn grows_on_navigation(&self) -> bool {
        self.lazy.as_ref().is_some_and(|lazy| {
            lazy.has_more_items && lazy.load_more_trigger == LoadMoreTrigger::Auto
        })
    }
}

/// One list: configuration, items, focus, type-ahead, and selection.
#[derive(Debug)]
pub(crate) struct ListState {
    pub(crate) id: String,
    pub(crate) config: ListConfig,
    pub(crate) disabled: bool,
    pub(crate) model: ListModel,
    pub(crate) focus: ListFocus,
    pub(crate) typeahead: Option<TypeAhead>,
    pub(crate) selection: ListSelection,
    pub(crate) form: Option<FormConfig>,
    pub(crate) callbacks: Callbacks,
    /// End was pressed while more rows existed; focus settles on the true
    /// last row once the data layer stops reporting more.
    pending_last: bool,
    /// Limit asked for and not yet delivered.
    requested_limit: Option<usize>,
}

impl ListState {
    pub(crate) fn new(
        id: String,
        config: ListConfig,
        model: ListModel,
        selection: ListSelection,
    ) -> Self {
        let typeahead = config.typeahead.map(TypeAhead::new);
        Self {
            id,
            config,
            disabled: false,
            model,
            focus: ListFocus::new(),
            typeahead,
            selection,
            form: None,
            callbacks: Callbacks::default(),
            pending_last: false,
            requested_limit: None,
        }
    }

    // --- focus ---

    fn set_focus(&mut self, target: Option<ItemTarget>, fx: &mut Effects) -> bool {
        if !self.focus.set(target.clone()) {
            return false;
        }
        log::trace!("list {} focus -> {target:?}", self.id);
        fx.push(Effect::Focus(target));
        true
    }

    /// Programmatic focus. Abandons a pending End.
    pub(crate) fn focus_item(&mut self, target: Option<ItemTarget>, fx: &mut Effects) -> bool {
        self.pending_last = false;
        self.set_focus(target, fx)
    }

    pub(crate) fn focused_key(&self) -> Option<ItemKey> {
        self.focus.resolve_key(&self.model.space()).cloned()
    }

    /// Moves focus. `extend` grows a multi selection along with it.
    pub(crate) fn navigate(&mut self, nav: Navigation, extend: bool, fx: &mut Effects) {
        if nav == Navigation::Last && self.model.grows_on_navigation() {
            // The true last row is not loaded yet: point at "last" and ask
            // for more until the data layer runs out.
            self.set_focus(Some(ItemTarget::LAST), fx);
            self.pending_last = true;
            self.request_more(fx);
            return;
        }
        self.pending_last = false;

        let policy = self.config.focus_policy();
        let space = self.model.space();
        let changed = self.focus.navigate(&policy, nav, &space);
        let ordinal = self.focus.resolve_ordinal(&space);
        let at_end = nav == Navigation::Next
            && ordinal.is_some()
            && ordinal == space.len().checked_sub(1);

        if changed {
            let target = self.focus.focused().cloned();
            log::trace!("list {} focus {nav:?} -> {target:?}", self.id);
            fx.push(Effect::Focus(target));
        }
        if at_end && self.model.grows_on_navigation() {
            self.request_more(fx);
        }
        let Some(ordinal) = ordinal else {
            return;
        };
        if extend {
            self.extend_selection_to(ordinal, fx);
        } else if changed && self.config.selection_follows_focus {
            self.select_ordinal(ordinal, fx);
        }
    }

    /// Applies the stale focus policy after `key` unregisters.
    pub(crate) fn unregister(&mut self, key: &ItemKey, id: RegistrationId, fx: &mut Effects) {
        let removed_ordinal = self.model.registry.position_of(key.as_str());
        if self.model.registry.unregister(key.as_str(), id).is_none() {
            return;
        }
        let space = self.model.space();
        if self
            .focus
            .reconcile(self.config.stale_focus, removed_ordinal, &space)
        {
            fx.push(Effect::Focus(self.focus.focused().cloned()));
        }
    }

    // --- lazy windows ---

    /// Asks the data layer for another page, unless one is in flight.
    pub(crate) fn request_more(&mut self, fx: &mut Effects) -> bool {
        let Some(lazy) = &self.model.lazy else {
            return false;
        };
        if !lazy.has_more_items {
            return false;
        }
        if lazy.is_loading {
            log::debug!("list {} is already loading", self.id);
            return false;
        }
        let limit = lazy.next_limit();
        if self.requested_limit.is_some_and(|requested| requested >= limit) {
            return false;
        }
        log::debug!("list {} requesting limit {limit}", self.id);
        self.requested_limit = Some(limit);
        fx.push(Effect::UpdateLimit(limit));
        true
    }

    /// Takes the data layer's report of the new window state.
    pub(crate) fn update_window(&mut self, lazy: LazyWindow, fx: &mut Effects) {
        if !lazy.is_loading {
            self.requested_limit = None;
        }
        let settle = self.pending_last && !lazy.is_loading;
        let more = lazy.has_more_items && lazy.load_more_trigger == LoadMoreTrigger::Auto;
        self.model.lazy = Some(lazy);
        if !settle {
            return;
        }
        if more {
            self.request_more(fx);
            return;
        }
        self.pending_last = false;
        let space = self.model.space();
        let last = space
            .resolve(&ItemTarget::LAST)
            .map(|ordinal| space.target_for(ordinal));
        if last.is_some() {
            self.set_focus(last, fx);
        }
    }

    // --- type-ahead ---

    /// Keys in the window that no registered item labels.
    pub(crate) fn unlabeled_keys(&self) -> Vec<ItemKey> {
        iter_window(self.model.window())
            .filter(|(_, key)| self.model.registry.get(key.as_str()).is_none())
            .map(|(_, key)| key.clone())
            .collect()
    }

    fn type_char(
        &mut self,
        ch: char,
        now: u64,
        formatted: &RowLabels,
        fx: &mut Effects,
    ) -> KeyOutcome {
        let Some(typeahead) = self.typeahead.as_mut() else {
            return KeyOutcome::Ignored;
        };
        let found = {
            let space = self.model.space();
            let registry = &self.model.registry;
            let candidates: Vec<Candidate<'_>> = iter_window(space.window)
                .map(|(ordinal, key)| match registry.get(key.as_str()) {
                    Some(def) => {
                        Candidate::new(ordinal, def.display_label()).with_disabled(def.disabled)
                    }
                    None => {
                        let label = formatted.get(key).map_or(key.as_str(), String::as_str);
                        Candidate::new(ordinal, label)
                    }
                })
                .collect();

            let current = self.focus.resolve_ordinal(&space);
            typeahead
                .on_char(ch, now, &candidates, current)
                .map(|ordinal| (ordinal, space.target_for(ordinal)))
        };
        let Some((ordinal, target)) = found else {
            return KeyOutcome::Handled;
        };
        self.pending_last = false;
        if self.set_focus(Some(target), fx) && self.config.selection_follows_focus {
            self.select_ordinal(ordinal, fx);
        }
        KeyOutcome::Handled
    }

    pub(crate) fn cancel_typeahead(&mut self) {
        if let Some(typeahead) = &mut self.typeahead {
            typeahead.cancel();
        }
    }

    // --- selection ---

    fn push_select(&self, item: Option<ItemKey>, value: SelectionValue, fx: &mut Effects) {
        log::trace!("list {} selection -> {value:?}", self.id);
        fx.push(Effect::Select(SelectEvent { item, value }));
    }

    fn propose_single<F>(&mut self, item: Option<ItemKey>, change: F, fx: &mut Effects) -> bool
    where
        F: FnOnce(&mut SingleSelection<ItemTarget>),
    {
        let ListSelection::Single(control) = &mut self.selection else {
            return false;
        };
        let Some(next) = control.propose(change) else {
            return false;
        };
        self.push_select(item, SelectionValue::from(&next), fx);
        true
    }

    fn propose_multiple<F>(&mut self, item: Option<ItemKey>, change: F, fx: &mut Effects) -> bool
    where
        F: FnOnce(&mut Selection<ItemKey>, &dyn VirtualItemKeys<Key = ItemKey>),
    {
        let ListSelection::Multiple(control) = &mut self.selection else {
            return false;
        };
        let window = self.model.window();
        let Some(next) = control.propose(|selection| change(selection, window)) else {
            return false;
        };
        self.push_select(item, SelectionValue::from(&next), fx);
        true
    }

    /// Selects (single) or toggles (multiple) the item at `ordinal`.
    fn select_ordinal(&mut self, ordinal: usize, fx: &mut Effects) -> bool {
        let space = self.model.space();
        let target = space.target_for(ordinal);
        let key = target.key().cloned();
        match self.selection.mode() {
            SelectionMode::Single => self.propose_single(
                key,
                |selection| {
                    selection.select(Some(target));
                },
                fx,
            ),
            SelectionMode::Multiple => {
                let Some(key) = key else {
                    return false;
                };
                self.propose_multiple(
                    Some(key.clone()),
                    |selection, _| {
                        selection.toggle(key);
                    },
                    fx,
                )
            }
        }
    }

    fn extend_selection_to(&mut self, ordinal: usize, fx: &mut Effects) -> bool {
        let Some(key) = self.model.window().at(ordinal).cloned() else {
            return false;
        };
        self.propose_multiple(
            Some(key.clone()),
            |selection, window| {
                selection.extend_range(key, window);
            },
            fx,
        )
    }

    /// Selects `target`. A multi selection adds the key it resolves to.
    pub(crate) fn select_item(&mut self, target: ItemTarget, fx: &mut Effects) -> bool {
        match self.selection.mode() {
            SelectionMode::Single => {
                let item = target.key().cloned();
                self.propose_single(
                    item,
                    |selection| {
                        selection.select(Some(target));
                    },
                    fx,
                )
            }
            SelectionMode::Multiple => {
                let Some(key) = self.resolve_key(&target) else {
                    return false;
                };
                self.propose_multiple(
                    Some(key.clone()),
                    |selection, _| {
                        selection.add(key);
                    },
                    fx,
                )
            }
        }
    }

    /// Toggles `key`: in a single selection, selects it or clears it.
    pub(crate) fn toggle_item(&mut self, key: ItemKey, fx: &mut Effects) -> bool {
        match self.selection.mode() {
            SelectionMode::Single => self.propose_single(
                Some(key.clone()),
                |selection| {
                    let target = ItemTarget::Key(key);
                    if selection.is_selected(&target) {
                        selection.clear();
                    } else {
                        selection.select(Some(target));
                    }
                },
                fx,
            ),
            SelectionMode::Multiple => self.propose_multiple(
                Some(key.clone()),
                |selection, _| {
                    selection.toggle(key);
                },
                fx,
            ),
        }
    }

    pub(crate) fn select_items(
        &mut self,
        keys: Vec<ItemKey>,
        fx: &mut Effects,
    ) -> Result<bool, ListError> {
        if self.selection.mode() != SelectionMode::Multiple {
            return Err(ListError::SelectionMode {
                expected: self.selection.mode(),
            });
        }
        Ok(self.propose_multiple(
            None,
            |selection, _| selection.replace_with(keys),
            fx,
        ))
    }

    pub(crate) fn select_all(&mut self, fx: &mut Effects) -> bool {
        self.propose_multiple(None, |selection, window| selection.select_all(window), fx)
    }

    pub(crate) fn clear_selection(&mut self, fx: &mut Effects) -> bool {
        match self.selection.mode() {
            SelectionMode::Single => self.propose_single(
                None,
                |selection| {
                    selection.clear();
                },
                fx,
            ),
            SelectionMode::Multiple => {
                self.propose_multiple(None, |selection, _| selection.clear(), fx)
            }
        }
    }

    pub(crate) fn sync_selected(&mut self, value: SelectionValue) -> Result<(), ListError> {
        let expected = self.selection.mode();
        let mismatch = ListError::SelectionMode { expected };
        match &mut self.selection {
            ListSelection::Single(control) => {
                control.sync(value.into_single().ok_or(mismatch)?)?;
            }
            ListSelection::Multiple(control) => {
                let SelectionValue::Multiple(keys) = value else {
                    return Err(mismatch);
                };
                control.sync_with(|selection| selection.set_items(keys))?;
            }
        }
        Ok(())
    }

    pub(crate) fn selected_value(&self) -> SelectionValue {
        match &self.selection {
            ListSelection::Single(control) => SelectionValue::from(control.value()),
            ListSelection::Multiple(control) => SelectionValue::from(control.value()),
        }
    }

    /// Selected keys. A single selection contributes its target's key when
    /// the target resolves.
    pub(crate) fn selected_keys(&self) -> Vec<ItemKey> {
        match &self.selection {
            ListSelection::Single(control) => control
                .value()
                .selected()
                .and_then(|target| self.resolve_key(target))
                .into_iter()
                .collect(),
            ListSelection::Multiple(control) => control.value().items().to_vec(),
        }
    }

    /// Whether `key` is in the list and selected. Selected keys that left
    /// the list stay in the selection but match nothing.
    pub(crate) fn is_selected(&self, key: &ItemKey) -> bool {
        let Some(item_pos) = self.model.window().index_of(key) else {
            return false;
        };
        match &self.selection {
            ListSelection::Single(control) => {
                control.value().selected().is_some_and(|target| {
                    let item = ItemAddress {
                        key,
                        item_pos: Some(item_pos),
                    };
                    matches_target(target, item, self.model.total_items())
                })
            }
            ListSelection::Multiple(control) => control.value().contains(key),
        }
    }

    fn resolve_key(&self, target: &ItemTarget) -> Option<ItemKey> {
        target
            .resolve_key(self.model.window(), self.model.total_items())
            .cloned()
    }

    // --- keyboard ---

    fn activate(&mut self, extend: bool, fx: &mut Effects) -> KeyOutcome {
        let space = self.model.space();
        let Some(ordinal) = self.focus.resolve_ordinal(&space) else {
            return KeyOutcome::Ignored;
        };
        let key = space.window.at(ordinal).cloned();
        let def = key
            .as_ref()
            .and_then(|key| self.model.registry.get(key.as_str()));
        let kind = def.map_or(ItemKind::Option, |def| def.kind);
        if def.is_some_and(|def| def.disabled) {
            log::debug!("list {}: ignoring activation of a disabled item", self.id);
            return KeyOutcome::Handled;
        }

        match (kind, key) {
            (ItemKind::Action, Some(key)) => fx.push(Effect::Action(key)),
            _ if extend && self.selection.mode() == SelectionMode::Multiple => {
                self.extend_selection_to(ordinal, fx);
                return KeyOutcome::Handled;
            }
            _ => {
                self.select_ordinal(ordinal, fx);
            }
        }
        let closes = self.config.close_on_select
            && (kind == ItemKind::Action || self.selection.mode() == SelectionMode::Single);
        if closes {
            self.cancel_typeahead();
            KeyOutcome::Dismiss
        } else {
            KeyOutcome::Handled
        }
    }

    /// Pointer activation: focuses `key`, then activates it.
    pub(crate) fn activate_key(
        &mut self,
        key: ItemKey,
        modifiers: Modifiers,
        fx: &mut Effects,
    ) -> KeyOutcome {
        if self.disabled || self.model.window().index_of(&key).is_none() {
            return KeyOutcome::Ignored;
        }
        self.pending_last = false;
        self.set_focus(Some(ItemTarget::Key(key)), fx);
        self.activate(modifiers.contains(Modifiers::SHIFT), fx)
    }

    pub(crate) fn handle_key(
        &mut self,
        key: Key,
        modifiers: Modifiers,
        now: u64,
        formatted: &RowLabels,
        fx: &mut Effects,
    ) -> KeyOutcome {
        if self.disabled {
            return KeyOutcome::Ignored;
        }
        if let Some(typeahead) = &mut self.typeahead {
            typeahead.on_timer(now);
        }
        let shortcut = modifiers.intersects(Modifiers::CTRL | Modifiers::META);
        let extend = modifiers.contains(Modifiers::SHIFT);

        match key {
            Key::Escape => {
                self.cancel_typeahead();
                KeyOutcome::Dismiss
            }
            Key::Character(ch) if shortcut => {
                if ch.eq_ignore_ascii_case(&'a') && self.selection.mode() == SelectionMode::Multiple {
                    self.select_all(fx);
                    KeyOutcome::Handled
                } else {
                    KeyOutcome::Ignored
                }
            }
            Key::Character(_) if modifiers.contains(Modifiers::ALT) => KeyOutcome::Ignored,
            Key::Character(ch) => self.type_char(ch, now, formatted, fx),
            Key::Space if self.typeahead.as_ref().is_some_and(TypeAhead::is_active) => {
                self.type_char(' ', now, formatted, fx)
            }
            Key::Enter | Key::Space => self.activate(extend, fx),
            _ => match key.navigation(self.config.orientation) {
                Some(nav) => {
                    self.navigate(nav, extend, fx);
                    KeyOutcome::Handled
                }
                None => KeyOutcome::Ignored,
            },
        }
    }

    // --- accessibility and forms ---

    pub(crate) fn aria(&self) -> ListAria {
        let space = self.model.space();
        ListAria {
            id: self.id.clone(),
            role: self.config.role,
            orientation: self.config.orientation,
            multiselectable: self.selection.mode() == SelectionMode::Multiple,
            disabled: self.disabled,
            active_descendant: self
                .focus
                .resolve_key(&space)
                .map(|key| item_dom_id(&self.id, key)),
            set_size: space.total_items,
            busy: self.model.lazy.as_ref().is_some_and(|lazy| lazy.is_loading),
        }
    }

    pub(crate) fn item_state(&self, key: &ItemKey) -> ItemState {
        let space = self.model.space();
        let def = self.model.registry.get(key.as_str());
        let multiselectable = self.selection.mode() == SelectionMode::Multiple;
        let kind = def.map_or(ItemKind::Option, |def| def.kind);
        ItemState {
            dom_id: item_dom_id(&self.id, key),
            role: ItemRole::for_item(self.config.role, kind, multiselectable),
            selected: self.is_selected(key),
            focused: self.focus.is_focused(key, &space),
            disabled: self.disabled || def.is_some_and(|def| def.disabled),
            pos_in_set: space.window.index_of(key).map(|ordinal| ordinal + 1),
        }
    }

    pub(crate) fn form_entries(&self) -> Vec<(String, String)> {
        let Some(form) = &self.form else {
            return Vec::new();
        };
        self.selected_keys()
            .into_iter()
            .map(|key| (form.name.clone(), key.as_str().to_owned()))
            .collect()
    }
}
