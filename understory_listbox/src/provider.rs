// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The provider that owns a list, and the views items and hosts hold on it.

use std::cell::{BorrowMutError, Ref, RefCell, RefMut};
use std::fmt;
use std::mem;
use std::rc::{Rc, Weak};

use understory_focus::{ListFocus, Navigation};
use understory_item_registry::{ItemDef, ItemKey, ItemRegistry, ItemTarget, RegistrationId};
use understory_selection::Control;
use understory_virtual_list::VirtualItemKeys;

use crate::state::{Effects, ListModel, ListSelection, ListState, RowLabels};
use crate::{
    FormConfig, ItemState, Key, KeyOutcome, LazyWindow, ListAria, ListConfig, ListError,
    ListPreset, Modifiers, SelectEvent, SelectionMode, SelectionValue,
};

/// The list state plus registrations that were dropped while it was borrowed.
#[derive(Debug)]
struct ListCell {
    state: RefCell<ListState>,
    orphans: RefCell<Vec<(ItemKey, RegistrationId)>>,
}

impl ListCell {
    fn new(state: ListState) -> Self {
        Self {
            state: RefCell::new(state),
            orphans: RefCell::new(Vec::new()),
        }
    }

    fn borrow(&self) -> Ref<'_, ListState> {
        self.state.borrow()
    }

    fn borrow_mut(&self) -> RefMut<'_, ListState> {
        self.state.borrow_mut()
    }

    fn try_borrow_mut(&self) -> Result<RefMut<'_, ListState>, BorrowMutError> {
        self.state.try_borrow_mut()
    }

    /// Unregisters items whose guards were dropped while the list was busy.
    fn release_orphans(&self) {
        loop {
            let orphans = mem::take(&mut *self.orphans.borrow_mut());
            if orphans.is_empty() {
                return;
            }
            apply(self, |state, fx| {
                for (key, id) in &orphans {
                    state.unregister(key, *id, fx);
                }
            });
        }
    }
}

type Shared = Rc<ListCell>;

/// Runs `f` on the list and delivers what it produced once the borrow ends.
fn update<R>(shared: &ListCell, f: impl FnOnce(&mut ListState, &mut Effects) -> R) -> R {
    let result = apply(shared, f);
    shared.release_orphans();
    result
}

fn apply<R>(shared: &ListCell, f: impl FnOnce(&mut ListState, &mut Effects) -> R) -> R {
    let mut effects = Effects::new();
    let (result, callbacks) = {
        let mut state = shared.borrow_mut();
        let result = f(&mut state, &mut effects);
        let callbacks = (!effects.is_empty()).then(|| state.callbacks.clone());
        (result, callbacks)
    };
    if let Some(callbacks) = callbacks {
        for effect in effects {
            callbacks.deliver(effect);
        }
    }
    result
}

/// Owns one list: its items, focus, type-ahead, and selection.
///
/// The host renders the list container, forwards key presses to
/// [`handle_key`](Self::handle_key), and hands [`context`](Self::context) to
/// each item so it can register itself and read its state. Every
/// [`ListContext`] clone keeps the list alive; once the provider and all of
/// them are gone, outstanding [`ListHandle`]s report
/// [`ListError::ProviderDropped`].
pub struct ListProvider {
    context: ListContext,
}

impl fmt::Debug for ListProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListProvider")
            .field("state", &self.context.shared)
            .finish()
    }
}

impl ListProvider {
    /// Starts building a list with element id `id`.
    #[must_use]
    pub fn builder(id: impl Into<String>) -> ListBuilder {
        ListBuilder::new(id)
    }

    /// The context to hand to items and nested components.
    #[must_use]
    pub fn context(&self) -> ListContext {
        self.context.clone()
    }

    /// A weak handle for imperative control.
    #[must_use]
    pub fn handle(&self) -> ListHandle {
        self.context.handle()
    }

    /// Feeds one key press to the list.
    ///
    /// `now` is a monotonic timestamp in milliseconds, used for type-ahead.
    pub fn handle_key(&self, key: Key, modifiers: Modifiers, now: u64) -> KeyOutcome {
        let formatted = match key {
            Key::Character(_) | Key::Space => self.context.formatted_labels(),
            _ => RowLabels::new(),
        };
        update(&self.context.shared, |state, fx| {
            state.handle_key(key, modifiers, now, &formatted, fx)
        })
    }

    /// Advances the type-ahead clock. Returns `true` if the buffer expired.
    pub fn on_timer(&self, now: u64) -> bool {
        self.context
            .shared
            .borrow_mut()
            .typeahead
            .as_mut()
            .is_some_and(|typeahead| typeahead.on_timer(now))
    }

    /// When the host should next call [`on_timer`](Self::on_timer).
    #[must_use]
    pub fn typeahead_deadline(&self) -> Option<u64> {
        self.context
            .shared
            .borrow()
            .typeahead
            .as_ref()
            .and_then(|typeahead| typeahead.deadline())
    }

    /// The list lost keyboard focus.
    pub fn blur(&self) {
        self.context.shared.borrow_mut().cancel_typeahead();
    }

    /// Reports the data layer's window state after a limit change or fetch.
    ///
    /// Install the new rows with [`set_virtual_keys`](Self::set_virtual_keys)
    /// first; a pending End settles on the last row once `has_more_items`
    /// turns false.
    pub fn update_window(&self, lazy: LazyWindow) {
        update(&self.context.shared, |state, fx| state.update_window(lazy, fx));
    }

    /// Replaces the virtual window that orders the list.
    ///
    /// Rows in the window need not be registered; registered items supply
    /// labels and disabled flags for the rows they cover.
    pub fn set_virtual_keys<W>(&self, keys: W)
    where
        W: VirtualItemKeys<Key = ItemKey> + 'static,
    {
        let previous = self
            .context
            .shared
            .borrow_mut()
            .model
            .virtual_keys
            .replace(Box::new(keys));
        drop(previous);
    }

    /// Returns to ordering the list by registration.
    pub fn clear_virtual_keys(&self) {
        let previous = self.context.shared.borrow_mut().model.virtual_keys.take();
        drop(previous);
    }

    /// The lazy window state, if this list loads lazily.
    #[must_use]
    pub fn lazy_window(&self) -> Option<LazyWindow> {
        self.context.shared.borrow().model.lazy.clone()
    }

    /// Text to show while a lazy list has no rows.
    #[must_use]
    pub fn placeholder(&self) -> Option<String> {
        let state = self.context.shared.borrow();
        if !state.model.window().is_empty() {
            return None;
        }
        state
            .model
            .lazy
            .as_ref()
            .and_then(|lazy| lazy.placeholder_empty.clone())
    }

    /// Enables or disables the whole list.
    pub fn set_disabled(&self, disabled: bool) {
        let mut state = self.context.shared.borrow_mut();
        state.disabled = disabled;
        if disabled {
            state.cancel_typeahead();
        }
    }

    /// Container accessibility attributes.
    #[must_use]
    pub fn aria(&self) -> ListAria {
        self.context.shared.borrow().aria()
    }

    /// Form field participation, if configured.
    #[must_use]
    pub fn form(&self) -> Option<FormConfig> {
        self.context.shared.borrow().form.clone()
    }

    /// `(name, value)` pairs a form submission carries: one per selected key.
    #[must_use]
    pub fn form_entries(&self) -> Vec<(String, String)> {
        self.context.shared.borrow().form_entries()
    }

    /// Applies the owner's selection to a controlled list.
    ///
    /// # Errors
    ///
    /// [`ListError::SelectionMode`] if `value` has the wrong shape, and
    /// [`ListError::Control`] if the list owns its selection.
    pub fn sync_selected(&self, value: SelectionValue) -> Result<(), ListError> {
        self.context.shared.borrow_mut().sync_selected(value)
    }
}

impl Drop for ListProvider {
    fn drop(&mut self) {
        if let Ok(mut state) = self.context.shared.try_borrow_mut() {
            state.cancel_typeahead();
        }
    }
}

/// Builder for [`ListProvider`].
pub struct ListBuilder {
    id: String,
    config: ListConfig,
    disabled: bool,
    selected: Option<SelectionValue>,
    default_selected: Option<SelectionValue>,
    virtual_keys: Option<Box<dyn VirtualItemKeys<Key = ItemKey>>>,
    lazy: Option<LazyWindow>,
    form: Option<FormConfig>,
    callbacks: crate::event::Callbacks,
}

impl fmt::Debug for ListBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListBuilder")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("disabled", &self.disabled)
            .field("selected", &self.selected)
            .field("default_selected", &self.default_selected)
            .field("lazy", &self.lazy)
            .field("form", &self.form)
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}

impl ListBuilder {
    fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            config: ListConfig::default(),
            disabled: false,
            selected: None,
            default_selected: None,
            virtual_keys: None,
            lazy: None,
            form: None,
            callbacks: crate::event::Callbacks::default(),
        }
    }

    /// Uses `config`.
    #[must_use]
    pub fn with_config(mut self, config: ListConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses the configuration of `preset`.
    #[must_use]
    pub fn with_preset(self, preset: ListPreset) -> Self {
        self.with_config(preset.config())
    }

    /// Starts disabled.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Makes the selection controlled, starting at `value`.
    ///
    /// The list then only proposes changes through `on_select`; the owner
    /// applies them with [`ListProvider::sync_selected`].
    #[must_use]
    pub fn selected(mut self, value: impl Into<SelectionValue>) -> Self {
        self.selected = Some(value.into());
        self
    }

    /// Seeds an uncontrolled selection.
    #[must_use]
    pub fn default_selected(mut self, value: impl Into<SelectionValue>) -> Self {
        self.default_selected = Some(value.into());
        self
    }

    /// Orders the list by a virtual window instead of registration order.
    #[must_use]
    pub fn virtual_keys<W>(mut self, keys: W) -> Self
    where
        W: VirtualItemKeys<Key = ItemKey> + 'static,
    {
        self.virtual_keys = Some(Box::new(keys));
        self
    }

    /// Loads rows lazily, starting from `lazy`.
    #[must_use]
    pub fn lazy(mut self, lazy: LazyWindow) -> Self {
        self.lazy = Some(lazy);
        self
    }

    /// Submits the selection with a form.
    #[must_use]
    pub fn form(mut self, form: FormConfig) -> Self {
        self.form = Some(form);
        self
    }

    /// Called with every selection change or proposal.
    #[must_use]
    pub fn on_select(mut self, f: impl Fn(&SelectEvent) + 'static) -> Self {
        self.callbacks.on_select = Some(Rc::new(f));
        self
    }

    /// Called when the focus target changes.
    #[must_use]
    pub fn on_focus(mut self, f: impl Fn(Option<&ItemTarget>) + 'static) -> Self {
        self.callbacks.on_focus = Some(Rc::new(f));
        self
    }

    /// Called when an action item is activated.
    #[must_use]
    pub fn on_action(mut self, f: impl Fn(&ItemKey) + 'static) -> Self {
        self.callbacks.on_action = Some(Rc::new(f));
        self
    }

    /// Called when a lazy list wants the data layer to grow to a new limit.
    #[must_use]
    pub fn on_update_limit(mut self, f: impl Fn(usize) + 'static) -> Self {
        self.callbacks.on_update_limit = Some(Rc::new(f));
        self
    }

    /// Labels rows that have no registered item, for type-ahead.
    #[must_use]
    pub fn format_item_label(mut self, f: impl Fn(&ItemKey) -> String + 'static) -> Self {
        self.callbacks.format_item_label = Some(Rc::new(f));
        self
    }

    /// Builds the provider.
    ///
    /// # Errors
    ///
    /// [`ListError::SelectionMode`] if a selection value does not fit the
    /// configured mode, and [`ListError::Control`] if both `selected` and
    /// `default_selected` were given.
    pub fn build(self) -> Result<ListProvider, ListError> {
        let mode = self.config.selection_mode;
        let mismatch = || ListError::SelectionMode { expected: mode };
        let selection = match mode {
            SelectionMode::Single => {
                let selected = self
                    .selected
                    .map(|value| value.into_single().ok_or_else(mismatch))
                    .transpose()?;
                let default_value = self
                    .default_selected
                    .map(|value| value.into_single().ok_or_else(mismatch))
                    .transpose()?;
                ListSelection::Single(Control::from_values(selected, default_value)?)
            }
            SelectionMode::Multiple => {
                let selected = self
                    .selected
                    .map(|value| value.into_multiple().ok_or_else(mismatch))
                    .transpose()?;
                let default_value = self
                    .default_selected
                    .map(|value| value.into_multiple().ok_or_else(mismatch))
                    .transpose()?;
                ListSelection::Multiple(Control::from_values(selected, default_value)?)
            }
        };

        let model = ListModel {
            registry: ItemRegistry::new(),
            virtual_keys: self.virtual_keys,
            lazy: self.lazy,
        };
        let mut state = ListState::new(self.id, self.config, model, selection);
        state.disabled = self.disabled;
        state.form = self.form;
        state.callbacks = self.callbacks;
        log::debug!("list {} built", state.id);
        Ok(ListProvider {
            context: ListContext {
                shared: Rc::new(ListCell::new(state)),
            },
        })
    }
}

/// An item's view of its list.
///
/// Cheap to clone. Items register through it and read their own state from
/// it; nested components use it to drive focus and selection.
#[derive(Clone)]
pub struct ListContext {
    shared: Shared,
}

impl fmt::Debug for ListContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListContext")
            .field("id", &self.shared.borrow().id)
            .finish_non_exhaustive()
    }
}

/// Looks up the list context an item was placed in.
///
/// # Errors
///
/// [`ListError::MissingProvider`] when there is none.
pub fn use_list_context(context: Option<&ListContext>) -> Result<ListContext, ListError> {
    context.cloned().ok_or(ListError::MissingProvider)
}

impl ListContext {
    /// Element id of the list.
    #[must_use]
    pub fn id(&self) -> String {
        self.shared.borrow().id.clone()
    }

    /// Whether the whole list is disabled.
    #[must_use]
    pub fn disabled(&self) -> bool {
        self.shared.borrow().disabled
    }

    /// The list's configuration.
    #[must_use]
    pub fn config(&self) -> ListConfig {
        self.shared.borrow().config.clone()
    }

    /// A weak handle for imperative control.
    #[must_use]
    pub fn handle(&self) -> ListHandle {
        ListHandle {
            shared: Rc::downgrade(&self.shared),
        }
    }

    /// Registers an item for as long as the returned guard lives.
    ///
    /// A duplicate key or position is logged and yields an inert guard; the
    /// first registrant keeps the slot.
    pub fn register_item(&self, def: ItemDef) -> ItemRegistration {
        let key = def.item_key.clone();
        match self.try_register_item(def) {
            Ok(registration) => registration,
            Err(err) => {
                log::warn!("list {}: {err}; item {key} stays unregistered", self.id());
                ItemRegistration {
                    list: Weak::new(),
                    key,
                    id: None,
                }
            }
        }
    }

    /// Registers an item, reporting conflicts.
    ///
    /// # Errors
    ///
    /// [`ListError::Registry`] for a duplicate key or position.
    pub fn try_register_item(&self, def: ItemDef) -> Result<ItemRegistration, ListError> {
        let key = def.item_key.clone();
        let id = self.shared.borrow_mut().model.registry.register(def)?;
        log::trace!("item {key} registered");
        Ok(ItemRegistration {
            list: Rc::downgrade(&self.shared),
            key,
            id: Some(id),
        })
    }

    /// Labels rows no item registered for with `format_item_label`.
    ///
    /// The formatter runs without the list borrowed, so it may read the list.
    fn formatted_labels(&self) -> RowLabels {
        let (format, keys) = {
            let state = self.shared.borrow();
            let Some(format) = state.callbacks.format_item_label.clone() else {
                return RowLabels::new();
            };
            if state.disabled || state.typeahead.is_none() {
                return RowLabels::new();
            }
            (format, state.unlabeled_keys())
        };
        keys.into_iter()
            .map(|key| {
                let label = format(&key);
                (key, label)
            })
            .collect()
    }

    /// Number of items, when known.
    #[must_use]
    pub fn total_items(&self) -> Option<usize> {
        self.shared.borrow().model.total_items()
    }

    /// The focus target, as set. May not resolve to a rendered item.
    #[must_use]
    pub fn focused_item(&self) -> Option<ItemTarget> {
        self.shared.borrow().focus.focused().cloned()
    }

    /// Key of the focused item, if the target resolves.
    #[must_use]
    pub fn focused_key(&self) -> Option<ItemKey> {
        self.shared.borrow().focused_key()
    }

    /// A snapshot of the focus state.
    #[must_use]
    pub fn focus(&self) -> ListFocus {
        self.shared.borrow().focus.clone()
    }

    /// Moves focus to `target`. Returns `true` if it changed.
    pub fn focus_item(&self, target: Option<ItemTarget>) -> bool {
        update(&self.shared, |state, fx| state.focus_item(target, fx))
    }

    /// A click on `key`: focuses it and activates it like Enter would.
    /// Shift extends a multi selection.
    pub fn activate_item(&self, key: ItemKey, modifiers: Modifiers) -> KeyOutcome {
        update(&self.shared, |state, fx| state.activate_key(key, modifiers, fx))
    }

    /// The current selection.
    #[must_use]
    pub fn selected(&self) -> SelectionValue {
        self.shared.borrow().selected_value()
    }

    /// The single selection's target; the primary key in a multi selection.
    #[must_use]
    pub fn selected_item(&self) -> Option<ItemTarget> {
        let state = self.shared.borrow();
        match &state.selection {
            ListSelection::Single(control) => control.value().selected().cloned(),
            ListSelection::Multiple(control) => {
                control.value().primary().cloned().map(ItemTarget::Key)
            }
        }
    }

    /// Selected keys.
    #[must_use]
    pub fn selected_items(&self) -> Vec<ItemKey> {
        self.shared.borrow().selected_keys()
    }

    /// Whether `key` is selected.
    #[must_use]
    pub fn is_selected(&self, key: &ItemKey) -> bool {
        self.shared.borrow().is_selected(key)
    }

    /// Selects `target`; a multi selection adds it. Returns `true` if the
    /// selection changed or a change was proposed.
    pub fn select_item(&self, target: ItemTarget) -> bool {
        update(&self.shared, |state, fx| state.select_item(target, fx))
    }

    /// Toggles `key`.
    pub fn toggle_item(&self, key: ItemKey) -> bool {
        update(&self.shared, |state, fx| state.toggle_item(key, fx))
    }

    /// Replaces a multi selection with `keys`.
    ///
    /// # Errors
    ///
    /// [`ListError::SelectionMode`] on a single selection list.
    pub fn select_items(&self, keys: impl IntoIterator<Item = ItemKey>) -> Result<bool, ListError> {
        let keys = keys.into_iter().collect();
        update(&self.shared, |state, fx| state.select_items(keys, fx))
    }

    /// Selects every item in a multi selection list.
    pub fn select_all(&self) -> bool {
        update(&self.shared, |state, fx| state.select_all(fx))
    }

    /// Empties the selection.
    pub fn clear_selection(&self) -> bool {
        update(&self.shared, |state, fx| state.clear_selection(fx))
    }

    /// Everything an item needs to render itself.
    #[must_use]
    pub fn item_state(&self, key: &ItemKey) -> ItemState {
        self.shared.borrow().item_state(key)
    }
}

/// Keeps an item registered; dropping it unregisters the item.
///
/// When the focused item goes, focus follows the list's stale focus policy.
#[must_use = "the item unregisters when the registration is dropped"]
pub struct ItemRegistration {
    list: Weak<ListCell>,
    key: ItemKey,
    id: Option<RegistrationId>,
}

impl fmt::Debug for ItemRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemRegistration")
            .field("key", &self.key)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl ItemRegistration {
    /// The registered key.
    #[must_use]
    pub fn key(&self) -> &ItemKey {
        &self.key
    }

    /// Whether the registration took effect.
    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.id.is_some() && self.list.strong_count() > 0
    }
}

impl Drop for ItemRegistration {
    fn drop(&mut self) {
        let (Some(id), Some(shared)) = (self.id, self.list.upgrade()) else {
            return;
        };
        if shared.try_borrow_mut().is_err() {
            log::debug!(
                "item {} dropped while its list was busy; unregistering later",
                self.key
            );
            shared.orphans.borrow_mut().push((self.key.clone(), id));
            return;
        }
        update(&shared, |state, fx| state.unregister(&self.key, id, fx));
    }
}

/// Imperative control over a list that may already be gone.
#[derive(Clone, Debug)]
pub struct ListHandle {
    shared: Weak<ListCell>,
}

impl ListHandle {
    fn with<R>(
        &self,
        f: impl FnOnce(&mut ListState, &mut Effects) -> R,
    ) -> Result<R, ListError> {
        let shared = self.shared.upgrade().ok_or(ListError::ProviderDropped)?;
        Ok(update(&shared, f))
    }

    /// Focuses the first item.
    ///
    /// # Errors
    ///
    /// [`ListError::ProviderDropped`] if the list is gone.
    pub fn focus_first(&self) -> Result<(), ListError> {
        self.with(|state, fx| state.navigate(Navigation::First, false, fx))
    }

    /// Focuses the last item; a lazy list loads until it finds it.
    ///
    /// # Errors
    ///
    /// [`ListError::ProviderDropped`] if the list is gone.
    pub fn focus_last(&self) -> Result<(), ListError> {
        self.with(|state, fx| state.navigate(Navigation::Last, false, fx))
    }

    /// Focuses `target`.
    ///
    /// # Errors
    ///
    /// [`ListError::ProviderDropped`] if the list is gone.
    pub fn focus(&self, target: Option<ItemTarget>) -> Result<bool, ListError> {
        self.with(|state, fx| state.focus_item(target, fx))
    }

    /// Selects `target`.
    ///
    /// # Errors
    ///
    /// [`ListError::ProviderDropped`] if the list is gone.
    pub fn select(&self, target: ItemTarget) -> Result<bool, ListError> {
        self.with(|state, fx| state.select_item(target, fx))
    }

    /// Empties the selection.
    ///
    /// # Errors
    ///
    /// [`ListError::ProviderDropped`] if the list is gone.
    pub fn clear_selection(&self) -> Result<bool, ListError> {
        self.with(|state, fx| state.clear_selection(fx))
    }

    /// Asks the data layer for another page regardless of the load trigger.
    /// Returns `true` if a request went out.
    ///
    /// # Errors
    ///
    /// [`ListError::ProviderDropped`] if the list is gone.
    pub fn load_more(&self) -> Result<bool, ListError> {
        self.with(|state, fx| state.request_more(fx))
    }
}
