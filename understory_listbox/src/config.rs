// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! List configuration and presets.

use understory_focus::{DefaultPolicy, StaleFocusPolicy, WrapMode};
use understory_typeahead::TypeAheadConfig;

/// Layout axis; decides which arrow keys move focus.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// ArrowUp / ArrowDown.
    #[default]
    Vertical,
    /// ArrowLeft / ArrowRight.
    Horizontal,
}

/// How many items can be selected at once.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionMode {
    /// At most one item, addressed by an item target.
    #[default]
    Single,
    /// Any set of item keys.
    Multiple,
}

/// Accessibility role of the list container.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListRole {
    /// `listbox`, with `option` items.
    #[default]
    ListBox,
    /// `menu`, with `menuitem` items.
    Menu,
    /// `radiogroup`, with `radio` items.
    RadioGroup,
}

/// Behavior of one list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListConfig {
    /// Container role.
    pub role: ListRole,
    /// Single or multiple selection.
    pub selection_mode: SelectionMode,
    /// Arrow key axis.
    pub orientation: Orientation,
    /// Whether Next/Prev wrap at the ends.
    pub wrap: WrapMode,
    /// Whether arrow keys step over disabled items.
    pub skip_disabled: bool,
    /// Type-ahead settings, or `None` to leave printable keys to the host.
    pub typeahead: Option<TypeAheadConfig>,
    /// What focus does when the focused item unregisters.
    pub stale_focus: StaleFocusPolicy,
    /// Single selection moves along with keyboard focus.
    pub selection_follows_focus: bool,
    /// Activating an option asks the host to close the list.
    pub close_on_select: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        ListPreset::ListBox.config()
    }
}

impl ListConfig {
    /// The focus policy these settings describe.
    #[must_use]
    pub fn focus_policy(&self) -> DefaultPolicy {
        DefaultPolicy {
            wrap: self.wrap,
            skip_disabled: self.skip_disabled,
        }
    }

    /// Sets the selection mode.
    #[must_use]
    pub fn with_selection_mode(mut self, selection_mode: SelectionMode) -> Self {
        self.selection_mode = selection_mode;
        self
    }

    /// Sets the arrow key axis.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets the wrap mode.
    #[must_use]
    pub fn with_wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }

    /// Sets whether arrow keys skip disabled items.
    #[must_use]
    pub fn with_skip_disabled(mut self, skip_disabled: bool) -> Self {
        self.skip_disabled = skip_disabled;
        self
    }

    /// Enables or disables type-ahead.
    #[must_use]
    pub fn with_typeahead(mut self, typeahead: Option<TypeAheadConfig>) -> Self {
        self.typeahead = typeahead;
        self
    }

    /// Sets the stale focus policy.
    #[must_use]
    pub fn with_stale_focus(mut self, stale_focus: StaleFocusPolicy) -> Self {
        self.stale_focus = stale_focus;
        self
    }

    /// Sets whether single selection follows focus.
    #[must_use]
    pub fn with_selection_follows_focus(mut self, follows: bool) -> Self {
        self.selection_follows_focus = follows;
        self
    }

    /// Sets whether activating an option dismisses the list.
    #[must_use]
    pub fn with_close_on_select(mut self, close_on_select: bool) -> Self {
        self.close_on_select = close_on_select;
        self
    }
}

/// Ready-made configurations for the usual list widgets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListPreset {
    /// Single-select list box.
    ListBox,
    /// Multi-select list box.
    ListBoxMulti,
    /// Popup of a filtering single-select combo box.
    ComboBox,
    /// Popup of a filtering multi-select combo box.
    ComboBoxMulti,
    /// Action menu.
    Menu,
    /// Menu of checkable items.
    MenuMulti,
    /// Horizontal exclusive choice, selected by moving focus.
    SegmentedControl,
}

impl ListPreset {
    /// The configuration for this widget.
    ///
    /// Combo boxes leave printable keys to their text input and, since
    /// filtering removes items from under the focus, move focus to the
    /// nearest survivor. List boxes and menus keep a stale focus target.
    #[must_use]
    pub fn config(self) -> ListConfig {
        let base = ListConfig {
            role: ListRole::ListBox,
            selection_mode: SelectionMode::Single,
            orientation: Orientation::Vertical,
            wrap: WrapMode::Clamp,
            skip_disabled: false,
            typeahead: Some(TypeAheadConfig::default()),
            stale_focus: StaleFocusPolicy::Retain,
            selection_follows_focus: false,
            close_on_select: false,
        };
        match self {
            Self::ListBox => base,
            Self::ListBoxMulti => base.with_selection_mode(SelectionMode::Multiple),
            Self::ComboBox => base
                .with_typeahead(None)
                .with_stale_focus(StaleFocusPolicy::Nearest)
                .with_close_on_select(true),
            Self::ComboBoxMulti => base
                .with_selection_mode(SelectionMode::Multiple)
                .with_typeahead(None)
                .with_stale_focus(StaleFocusPolicy::Nearest),
            Self::Menu => ListConfig {
                role: ListRole::Menu,
                ..base.with_wrap(WrapMode::Wrap).with_close_on_select(true)
            },
            Self::MenuMulti => ListConfig {
                role: ListRole::Menu,
                ..base
                    .with_wrap(WrapMode::Wrap)
                    .with_selection_mode(SelectionMode::Multiple)
            },
            Self::SegmentedControl => ListConfig {
                role: ListRole::RadioGroup,
                ..base
                    .with_orientation(Orientation::Horizontal)
                    .with_wrap(WrapMode::Wrap)
                    .with_typeahead(None)
                    .with_selection_follows_focus(true)
            },
        }
    }
}

impl From<ListPreset> for ListConfig {
    fn from(preset: ListPreset) -> Self {
        preset.config()
    }
}

/// When a lazy list asks for more rows.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadMoreTrigger {
    /// Keyboard navigation reaching the end of the loaded rows (or End).
    #[default]
    Auto,
    /// Only an explicit request, for example a "load more" button wired to
    /// [`ListHandle::load_more`](crate::ListHandle::load_more).
    Manual,
}

/// State of a lazily loaded list, owned by the data layer.
///
/// The list never fetches anything. It asks for a larger `limit` through the
/// `on_update_limit` callback and waits for the data layer to report back
/// with a new `LazyWindow`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LazyWindow {
    /// Rows currently requested from the data layer.
    pub limit: usize,
    /// How far each request grows `limit`.
    pub page_size: usize,
    /// More rows exist beyond `limit`.
    pub has_more_items: bool,
    /// A request is in flight.
    pub is_loading: bool,
    /// When more rows are requested.
    pub load_more_trigger: LoadMoreTrigger,
    /// Text shown while the list has no rows.
    pub placeholder_empty: Option<String>,
}

impl LazyWindow {
    /// A window of `limit` rows growing by `page_size`.
    #[must_use]
    pub fn new(limit: usize, page_size: usize) -> Self {
        Self {
            limit,
            page_size,
            ..Self::default()
        }
    }

    /// Sets whether more rows exist.
    #[must_use]
    pub fn with_has_more_items(mut self, has_more_items: bool) -> Self {
        self.has_more_items = has_more_items;
        self
    }

    /// Sets whether a request is in flight.
    #[must_use]
    pub fn with_is_loading(mut self, is_loading: bool) -> Self {
        self.is_loading = is_loading;
        self
    }

    /// Sets the load trigger.
    #[must_use]
    pub fn with_load_more_trigger(mut self, trigger: LoadMoreTrigger) -> Self {
        self.load_more_trigger = trigger;
        self
    }

    /// Sets the empty placeholder.
    #[must_use]
    pub fn with_placeholder_empty(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder_empty = Some(placeholder.into());
        self
    }

    /// The limit the next request asks for.
    #[must_use]
    pub fn next_limit(&self) -> usize {
        self.limit.saturating_add(self.page_size.max(1))
    }
}

/// Native form participation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormConfig {
    /// Field name submitted with each selected key.
    pub name: String,
    /// Id of the owning form, when it is not the enclosing one.
    pub form: Option<String>,
}

impl FormConfig {
    /// A field called `name` in the enclosing form.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            form: None,
        }
    }

    /// Sets the owning form id.
    #[must_use]
    pub fn with_form(mut self, form: impl Into<String>) -> Self {
        self.form = Some(form.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_pick_stale_focus_per_widget() {
        assert_eq!(
            ListPreset::ListBox.config().stale_focus,
            StaleFocusPolicy::Retain
        );
        assert_eq!(ListPreset::Menu.config().stale_focus, StaleFocusPolicy::Retain);
        assert_eq!(
            ListPreset::ComboBoxMulti.config().stale_focus,
            StaleFocusPolicy::Nearest
        );
    }

    #[test]
    fn segmented_control_is_horizontal_and_follows_focus() {
        let config = ListConfig::from(ListPreset::SegmentedControl);
        assert_eq!(config.orientation, Orientation::Horizontal);
        assert_eq!(config.role, ListRole::RadioGroup);
        assert!(config.selection_follows_focus);
        assert!(config.typeahead.is_none());
    }

    #[test]
    fn next_limit_always_grows() {
        assert_eq!(LazyWindow::new(20, 20).next_limit(), 40);
        assert_eq!(LazyWindow::new(20, 0).next_limit(), 21);
    }
}
