//! Bound controls.
//!
//! A selector cache mirrors a visible multi-select list. The list itself is
//! abstracted behind [`SelectControl`] so the ordering, filtering and
//! transfer logic can run against any host: a browser `<select>`, a native
//! list widget, or the in-memory [`ListControl`] used in tests.

use std::collections::BTreeMap;

use mptt_selectbox_core::{Result, Signal};
use parking_lot::RwLock;

use crate::html::parse_options;

/// One option of a bound control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlOption {
    /// Submitted value.
    pub value: String,
    /// Visible label.
    pub text: String,
    /// Whether the option is currently selected.
    pub selected: bool,
    /// Auxiliary key/value metadata (`data-*` attributes).
    pub attributes: BTreeMap<String, String>,
}

impl ControlOption {
    /// Creates an unselected option without attributes.
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            selected: false,
            attributes: BTreeMap::new(),
        }
    }

    /// Sets an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Sets the selection flag.
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Returns the value of an attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// An addressable, ordered, mutable list-of-options control.
///
/// Methods take `&self`; implementations use interior mutability so a
/// control can be shared between the selector store and the host UI.
pub trait SelectControl: Send + Sync {
    /// Returns a snapshot of the current options, in display order.
    fn options(&self) -> Vec<ControlOption>;

    /// Removes every option and inserts `options` in the given order.
    fn replace_options(&self, options: Vec<ControlOption>);

    /// Marks every current option as selected.
    fn select_all(&self);

    /// Returns the number of current options.
    fn option_count(&self) -> usize {
        self.options().len()
    }

    /// Returns the values of the selected options, in display order.
    fn selected_values(&self) -> Vec<String> {
        self.options()
            .into_iter()
            .filter(|option| option.selected)
            .map(|option| option.value)
            .collect()
    }
}

/// Signals emitted by a [`ListControl`].
pub struct ControlSignals {
    /// Emitted after the option list was replaced, with the new option count.
    pub options_replaced: Signal<usize>,
    /// Emitted whenever the selection state of any option changed.
    pub selection_changed: Signal<()>,
}

impl ControlSignals {
    fn new() -> Self {
        Self {
            options_replaced: Signal::new(),
            selection_changed: Signal::new(),
        }
    }
}

/// An in-memory multi-select list.
///
/// # Example
///
/// ```
/// use mptt_selectbox::model::{ControlOption, ListControl, SelectControl};
///
/// let control = ListControl::with_options(vec![
///     ControlOption::new("1", "News"),
///     ControlOption::new("2", "Releases"),
/// ]);
/// control.set_selected("2", true);
/// assert_eq!(control.selected_values(), vec!["2".to_string()]);
/// ```
pub struct ListControl {
    options: RwLock<Vec<ControlOption>>,
    signals: ControlSignals,
}

impl Default for ListControl {
    fn default() -> Self {
        Self::new()
    }
}

impl ListControl {
    /// Creates an empty control.
    pub fn new() -> Self {
        Self::with_options(Vec::new())
    }

    /// Creates a control holding `options`.
    pub fn with_options(options: Vec<ControlOption>) -> Self {
        Self {
            options: RwLock::new(options),
            signals: ControlSignals::new(),
        }
    }

    /// Creates a control from rendered `<option>` markup.
    pub fn from_markup(markup: &str) -> Result<Self> {
        Ok(Self::with_options(parse_options(markup)?))
    }

    /// Returns the control's signals.
    pub fn signals(&self) -> &ControlSignals {
        &self.signals
    }

    /// Sets the selection flag of the first option with `value`.
    ///
    /// Returns `false` if no option has that value.
    pub fn set_selected(&self, value: &str, selected: bool) -> bool {
        let changed = {
            let mut options = self.options.write();
            match options.iter_mut().find(|option| option.value == value) {
                Some(option) => {
                    let changed = option.selected != selected;
                    option.selected = selected;
                    Some(changed)
                }
                None => None,
            }
        };
        match changed {
            Some(true) => {
                self.signals.selection_changed.emit(());
                true
            }
            Some(false) => true,
            None => false,
        }
    }

    /// Deselects every option.
    pub fn clear_selection(&self) {
        self.set_all_selected(false);
    }

    /// Returns the visible labels, in display order.
    pub fn texts(&self) -> Vec<String> {
        self.options.read().iter().map(|o| o.text.clone()).collect()
    }

    /// Returns the option values, in display order.
    pub fn values(&self) -> Vec<String> {
        self.options.read().iter().map(|o| o.value.clone()).collect()
    }

    fn set_all_selected(&self, selected: bool) {
        let changed = {
            let mut options = self.options.write();
            let mut changed = false;
            for option in options.iter_mut() {
                changed |= option.selected != selected;
                option.selected = selected;
            }
            changed
        };
        if changed {
            self.signals.selection_changed.emit(());
        }
    }
}

impl SelectControl for ListControl {
    fn options(&self) -> Vec<ControlOption> {
        self.options.read().clone()
    }

    fn replace_options(&self, options: Vec<ControlOption>) {
        let count = options.len();
        *self.options.write() = options;
        self.signals.options_replaced.emit(count);
    }

    fn select_all(&self) {
        self.set_all_selected(true);
    }

    fn option_count(&self) -> usize {
        self.options.read().len()
    }
}
