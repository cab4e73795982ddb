//! Selector store.
//!
//! [`SelectorStore`] owns, per selector id, the bound control and the cache
//! of option records mirrored from it. Every operation addresses selectors
//! by id; the cache is the source of truth for filtering and ordering, the
//! control is the source of truth for selection.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use mptt_selectbox::model::{ControlOption, ListControl, SelectControl};
//! use mptt_selectbox::SelectorStore;
//!
//! fn option(value: &str, text: &str, tree_id: &str, left: &str) -> ControlOption {
//!     ControlOption::new(value, text)
//!         .with_attribute("data-tree-id", tree_id)
//!         .with_attribute("data-left-value", left)
//! }
//!
//! # fn main() -> mptt_selectbox::Result<()> {
//! let available = Arc::new(ListControl::with_options(vec![
//!     option("1", "Python", "1", "1"),
//!     option("2", "|-- Django", "1", "2"),
//! ]));
//! let chosen = Arc::new(ListControl::new());
//!
//! let mut store = SelectorStore::new();
//! store.bind("available", available.clone());
//! store.bind("chosen", chosen.clone());
//! store.initialize("available")?;
//! store.initialize("chosen")?;
//!
//! available.set_selected("2", true);
//! assert_eq!(store.move_selected("available", "chosen")?, 1);
//! assert_eq!(chosen.values(), vec!["2".to_string()]);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use mptt_selectbox_core::logging::targets;
use mptt_selectbox_core::{Result, SelectError, Signal};

use crate::config::SelectorConfig;
use crate::model::{sort_tree_order, ControlOption, FilterQuery, OptionRecord, SelectControl};

/// Signals emitted by a [`SelectorStore`].
pub struct StoreSignals {
    /// Emitted after a control was repopulated from its cache, with the
    /// selector id.
    pub redisplayed: Signal<String>,
    /// Emitted after a transfer, with `(from, to, moved_count)`.
    pub moved: Signal<(String, String, usize)>,
}

impl StoreSignals {
    fn new() -> Self {
        Self {
            redisplayed: Signal::new(),
            moved: Signal::new(),
        }
    }
}

/// Explicit registry of bound controls and their option caches.
pub struct SelectorStore {
    config: SelectorConfig,
    controls: HashMap<String, Arc<dyn SelectControl>>,
    caches: HashMap<String, Vec<OptionRecord>>,
    signals: StoreSignals,
}

impl Default for SelectorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectorStore {
    /// Creates a store using the default configuration.
    pub fn new() -> Self {
        Self::with_config(SelectorConfig::default())
    }

    /// Creates a store using `config`.
    pub fn with_config(config: SelectorConfig) -> Self {
        Self {
            config,
            controls: HashMap::new(),
            caches: HashMap::new(),
            signals: StoreSignals::new(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Returns the store's signals.
    pub fn signals(&self) -> &StoreSignals {
        &self.signals
    }

    /// Binds a control under `id`, returning the previously bound control.
    ///
    /// An existing cache for `id` is left as is; call
    /// [`initialize`](Self::initialize) to mirror the new control.
    pub fn bind(
        &mut self,
        id: impl Into<String>,
        control: Arc<dyn SelectControl>,
    ) -> Option<Arc<dyn SelectControl>> {
        let id = id.into();
        tracing::debug!(target: targets::STORE, id = %id, "binding control");
        self.controls.insert(id, control)
    }

    /// Returns `true` if a control is bound under `id`.
    pub fn is_bound(&self, id: &str) -> bool {
        self.controls.contains_key(id)
    }

    /// Returns `true` if the cache for `id` has been initialized.
    pub fn is_initialized(&self, id: &str) -> bool {
        self.caches.contains_key(id)
    }

    /// Returns the control bound under `id`.
    pub fn control(&self, id: &str) -> Result<&Arc<dyn SelectControl>> {
        self.controls
            .get(id)
            .ok_or_else(|| SelectError::unknown_selector(id))
    }

    /// Returns the cached records of `id`, in cache order.
    pub fn records(&self, id: &str) -> Result<&[OptionRecord]> {
        self.cache(id).map(Vec::as_slice)
    }

    /// Returns how many cached records of `id` are displayed.
    pub fn displayed_count(&self, id: &str) -> Result<usize> {
        Ok(self.cache(id)?.iter().filter(|r| r.displayed).count())
    }

    /// Builds the cache of `id` from the options currently in its control.
    ///
    /// Every record starts displayed. Replaces any previous cache. Returns
    /// the number of cached records.
    pub fn initialize(&mut self, id: &str) -> Result<usize> {
        let control = self.control(id)?;
        let records: Vec<OptionRecord> = control
            .options()
            .iter()
            .map(|option| OptionRecord::from_control_option(option, &self.config))
            .collect();
        let count = records.len();

        tracing::debug!(target: targets::STORE, id, count, "initialized selector cache");
        self.caches.insert(id.to_string(), records);
        Ok(count)
    }

    /// Sorts the cache of `id` in tree order.
    pub fn sort(&mut self, id: &str) -> Result<()> {
        sort_tree_order(self.cache_mut(id)?);
        Ok(())
    }

    /// Sorts the cache of `id` and repopulates its control with the
    /// displayed records. Re-created options are unselected.
    pub fn redisplay(&mut self, id: &str) -> Result<()> {
        let control = Arc::clone(self.control(id)?);
        let config = &self.config;
        let cache = self
            .caches
            .get_mut(id)
            .ok_or_else(|| SelectError::not_initialized(id))?;

        sort_tree_order(cache);
        let options: Vec<ControlOption> = cache
            .iter()
            .filter(|record| record.displayed)
            .map(|record| record.to_control_option(config))
            .collect();

        tracing::trace!(target: targets::STORE, id, shown = options.len(), total = cache.len(), "redisplaying selector");
        control.replace_options(options);
        self.signals.redisplayed.emit(id.to_string());
        Ok(())
    }

    /// Displays only the records whose text contains every whitespace
    /// separated token of `text`, ignoring case, then redisplays.
    ///
    /// Returns the number of displayed records.
    pub fn filter(&mut self, id: &str, text: &str) -> Result<usize> {
        let query = FilterQuery::parse(text);
        let cache = self.cache_mut(id)?;
        for record in cache.iter_mut() {
            record.displayed = query.matches(&record.text);
        }
        let displayed = cache.iter().filter(|r| r.displayed).count();

        tracing::debug!(target: targets::STORE, id, query = text, displayed, "filtered selector");
        self.redisplay(id)?;
        Ok(displayed)
    }

    /// Returns `true` if the cache of `id` holds a record with `value`.
    pub fn contains(&self, id: &str, value: &str) -> Result<bool> {
        Ok(self.cache(id)?.iter().any(|record| record.value == value))
    }

    /// Moves the options selected in the `from` control to the `to` cache,
    /// then redisplays both. Returns the number of moved records.
    pub fn move_selected(&mut self, from: &str, to: &str) -> Result<usize> {
        self.transfer(from, to, true)
    }

    /// Moves every option of the `from` control to the `to` cache, then
    /// redisplays both. Returns the number of moved records.
    pub fn move_all(&mut self, from: &str, to: &str) -> Result<usize> {
        self.transfer(from, to, false)
    }

    /// Marks every option in the control of `id` as selected. The cache is
    /// not touched.
    pub fn select_all(&self, id: &str) -> Result<()> {
        self.control(id)?.select_all();
        Ok(())
    }

    fn transfer(&mut self, from: &str, to: &str, selected_only: bool) -> Result<usize> {
        let from_control = Arc::clone(self.control(from)?);
        self.cache(from)?;
        self.cache(to)?;

        let _span =
            tracing::debug_span!(target: targets::STORE, "transfer", from, to, selected_only)
                .entered();

        let mut moved = 0;
        for option in from_control.options() {
            if selected_only && !option.selected {
                continue;
            }
            if !self.contains(from, &option.value)? {
                tracing::debug!(target: targets::STORE, value = %option.value, "option not in cache, skipping");
                continue;
            }

            let record = OptionRecord::from_control_option(&option, &self.config);
            self.cache_mut(to)?.push(record);
            remove_first(self.cache_mut(from)?, &option.value);
            moved += 1;
        }

        self.redisplay(from)?;
        self.redisplay(to)?;

        tracing::debug!(target: targets::STORE, moved, "transfer finished");
        self.signals
            .moved
            .emit((from.to_string(), to.to_string(), moved));
        Ok(moved)
    }

    fn cache(&self, id: &str) -> Result<&Vec<OptionRecord>> {
        self.control(id)?;
        self.caches
            .get(id)
            .ok_or_else(|| SelectError::not_initialized(id))
    }

    fn cache_mut(&mut self, id: &str) -> Result<&mut Vec<OptionRecord>> {
        self.control(id)?;
        self.caches
            .get_mut(id)
            .ok_or_else(|| SelectError::not_initialized(id))
    }
}

/// Removes the first record with `value`, keeping the order of the rest.
fn remove_first(records: &mut Vec<OptionRecord>, value: &str) {
    if let Some(index) = records.iter().position(|record| record.value == value) {
        records.remove(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ListControl;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn option(value: &str, text: &str, tree_id: i64, left: i64) -> ControlOption {
        ControlOption::new(value, text)
            .with_attribute("data-tree-id", tree_id.to_string())
            .with_attribute("data-left-value", left.to_string())
    }

    fn fruit_store() -> (SelectorStore, Arc<ListControl>, Arc<ListControl>) {
        let from = Arc::new(ListControl::with_options(vec![
            option("a", "Red Apples", 2, 5),
            option("b", "Green Apple", 1, 9),
            option("c", "Red Pears", 1, 3),
        ]));
        let to = Arc::new(ListControl::new());

        let mut store = SelectorStore::new();
        store.bind("from", from.clone());
        store.bind("to", to.clone());
        store.initialize("from").unwrap();
        store.initialize("to").unwrap();
        (store, from, to)
    }

    fn cached_values(store: &SelectorStore, id: &str) -> Vec<String> {
        store
            .records(id)
            .unwrap()
            .iter()
            .map(|r| r.value.clone())
            .collect()
    }

    #[test]
    fn test_initialize_snapshot() {
        let (store, _, _) = fruit_store();
        assert_eq!(cached_values(&store, "from"), vec!["a", "b", "c"]);
        assert!(store.records("from").unwrap().iter().all(|r| r.displayed));
        assert_eq!(store.records("to").unwrap().len(), 0);
    }

    #[test]
    fn test_redisplay_sorts_and_is_idempotent() {
        let (mut store, from, _) = fruit_store();
        store.redisplay("from").unwrap();
        assert_eq!(from.values(), vec!["c", "b", "a"]);
        let first = from.options();

        store.redisplay("from").unwrap();
        assert_eq!(from.options(), first);
        assert_eq!(first[0].attribute("data-tree-id"), Some("1"));
        assert_eq!(first[0].attribute("data-left-value"), Some("3"));
    }

    #[test]
    fn test_redisplay_clears_selection() {
        let (mut store, from, _) = fruit_store();
        from.select_all();
        store.redisplay("from").unwrap();
        assert!(from.selected_values().is_empty());
    }

    #[test]
    fn test_filter() {
        let (mut store, from, _) = fruit_store();
        assert_eq!(store.filter("from", "red apple").unwrap(), 1);
        assert_eq!(from.texts(), vec!["Red Apples"]);
        assert_eq!(store.records("from").unwrap().len(), 3);

        assert_eq!(store.filter("from", "").unwrap(), 3);
        assert_eq!(from.option_count(), 3);
    }

    #[test]
    fn test_sort() {
        let (mut store, _, _) = fruit_store();
        store.sort("from").unwrap();
        assert_eq!(cached_values(&store, "from"), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_move_selected() {
        let (mut store, from, to) = fruit_store();
        from.set_selected("b", true);

        assert_eq!(store.move_selected("from", "to").unwrap(), 1);
        assert!(!store.contains("from", "b").unwrap());
        assert!(store.contains("to", "b").unwrap());

        let moved = &store.records("to").unwrap()[0];
        assert_eq!(moved.text, "Green Apple");
        assert_eq!(moved.sort_key(), Some((1, 9)));
        assert!(moved.displayed);

        assert_eq!(from.values(), vec!["c", "a"]);
        assert_eq!(to.values(), vec!["b"]);
    }

    #[test]
    fn test_move_selected_nothing_selected() {
        let (mut store, from, to) = fruit_store();
        assert_eq!(store.move_selected("from", "to").unwrap(), 0);
        assert_eq!(from.option_count(), 3);
        assert_eq!(to.option_count(), 0);
    }

    #[test]
    fn test_move_all() {
        let (mut store, from, to) = fruit_store();
        assert_eq!(store.move_all("from", "to").unwrap(), 3);
        assert!(store.records("from").unwrap().is_empty());
        assert_eq!(to.values(), vec!["c", "b", "a"]);
        assert_eq!(from.option_count(), 0);
    }

    #[test]
    fn test_move_all_only_moves_visible_options() {
        let (mut store, from, to) = fruit_store();
        store.filter("from", "red").unwrap();

        assert_eq!(store.move_all("from", "to").unwrap(), 2);
        assert_eq!(cached_values(&store, "from"), vec!["b"]);
        // The hidden record keeps its filtered-out state.
        assert_eq!(from.option_count(), 0);
        assert_eq!(to.values(), vec!["c", "a"]);
    }

    #[test]
    fn test_option_missing_from_cache_is_skipped() {
        let (mut store, from, to) = fruit_store();
        let mut options = from.options();
        options.push(option("z", "Untracked", 0, 0).with_selected(true));
        from.replace_options(options);
        from.set_selected("a", true);

        assert_eq!(store.move_selected("from", "to").unwrap(), 1);
        assert_eq!(to.values(), vec!["a"]);
        assert!(!store.contains("to", "z").unwrap());
    }

    #[test]
    fn test_select_all_leaves_cache() {
        let (store, from, _) = fruit_store();
        store.select_all("from").unwrap();
        assert_eq!(from.selected_values().len(), 3);
        assert_eq!(cached_values(&store, "from"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unknown_and_uninitialized() {
        let mut store = SelectorStore::new();
        assert!(matches!(
            store.initialize("nope"),
            Err(SelectError::UnknownSelector { .. })
        ));

        store.bind("bound", Arc::new(ListControl::new()));
        assert!(store.is_bound("bound"));
        assert!(!store.is_initialized("bound"));
        assert!(matches!(
            store.redisplay("bound"),
            Err(SelectError::NotInitialized { .. })
        ));
        assert!(matches!(
            store.contains("nope", "a"),
            Err(SelectError::UnknownSelector { .. })
        ));
        assert!(matches!(
            store.select_all("nope"),
            Err(SelectError::UnknownSelector { .. })
        ));
    }

    #[test]
    fn test_transfer_to_uninitialized_fails_before_mutating() {
        let (mut store, from, _) = fruit_store();
        store.bind("fresh", Arc::new(ListControl::new()));
        from.select_all();

        assert!(store.move_selected("from", "fresh").is_err());
        assert_eq!(store.records("from").unwrap().len(), 3);
    }

    #[test]
    fn test_signals() {
        let (mut store, from, _) = fruit_store();
        let redisplays = Arc::new(AtomicUsize::new(0));
        let moved = Arc::new(AtomicUsize::new(0));

        let redisplays_clone = redisplays.clone();
        store.signals().redisplayed.connect(move |_| {
            redisplays_clone.fetch_add(1, Ordering::SeqCst);
        });
        let moved_clone = moved.clone();
        store.signals().moved.connect(move |(_, _, count)| {
            moved_clone.fetch_add(*count, Ordering::SeqCst);
        });

        from.set_selected("c", true);
        store.move_selected("from", "to").unwrap();
        assert_eq!(redisplays.load(Ordering::SeqCst), 2);
        assert_eq!(moved.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_reinitialize_replaces_cache() {
        let (mut store, from, _) = fruit_store();
        from.replace_options(vec![option("x", "Only", 1, 1)]);
        assert_eq!(store.initialize("from").unwrap(), 1);
        assert_eq!(cached_values(&store, "from"), vec!["x"]);
    }

    #[test]
    fn test_custom_attribute_names() {
        let config = SelectorConfig {
            tree_id_attribute: "data-tree".to_string(),
            left_value_attribute: "data-lft".to_string(),
            ..SelectorConfig::default()
        };
        let control = Arc::new(ListControl::with_options(vec![
            ControlOption::new("b", "B")
                .with_attribute("data-tree", "1")
                .with_attribute("data-lft", "8"),
            ControlOption::new("a", "A")
                .with_attribute("data-tree", "1")
                .with_attribute("data-lft", "2"),
        ]));

        let mut store = SelectorStore::with_config(config);
        store.bind("box", control.clone());
        store.initialize("box").unwrap();
        store.redisplay("box").unwrap();
        assert_eq!(control.values(), vec!["a", "b"]);
        assert_eq!(control.options()[0].attribute("data-lft"), Some("2"));
    }
}
