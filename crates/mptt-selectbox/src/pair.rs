//! Available/chosen selector pairs.
//!
//! A filtered multi-select field is rendered as two selectors: the options
//! still available (`<field>_from`) and the options chosen (`<field>_to`).
//! [`SelectorPair`] names both and forwards the button and filter actions
//! of the widget to a [`SelectorStore`].

use std::sync::Arc;

use mptt_selectbox_core::Result;

use crate::model::SelectControl;
use crate::store::SelectorStore;

/// The two selector ids of one filtered multi-select field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorPair {
    from_id: String,
    to_id: String,
}

impl SelectorPair {
    /// Creates a pair from explicit ids.
    pub fn new(from_id: impl Into<String>, to_id: impl Into<String>) -> Self {
        Self {
            from_id: from_id.into(),
            to_id: to_id.into(),
        }
    }

    /// Creates the pair for a form field: `<field>_from` and `<field>_to`.
    pub fn for_field(field: &str) -> Self {
        Self::new(format!("{field}_from"), format!("{field}_to"))
    }

    /// Id of the available selector.
    pub fn from_id(&self) -> &str {
        &self.from_id
    }

    /// Id of the chosen selector.
    pub fn to_id(&self) -> &str {
        &self.to_id
    }

    /// Binds both controls in `store`.
    pub fn bind(
        &self,
        store: &mut SelectorStore,
        available: Arc<dyn SelectControl>,
        chosen: Arc<dyn SelectControl>,
    ) {
        store.bind(self.from_id.clone(), available);
        store.bind(self.to_id.clone(), chosen);
    }

    /// Initializes both caches and shows them in tree order.
    pub fn initialize(&self, store: &mut SelectorStore) -> Result<()> {
        store.initialize(&self.from_id)?;
        store.initialize(&self.to_id)?;
        store.redisplay(&self.from_id)?;
        store.redisplay(&self.to_id)
    }

    /// Moves the selected available options to the chosen side.
    pub fn choose(&self, store: &mut SelectorStore) -> Result<usize> {
        store.move_selected(&self.from_id, &self.to_id)
    }

    /// Moves every available option to the chosen side.
    pub fn choose_all(&self, store: &mut SelectorStore) -> Result<usize> {
        store.move_all(&self.from_id, &self.to_id)
    }

    /// Moves the selected chosen options back to the available side.
    pub fn remove(&self, store: &mut SelectorStore) -> Result<usize> {
        store.move_selected(&self.to_id, &self.from_id)
    }

    /// Moves every chosen option back to the available side.
    pub fn remove_all(&self, store: &mut SelectorStore) -> Result<usize> {
        store.move_all(&self.to_id, &self.from_id)
    }

    /// Filters the available side.
    pub fn filter_available(&self, store: &mut SelectorStore, text: &str) -> Result<usize> {
        store.filter(&self.from_id, text)
    }

    /// Filters the chosen side.
    pub fn filter_chosen(&self, store: &mut SelectorStore, text: &str) -> Result<usize> {
        store.filter(&self.to_id, text)
    }

    /// Selects every chosen option so the whole chosen list is submitted.
    pub fn prepare_submit(&self, store: &SelectorStore) -> Result<()> {
        store.select_all(&self.to_id)
    }

    /// Returns the values held by the chosen cache, in cache order.
    pub fn chosen_values(&self, store: &SelectorStore) -> Result<Vec<String>> {
        Ok(store
            .records(&self.to_id)?
            .iter()
            .map(|record| record.value.clone())
            .collect())
    }
}
