//! mptt-selectbox - a tree-ordered dual-list selector.
//!
//! Category pickers for MPTT trees show two multi-select lists side by side:
//! the categories still available and the ones chosen. This crate keeps each
//! list in sync with an in-memory cache that can be filtered, moved between
//! lists and always displayed in tree order (tree id, then left value).
//!
//! - [`model`]: option records, tree ordering, bound controls, filtering
//! - [`SelectorStore`]: the per-selector caches and their operations
//! - [`SelectorPair`]: the available/chosen pair of one form field
//! - [`choice`]: level-indented choices built from MPTT nodes
//! - [`html`]: `<option>` markup carrying tree metadata
//! - [`SelectorConfig`]: attribute names and level indicator
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use mptt_selectbox::prelude::*;
//!
//! # fn main() -> mptt_selectbox::Result<()> {
//! let config = SelectorConfig::default();
//! let builder = ChoiceBuilder::from_config(&config);
//! let nodes = vec![
//!     TreeNode::new("2", "Django").at_level(1).in_tree(1, 2),
//!     TreeNode::new("1", "Python").in_tree(1, 1),
//! ];
//! let markup = render_options(&builder.choices(&nodes), &[], &config);
//!
//! let available = Arc::new(ListControl::from_markup(&markup)?);
//! let chosen = Arc::new(ListControl::new());
//!
//! let mut store = SelectorStore::with_config(config);
//! let pair = SelectorPair::for_field("categories");
//! pair.bind(&mut store, available.clone(), chosen.clone());
//! pair.initialize(&mut store)?;
//! assert_eq!(available.values(), vec!["1", "2"]);
//!
//! available.set_selected("2", true);
//! pair.choose(&mut store)?;
//! assert_eq!(chosen.texts(), vec!["|-- Django"]);
//! # Ok(())
//! # }
//! ```

pub use mptt_selectbox_core::*;

pub mod choice;
pub mod config;
pub mod html;
pub mod model;
pub mod pair;
pub mod prelude;
pub mod store;

pub use config::SelectorConfig;
pub use pair::SelectorPair;
pub use store::{SelectorStore, StoreSignals};
