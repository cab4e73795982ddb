//! Selector data model.
//!
//! - `OptionRecord`: one cached option with its MPTT ordering keys
//! - `OrderKey` / `TreeOrdering`: tolerant integer keys and tri-state comparison
//! - `SelectControl`: the bound multi-select list a cache mirrors
//! - `ListControl`: in-memory `SelectControl`
//! - `FilterQuery`: whitespace-tokenized AND filter

mod control;
mod filter;
mod record;

pub use control::{ControlOption, ControlSignals, ListControl, SelectControl};
pub use filter::FilterQuery;
pub use record::{sort_tree_order, OptionRecord, OrderKey, TreeOrdering};
