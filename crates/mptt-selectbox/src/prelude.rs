//! Prelude module for mptt-selectbox.
//!
//! ```ignore
//! use mptt_selectbox::prelude::*;
//! ```

pub use crate::choice::{Choice, ChoiceBuilder, ChoiceEntry, TreeNode};
pub use crate::config::SelectorConfig;
pub use crate::html::{parse_options, render_options};
pub use crate::model::{
    ControlOption, FilterQuery, ListControl, OptionRecord, OrderKey, SelectControl, TreeOrdering,
};
pub use crate::pair::SelectorPair;
pub use crate::store::SelectorStore;
pub use mptt_selectbox_core::{Result, SelectError, Signal};
