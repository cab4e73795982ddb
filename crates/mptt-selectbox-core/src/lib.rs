//! Core systems for mptt-selectbox.
//!
//! This crate provides the foundation shared by the selector crates:
//!
//! - **Errors**: [`SelectError`] and the crate-wide [`Result`] alias
//! - **Signal/Slot System**: [`Signal`] notifications with RAII
//!   [`ConnectionGuard`]s
//! - **Logging**: `tracing` targets for filtering selector logs
//!
//! # Example
//!
//! ```
//! use mptt_selectbox_core::{SelectError, Signal};
//!
//! let moved = Signal::<(String, String, usize)>::new();
//! moved.connect(|(from, to, count)| {
//!     println!("moved {} options from {} to {}", count, from, to);
//! });
//! moved.emit(("available".into(), "chosen".into(), 2));
//!
//! let err = SelectError::unknown_selector("missing");
//! assert_eq!(err.selector_id(), Some("missing"));
//! ```

mod error;
pub mod logging;
pub mod signal;

pub use error::{Result, SelectError};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
