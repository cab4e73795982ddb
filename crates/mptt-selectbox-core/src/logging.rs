//! Logging facilities for mptt-selectbox.
//!
//! mptt-selectbox uses the `tracing` crate for instrumentation. The library
//! never installs a subscriber; to see its events, install one in your
//! application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("mptt_selectbox=debug")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Selector store target.
    pub const STORE: &str = "mptt_selectbox::store";
    /// Signal/slot target.
    pub const SIGNAL: &str = "mptt_selectbox_core::signal";
    /// Option markup target.
    pub const MARKUP: &str = "mptt_selectbox::html";
    /// Configuration loading target.
    pub const CONFIG: &str = "mptt_selectbox::config";
}
