//! Logging facilities for picklist.
//!
//! Picklist uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Timer system target.
    pub const TIMER: &str = "picklist_core::timer";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "picklist_core::signal";
    /// Reconciliation engine target.
    pub const RECONCILE: &str = "picklist::reconcile";
    /// Selection order store target.
    pub const ORDER: &str = "picklist::order";
    /// Limit policy target.
    pub const LIMIT: &str = "picklist::limit";
    /// Widget lifecycle and interaction target.
    pub const WIDGET: &str = "picklist::widget";
}
