//! Core systems for the picklist widget engine.
//!
//! This crate provides the infrastructure the widget layer builds on:
//!
//! - **Signal/Slot System**: Type-safe change notification
//! - **Timers**: One-shot, cancellable timers for interaction debouncing
//! - **Logging**: `tracing` target constants for log filtering
//!
//! The widget engine is single-threaded and cooperative: all mutation
//! happens synchronously inside event callbacks, so signals here invoke
//! their slots directly and timers are pumped by the host event loop
//! rather than by background threads.
//!
//! # Signal/Slot Example
//!
//! ```
//! use picklist_core::Signal;
//!
//! let changed = Signal::<u32>::new();
//!
//! let conn_id = changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! changed.emit(42);
//!
//! changed.disconnect(conn_id);
//! ```
//!
//! # Timer Example
//!
//! ```
//! use picklist_core::TimerManager;
//! use std::time::Duration;
//!
//! let mut timers = TimerManager::new();
//! let id = timers.start_one_shot(Duration::from_millis(250));
//!
//! // The host event loop pumps expired timers:
//! for fired in timers.process_expired() {
//!     println!("Timer {:?} fired!", fired);
//! }
//! # let _ = id;
//! ```

mod error;
pub mod logging;
pub mod signal;
mod timer;

pub use error::{CoreError, Result, TimerError};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use timer::{TimerId, TimerManager};
