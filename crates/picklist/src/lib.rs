//! Picklist - a dual-list multi-select widget engine.
//!
//! Enhances a multi-choice host control into two synchronized list
//! views: an *available* column showing every option in native order
//! (searchable, grouped) and a *chosen* column showing the selected
//! options in the order the user picked them. The host control stays
//! the single source of truth; the widget reconciles its views from it
//! and persists the chosen order back onto it.
//!
//! # Example
//!
//! ```
//! use picklist::{HostSelect, Picklist, PicklistSettings, SelectOption};
//!
//! let mut host = HostSelect::new();
//! host.add_option(SelectOption::new("rs", "Rust"));
//! host.add_option(SelectOption::new("hs", "Haskell"));
//!
//! let mut widget = Picklist::init(host, PicklistSettings::default()).unwrap();
//! widget.toggle(0);
//! assert_eq!(widget.chosen().values(), vec!["rs"]);
//! ```

mod controller;
pub mod host;
mod limit;
mod order;
pub mod reconcile;
pub mod settings;
mod widget;

pub use host::{GroupId, HostSelect, OptionGroup, SelectOption};
pub use reconcile::{
    AvailableEntry, AvailableView, ChosenView, GroupView, Reconciled, RowView, find_by_value,
    reconcile,
};
pub use settings::{DEFAULT_ACTIVATION_DEBOUNCE, PicklistSettings};
pub use widget::Picklist;
