//! Widget configuration.
//!
//! [`PicklistSettings`] is resolved once when the widget is constructed
//! and treated as immutable afterwards. Defaults match what the widget
//! ships with out of the box: search enabled, no headers, no limit.

use std::sync::Arc;
use std::time::Duration;

/// Default debounce window separating a single activation (highlight)
/// from a double activation (toggle).
pub const DEFAULT_ACTIVATION_DEBOUNCE: Duration = Duration::from_millis(250);

/// Callback invoked when the selection count reaches the limit.
pub type LimitReachedFn = Arc<dyn Fn() + Send + Sync>;

/// Configuration for a [`Picklist`](crate::Picklist) widget.
#[derive(Clone)]
pub struct PicklistSettings {
    /// Whether the available view exposes a search filter.
    pub enable_search: bool,
    /// Placeholder text for the search input.
    pub search_placeholder: String,
    /// Header label for the available column. Headers are rendered only
    /// when both column headers are set.
    pub non_selected_header: Option<String>,
    /// Header label for the chosen column.
    pub selected_header: Option<String>,
    /// Maximum number of selected options; `None` means unlimited.
    pub limit: Option<usize>,
    /// Whether groups with no visible rows are suppressed from the
    /// available view.
    pub hide_empty_groups: bool,
    /// Initial chosen-list display order, by option value.
    pub initial_selected_order: Vec<String>,
    /// Render hint: show move-to-chosen/move-to-available buttons.
    pub show_move_buttons: bool,
    /// Render hint: show move-up/move-down buttons next to the chosen
    /// column.
    pub show_up_down_buttons: bool,
    /// Debounce window for distinguishing single from double activation.
    pub activation_debounce: Duration,
    /// Callback connected to the widget's `limit_reached` signal before
    /// the first reconciliation, so a host that is already saturated at
    /// construction still reports its edge.
    pub on_limit_reached: Option<LimitReachedFn>,
}

impl Default for PicklistSettings {
    fn default() -> Self {
        Self {
            enable_search: true,
            search_placeholder: "Search...".to_string(),
            non_selected_header: None,
            selected_header: None,
            limit: None,
            hide_empty_groups: false,
            initial_selected_order: Vec::new(),
            show_move_buttons: false,
            show_up_down_buttons: false,
            activation_debounce: DEFAULT_ACTIVATION_DEBOUNCE,
            on_limit_reached: None,
        }
    }
}

impl std::fmt::Debug for PicklistSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PicklistSettings")
            .field("enable_search", &self.enable_search)
            .field("search_placeholder", &self.search_placeholder)
            .field("non_selected_header", &self.non_selected_header)
            .field("selected_header", &self.selected_header)
            .field("limit", &self.limit)
            .field("hide_empty_groups", &self.hide_empty_groups)
            .field("initial_selected_order", &self.initial_selected_order)
            .field("show_move_buttons", &self.show_move_buttons)
            .field("show_up_down_buttons", &self.show_up_down_buttons)
            .field("activation_debounce", &self.activation_debounce)
            .field("on_limit_reached", &self.on_limit_reached.is_some())
            .finish()
    }
}

impl PicklistSettings {
    /// Creates settings with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether search is enabled.
    pub fn with_search(mut self, enable: bool) -> Self {
        self.enable_search = enable;
        self
    }

    /// Sets the search placeholder text.
    pub fn with_search_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.search_placeholder = placeholder.into();
        self
    }

    /// Sets both column headers.
    pub fn with_headers(
        mut self,
        non_selected: impl Into<String>,
        selected: impl Into<String>,
    ) -> Self {
        self.non_selected_header = Some(non_selected.into());
        self.selected_header = Some(selected.into());
        self
    }

    /// Sets the selection limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets whether empty groups are hidden from the available view.
    pub fn with_hide_empty_groups(mut self, hide: bool) -> Self {
        self.hide_empty_groups = hide;
        self
    }

    /// Sets the initial chosen-list display order.
    pub fn with_initial_selected_order(mut self, order: Vec<String>) -> Self {
        self.initial_selected_order = order;
        self
    }

    /// Sets the move-button render hint.
    pub fn with_move_buttons(mut self, show: bool) -> Self {
        self.show_move_buttons = show;
        self
    }

    /// Sets the up/down-button render hint.
    pub fn with_up_down_buttons(mut self, show: bool) -> Self {
        self.show_up_down_buttons = show;
        self
    }

    /// Sets the activation debounce window.
    pub fn with_activation_debounce(mut self, window: Duration) -> Self {
        self.activation_debounce = window;
        self
    }

    /// Sets the limit-reached callback.
    pub fn with_on_limit_reached<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_limit_reached = Some(Arc::new(callback));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = PicklistSettings::default();
        assert!(settings.enable_search);
        assert_eq!(settings.search_placeholder, "Search...");
        assert!(settings.non_selected_header.is_none());
        assert!(settings.selected_header.is_none());
        assert!(settings.limit.is_none());
        assert!(!settings.hide_empty_groups);
        assert!(settings.initial_selected_order.is_empty());
        assert!(!settings.show_move_buttons);
        assert!(!settings.show_up_down_buttons);
        assert_eq!(settings.activation_debounce, DEFAULT_ACTIVATION_DEBOUNCE);
        assert!(settings.on_limit_reached.is_none());
    }

    #[test]
    fn test_builders() {
        let settings = PicklistSettings::new()
            .with_search(false)
            .with_headers("Available", "Chosen")
            .with_limit(3)
            .with_hide_empty_groups(true)
            .with_initial_selected_order(vec!["b".into(), "a".into()])
            .with_up_down_buttons(true)
            .with_activation_debounce(Duration::from_millis(100))
            .with_on_limit_reached(|| {});

        assert!(!settings.enable_search);
        assert_eq!(settings.non_selected_header.as_deref(), Some("Available"));
        assert_eq!(settings.selected_header.as_deref(), Some("Chosen"));
        assert_eq!(settings.limit, Some(3));
        assert!(settings.hide_empty_groups);
        assert_eq!(settings.initial_selected_order, vec!["b", "a"]);
        assert!(settings.show_up_down_buttons);
        assert_eq!(settings.activation_debounce, Duration::from_millis(100));
        assert!(settings.on_limit_reached.is_some());
    }
}
