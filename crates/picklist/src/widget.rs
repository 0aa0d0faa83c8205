//! Widget lifecycle and reconciliation driver.
//!
//! [`Picklist`] owns the host control for the lifetime of the
//! enhancement. Construction goes through [`Picklist::init`], which
//! refuses unsuitable hosts by returning `None`; destruction through
//! [`Picklist::into_host`], which hands the control back with its
//! intrinsic state restored.

use picklist_core::Signal;
use picklist_core::logging::targets;

use crate::controller::ActivationDebounce;
use crate::host::{ATTR_ENHANCED, ATTR_ORIGIN_DISABLED, HostSelect};
use crate::limit::{LimitEdge, LimitPolicy};
use crate::order;
use crate::reconcile::{self, AvailableView, ChosenView};
use crate::settings::PicklistSettings;

/// A dual-list multi-select widget over a [`HostSelect`].
///
/// All reads of the rendered state go through [`available`](Self::available)
/// and [`chosen`](Self::chosen); all interaction goes through the
/// controller operations (`toggle`, `press`, the move family). The host
/// remains reachable through [`host_mut`](Self::host_mut) for external
/// mutation, which must be followed by [`refresh`](Self::refresh).
pub struct Picklist {
    pub(crate) host: HostSelect,
    pub(crate) settings: PicklistSettings,
    pub(crate) limit: LimitPolicy,
    pub(crate) query: Option<String>,
    pub(crate) highlight: Option<usize>,
    pub(crate) debounce: ActivationDebounce,
    pub(crate) available: AvailableView,
    pub(crate) chosen: ChosenView,
    /// Emitted once each time the selection count reaches the
    /// configured limit. Edge-triggered: staying at the limit does not
    /// re-emit.
    pub limit_reached: Signal<()>,
}

impl Picklist {
    /// Enhances a host control.
    ///
    /// Returns `None` without touching the host when the control is
    /// single-choice or already enhanced. On success the enhancement
    /// marker and each option's intrinsic-disabled record are written,
    /// an initial reconciliation runs, and the selection order is
    /// persisted on the host.
    pub fn init(mut host: HostSelect, settings: PicklistSettings) -> Option<Self> {
        if !host.is_multiple() {
            tracing::warn!(
                target: targets::WIDGET,
                "refusing to enhance a single-choice control"
            );
            return None;
        }
        if host.attribute(ATTR_ENHANCED).is_some() {
            tracing::debug!(target: targets::WIDGET, "control already enhanced");
            return None;
        }

        host.set_attribute(ATTR_ENHANCED, "true");
        for option in host.options_mut() {
            let disabled = option.is_disabled().to_string();
            option.set_attribute(ATTR_ORIGIN_DISABLED, disabled);
        }

        // A stored order on the host wins over the configured initial
        // order, so re-enhancing a control preserves the user's layout.
        if order::stored(&host).is_none() && !settings.initial_selected_order.is_empty() {
            order::write(&mut host, &settings.initial_selected_order);
        }

        let mut widget = Self {
            limit: LimitPolicy::new(settings.limit),
            debounce: ActivationDebounce::new(settings.activation_debounce),
            host,
            settings,
            query: None,
            highlight: None,
            available: AvailableView::default(),
            chosen: ChosenView::default(),
            limit_reached: Signal::new(),
        };
        // Connect before the first reconciliation: a host that is
        // already saturated reports its limit edge during init.
        if let Some(on_limit) = widget.settings.on_limit_reached.clone() {
            widget.limit_reached.connect(move |_| on_limit());
        }
        widget.refresh();
        Some(widget)
    }

    /// Recomputes both views from the host and persists the merged
    /// selection order.
    ///
    /// Call after mutating the host externally. Also re-enforces the
    /// selection limit, so options selected or added behind the
    /// widget's back are brought back under policy.
    pub fn refresh(&mut self) {
        if self.highlight.is_some_and(|p| p >= self.host.len()) {
            self.highlight = None;
        }

        if self.limit.apply(&mut self.host) == LimitEdge::Reached {
            self.limit_reached.emit(());
        }

        let order = order::read(&self.host);
        let out = reconcile::reconcile(
            &self.host,
            &order,
            self.query.as_deref(),
            self.highlight,
            &self.settings,
        );
        order::write(&mut self.host, &out.order);
        self.available = out.available;
        self.chosen = out.chosen;

        tracing::trace!(
            target: targets::WIDGET,
            chosen = self.chosen.rows.len(),
            "views refreshed"
        );
    }

    /// Sets the search query and re-renders the available view.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.query = (!query.is_empty()).then_some(query);
        self.refresh();
    }

    /// Clears the search query, restoring the full available view.
    pub fn clear_query(&mut self) {
        self.query = None;
        self.refresh();
    }

    /// The current search query, if any.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// The rendered available column.
    pub fn available(&self) -> &AvailableView {
        &self.available
    }

    /// The rendered chosen column.
    pub fn chosen(&self) -> &ChosenView {
        &self.chosen
    }

    /// The native position of the highlighted option, if any.
    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    /// Whether the selection is currently saturated at its limit.
    pub fn at_limit(&self) -> bool {
        self.limit.is_at_limit()
    }

    /// The enhanced host control.
    pub fn host(&self) -> &HostSelect {
        &self.host
    }

    /// Mutable access to the host. Follow external mutation with
    /// [`refresh`](Self::refresh).
    pub fn host_mut(&mut self) -> &mut HostSelect {
        &mut self.host
    }

    /// The widget's resolved settings.
    pub fn settings(&self) -> &PicklistSettings {
        &self.settings
    }

    /// The persisted selection order, as currently stored on the host.
    pub fn stored_order(&self) -> Vec<String> {
        order::read(&self.host)
    }

    /// Tears the widget down, returning the host control.
    ///
    /// The enhancement marker is removed and every option's intrinsic
    /// disabled state is restored; selection state and the persisted
    /// order are left in place.
    pub fn into_host(mut self) -> HostSelect {
        self.host.remove_attribute(ATTR_ENHANCED);
        for option in self.host.options_mut() {
            let intrinsic = option
                .attribute(ATTR_ORIGIN_DISABLED)
                .is_some_and(|v| v == "true");
            option.set_disabled(intrinsic);
        }
        self.host
    }
}

impl std::fmt::Debug for Picklist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Picklist")
            .field("host", &self.host)
            .field("highlight", &self.highlight)
            .field("query", &self.query)
            .field("at_limit", &self.limit.is_at_limit())
            .field("press_pending", &self.debounce.is_pending())
            .finish()
    }
}
