//! Selection-count limit enforcement.
//!
//! When a limit is configured and the selected count reaches it, every
//! non-selected option is force-disabled so it cannot be chosen. When
//! the count drops back below the limit, those options are restored to
//! their recorded intrinsic disabled state, so options that were
//! disabled before enhancement stay disabled.

use picklist_core::logging::targets;

use crate::host::{ATTR_ORIGIN_DISABLED, HostSelect};

/// Edge produced by a [`LimitPolicy::apply`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LimitEdge {
    /// The limit was just reached; callers fire their notification now.
    Reached,
    /// The selection just dropped back below the limit.
    Released,
    /// No transition; possibly still at the limit, possibly still below.
    Unchanged,
}

/// Tracks whether the selection is at its configured limit.
///
/// The `at_limit` latch makes the reached notification edge-triggered:
/// re-applying the policy while saturated keeps the disabled state
/// enforced but reports [`LimitEdge::Unchanged`].
#[derive(Debug)]
pub(crate) struct LimitPolicy {
    limit: Option<usize>,
    at_limit: bool,
}

impl LimitPolicy {
    pub(crate) fn new(limit: Option<usize>) -> Self {
        Self {
            limit,
            at_limit: false,
        }
    }

    pub(crate) fn is_at_limit(&self) -> bool {
        self.at_limit
    }

    /// True when selecting one more option is currently disallowed.
    pub(crate) fn selection_blocked(&self, host: &HostSelect) -> bool {
        match self.limit {
            Some(limit) => host.selected_count() >= limit,
            None => false,
        }
    }

    /// Re-evaluates the limit against the host and enforces it.
    ///
    /// Idempotent: while saturated every non-selected option is
    /// (re-)disabled on each pass, covering options added since the
    /// limit was reached.
    pub(crate) fn apply(&mut self, host: &mut HostSelect) -> LimitEdge {
        let Some(limit) = self.limit else {
            return LimitEdge::Unchanged;
        };

        let saturated = host.selected_count() >= limit;
        let edge = match (self.at_limit, saturated) {
            (false, true) => LimitEdge::Reached,
            (true, false) => LimitEdge::Released,
            _ => LimitEdge::Unchanged,
        };

        if saturated {
            for option in host.options_mut() {
                if !option.is_selected() {
                    option.set_disabled(true);
                }
            }
            if edge == LimitEdge::Reached {
                tracing::debug!(target: targets::LIMIT, limit, "selection limit reached");
            }
        } else if self.at_limit {
            // Only undo what the limit imposed; options disabled before
            // enhancement keep their intrinsic state.
            for option in host.options_mut() {
                if !option.is_selected() {
                    let intrinsic = option
                        .attribute(ATTR_ORIGIN_DISABLED)
                        .is_some_and(|v| v == "true");
                    option.set_disabled(intrinsic);
                }
            }
            tracing::debug!(target: targets::LIMIT, limit, "selection limit released");
        }

        self.at_limit = saturated;
        edge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SelectOption;

    fn record_origin(host: &mut HostSelect) {
        for option in host.options_mut() {
            let disabled = option.is_disabled().to_string();
            option.set_attribute(ATTR_ORIGIN_DISABLED, disabled);
        }
    }

    fn three_option_host() -> HostSelect {
        let mut host = HostSelect::new();
        host.add_option(SelectOption::new("A", "Apple"));
        host.add_option(SelectOption::new("B", "Banana"));
        host.add_option(SelectOption::new("C", "Cherry"));
        record_origin(&mut host);
        host
    }

    #[test]
    fn test_no_limit_never_blocks() {
        let mut host = three_option_host();
        let mut policy = LimitPolicy::new(None);

        for option in host.options_mut() {
            option.set_selected(true);
        }
        assert!(!policy.selection_blocked(&host));
        assert_eq!(policy.apply(&mut host), LimitEdge::Unchanged);
        assert!(!policy.is_at_limit());
    }

    #[test]
    fn test_reached_edge_fires_once() {
        let mut host = three_option_host();
        let mut policy = LimitPolicy::new(Some(2));

        host.option_mut(0).unwrap().set_selected(true);
        assert_eq!(policy.apply(&mut host), LimitEdge::Unchanged);

        host.option_mut(1).unwrap().set_selected(true);
        assert_eq!(policy.apply(&mut host), LimitEdge::Reached);
        // Re-applying while saturated reports no further edge.
        assert_eq!(policy.apply(&mut host), LimitEdge::Unchanged);
        assert!(policy.is_at_limit());
    }

    #[test]
    fn test_non_selected_disabled_at_limit() {
        let mut host = three_option_host();
        let mut policy = LimitPolicy::new(Some(2));

        host.option_mut(0).unwrap().set_selected(true);
        host.option_mut(1).unwrap().set_selected(true);
        policy.apply(&mut host);

        assert!(!host.option(0).unwrap().is_disabled());
        assert!(!host.option(1).unwrap().is_disabled());
        assert!(host.option(2).unwrap().is_disabled());
    }

    #[test]
    fn test_release_restores_intrinsic_state() {
        let mut host = HostSelect::new();
        host.add_option(SelectOption::new("A", "Apple"));
        host.add_option(SelectOption::new("B", "Banana"));
        host.add_option(SelectOption::new("C", "Cherry").with_disabled(true));
        record_origin(&mut host);
        let mut policy = LimitPolicy::new(Some(2));

        host.option_mut(0).unwrap().set_selected(true);
        host.option_mut(1).unwrap().set_selected(true);
        assert_eq!(policy.apply(&mut host), LimitEdge::Reached);
        assert!(host.option(2).unwrap().is_disabled());

        host.option_mut(1).unwrap().set_selected(false);
        assert_eq!(policy.apply(&mut host), LimitEdge::Released);

        // B is re-enabled, C keeps its intrinsic disabled state.
        assert!(!host.option(1).unwrap().is_disabled());
        assert!(host.option(2).unwrap().is_disabled());
        assert!(!policy.is_at_limit());
    }

    #[test]
    fn test_limit_zero_saturates_immediately() {
        let mut host = three_option_host();
        let mut policy = LimitPolicy::new(Some(0));

        assert!(policy.selection_blocked(&host));
        assert_eq!(policy.apply(&mut host), LimitEdge::Reached);
        assert!(host.options().iter().all(|o| o.is_disabled()));
    }

    #[test]
    fn test_selection_blocked_tracks_count() {
        let mut host = three_option_host();
        let policy = LimitPolicy::new(Some(1));

        assert!(!policy.selection_blocked(&host));
        host.option_mut(0).unwrap().set_selected(true);
        assert!(policy.selection_blocked(&host));
    }

    #[test]
    fn test_option_added_while_saturated_gets_disabled() {
        let mut host = three_option_host();
        let mut policy = LimitPolicy::new(Some(1));

        host.option_mut(0).unwrap().set_selected(true);
        assert_eq!(policy.apply(&mut host), LimitEdge::Reached);

        let mut late = SelectOption::new("D", "Date");
        late.set_attribute(ATTR_ORIGIN_DISABLED, "false");
        host.add_option(late);
        assert_eq!(policy.apply(&mut host), LimitEdge::Unchanged);
        assert!(host.option(3).unwrap().is_disabled());
    }
}
