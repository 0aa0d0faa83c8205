//! Interaction controller.
//!
//! The controller operations live on [`Picklist`] and mediate every
//! user-driven mutation: toggling, highlighting, reordering, and the
//! press/double-press debounce. Invalid targets (out-of-range position,
//! disabled option, saturated limit) are rejected as no-ops rather than
//! errors.

use std::time::{Duration, Instant};

use picklist_core::logging::targets;
use picklist_core::{TimerId, TimerManager};

use crate::order;
use crate::reconcile::find_by_value;
use crate::widget::Picklist;

/// Separates a single activation (highlight) from a double activation
/// (toggle) with a one-shot timer.
///
/// At most one press is pending at a time; a new press or an explicit
/// cancel supersedes it.
#[derive(Debug)]
pub(crate) struct ActivationDebounce {
    timers: TimerManager,
    pending: Option<(TimerId, usize)>,
    window: Duration,
}

impl ActivationDebounce {
    pub(crate) fn new(window: Duration) -> Self {
        Self {
            timers: TimerManager::new(),
            pending: None,
            window,
        }
    }

    /// Arms the debounce for `position`, superseding any pending press.
    pub(crate) fn press(&mut self, position: usize, now: Instant) {
        self.cancel();
        let id = self.timers.start_one_shot_at(self.window, now);
        self.pending = Some((id, position));
    }

    /// Cancels the pending press, if any.
    pub(crate) fn cancel(&mut self) {
        if let Some((id, _)) = self.pending.take() {
            let _ = self.timers.stop(id);
        }
    }

    /// Returns the position whose press matured by `now`, if any.
    pub(crate) fn pump_at(&mut self, now: Instant) -> Option<usize> {
        let fired = self.timers.process_expired_at(now);
        match self.pending {
            Some((id, position)) if fired.contains(&id) => {
                self.pending = None;
                Some(position)
            }
            _ => None,
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn time_until_fire(&mut self) -> Option<Duration> {
        self.timers.time_until_next()
    }
}

impl Picklist {
    /// Flips the selection state of the option at `position`.
    ///
    /// Rejected as a no-op when the position is out of range, the
    /// option is disabled, or selecting would exceed the limit. An
    /// effective toggle emits the host's `changed` signal exactly once,
    /// re-runs the limit policy, and reconciles the views.
    ///
    /// Returns whether the toggle took effect.
    pub fn toggle(&mut self, position: usize) -> bool {
        let Some(option) = self.host.option(position) else {
            return false;
        };
        if option.is_disabled() {
            tracing::debug!(
                target: targets::WIDGET,
                position,
                "toggle rejected, option disabled"
            );
            return false;
        }
        let selecting = !option.is_selected();
        if selecting && self.limit.selection_blocked(&self.host) {
            tracing::debug!(
                target: targets::WIDGET,
                position,
                "toggle rejected, selection limit reached"
            );
            return false;
        }

        if let Some(option) = self.host.option_mut(position) {
            option.set_selected(selecting);
        }
        self.host.changed.emit(());
        self.refresh();
        true
    }

    /// Moves the highlight to `position`, or clears it with `None`.
    ///
    /// An out-of-range or disabled target clears the highlight.
    pub fn set_highlight(&mut self, position: Option<usize>) {
        self.highlight = position
            .filter(|&p| self.host.option(p).is_some_and(|o| !o.is_disabled()));
        self.refresh();
    }

    /// Moves the highlighted chosen row one step toward the front of
    /// the chosen list. No-op at the boundary or without a highlighted
    /// chosen row.
    pub fn move_up(&mut self) -> bool {
        self.shift_highlighted(-1)
    }

    /// Moves the highlighted chosen row one step toward the back.
    pub fn move_down(&mut self) -> bool {
        self.shift_highlighted(1)
    }

    fn shift_highlighted(&mut self, delta: isize) -> bool {
        let Some(index) = self.chosen.rows.iter().position(|r| r.highlighted) else {
            return false;
        };
        let target = index as isize + delta;
        if target < 0 || target as usize >= self.chosen.rows.len() {
            return false;
        }

        let mut order = order::read(&self.host);
        // The chosen view mirrors the persisted order, so indices line
        // up; bail out if an external mutation broke that.
        let aligned = order
            .get(index)
            .and_then(|value| find_by_value(&self.chosen.rows, value))
            == Some(index);
        if !aligned {
            return false;
        }

        order.swap(index, target as usize);
        order::write(&mut self.host, &order);
        self.refresh();
        true
    }

    /// Selects the highlighted available row. No-op unless an
    /// unselected row is highlighted.
    pub fn move_to_chosen(&mut self) -> bool {
        let Some(position) = self
            .available
            .rows()
            .find(|r| r.highlighted)
            .map(|r| r.position)
        else {
            return false;
        };
        self.toggle(position)
    }

    /// Deselects the highlighted chosen row. No-op unless a chosen row
    /// is highlighted.
    pub fn move_to_available(&mut self) -> bool {
        let Some(position) = self
            .chosen
            .rows
            .iter()
            .find(|r| r.highlighted)
            .map(|r| r.position)
        else {
            return false;
        };
        self.toggle(position)
    }

    /// Registers a single activation on `position`.
    ///
    /// The highlight is applied only after the debounce window elapses
    /// without a second activation; a later [`double_press`](Self::double_press)
    /// within the window supersedes it.
    pub fn press(&mut self, position: usize) {
        self.press_at(position, Instant::now());
    }

    /// [`press`](Self::press) with an explicit clock, for callers that
    /// drive time themselves.
    pub fn press_at(&mut self, position: usize, now: Instant) {
        // Pressing an invalid position still supersedes the pending
        // press, it just matures into a cleared highlight.
        self.debounce.press(position, now);
    }

    /// Registers a double activation on `position`: cancels the pending
    /// single-press and toggles.
    ///
    /// Returns whether the toggle took effect.
    pub fn double_press(&mut self, position: usize) -> bool {
        self.debounce.cancel();
        self.toggle(position)
    }

    /// Advances the widget's internal clock, applying any matured
    /// press. Call from the host event loop.
    pub fn pump(&mut self) {
        self.pump_at(Instant::now());
    }

    /// [`pump`](Self::pump) with an explicit clock.
    pub fn pump_at(&mut self, now: Instant) {
        if let Some(position) = self.debounce.pump_at(now) {
            self.set_highlight(Some(position));
        }
    }

    /// Time until the next pending press matures, if any. Lets the host
    /// event loop sleep precisely instead of polling.
    pub fn time_until_tick(&mut self) -> Option<Duration> {
        self.debounce.time_until_fire()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostSelect, SelectOption};
    use crate::settings::PicklistSettings;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn widget_with(options: Vec<SelectOption>, settings: PicklistSettings) -> Picklist {
        let mut host = HostSelect::new();
        for option in options {
            host.add_option(option);
        }
        Picklist::init(host, settings).unwrap()
    }

    fn fruit_widget() -> Picklist {
        widget_with(
            vec![
                SelectOption::new("A", "Apple"),
                SelectOption::new("B", "Banana"),
                SelectOption::new("C", "Cherry"),
            ],
            PicklistSettings::default(),
        )
    }

    #[test]
    fn test_toggle_selects_and_deselects() {
        let mut widget = fruit_widget();

        assert!(widget.toggle(1));
        assert!(widget.host().option(1).unwrap().is_selected());
        assert_eq!(widget.chosen().values(), vec!["B"]);

        assert!(widget.toggle(1));
        assert!(!widget.host().option(1).unwrap().is_selected());
        assert!(widget.chosen().rows.is_empty());
    }

    #[test]
    fn test_toggle_emits_changed_exactly_once() {
        let mut widget = fruit_widget();
        let count = Arc::new(Mutex::new(0));
        let count_clone = Arc::clone(&count);
        widget.host_mut().changed.connect(move |_| {
            *count_clone.lock() += 1;
        });

        widget.toggle(0);
        assert_eq!(*count.lock(), 1);

        widget.toggle(0);
        assert_eq!(*count.lock(), 2);
    }

    #[test]
    fn test_rejected_toggle_emits_nothing() {
        let mut widget = widget_with(
            vec![
                SelectOption::new("A", "Apple").with_disabled(true),
                SelectOption::new("B", "Banana"),
            ],
            PicklistSettings::default(),
        );
        let count = Arc::new(Mutex::new(0));
        let count_clone = Arc::clone(&count);
        widget.host_mut().changed.connect(move |_| {
            *count_clone.lock() += 1;
        });

        assert!(!widget.toggle(0)); // disabled
        assert!(!widget.toggle(9)); // out of range
        assert_eq!(*count.lock(), 0);
    }

    #[test]
    fn test_toggle_blocked_at_limit_but_deselect_allowed() {
        let mut widget = widget_with(
            vec![
                SelectOption::new("A", "Apple"),
                SelectOption::new("B", "Banana"),
                SelectOption::new("C", "Cherry"),
            ],
            PicklistSettings::new().with_limit(2),
        );

        assert!(widget.toggle(0));
        assert!(widget.toggle(1));
        assert!(widget.at_limit());
        assert!(!widget.toggle(2));

        // Deselecting at the limit is always allowed and releases it.
        assert!(widget.toggle(0));
        assert!(!widget.at_limit());
        assert!(widget.toggle(2));
    }

    #[test]
    fn test_limit_reached_fires_once_per_edge() {
        let mut widget = widget_with(
            vec![
                SelectOption::new("A", "Apple"),
                SelectOption::new("B", "Banana"),
                SelectOption::new("C", "Cherry"),
            ],
            PicklistSettings::new().with_limit(2),
        );
        let reached = Arc::new(Mutex::new(0));
        let reached_clone = Arc::clone(&reached);
        widget.limit_reached.connect(move |_| {
            *reached_clone.lock() += 1;
        });

        widget.toggle(0);
        assert_eq!(*reached.lock(), 0);
        widget.toggle(1);
        assert_eq!(*reached.lock(), 1);

        // Bouncing off the saturated limit does not re-emit.
        widget.toggle(2);
        assert_eq!(*reached.lock(), 1);

        // Release and re-reach fires again.
        widget.toggle(0);
        widget.toggle(0);
        assert_eq!(*reached.lock(), 2);
    }

    #[test]
    fn test_set_highlight_validates_position() {
        let mut widget = fruit_widget();

        widget.set_highlight(Some(1));
        assert_eq!(widget.highlight(), Some(1));

        widget.set_highlight(Some(99));
        assert!(widget.highlight().is_none());

        widget.set_highlight(Some(0));
        widget.set_highlight(None);
        assert!(widget.highlight().is_none());
    }

    #[test]
    fn test_disabled_option_cannot_be_highlighted() {
        let mut widget = widget_with(
            vec![
                SelectOption::new("A", "Apple").with_disabled(true),
                SelectOption::new("B", "Banana"),
            ],
            PicklistSettings::default(),
        );

        widget.set_highlight(Some(0));
        assert!(widget.highlight().is_none());
    }

    #[test]
    fn test_move_up_and_down_reorder_chosen() {
        let mut widget = fruit_widget();
        widget.toggle(0);
        widget.toggle(1);
        widget.toggle(2);
        assert_eq!(widget.chosen().values(), vec!["A", "B", "C"]);

        widget.set_highlight(Some(2)); // Cherry
        assert!(widget.move_up());
        assert_eq!(widget.chosen().values(), vec!["A", "C", "B"]);
        assert_eq!(widget.stored_order(), vec!["A", "C", "B"]);

        assert!(widget.move_up());
        assert_eq!(widget.chosen().values(), vec!["C", "A", "B"]);

        // Boundary: already at the front.
        assert!(!widget.move_up());
        assert_eq!(widget.chosen().values(), vec!["C", "A", "B"]);

        assert!(widget.move_down());
        assert_eq!(widget.chosen().values(), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_move_requires_highlighted_chosen_row() {
        let mut widget = fruit_widget();
        widget.toggle(0);

        // No highlight at all.
        assert!(!widget.move_up());

        // Highlight on an unselected row is not a chosen row.
        widget.set_highlight(Some(1));
        assert!(!widget.move_down());
    }

    #[test]
    fn test_move_to_chosen_and_back() {
        let mut widget = fruit_widget();

        widget.set_highlight(Some(1));
        assert!(widget.move_to_chosen());
        assert_eq!(widget.chosen().values(), vec!["B"]);

        // The highlight followed the row into the chosen view.
        assert!(widget.move_to_available());
        assert!(widget.chosen().rows.is_empty());

        // Nothing highlighted in the chosen view now.
        assert!(!widget.move_to_available());
    }

    #[test]
    fn test_press_applies_highlight_after_window() {
        let mut widget = fruit_widget();
        let start = Instant::now();

        widget.press_at(1, start);
        widget.pump_at(start + Duration::from_millis(100));
        assert!(widget.highlight().is_none());

        widget.pump_at(start + Duration::from_millis(300));
        assert_eq!(widget.highlight(), Some(1));
    }

    #[test]
    fn test_double_press_supersedes_pending_highlight() {
        let mut widget = fruit_widget();
        let start = Instant::now();

        widget.press_at(1, start);
        assert!(widget.double_press(1));

        // The pending press was cancelled; pumping past the window
        // leaves the highlight untouched.
        widget.pump_at(start + Duration::from_secs(1));
        assert!(widget.highlight().is_none());
        assert_eq!(widget.chosen().values(), vec!["B"]);
    }

    #[test]
    fn test_second_press_supersedes_first() {
        let mut widget = fruit_widget();
        let start = Instant::now();

        widget.press_at(0, start);
        widget.press_at(2, start + Duration::from_millis(100));

        widget.pump_at(start + Duration::from_millis(300));
        // Only the second press matured; 300ms is within its window.
        assert!(widget.highlight().is_none());

        widget.pump_at(start + Duration::from_millis(400));
        assert_eq!(widget.highlight(), Some(2));
    }

    #[test]
    fn test_custom_debounce_window() {
        let mut widget = widget_with(
            vec![SelectOption::new("A", "Apple")],
            PicklistSettings::new().with_activation_debounce(Duration::from_millis(50)),
        );
        let start = Instant::now();

        widget.press_at(0, start);
        let remaining = widget.time_until_tick().unwrap();
        assert!(remaining <= Duration::from_millis(50));

        widget.pump_at(start + Duration::from_millis(60));
        assert_eq!(widget.highlight(), Some(0));
        assert!(widget.time_until_tick().is_none());
    }

    #[test]
    fn test_debounce_unit() {
        let mut debounce = ActivationDebounce::new(Duration::from_millis(250));
        let start = Instant::now();
        assert!(!debounce.is_pending());

        debounce.press(3, start);
        assert!(debounce.is_pending());
        assert_eq!(debounce.pump_at(start + Duration::from_millis(100)), None);

        debounce.press(5, start + Duration::from_millis(100));
        assert_eq!(debounce.pump_at(start + Duration::from_millis(400)), Some(5));
        assert!(!debounce.is_pending());

        debounce.press(7, start);
        debounce.cancel();
        assert_eq!(debounce.pump_at(start + Duration::from_secs(1)), None);
    }
}
