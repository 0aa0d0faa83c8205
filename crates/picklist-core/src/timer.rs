//! Timer system for picklist.
//!
//! Provides one-shot, cancellable timers pumped by the host event loop.
//! The only consumer in the widget engine is the interaction controller's
//! activation debounce, which keeps at most one timer pending per widget.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, TimerError};

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// An entry in the timer queue (min-heap by fire time).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Instant,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other.fire_time.cmp(&self.fire_time)
    }
}

/// Manages one-shot timers for a widget.
///
/// The host event loop calls [`process_expired`](Self::process_expired)
/// to collect fired timers; the widget then reacts to them. Timers can be
/// cancelled via [`stop`](Self::stop) at any point before they fire.
#[derive(Debug)]
pub struct TimerManager {
    /// All active timers, keyed by ID, holding their fire time. Stopped
    /// and fired timers are removed outright.
    timers: SlotMap<TimerId, Instant>,
    /// Priority queue of pending timer fires (min-heap by fire time).
    queue: BinaryHeap<TimerQueueEntry>,
}

impl TimerManager {
    /// Create a new timer manager.
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
        }
    }

    /// Start a one-shot timer that fires after the specified duration.
    ///
    /// Returns the timer ID that can be used to cancel the timer.
    pub fn start_one_shot(&mut self, duration: Duration) -> TimerId {
        self.start_one_shot_at(duration, Instant::now())
    }

    /// Start a one-shot timer measured from `now` rather than the real
    /// clock. Companion to [`process_expired_at`](Self::process_expired_at)
    /// for driving the clock explicitly.
    pub fn start_one_shot_at(&mut self, duration: Duration, now: Instant) -> TimerId {
        let fire_time = now + duration;

        let id = self.timers.insert(fire_time);
        self.queue.push(TimerQueueEntry { id, fire_time });

        id
    }

    /// Stop and remove a timer.
    ///
    /// Returns an error if the timer has already fired or been stopped.
    pub fn stop(&mut self, id: TimerId) -> Result<()> {
        if self.timers.remove(id).is_some() {
            Ok(())
        } else {
            Err(TimerError::InvalidTimerId.into())
        }
    }

    /// Check if a timer is currently active.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Get the duration until the next timer fires, if any.
    ///
    /// Returns `None` if there are no active timers.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        // Clean up stopped timers from the front of the queue.
        while let Some(entry) = self.queue.peek() {
            if !self.timers.contains_key(entry.id) {
                self.queue.pop();
            } else {
                break;
            }
        }

        self.queue
            .peek()
            .map(|entry| entry.fire_time.saturating_duration_since(Instant::now()))
    }

    /// Process all timers that should fire now.
    ///
    /// Returns the IDs of the timers that fired, in fire-time order.
    pub fn process_expired(&mut self) -> Vec<TimerId> {
        self.process_expired_at(Instant::now())
    }

    /// Process all timers whose fire time is at or before `now`.
    ///
    /// Split out from [`process_expired`](Self::process_expired) so tests
    /// can drive the clock explicitly.
    pub fn process_expired_at(&mut self, now: Instant) -> Vec<TimerId> {
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek() {
            if entry.fire_time > now {
                break;
            }

            let Some(entry) = self.queue.pop() else {
                break;
            };
            let id = entry.id;

            // Skip timers that were stopped after being queued.
            if self.timers.remove(id).is_none() {
                continue;
            }

            tracing::trace!(target: crate::logging::targets::TIMER, ?id, "timer fired");
            fired.push(id);
        }

        fired
    }

    /// Get the number of active timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }
}

impl Default for TimerManager {
    fn default() -> Self {
        Self::new()
    }
}
