//! UI event queue.
//!
//! Events are produced by input injection (touch) or by the application
//! (screen change) and drained once per [`Ui::update`](crate::context::Ui::update).
//! The queue is a bounded FIFO; processing is cooperative and
//! single-threaded — a handler runs to completion inside the caller of
//! `update`.
//!
//! Each processed event ends in one of three dispositions: handled
//! (dropped), deferred (stays queued for a later call), or reset-queue
//! (every remaining event is discarded). An optional filter callback can
//! veto delivery; a vetoed event is treated as deferred. Processing drains
//! a length snapshot taken at call entry, so a persistently vetoed event
//! is revisited at most once per call and can never wedge the loop.

use embedded_graphics::prelude::*;
use heapless::Deque;

use crate::error::{UiError, UiResult};

/// Maximum number of queued events.
pub const EVENT_QUEUE_DEPTH: usize = 32;

/// One raw touch sample as injected by the driver glue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSample {
    /// Touch slot index (two slots are tracked).
    pub index: u8,
    /// Screen-space position.
    pub point: Point,
}

/// A pending UI event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Activate the layer with the given index.
    ScreenChange(u8),
    /// A touch went down.
    TouchDown(TouchSample),
    /// A touch lifted.
    TouchUp(TouchSample),
    /// A touch moved.
    TouchMoved(TouchSample),
}

/// What to do with an event after its handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Disposition {
    /// Done; drop the event.
    Handled,
    /// Keep the event queued for a later processing call.
    Deferred,
    /// Discard the entire remaining queue.
    ResetQueue,
}

/// Filter callback: return `false` to veto delivery. A vetoed event stays
/// queued and is retried on the next processing call.
pub type EventFilter = fn(&Event) -> bool;

/// Bounded FIFO of pending events.
#[derive(Default)]
pub struct EventQueue {
    events: Deque<Event, EVENT_QUEUE_DEPTH>,
}

impl EventQueue {
    /// An empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Deque::new(),
        }
    }

    /// Append an event.
    ///
    /// # Errors
    ///
    /// [`UiError::CapacityExceeded`] when [`EVENT_QUEUE_DEPTH`] events are
    /// already pending; the event is dropped.
    pub fn push(&mut self, event: Event) -> UiResult {
        self.events
            .push_back(event)
            .map_err(|_| UiError::CapacityExceeded)
    }

    /// Number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Discard every pending event.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Take the oldest pending event, if any.
    pub fn pop_front(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Drain and dispatch pending events.
    ///
    /// Exactly the events present at call entry are visited; events pushed
    /// by handlers run on the next call. `filter` may veto an event, which
    /// re-queues it behind the snapshot. `dispatch` decides each event's
    /// disposition; [`Disposition::ResetQueue`] stops processing and
    /// destroys the remainder.
    pub fn process<F>(&mut self, filter: Option<EventFilter>, mut dispatch: F)
    where
        F: FnMut(&Event) -> Disposition,
    {
        let pending = self.events.len();
        for _ in 0..pending {
            let Some(event) = self.events.pop_front() else {
                break;
            };
            if let Some(filter) = filter {
                if !filter(&event) {
                    // Vetoed: survives unprocessed.
                    self.events.push_back(event).ok();
                    continue;
                }
            }
            match dispatch(&event) {
                Disposition::Handled => {}
                Disposition::Deferred => {
                    self.events.push_back(event).ok();
                }
                Disposition::ResetQueue => {
                    self.events.clear();
                    return;
                }
            }
        }
    }
}
