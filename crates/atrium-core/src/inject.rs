//! Multi-producer event injection (`rtos` feature).
//!
//! The default build is single-threaded: events may only be queued by the
//! thread that calls [`Ui::update`](crate::context::Ui::update). Deployments
//! with a touch ISR or a separate input task instead publish into a static
//! [`InputChannel`] and let the UI thread drain it at the top of its frame:
//!
//! ```ignore
//! static TOUCH_EVENTS: InputChannel = InputChannel::new();
//!
//! // ISR / producer task:
//! TOUCH_EVENTS.try_send(Event::TouchDown(sample)).ok();
//!
//! // UI thread, once per frame:
//! ui.pump_input(&TOUCH_EVENTS);
//! ui.update(dt);
//! ```
//!
//! The channel is bounded; a full channel drops the sample at the
//! producer (`try_send` fails) rather than blocking an ISR.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::context::Ui;
use crate::event::Event;
use crate::widget::Behavior;

/// Capacity of the producer-side injection channel.
pub const INJECT_QUEUE_DEPTH: usize = 16;

/// ISR-safe channel carrying [`Event`]s from producers to the UI thread.
pub type InputChannel = Channel<CriticalSectionRawMutex, Event, INJECT_QUEUE_DEPTH>;

impl<W: Behavior> Ui<W> {
    /// Drain every event currently in `channel` into the context's event
    /// queue. Call once per frame before [`update`](Self::update).
    ///
    /// Events that do not fit in the (also bounded) context queue are
    /// dropped.
    pub fn pump_input(&mut self, channel: &InputChannel) {
        while let Ok(event) = channel.try_receive() {
            if self.push_event(event).is_err() {
                break;
            }
        }
    }
}
