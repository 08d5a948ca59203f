//! Touch input tracking and dispatch.
//!
//! Raw samples enter through the `Ui::inject_touch_*` methods, which queue
//! [`Event`]s; this module owns what happens when those events are drained:
//! hit-testing the widget tree, bubbling unaccepted downs to ancestors, and
//! routing moved/up events to the widget that captured the touch.
//!
//! Two touch slots are tracked. A widget that accepts a down event
//! captures its slot and receives every moved event until the matching up,
//! even when the point leaves its bounds — drags would otherwise drop the
//! moment the finger outruns the handle.

use embedded_graphics::prelude::*;

use crate::event::{Event, TouchSample};
use crate::tree::{WidgetId, WidgetTree};
use crate::widget::{Behavior, TouchInfo};

/// Number of concurrently tracked touches.
pub const MAX_TOUCH_STATES: usize = 2;

#[derive(Debug, Default, Clone, Copy)]
struct TouchSlot {
    last: Option<Point>,
    capture: Option<WidgetId>,
}

/// Per-context input state.
#[derive(Debug)]
pub(crate) struct InputState {
    enabled: bool,
    slots: [TouchSlot; MAX_TOUCH_STATES],
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            enabled: true,
            slots: [TouchSlot::default(); MAX_TOUCH_STATES],
        }
    }
}

impl InputState {
    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.slots = [TouchSlot::default(); MAX_TOUCH_STATES];
        }
    }

    pub(crate) fn enabled(&self) -> bool {
        self.enabled
    }

    /// Last known position of a touch slot, if the touch is down.
    pub(crate) fn last_sample(&self, index: u8) -> Option<Point> {
        self.slot(index).and_then(|s| s.last)
    }

    fn slot(&self, index: u8) -> Option<&TouchSlot> {
        self.slots.get(usize::from(index))
    }

    fn slot_mut(&mut self, index: u8) -> Option<&mut TouchSlot> {
        self.slots.get_mut(usize::from(index))
    }

    /// Deliver a drained touch event into the widget subtree at `root`.
    pub(crate) fn handle<W: Behavior>(
        &mut self,
        tree: &mut WidgetTree<W>,
        root: WidgetId,
        event: &Event,
    ) {
        if !self.enabled {
            return;
        }
        match event {
            Event::TouchDown(sample) => self.handle_down(tree, root, *sample),
            Event::TouchMoved(sample) => self.handle_moved(tree, *sample),
            Event::TouchUp(sample) => self.handle_up(tree, *sample),
            Event::ScreenChange(_) => {}
        }
    }

    fn handle_down<W: Behavior>(
        &mut self,
        tree: &mut WidgetTree<W>,
        root: WidgetId,
        sample: TouchSample,
    ) {
        if let Some(slot) = self.slot_mut(sample.index) {
            slot.last = Some(sample.point);
        } else {
            // Beyond MAX_TOUCH_STATES: untracked, dropped.
            return;
        }

        // Hit-test, then bubble toward the root until someone accepts.
        let mut target = tree.hit_test(root, sample.point);
        while let Some(id) = target {
            let enabled = tree.common(id).map(|c| c.enabled).unwrap_or(false);
            if enabled && deliver(tree, id, sample, Behavior::touch_down) {
                if let Some(slot) = self.slot_mut(sample.index) {
                    slot.capture = Some(id);
                }
                return;
            }
            target = tree.parent(id).ok().flatten();
        }
    }

    fn handle_moved<W: Behavior>(&mut self, tree: &mut WidgetTree<W>, sample: TouchSample) {
        let Some(slot) = self.slot_mut(sample.index) else {
            return;
        };
        // Moves only count for a touch we saw go down; a stray move after
        // the up (or with no down at all) must not revive the sample.
        if slot.last.is_none() {
            return;
        }
        slot.last = Some(sample.point);
        let Some(id) = slot.capture else {
            return;
        };
        if !deliver_if_live(tree, id, sample, Behavior::touch_moved) {
            // Captured widget died mid-drag; drop the capture.
            if let Some(slot) = self.slot_mut(sample.index) {
                slot.capture = None;
            }
        }
    }

    fn handle_up<W: Behavior>(&mut self, tree: &mut WidgetTree<W>, sample: TouchSample) {
        let captured = {
            let Some(slot) = self.slot_mut(sample.index) else {
                return;
            };
            let captured = slot.capture.take();
            slot.last = None;
            captured
        };
        if let Some(id) = captured {
            deliver_if_live(tree, id, sample, Behavior::touch_up);
        }
    }
}

/// Invoke a touch hook on a widget, returning whether it accepted.
fn deliver<W: Behavior>(
    tree: &mut WidgetTree<W>,
    id: WidgetId,
    sample: TouchSample,
    hook: fn(&mut W, &mut crate::widget::WidgetCommon, &mut TouchInfo),
) -> bool {
    let Ok(frame) = tree.screen_rect(id) else {
        return false;
    };
    // SAFETY: screen coordinates; the subtraction stays inside i32.
    #[allow(clippy::arithmetic_side_effects)]
    let local = sample.point - frame.top_left;
    let mut touch = TouchInfo {
        index: sample.index,
        screen: sample.point,
        local,
        accepted: false,
    };
    let Some(node) = tree.node_mut(id) else {
        return false;
    };
    hook(&mut node.behavior, &mut node.common, &mut touch);
    // The hook may have invalidated; make sure ancestors descend.
    tree.propagate_dirty(id);
    touch.accepted
}

/// As [`deliver`] but tolerates a dead handle (returns `false`).
fn deliver_if_live<W: Behavior>(
    tree: &mut WidgetTree<W>,
    id: WidgetId,
    sample: TouchSample,
    hook: fn(&mut W, &mut crate::widget::WidgetCommon, &mut TouchInfo),
) -> bool {
    if !tree.contains(id) {
        return false;
    }
    deliver(tree, id, sample, hook);
    true
}
