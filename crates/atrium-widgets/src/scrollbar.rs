//! Scrollbar — vertical scroll control with step buttons and a
//! proportional grip.
//!
//! Layout, top to bottom: a square step-up button, the track with the
//! grip, a square step-down button. The grip height is proportional to
//! `extent` (the visible fraction of the scrolled content) and its
//! position to `value / max`.

use atrium_core::scheme::Scheme;
use atrium_core::widget::{
    paint_background, paint_bevel_frame, Behavior, TouchInfo, WidgetCommon,
};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::percent::{percent_of, percent_whole_rounded};
use crate::slider::DragState;

const MIN_GRIP: u32 = 8;

/// Vertical scrollbar over a `u32` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scrollbar {
    max: u32,
    extent: u32,
    value: u32,
    drag: DragState,
}

impl Scrollbar {
    /// A scrollbar over `[0, max]` at position 0. `extent` is the step
    /// size used by the buttons and the basis for the grip height; it is
    /// kept at least 1.
    #[must_use]
    pub const fn new(max: u32, extent: u32) -> Self {
        Self {
            max,
            extent: if extent == 0 { 1 } else { extent },
            value: 0,
            drag: DragState::Idle,
        }
    }

    /// Upper bound of the scroll range.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Visible-extent / step size.
    #[must_use]
    pub const fn extent(&self) -> u32 {
        self.extent
    }

    /// Current scroll position.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Current position as a whole percentage: 0 at the top, 100 at
    /// `max`.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        percent_whole_rounded(self.value, self.max)
    }

    /// Change the scroll range, clamping the current value into it.
    pub fn set_max(&mut self, common: &mut WidgetCommon, max: u32) {
        self.max = max;
        self.value = self.value.min(max);
        common.mark_dirty();
    }

    /// Set the scroll position; values beyond `max` clamp to `max`.
    /// Invalidation is scoped to the grip's old and new sub-rectangles.
    pub fn set_scroll_value(&mut self, common: &mut WidgetCommon, value: u32) {
        let value = value.min(self.max);
        if value == self.value {
            return;
        }
        let before = self.grip_rect(common);
        self.value = value;
        let after = self.grip_rect(common);
        common.mark_damage(before);
        common.mark_damage(after);
    }

    /// Move the position by `amount` scroll units (the step buttons pass
    /// `±extent`), clamping at both ends without wraparound.
    pub fn step(&mut self, common: &mut WidgetCommon, amount: i32) {
        let target = if amount >= 0 {
            self.value.saturating_add(amount.unsigned_abs())
        } else {
            self.value.saturating_sub(amount.unsigned_abs())
        };
        self.set_scroll_value(common, target);
    }

    /// Square step-button edge, bounded so two buttons always fit.
    fn button_edge(&self, common: &WidgetCommon) -> u32 {
        let size = common.rect().size;
        size.width.min(size.height / 2)
    }

    /// Track bounds (between the buttons), widget-local.
    fn track_rect(&self, common: &WidgetCommon) -> Rectangle {
        let size = common.rect().size;
        let edge = self.button_edge(common);
        // SAFETY: edge <= height / 2, so height - 2 * edge >= 0.
        #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_wrap)]
        let (top, height) = (Point::new(0, edge as i32), size.height - edge * 2);
        Rectangle::new(top, Size::new(size.width, height))
    }

    /// Grip bounds, widget-local. Height is `extent`'s share of the
    /// content (`max + extent`), never below [`MIN_GRIP`].
    fn grip_rect(&self, common: &WidgetCommon) -> Rectangle {
        let track = self.track_rect(common);
        let content = self.max.saturating_add(self.extent);
        let share = percent_whole_rounded(self.extent, content);
        let height = percent_of(track.size.height, share)
            .max(MIN_GRIP)
            .min(track.size.height);
        let room = track.size.height.saturating_sub(height);
        let offset = percent_of(room, self.percentage());
        // SAFETY: offset <= room fits i32 for any on-screen track.
        #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_wrap)]
        let top = Point::new(track.top_left.x, track.top_left.y + offset as i32);
        Rectangle::new(top, Size::new(track.size.width, height))
    }

    /// Map a widget-local grip top position to a scroll value.
    fn drag_to(&mut self, common: &mut WidgetCommon, grip_y: i32) {
        let track = self.track_rect(common);
        let grip = self.grip_rect(common);
        let room = track.size.height.saturating_sub(grip.size.height);
        // SAFETY: screen-coordinate subtraction, far from overflow.
        #[allow(clippy::arithmetic_side_effects)]
        let along = grip_y - track.top_left.y;
        let clamped = u32::try_from(along).unwrap_or(0).min(room);
        let percent = percent_whole_rounded(clamped, room);
        self.set_scroll_value(common, percent_of(self.max, percent));
    }

    fn up_button_rect(&self, common: &WidgetCommon) -> Rectangle {
        let edge = self.button_edge(common);
        Rectangle::new(Point::zero(), Size::new(common.rect().size.width, edge))
    }

    fn down_button_rect(&self, common: &WidgetCommon) -> Rectangle {
        let size = common.rect().size;
        let edge = self.button_edge(common);
        // SAFETY: edge <= height / 2.
        #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_wrap)]
        let top = Point::new(0, (size.height - edge) as i32);
        Rectangle::new(top, Size::new(size.width, edge))
    }
}

impl Behavior for Scrollbar {
    fn paint<D>(
        &self,
        common: &WidgetCommon,
        frame: Rectangle,
        scheme: &Scheme,
        target: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        paint_background(common, frame, scheme, target)?;

        for local in [self.up_button_rect(common), self.down_button_rect(common)] {
            // SAFETY: screen-coordinate addition, far from i32 overflow.
            #[allow(clippy::arithmetic_side_effects)]
            let button = Rectangle::new(frame.top_left + local.top_left, local.size);
            button
                .into_styled(PrimitiveStyle::with_fill(scheme.base))
                .draw(target)?;
            paint_bevel_frame(button, scheme, false, target)?;
        }

        let local = self.grip_rect(common);
        // SAFETY: screen-coordinate addition, far from i32 overflow.
        #[allow(clippy::arithmetic_side_effects)]
        let grip = Rectangle::new(frame.top_left + local.top_left, local.size);
        let fill = if common.enabled {
            scheme.foreground
        } else {
            scheme.foreground_disabled
        };
        grip.into_styled(PrimitiveStyle::with_fill(fill))
            .draw(target)?;
        paint_bevel_frame(grip, scheme, self.drag != DragState::Idle, target)?;
        Ok(())
    }

    fn touch_down(&mut self, common: &mut WidgetCommon, touch: &mut TouchInfo) {
        touch.accepted = true;
        if self.up_button_rect(common).contains(touch.local) {
            let step = i32::try_from(self.extent).unwrap_or(i32::MAX);
            self.step(common, step.saturating_neg());
            return;
        }
        if self.down_button_rect(common).contains(touch.local) {
            self.step(common, i32::try_from(self.extent).unwrap_or(i32::MAX));
            return;
        }
        let grip = self.grip_rect(common);
        if grip.contains(touch.local) {
            // SAFETY: contains() guarantees local.y >= grip y.
            #[allow(clippy::arithmetic_side_effects)]
            let grab = touch.local.y - grip.top_left.y;
            self.drag = DragState::HandleDown { grab };
        } else {
            // Track press: center the grip under the finger.
            // SAFETY: grip height is bounded by the track height.
            #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_wrap)]
            let grab = (grip.size.height / 2) as i32;
            self.drag = DragState::HandleDown { grab };
            // SAFETY: screen-coordinate subtraction, far from overflow.
            #[allow(clippy::arithmetic_side_effects)]
            self.drag_to(common, touch.local.y - grab);
        }
    }

    fn touch_moved(&mut self, common: &mut WidgetCommon, touch: &mut TouchInfo) {
        if let DragState::HandleDown { grab } = self.drag {
            // SAFETY: screen-coordinate subtraction, far from overflow.
            #[allow(clippy::arithmetic_side_effects)]
            self.drag_to(common, touch.local.y - grab);
            touch.accepted = true;
        }
    }

    fn touch_up(&mut self, common: &mut WidgetCommon, touch: &mut TouchInfo) {
        if self.drag == DragState::Idle {
            return;
        }
        self.drag = DragState::Idle;
        let grip = self.grip_rect(common);
        common.mark_damage(grip);
        touch.accepted = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn common() -> WidgetCommon {
        // 16 wide, 200 tall: 16-pixel buttons, 168-pixel track.
        WidgetCommon::new(Rectangle::new(Point::zero(), Size::new(16, 200)))
    }

    fn touch_at(x: i32, y: i32) -> TouchInfo {
        TouchInfo {
            index: 0,
            screen: Point::new(x, y),
            local: Point::new(x, y),
            accepted: false,
        }
    }

    #[test]
    fn test_set_scroll_value_clamps_to_max() {
        let mut bar = Scrollbar::new(500, 50);
        let mut c = common();
        bar.set_scroll_value(&mut c, 9_999);
        assert_eq!(bar.value(), 500);
    }

    #[test]
    fn test_percentage_at_max_is_100() {
        let mut bar = Scrollbar::new(500, 50);
        let mut c = common();
        bar.set_scroll_value(&mut c, 500);
        assert_eq!(bar.percentage(), 100);
    }

    #[test]
    fn test_percentage_with_zero_max() {
        let bar = Scrollbar::new(0, 50);
        assert_eq!(bar.percentage(), 0);
    }

    #[test]
    fn test_step_clamps_without_wraparound() {
        let mut bar = Scrollbar::new(100, 10);
        let mut c = common();
        bar.step(&mut c, -30);
        assert_eq!(bar.value(), 0, "downward step at 0 must not wrap");
        bar.set_scroll_value(&mut c, 95);
        bar.step(&mut c, 30);
        assert_eq!(bar.value(), 100);
    }

    #[test]
    fn test_set_max_clamps_value() {
        let mut bar = Scrollbar::new(100, 10);
        let mut c = common();
        bar.set_scroll_value(&mut c, 80);
        bar.set_max(&mut c, 50);
        assert_eq!(bar.value(), 50);
        assert_eq!(bar.max(), 50);
    }

    #[test]
    fn test_up_button_steps_back() {
        let mut bar = Scrollbar::new(100, 10);
        let mut c = common();
        bar.set_scroll_value(&mut c, 25);
        let mut touch = touch_at(8, 4); // inside the top button
        bar.touch_down(&mut c, &mut touch);
        assert!(touch.accepted);
        assert_eq!(bar.value(), 15);
    }

    #[test]
    fn test_down_button_steps_forward() {
        let mut bar = Scrollbar::new(100, 10);
        let mut c = common();
        let mut touch = touch_at(8, 195); // inside the bottom button
        bar.touch_down(&mut c, &mut touch);
        assert_eq!(bar.value(), 10);
    }

    #[test]
    fn test_grip_drag_reaches_max() {
        let mut bar = Scrollbar::new(100, 10);
        let mut c = common();

        // Grip starts at the top of the track (y=16); grab it there.
        let grip = bar.grip_rect(&c);
        let mut down = touch_at(8, grip.top_left.y + 1);
        bar.touch_down(&mut c, &mut down);
        assert_eq!(bar.value(), 0, "grabbing the grip must not scroll");

        // Drag well past the bottom: clamps to max.
        let mut moved = touch_at(8, 400);
        bar.touch_moved(&mut c, &mut moved);
        assert_eq!(bar.value(), 100);
        assert_eq!(bar.percentage(), 100);

        let mut up = touch_at(8, 400);
        bar.touch_up(&mut c, &mut up);
        assert_eq!(bar.drag, DragState::Idle);
    }

    #[test]
    fn test_grip_height_proportional_to_extent() {
        let c = common();
        // Track is 168 tall. extent 100 of content 200 -> half the track.
        let half = Scrollbar::new(100, 100);
        assert_eq!(half.grip_rect(&c).size.height, 84);
        // Tiny extent floors at MIN_GRIP.
        let tiny = Scrollbar::new(100_000, 1);
        assert_eq!(tiny.grip_rect(&c).size.height, MIN_GRIP);
    }
}
