//! Slider — horizontal draggable value control.
//!
//! The grip slides along a track spanning the widget width. Dragging maps
//! the touch x position to a value in `[min, max]` through rounded
//! percentage math, and invalidation is scoped to the grip's old and new
//! sub-rectangles rather than the whole widget.

use atrium_core::scheme::Scheme;
use atrium_core::widget::{
    paint_background, paint_bevel_frame, Behavior, TouchInfo, WidgetCommon,
};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::percent::{percent_of, percent_whole_rounded};

/// Drag progress for slider and scrollbar grips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum DragState {
    /// No touch is interacting with the grip.
    #[default]
    Idle,
    /// The grip is held; `grab` is the touch offset into the grip along
    /// the drag axis, kept so the grip does not jump under the finger.
    HandleDown { grab: i32 },
}

/// Horizontal slider over an `i32` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    min: i32,
    max: i32,
    value: i32,
    grip: u32,
    drag: DragState,
}

impl Slider {
    /// Default grip width in pixels.
    pub const DEFAULT_GRIP: u32 = 12;

    /// A slider over `[min, max]` starting at `min`. A reversed range
    /// collapses to the single value `min`.
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        let max = if max < min { min } else { max };
        Self {
            min,
            max,
            value: min,
            grip: Self::DEFAULT_GRIP,
            drag: DragState::Idle,
        }
    }

    /// Builder method to set the grip width (minimum 1 pixel).
    #[must_use]
    pub const fn grip_width(mut self, grip: u32) -> Self {
        self.grip = if grip == 0 { 1 } else { grip };
        self
    }

    /// Lower bound of the range.
    #[must_use]
    pub const fn min(&self) -> i32 {
        self.min
    }

    /// Upper bound of the range.
    #[must_use]
    pub const fn max(&self) -> i32 {
        self.max
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.value
    }

    /// `true` while a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag != DragState::Idle
    }

    /// Width of the value range.
    fn span(&self) -> u32 {
        // SAFETY: max >= min is a constructor invariant, so the i64
        // difference is non-negative; spans wider than u32 clamp.
        #[allow(clippy::arithmetic_side_effects)]
        let span = i64::from(self.max) - i64::from(self.min);
        u32::try_from(span).unwrap_or(u32::MAX)
    }

    /// Current value as a whole percentage of the range (0 at `min`).
    #[must_use]
    pub fn percentage(&self) -> u32 {
        // SAFETY: value is clamped to [min, max], so the difference is
        // non-negative and no wider than span().
        #[allow(clippy::arithmetic_side_effects)]
        let offset = i64::from(self.value) - i64::from(self.min);
        percent_whole_rounded(u32::try_from(offset).unwrap_or(0), self.span())
    }

    /// Set the value, clamped to `[min, max]`. Only the grip's old and
    /// new sub-rectangles are invalidated.
    pub fn set_value(&mut self, common: &mut WidgetCommon, value: i32) {
        let value = value.clamp(self.min, self.max);
        if value == self.value {
            return;
        }
        let before = self.grip_rect(common);
        self.value = value;
        let after = self.grip_rect(common);
        common.mark_damage(before);
        common.mark_damage(after);
    }

    /// Set the value by whole percentage: 0 is `min`, 100 is `max`.
    /// Percentages above 100 clamp.
    pub fn set_percentage(&mut self, common: &mut WidgetCommon, percent: u32) {
        let percent = percent.min(100);
        // SAFETY: percent_of(span, p) <= span, so min + delta <= max and
        // the i64 sum converts back to i32 exactly.
        #[allow(clippy::arithmetic_side_effects)]
        let target = i64::from(self.min) + i64::from(percent_of(self.span(), percent));
        self.set_value(common, i32::try_from(target).unwrap_or(self.max));
    }

    /// Move the value by `amount`, clamping at the range ends without
    /// wraparound.
    pub fn step(&mut self, common: &mut WidgetCommon, amount: i32) {
        let target = self.value.saturating_add(amount);
        self.set_value(common, target);
    }

    /// Grip bounds in widget-local coordinates.
    fn grip_rect(&self, common: &WidgetCommon) -> Rectangle {
        let size = common.rect().size;
        let track = size.width.saturating_sub(self.grip);
        let offset = percent_of(track, self.percentage());
        // SAFETY: offset <= track <= i32::MAX for any plausible widget.
        #[allow(clippy::cast_possible_wrap)]
        let left = Point::new(offset as i32, 0);
        Rectangle::new(left, Size::new(self.grip.min(size.width), size.height))
    }

    /// Map a widget-local grip x position to a value and apply it.
    fn drag_to(&mut self, common: &mut WidgetCommon, grip_x: i32) {
        let track = common.rect().size.width.saturating_sub(self.grip);
        let clamped = u32::try_from(grip_x).unwrap_or(0).min(track);
        let percent = percent_whole_rounded(clamped, track);
        self.set_percentage(common, percent);
    }
}

impl Behavior for Slider {
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
        paint_bevel_frame(grip, scheme, self.is_dragging(), target)?;
        Ok(())
    }

    fn touch_down(&mut self, common: &mut WidgetCommon, touch: &mut TouchInfo) {
        let grip = self.grip_rect(common);
        if grip.contains(touch.local) {
            // SAFETY: contains() guarantees local.x >= grip x.
            #[allow(clippy::arithmetic_side_effects)]
            let grab = touch.local.x - grip.top_left.x;
            self.drag = DragState::HandleDown { grab };
        } else {
            // Touch on the track: center the grip under the finger and
            // start dragging from there.
            // SAFETY: grip width is bounded by the widget width.
            #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_wrap)]
            let grab = (self.grip / 2) as i32;
            self.drag = DragState::HandleDown { grab };
            // SAFETY: screen-coordinate subtraction, far from overflow.
            #[allow(clippy::arithmetic_side_effects)]
            self.drag_to(common, touch.local.x - grab);
        }
        touch.accepted = true;
    }

    fn touch_moved(&mut self, common: &mut WidgetCommon, touch: &mut TouchInfo) {
        if let DragState::HandleDown { grab } = self.drag {
            // SAFETY: screen-coordinate subtraction, far from overflow.
            #[allow(clippy::arithmetic_side_effects)]
            self.drag_to(common, touch.local.x - grab);
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
