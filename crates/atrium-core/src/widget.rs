//! Widget base — the state every tree node carries, plus the [`Behavior`]
//! trait concrete widgets implement.
//!
//! Embedded C toolkits of this kind store paint and touch handlers as
//! per-instance function pointers. Here the seam is a trait over a closed
//! widget set: the tree is generic over one `Behavior` type (typically an
//! enum of every widget variant) and dispatches with a plain match, so no
//! heap and no vtables are involved.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    CornerRadii, PrimitiveStyle, Rectangle, RoundedRectangle,
};

use crate::error::{UiError, UiResult};
use crate::rect;
use crate::scheme::{Scheme, SchemeId};

/// How a widget's border is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Border {
    /// No border.
    #[default]
    None,
    /// Single-pixel line in the scheme foreground color.
    Line,
    /// Raised 3D bevel (highlight on top/left, shadow on bottom/right).
    Bevel,
}

/// How a widget's background is drawn.
///
/// `None` matters beyond painting: invalidation of a child must also
/// invalidate every `None`-background ancestor, because those ancestors
/// show through and must repaint with the child to avoid artifacts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Background {
    /// Transparent: whatever is behind the widget shows through.
    None,
    /// Opaque fill in the scheme base color.
    #[default]
    Fill,
}

/// Repaint state of a widget for the current cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DirtyState {
    /// Nothing to repaint.
    #[default]
    Clean,
    /// The widget itself is fine but a descendant needs repainting.
    ChildDirty,
    /// The widget (and therefore its subtree) needs repainting.
    Dirty,
}

/// A touch delivery in flight, handed to [`Behavior`] touch hooks.
///
/// Setting [`accepted`](TouchInfo::accepted) stops the event from bubbling
/// to ancestor widgets and, for a down event, captures the touch slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchInfo {
    /// Touch slot index (0-based; two slots are tracked).
    pub index: u8,
    /// Position in screen coordinates.
    pub screen: Point,
    /// Position relative to the receiving widget's top-left corner.
    pub local: Point,
    /// Set by the handler to consume the event.
    pub accepted: bool,
}

/// State shared by every widget regardless of its concrete behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetCommon {
    rect: Rectangle,
    dirty: DirtyState,
    damage: Option<Rectangle>,
    /// Whether the widget (and its subtree) is drawn and hit-testable.
    pub visible: bool,
    /// Whether the widget receives input.
    pub enabled: bool,
    /// Border drawing mode.
    pub border: Border,
    /// Background drawing mode.
    pub background: Background,
    /// Opacity, 0 (invisible) to 255 (opaque). Painting skips 0.
    pub alpha: u8,
    /// Corner rounding radius in pixels.
    pub corner_radius: u32,
    /// Scheme reference; `None` falls back to [`Scheme::stock`].
    pub scheme: Option<SchemeId>,
}

impl WidgetCommon {
    /// A fresh widget occupying `rect` relative to its parent.
    ///
    /// New widgets start visible, enabled, opaque, filled, and dirty (so
    /// their first paint cycle draws them).
    pub const fn new(rect: Rectangle) -> Self {
        Self {
            rect,
            dirty: DirtyState::Dirty,
            damage: None,
            visible: true,
            enabled: true,
            border: Border::None,
            background: Background::Fill,
            alpha: 255,
            corner_radius: 0,
            scheme: None,
        }
    }

    /// Parent-relative bounds.
    #[must_use]
    pub const fn rect(&self) -> Rectangle {
        self.rect
    }

    /// Current repaint state.
    #[must_use]
    pub const fn dirty(&self) -> DirtyState {
        self.dirty
    }

    /// Accumulated damage region (widget-local), if any sub-rectangle
    /// invalidation happened since the last paint.
    #[must_use]
    pub const fn damage(&self) -> Option<Rectangle> {
        self.damage
    }

    /// Move the widget without resizing. Marks it dirty.
    pub fn set_position(&mut self, top_left: Point) {
        self.rect.top_left = top_left;
        self.mark_dirty();
    }

    /// Resize the widget in place.
    ///
    /// # Errors
    ///
    /// [`UiError::InvalidSize`] if either dimension is zero; the rect is
    /// left untouched.
    pub fn set_size(&mut self, size: Size) -> UiResult {
        if size.width == 0 || size.height == 0 {
            return Err(UiError::InvalidSize);
        }
        self.rect.size = size;
        self.mark_dirty();
        Ok(())
    }

    /// Mark the whole widget for repaint.
    pub fn mark_dirty(&mut self) {
        self.dirty = DirtyState::Dirty;
        self.damage = None;
    }

    /// Mark a widget-local sub-rectangle for repaint, merging with any
    /// damage already recorded. The widget becomes `Dirty`; the damage
    /// region is a hint that lets paint hooks redraw less.
    pub fn mark_damage(&mut self, local: Rectangle) {
        if self.dirty == DirtyState::Dirty && self.damage.is_none() {
            // Already fully dirty; a sub-rect adds nothing.
            return;
        }
        self.damage = Some(match self.damage {
            Some(existing) => rect::union(&existing, &local),
            None => local,
        });
        self.dirty = DirtyState::Dirty;
    }

    /// Promote `Clean` to `ChildDirty` (descendant needs a repaint walk).
    pub(crate) fn mark_child_dirty(&mut self) {
        if self.dirty == DirtyState::Clean {
            self.dirty = DirtyState::ChildDirty;
        }
    }

    /// Reset to `Clean`, clearing any damage hint. The paint walk calls
    /// this after a widget paints; custom render loops do the same.
    pub fn mark_clean(&mut self) {
        self.dirty = DirtyState::Clean;
        self.damage = None;
    }
}

/// Hooks a concrete widget implements.
///
/// Every hook has a no-op default so simple widgets only override what
/// they use. Hooks receive the widget's [`WidgetCommon`] for geometry and
/// invalidation; structural tree changes are never made from inside a hook.
pub trait Behavior {
    /// Per-frame housekeeping. `dt` is elapsed milliseconds; `0` disables
    /// time-driven behavior for the tick.
    fn update(&mut self, common: &mut WidgetCommon, dt: u32) {
        let _ = (common, dt);
    }

    /// Paint into `target`. `frame` is the widget's absolute screen rect;
    /// the default implementation draws the common background and border.
    ///
    /// # Errors
    ///
    /// Propagates the draw target's error.
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
        paint_background(common, frame, scheme, target)
    }

    /// A touch went down inside the widget.
    fn touch_down(&mut self, common: &mut WidgetCommon, touch: &mut TouchInfo) {
        let _ = (common, touch);
    }

    /// A captured touch lifted.
    fn touch_up(&mut self, common: &mut WidgetCommon, touch: &mut TouchInfo) {
        let _ = (common, touch);
    }

    /// A captured touch moved.
    fn touch_moved(&mut self, common: &mut WidgetCommon, touch: &mut TouchInfo) {
        let _ = (common, touch);
    }
}

/// Draw the common background fill and border for a widget.
///
/// Used by the default [`Behavior::paint`] and by concrete widgets that
/// draw content on top of the stock background.
///
/// # Errors
///
/// Propagates the draw target's error.
pub fn paint_background<D>(
    common: &WidgetCommon,
    frame: Rectangle,
    scheme: &Scheme,
    target: &mut D,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    if common.background == Background::Fill {
        if common.corner_radius > 0 {
            let radii = CornerRadii::new(Size::new(common.corner_radius, common.corner_radius));
            RoundedRectangle::new(frame, radii)
                .into_styled(PrimitiveStyle::with_fill(scheme.base))
                .draw(target)?;
        } else {
            frame
                .into_styled(PrimitiveStyle::with_fill(scheme.base))
                .draw(target)?;
        }
    }

    match common.border {
        Border::None => {}
        Border::Line => {
            frame
                .into_styled(PrimitiveStyle::with_stroke(scheme.foreground, 1))
                .draw(target)?;
        }
        Border::Bevel => {
            paint_bevel_frame(frame, scheme, false, target)?;
        }
    }

    Ok(())
}

/// Draw a one-pixel 3D bevel around `frame`. A raised bevel puts the
/// highlight on the top/left edges; `sunken` swaps highlight and shadow,
/// the look of a held-down button.
///
/// # Errors
///
/// Propagates the draw target's error.
// SAFETY: frame coordinates and sizes are on-screen pixel values; the
// offset arithmetic below stays far inside i32 range.
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_wrap)]
pub fn paint_bevel_frame<D>(
    frame: Rectangle,
    scheme: &Scheme,
    sunken: bool,
    target: &mut D,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    use embedded_graphics::primitives::Line;

    let w = frame.size.width as i32;
    let h = frame.size.height as i32;
    if w < 2 || h < 2 {
        return Ok(());
    }
    let tl = frame.top_left;
    let tr = Point::new(tl.x + w - 1, tl.y);
    let bl = Point::new(tl.x, tl.y + h - 1);
    let br = Point::new(tl.x + w - 1, tl.y + h - 1);

    let (top_color, bottom_color) = if sunken {
        (scheme.shadow, scheme.highlight)
    } else {
        (scheme.highlight, scheme.shadow)
    };
    let light = PrimitiveStyle::with_stroke(top_color, 1);
    let dark = PrimitiveStyle::with_stroke(bottom_color, 1);

    Line::new(tl, tr).into_styled(light).draw(target)?;
    Line::new(tl, bl).into_styled(light).draw(target)?;
    Line::new(bl, br).into_styled(dark).draw(target)?;
    Line::new(tr, br).into_styled(dark).draw(target)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn common() -> WidgetCommon {
        WidgetCommon::new(Rectangle::new(Point::new(10, 10), Size::new(40, 20)))
    }

    #[test]
    fn test_new_widget_starts_dirty_and_visible() {
        let c = common();
        assert_eq!(c.dirty(), DirtyState::Dirty);
        assert!(c.visible);
        assert!(c.enabled);
        assert_eq!(c.alpha, 255);
    }

    #[test]
    fn test_set_size_rejects_zero_width() {
        let mut c = common();
        let before = c.rect();
        assert_eq!(c.set_size(Size::new(0, 20)), Err(UiError::InvalidSize));
        assert_eq!(c.rect(), before, "failed resize must not mutate the rect");
    }

    #[test]
    fn test_set_size_rejects_zero_height() {
        let mut c = common();
        let before = c.rect();
        assert_eq!(c.set_size(Size::new(20, 0)), Err(UiError::InvalidSize));
        assert_eq!(c.rect(), before);
    }

    #[test]
    fn test_set_size_applies_and_dirties() {
        let mut c = common();
        c.mark_clean();
        assert!(c.set_size(Size::new(80, 30)).is_ok());
        assert_eq!(c.rect().size, Size::new(80, 30));
        assert_eq!(c.dirty(), DirtyState::Dirty);
    }

    #[test]
    fn test_set_position_dirties() {
        let mut c = common();
        c.mark_clean();
        c.set_position(Point::new(0, 0));
        assert_eq!(c.rect().top_left, Point::zero());
        assert_eq!(c.dirty(), DirtyState::Dirty);
    }

    #[test]
    fn test_mark_damage_unions_regions() {
        let mut c = common();
        c.mark_clean();
        c.mark_damage(Rectangle::new(Point::new(0, 0), Size::new(5, 5)));
        c.mark_damage(Rectangle::new(Point::new(10, 10), Size::new(5, 5)));
        assert_eq!(c.dirty(), DirtyState::Dirty);
        assert_eq!(
            c.damage(),
            Some(Rectangle::new(Point::zero(), Size::new(15, 15)))
        );
    }

    #[test]
    fn test_mark_damage_after_full_dirty_is_noop() {
        let mut c = common();
        c.mark_dirty();
        c.mark_damage(Rectangle::new(Point::new(1, 1), Size::new(2, 2)));
        assert_eq!(c.damage(), None, "full-dirty widget keeps no damage hint");
    }

    #[test]
    fn test_mark_clean_clears_damage() {
        let mut c = common();
        c.mark_damage(Rectangle::new(Point::new(1, 1), Size::new(2, 2)));
        c.mark_clean();
        assert_eq!(c.dirty(), DirtyState::Clean);
        assert_eq!(c.damage(), None);
    }

    #[test]
    fn test_child_dirty_does_not_demote_dirty() {
        let mut c = common();
        c.mark_dirty();
        c.mark_child_dirty();
        assert_eq!(c.dirty(), DirtyState::Dirty);
    }
}
