//! Panel — a plain container widget.
//!
//! A panel has no behavior of its own; it exists to group children and to
//! paint the stock background and border from [`WidgetCommon`]. All hooks
//! use the [`Behavior`] defaults.

use atrium_core::widget::Behavior;

/// Container widget with no content of its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Panel;

impl Behavior for Panel {}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_core::widget::{DirtyState, WidgetCommon};
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::Rectangle;

    #[test]
    fn test_update_is_inert() {
        let mut panel = Panel;
        let mut common = WidgetCommon::new(Rectangle::new(Point::zero(), Size::new(10, 10)));
        common.mark_clean();
        panel.update(&mut common, 16);
        assert_eq!(common.dirty(), DirtyState::Clean);
    }
}
