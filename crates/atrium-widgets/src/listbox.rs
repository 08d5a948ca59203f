//! List box — a fixed-capacity list of selectable text rows.

use atrium_core::error::{UiError, UiResult};
use atrium_core::scheme::Scheme;
use atrium_core::widget::{paint_background, Behavior, TouchInfo, WidgetCommon};
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use heapless::Vec;

/// Maximum rows a list box can hold.
pub const MAX_ITEMS: usize = 32;

const TEXT_INSET: i32 = 4;

/// Scrolling-free list of static strings with single selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListBox {
    items: Vec<&'static str, MAX_ITEMS>,
    selected: Option<usize>,
    item_height: u32,
}

impl ListBox {
    /// Default row height in pixels.
    pub const DEFAULT_ITEM_HEIGHT: u32 = 14;

    /// An empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            item_height: Self::DEFAULT_ITEM_HEIGHT,
        }
    }

    /// Builder method to set the row height (minimum 1 pixel).
    #[must_use]
    pub fn item_height(mut self, height: u32) -> Self {
        self.item_height = height.max(1);
        self
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` if the list holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The row at `index`, if it exists.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&'static str> {
        self.items.get(index).copied()
    }

    /// Index of the selected row, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Append a row.
    ///
    /// # Errors
    ///
    /// [`UiError::CapacityExceeded`] once [`MAX_ITEMS`] rows are held.
    pub fn push_item(&mut self, common: &mut WidgetCommon, text: &'static str) -> UiResult {
        self.items
            .push(text)
            .map_err(|_| UiError::CapacityExceeded)?;
        common.mark_dirty();
        Ok(())
    }

    /// Remove every row and clear the selection.
    pub fn clear(&mut self, common: &mut WidgetCommon) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.selected = None;
        common.mark_dirty();
    }

    /// Select a row, or clear the selection with `None`.
    ///
    /// # Errors
    ///
    /// [`UiError::IndexOutOfRange`] if `index` names a missing row; the
    /// selection is left unchanged.
    pub fn set_selected(&mut self, common: &mut WidgetCommon, index: Option<usize>) -> UiResult {
        if let Some(i) = index {
            if i >= self.items.len() {
                return Err(UiError::IndexOutOfRange);
            }
        }
        if self.selected == index {
            return Ok(());
        }
        self.selected = index;
        common.mark_dirty();
        Ok(())
    }

    /// Row index at a widget-local point, if it lands on one.
    fn row_at(&self, local: Point) -> Option<usize> {
        if local.y < 0 || local.x < 0 {
            return None;
        }
        // SAFETY: item_height is kept >= 1.
        #[allow(clippy::arithmetic_side_effects)]
        let row = local.y.unsigned_abs() / self.item_height;
        let row = row as usize;
        (row < self.items.len()).then_some(row)
    }
}

impl Behavior for ListBox {
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

        let mut clipped = target.clipped(&frame);
        for (row, text) in self.items.iter().enumerate() {
            // SAFETY: row < MAX_ITEMS and item_height is an on-screen
            // pixel count; the products stay well inside i32.
            #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_wrap)]
            let top = Point::new(
                frame.top_left.x,
                frame.top_left.y + (row as u32 * self.item_height) as i32,
            );
            let row_rect = Rectangle::new(top, Size::new(frame.size.width, self.item_height));
            let selected = self.selected == Some(row);
            if selected {
                row_rect
                    .into_styled(PrimitiveStyle::with_fill(scheme.highlight))
                    .draw(&mut clipped)?;
            }
            let color = if !common.enabled {
                scheme.text_disabled
            } else if selected {
                scheme.text_highlight
            } else {
                scheme.text
            };
            let style = MonoTextStyle::new(&FONT_6X10, color);
            let origin = Point::new(top.x.saturating_add(TEXT_INSET), top.y);
            Text::with_baseline(text, origin, style, Baseline::Top).draw(&mut clipped)?;
        }
        Ok(())
    }

    fn touch_down(&mut self, common: &mut WidgetCommon, touch: &mut TouchInfo) {
        touch.accepted = true;
        if let Some(row) = self.row_at(touch.local) {
            // set_selected only fails on an out-of-range index, which
            // row_at has already ruled out.
            let _ = self.set_selected(common, Some(row));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn common() -> WidgetCommon {
        WidgetCommon::new(Rectangle::new(Point::zero(), Size::new(80, 100)))
    }

    fn touch_at(x: i32, y: i32) -> TouchInfo {
        TouchInfo {
            index: 0,
            screen: Point::new(x, y),
            local: Point::new(x, y),
            accepted: false,
        }
    }

    fn filled() -> (ListBox, WidgetCommon) {
        let mut list = ListBox::new();
        let mut c = common();
        for text in ["alpha", "beta", "gamma"] {
            list.push_item(&mut c, text).unwrap();
        }
        (list, c)
    }

    #[test]
    fn test_push_and_read_items() {
        let (list, _) = filled();
        assert_eq!(list.len(), 3);
        assert_eq!(list.item(1), Some("beta"));
        assert_eq!(list.item(3), None);
    }

    #[test]
    fn test_capacity_limit() {
        let mut list = ListBox::new();
        let mut c = common();
        for _ in 0..MAX_ITEMS {
            list.push_item(&mut c, "row").unwrap();
        }
        assert_eq!(
            list.push_item(&mut c, "overflow"),
            Err(UiError::CapacityExceeded)
        );
        assert_eq!(list.len(), MAX_ITEMS);
    }

    #[test]
    fn test_set_selected_validates_index() {
        let (mut list, mut c) = filled();
        assert_eq!(
            list.set_selected(&mut c, Some(7)),
            Err(UiError::IndexOutOfRange)
        );
        assert_eq!(list.selected(), None, "failed select must not mutate");
        assert!(list.set_selected(&mut c, Some(2)).is_ok());
        assert_eq!(list.selected(), Some(2));
    }

    #[test]
    fn test_touch_selects_row() {
        let (mut list, mut c) = filled();
        // Default row height 14: y=30 lands in row 2.
        let mut touch = touch_at(10, 30);
        list.touch_down(&mut c, &mut touch);
        assert!(touch.accepted);
        assert_eq!(list.selected(), Some(2));
    }

    #[test]
    fn test_touch_below_rows_keeps_selection() {
        let (mut list, mut c) = filled();
        list.set_selected(&mut c, Some(0)).unwrap();
        let mut touch = touch_at(10, 90); // past the last row
        list.touch_down(&mut c, &mut touch);
        assert_eq!(list.selected(), Some(0));
    }

    #[test]
    fn test_clear_resets_selection() {
        let (mut list, mut c) = filled();
        list.set_selected(&mut c, Some(1)).unwrap();
        list.clear(&mut c);
        assert!(list.is_empty());
        assert_eq!(list.selected(), None);
    }
}
