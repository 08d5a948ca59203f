//! Label — static single-line text.

use atrium_core::scheme::Scheme;
use atrium_core::widget::{paint_background, Behavior, WidgetCommon};
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

/// Single line of text, centered in the widget rect.
///
/// Text color follows the scheme (`text`, or `text_disabled` while the
/// widget is disabled).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    text: &'static str,
}

impl Label {
    /// A label showing `text`.
    #[must_use]
    pub const fn new(text: &'static str) -> Self {
        Self { text }
    }

    /// The current text.
    #[must_use]
    pub const fn text(&self) -> &'static str {
        self.text
    }

    /// Replace the text and mark the widget for repaint.
    pub fn set_text(&mut self, common: &mut WidgetCommon, text: &'static str) {
        if self.text == text {
            return;
        }
        self.text = text;
        common.mark_dirty();
    }
}

impl Behavior for Label {
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

        let color = if common.enabled {
            scheme.text
        } else {
            scheme.text_disabled
        };
        let character = MonoTextStyle::new(&FONT_6X10, color);
        let centered = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        let center = frame.center();
        Text::with_text_style(self.text, center, character, centered).draw(target)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_core::widget::DirtyState;

    fn common() -> WidgetCommon {
        WidgetCommon::new(Rectangle::new(Point::zero(), Size::new(60, 12)))
    }

    #[test]
    fn test_set_text_dirties() {
        let mut label = Label::new("Hello");
        let mut c = common();
        c.mark_clean();
        label.set_text(&mut c, "World");
        assert_eq!(label.text(), "World");
        assert_eq!(c.dirty(), DirtyState::Dirty);
    }

    #[test]
    fn test_set_same_text_stays_clean() {
        let mut label = Label::new("Hello");
        let mut c = common();
        c.mark_clean();
        label.set_text(&mut c, "Hello");
        assert_eq!(c.dirty(), DirtyState::Clean);
    }
}
