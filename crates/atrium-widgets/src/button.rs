//! Button — pressable text widget with a latched click flag.
//!
//! Instead of registered press callbacks, the press latches into the
//! button and the application polls it with [`Button::take_click`] once
//! per cycle, which keeps the widget set free of stored closures.

use atrium_core::scheme::Scheme;
use atrium_core::widget::{paint_bevel_frame, Behavior, Background, TouchInfo, WidgetCommon};
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

/// Pressable button with a centered text label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    text: &'static str,
    pressed: bool,
    clicked: bool,
}

impl Button {
    /// A button labeled `text`.
    #[must_use]
    pub const fn new(text: &'static str) -> Self {
        Self {
            text,
            pressed: false,
            clicked: false,
        }
    }

    /// The label text.
    #[must_use]
    pub const fn text(&self) -> &'static str {
        self.text
    }

    /// `true` while a touch is held on the button.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Replace the label and mark the widget for repaint.
    pub fn set_text(&mut self, common: &mut WidgetCommon, text: &'static str) {
        if self.text == text {
            return;
        }
        self.text = text;
        common.mark_dirty();
    }

    /// Consume a completed click (touch down then up inside the button).
    ///
    /// Returns `true` at most once per click; the flag re-arms on the next
    /// press-and-release.
    pub fn take_click(&mut self) -> bool {
        core::mem::take(&mut self.clicked)
    }
}

impl Behavior for Button {
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
        if common.background == Background::Fill {
            let fill = if self.pressed {
                scheme.shadow
            } else {
                scheme.base
            };
            frame
                .into_styled(PrimitiveStyle::with_fill(fill))
                .draw(target)?;
        }
        // Pressed buttons render a sunken bevel by swapping the edges.
        paint_bevel_frame(frame, scheme, self.pressed, target)?;

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
        Text::with_text_style(self.text, frame.center(), character, centered).draw(target)?;
        Ok(())
    }

    fn touch_down(&mut self, common: &mut WidgetCommon, touch: &mut TouchInfo) {
        self.pressed = true;
        touch.accepted = true;
        common.mark_dirty();
    }

    fn touch_up(&mut self, common: &mut WidgetCommon, touch: &mut TouchInfo) {
        if !self.pressed {
            return;
        }
        self.pressed = false;
        let inside = Rectangle::new(Point::zero(), common.rect().size).contains(touch.local);
        if inside {
            self.clicked = true;
        }
        touch.accepted = true;
        common.mark_dirty();
    }
}
