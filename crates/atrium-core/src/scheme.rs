//! Color schemes — shared palettes referenced by many widgets.
//!
//! A scheme is registered once with the [`Ui`](crate::context::Ui) and
//! referenced by [`SchemeId`]; it is immutable for as long as any widget
//! points at it. Widgets without a scheme fall back to
//! [`Scheme::default()`].

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

/// Maximum number of schemes a context can hold.
pub const MAX_SCHEMES: usize = 8;

/// Handle to a scheme registered with a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SchemeId(pub(crate) u8);

/// A shared color palette applied to a widget's visual elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheme {
    /// Widget body fill.
    pub base: Rgb565,
    /// Raised bevel / selection highlight.
    pub highlight: Rgb565,
    /// Sunken bevel shadow.
    pub shadow: Rgb565,
    /// Primary drawing color (borders, fills of active elements).
    pub foreground: Rgb565,
    /// Foreground while the widget is disabled.
    pub foreground_disabled: Rgb565,
    /// Fill behind content.
    pub background: Rgb565,
    /// Background while the widget is disabled.
    pub background_disabled: Rgb565,
    /// Text color.
    pub text: Rgb565,
    /// Text color inside a selection.
    pub text_highlight: Rgb565,
    /// Text color while the widget is disabled.
    pub text_disabled: Rgb565,
}

impl Scheme {
    /// The stock gray palette every widget starts with.
    pub const fn stock() -> Self {
        Self {
            base: Rgb565::new(24, 49, 24),
            highlight: Rgb565::WHITE,
            shadow: Rgb565::new(12, 24, 12),
            foreground: Rgb565::BLACK,
            foreground_disabled: Rgb565::new(16, 32, 16),
            background: Rgb565::WHITE,
            background_disabled: Rgb565::new(24, 49, 24),
            text: Rgb565::BLACK,
            text_highlight: Rgb565::WHITE,
            text_disabled: Rgb565::new(16, 32, 16),
        }
    }

    /// Builder method to set the body fill color.
    pub const fn base(mut self, color: Rgb565) -> Self {
        self.base = color;
        self
    }

    /// Builder method to set the foreground color.
    pub const fn foreground(mut self, color: Rgb565) -> Self {
        self.foreground = color;
        self
    }

    /// Builder method to set the background color.
    pub const fn background(mut self, color: Rgb565) -> Self {
        self.background = color;
        self
    }

    /// Builder method to set the text color.
    pub const fn text(mut self, color: Rgb565) -> Self {
        self.text = color;
        self
    }
}

impl Default for Scheme {
    fn default() -> Self {
        Self::stock()
    }
}
