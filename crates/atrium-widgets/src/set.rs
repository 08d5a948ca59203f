//! The closed widget set.
//!
//! [`WidgetSet`] is the enum a [`Ui`](atrium_core::context::Ui) is
//! instantiated over: one variant per concrete widget, dispatching every
//! [`Behavior`] hook with a match. Applications that define their own
//! widgets build their own enum the same way; nothing in the core is
//! specific to this one.

use atrium_core::scheme::Scheme;
use atrium_core::widget::{Behavior, TouchInfo, WidgetCommon};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::bitmap::Bitmap;
use crate::button::Button;
use crate::label::Label;
use crate::listbox::ListBox;
use crate::panel::Panel;
use crate::progress::ProgressBar;
use crate::scrollbar::Scrollbar;
use crate::slider::Slider;

/// Every stock widget, as one dispatchable type.
#[derive(Debug, Clone)]
pub enum WidgetSet {
    /// Plain container.
    Panel(Panel),
    /// Static text.
    Label(Label),
    /// Pressable button.
    Button(Button),
    /// Percentage fill bar.
    ProgressBar(ProgressBar),
    /// Static image.
    Bitmap(Bitmap),
    /// Horizontal value slider.
    Slider(Slider),
    /// Vertical scrollbar.
    Scrollbar(Scrollbar),
    /// Selectable text rows.
    ListBox(ListBox),
}

macro_rules! dispatch {
    ($self:ident, $inner:ident => $body:expr) => {
        match $self {
            WidgetSet::Panel($inner) => $body,
            WidgetSet::Label($inner) => $body,
            WidgetSet::Button($inner) => $body,
            WidgetSet::ProgressBar($inner) => $body,
            WidgetSet::Bitmap($inner) => $body,
            WidgetSet::Slider($inner) => $body,
            WidgetSet::Scrollbar($inner) => $body,
            WidgetSet::ListBox($inner) => $body,
        }
    };
}

impl Behavior for WidgetSet {
    fn update(&mut self, common: &mut WidgetCommon, dt: u32) {
        dispatch!(self, w => w.update(common, dt));
    }

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
        dispatch!(self, w => w.paint(common, frame, scheme, target))
    }

    fn touch_down(&mut self, common: &mut WidgetCommon, touch: &mut TouchInfo) {
        dispatch!(self, w => w.touch_down(common, touch));
    }

    fn touch_up(&mut self, common: &mut WidgetCommon, touch: &mut TouchInfo) {
        dispatch!(self, w => w.touch_up(common, touch));
    }

    fn touch_moved(&mut self, common: &mut WidgetCommon, touch: &mut TouchInfo) {
        dispatch!(self, w => w.touch_moved(common, touch));
    }
}

macro_rules! variant_accessors {
    ($variant:ident, $ty:ty, $as_ref:ident, $as_mut:ident) => {
        /// Borrow the inner widget if this is that variant.
        #[must_use]
        pub fn $as_ref(&self) -> Option<&$ty> {
            match self {
                WidgetSet::$variant(w) => Some(w),
                _ => None,
            }
        }

        /// Mutably borrow the inner widget if this is that variant.
        #[must_use]
        pub fn $as_mut(&mut self) -> Option<&mut $ty> {
            match self {
                WidgetSet::$variant(w) => Some(w),
                _ => None,
            }
        }
    };
}

impl WidgetSet {
    variant_accessors!(Panel, Panel, as_panel, as_panel_mut);
    variant_accessors!(Label, Label, as_label, as_label_mut);
    variant_accessors!(Button, Button, as_button, as_button_mut);
    variant_accessors!(ProgressBar, ProgressBar, as_progress_bar, as_progress_bar_mut);
    variant_accessors!(Bitmap, Bitmap, as_bitmap, as_bitmap_mut);
    variant_accessors!(Slider, Slider, as_slider, as_slider_mut);
    variant_accessors!(Scrollbar, Scrollbar, as_scrollbar, as_scrollbar_mut);
    variant_accessors!(ListBox, ListBox, as_list_box, as_list_box_mut);
}

impl From<Panel> for WidgetSet {
    fn from(w: Panel) -> Self {
        Self::Panel(w)
    }
}

impl From<Label> for WidgetSet {
    fn from(w: Label) -> Self {
        Self::Label(w)
    }
}

impl From<Button> for WidgetSet {
    fn from(w: Button) -> Self {
        Self::Button(w)
    }
}

impl From<ProgressBar> for WidgetSet {
    fn from(w: ProgressBar) -> Self {
        Self::ProgressBar(w)
    }
}

impl From<Bitmap> for WidgetSet {
    fn from(w: Bitmap) -> Self {
        Self::Bitmap(w)
    }
}

impl From<Slider> for WidgetSet {
    fn from(w: Slider) -> Self {
        Self::Slider(w)
    }
}

impl From<Scrollbar> for WidgetSet {
    fn from(w: Scrollbar) -> Self {
        Self::Scrollbar(w)
    }
}

impl From<ListBox> for WidgetSet {
    fn from(w: ListBox) -> Self {
        Self::ListBox(w)
    }
}
