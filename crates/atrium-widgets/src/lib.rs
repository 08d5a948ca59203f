//! Atrium widgets — the stock widget set for the Atrium toolkit.
//!
//! Each module provides one concrete widget implementing
//! [`Behavior`](atrium_core::widget::Behavior); [`set::WidgetSet`] bundles
//! them into the closed enum a [`Ui`](atrium_core::context::Ui) is
//! instantiated over.
//!
//! # Widgets
//!
//! - [`Panel`](panel::Panel) - plain container
//! - [`Label`](label::Label) - static text
//! - [`Button`](button::Button) - pressable button with a polled click flag
//! - [`ProgressBar`](progress::ProgressBar) - percentage fill bar
//! - [`Bitmap`](bitmap::Bitmap) - static RGB565 image
//! - [`Slider`](slider::Slider) - horizontal draggable value control
//! - [`Scrollbar`](scrollbar::Scrollbar) - vertical scroll control
//! - [`ListBox`](listbox::ListBox) - selectable text rows
//!
//! # Example
//!
//! ```
//! use atrium_core::prelude::*;
//! use atrium_widgets::prelude::*;
//! use embedded_graphics::prelude::*;
//! use embedded_graphics::primitives::Rectangle;
//!
//! let mut ui: Ui<WidgetSet> = Ui::new(Size::new(320, 240));
//! let root = ui.add_layer(Panel.into()).unwrap();
//! let button = ui
//!     .create_widget(
//!         Button::new("Play").into(),
//!         Rectangle::new(Point::new(20, 20), Size::new(80, 24)),
//!     )
//!     .unwrap();
//! ui.tree_mut().add_child(root, button).unwrap();
//! ```

#![cfg_attr(not(test), no_std)]

pub mod bitmap;
pub mod button;
pub mod label;
pub mod listbox;
pub mod panel;
pub mod percent;
pub mod progress;
pub mod scrollbar;
pub mod set;
pub mod slider;

pub mod prelude {
    //! The widget types plus the percentage helpers.
    pub use crate::bitmap::Bitmap;
    pub use crate::button::Button;
    pub use crate::label::Label;
    pub use crate::listbox::{ListBox, MAX_ITEMS};
    pub use crate::panel::Panel;
    pub use crate::percent::{percent_of, percent_whole_rounded};
    pub use crate::progress::ProgressBar;
    pub use crate::scrollbar::Scrollbar;
    pub use crate::set::WidgetSet;
    pub use crate::slider::Slider;
}
