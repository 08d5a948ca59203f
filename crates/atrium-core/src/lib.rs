//! Atrium core — retained-mode touch UI for small embedded displays.
//!
//! # Architecture
//!
//! - [`tree`]: generational widget arena with ordered, bounded child lists
//! - [`widget`]: per-widget common state and the [`Behavior`](widget::Behavior) hook trait
//! - [`event`]: bounded FIFO event queue with filter and dispositions
//! - [`input`]: touch tracking, hit testing, capture, bubbling dispatch
//! - [`scheme`]: shared color palettes
//! - [`context`]: the [`Ui`](context::Ui) handle and the update/paint cycle
//!
//! Everything is `no_std`, allocation-free (`heapless` bounded buffers),
//! and single-threaded by default. The `rtos` feature adds an
//! `embassy-sync` channel for injecting events from ISRs or producer
//! tasks; the `defmt` feature derives `defmt::Format` on public types.
//!
//! # Example
//!
//! ```
//! use atrium_core::prelude::*;
//! use embedded_graphics::prelude::*;
//! use embedded_graphics::primitives::Rectangle;
//!
//! struct Panel;
//! impl Behavior for Panel {}
//!
//! let mut ui: Ui<Panel> = Ui::new(Size::new(320, 240));
//! let root = ui.add_layer(Panel).unwrap();
//! let child = ui
//!     .create_widget(Panel, Rectangle::new(Point::new(10, 10), Size::new(60, 30)))
//!     .unwrap();
//! ui.tree_mut().add_child(root, child).unwrap();
//!
//! ui.inject_touch_down(0, 20, 20).unwrap();
//! ui.update(16);
//! assert_eq!(ui.event_count(), 0);
//! ```

#![cfg_attr(not(test), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod context;
pub mod error;
pub mod event;
pub mod input;
pub mod rect;
pub mod scheme;
pub mod tree;
pub mod widget;

#[cfg(feature = "rtos")]
pub mod inject;

pub mod prelude {
    //! Everything an application using the toolkit typically needs.
    pub use crate::context::{Ui, MAX_LAYERS};
    pub use crate::error::{UiError, UiResult};
    pub use crate::event::{Disposition, Event, EventFilter, TouchSample, EVENT_QUEUE_DEPTH};
    pub use crate::input::MAX_TOUCH_STATES;
    pub use crate::scheme::{Scheme, SchemeId, MAX_SCHEMES};
    pub use crate::tree::{WidgetId, WidgetTree, MAX_CHILDREN, MAX_WIDGETS};
    pub use crate::widget::{
        paint_background, paint_bevel_frame, Background, Behavior, Border, DirtyState, TouchInfo,
        WidgetCommon,
    };

    #[cfg(feature = "rtos")]
    pub use crate::inject::{InputChannel, INJECT_QUEUE_DEPTH};
}
