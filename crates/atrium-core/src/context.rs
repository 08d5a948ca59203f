//! The toolkit context — one value, explicitly threaded, no globals.
//!
//! A [`Ui`] owns the widget tree, the event queue, the scheme table, the
//! layer set, and the input state. Several independent instances can
//! coexist (one per display); everything happens inside the caller's
//! thread, once per frame:
//!
//! ```
//! use atrium_core::prelude::*;
//! use embedded_graphics::prelude::*;
//! use embedded_graphics::primitives::Rectangle;
//!
//! struct Blank;
//! impl Behavior for Blank {}
//!
//! let mut ui: Ui<Blank> = Ui::new(Size::new(320, 240));
//! let _root = ui.add_layer(Blank).unwrap();
//! ui.inject_touch_down(0, 10, 10).unwrap();
//! ui.update(16); // drain events, run behaviors
//! ```

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;

use crate::error::{UiError, UiResult};
use crate::event::{Disposition, Event, EventFilter, EventQueue, TouchSample};
use crate::input::InputState;
use crate::rect;
use crate::scheme::{Scheme, SchemeId, MAX_SCHEMES};
use crate::tree::{WidgetId, WidgetTree, MAX_CHILDREN, MAX_WIDGETS};
use crate::widget::{Behavior, DirtyState};

/// Maximum number of layers (screens) per context.
pub const MAX_LAYERS: usize = 4;

/// A complete retained-mode UI instance.
///
/// Generic over the closed widget set `W` (an enum of every concrete
/// widget implementing [`Behavior`]).
pub struct Ui<W: Behavior> {
    tree: WidgetTree<W>,
    queue: EventQueue,
    filter: Option<EventFilter>,
    schemes: Vec<Scheme, MAX_SCHEMES>,
    layers: Vec<WidgetId, MAX_LAYERS>,
    active_layer: usize,
    input: InputState,
    display_size: Size,
}

impl<W: Behavior> Ui<W> {
    /// A context for a display of the given pixel size.
    #[must_use]
    pub fn new(display_size: Size) -> Self {
        Self {
            tree: WidgetTree::new(),
            queue: EventQueue::new(),
            filter: None,
            schemes: Vec::new(),
            layers: Vec::new(),
            active_layer: 0,
            input: InputState::default(),
            display_size,
        }
    }

    /// The display size this context was created for.
    #[must_use]
    pub fn display_size(&self) -> Size {
        self.display_size
    }

    // ── Tree access ─────────────────────────────────────────────────────

    /// The widget tree (structure queries and mutation).
    pub fn tree(&self) -> &WidgetTree<W> {
        &self.tree
    }

    /// Mutable widget tree.
    pub fn tree_mut(&mut self) -> &mut WidgetTree<W> {
        &mut self.tree
    }

    /// Allocate a detached widget.
    ///
    /// # Errors
    ///
    /// See [`WidgetTree::alloc`].
    pub fn create_widget(&mut self, behavior: W, rect: Rectangle) -> UiResult<WidgetId> {
        self.tree.alloc(behavior, rect)
    }

    /// Destroy a widget and its whole subtree.
    ///
    /// # Errors
    ///
    /// [`UiError::DeadWidget`] for a stale handle. Layer roots cannot be
    /// destroyed this way.
    pub fn destroy_widget(&mut self, id: WidgetId) -> UiResult {
        if self.layers.iter().any(|l| *l == id) {
            return Err(UiError::LayerRoot);
        }
        if let Ok(Some(parent)) = self.tree.parent(id) {
            // Vacated pixels repaint with the parent.
            if let Ok(child_rect) = self.tree.common(id).map(|c| c.rect()) {
                if let Ok(parent_common) = self.tree.common_mut(parent) {
                    parent_common.mark_damage(child_rect);
                }
                self.tree.propagate_dirty(parent);
            }
        }
        self.tree.remove(id)
    }

    /// Mutable access to a widget's behavior.
    ///
    /// The widget is conservatively invalidated: mutating behavior state
    /// almost always changes what it paints.
    ///
    /// # Errors
    ///
    /// [`UiError::DeadWidget`] for a stale handle.
    pub fn behavior_mut(&mut self, id: WidgetId) -> UiResult<&mut W> {
        self.tree.invalidate(id)?;
        self.tree.behavior_mut(id)
    }

    /// Move a widget, invalidating both the vacated and the new area.
    ///
    /// # Errors
    ///
    /// [`UiError::DeadWidget`] for a stale handle.
    pub fn set_position(&mut self, id: WidgetId, top_left: Point) -> UiResult {
        let old = self.tree.common(id)?.rect();
        self.tree.common_mut(id)?.set_position(top_left);
        self.damage_parent_union(id, old)
    }

    /// Resize a widget, invalidating both the old and the new area.
    ///
    /// # Errors
    ///
    /// [`UiError::DeadWidget`] for a stale handle,
    /// [`UiError::InvalidSize`] for a zero dimension (the rect is left
    /// untouched).
    pub fn set_size(&mut self, id: WidgetId, size: Size) -> UiResult {
        let old = self.tree.common(id)?.rect();
        self.tree.common_mut(id)?.set_size(size)?;
        self.damage_parent_union(id, old)
    }

    fn damage_parent_union(&mut self, id: WidgetId, old: Rectangle) -> UiResult {
        let new = self.tree.common(id)?.rect();
        if let Some(parent) = self.tree.parent(id)? {
            let merged = rect::union(&old, &new);
            self.tree.common_mut(parent)?.mark_damage(merged);
        }
        self.tree.propagate_dirty(id);
        Ok(())
    }

    // ── Schemes ─────────────────────────────────────────────────────────

    /// Register a scheme, returning its id. Schemes are immutable once
    /// registered.
    ///
    /// # Errors
    ///
    /// [`UiError::CapacityExceeded`] past [`MAX_SCHEMES`].
    pub fn register_scheme(&mut self, scheme: Scheme) -> UiResult<SchemeId> {
        let index = u8::try_from(self.schemes.len()).map_err(|_| UiError::CapacityExceeded)?;
        self.schemes
            .push(scheme)
            .map_err(|_| UiError::CapacityExceeded)?;
        Ok(SchemeId(index))
    }

    /// Resolve a widget's scheme, falling back to [`Scheme::stock`].
    #[must_use]
    pub fn scheme_for(&self, id: WidgetId) -> Scheme {
        self.tree
            .common(id)
            .ok()
            .and_then(|c| c.scheme)
            .and_then(|sid| self.schemes.get(usize::from(sid.0)).copied())
            .unwrap_or_else(Scheme::stock)
    }

    /// Point a widget at a registered scheme and repaint it.
    ///
    /// # Errors
    ///
    /// [`UiError::DeadWidget`] for a stale handle,
    /// [`UiError::IndexOutOfRange`] for an unregistered scheme id.
    pub fn set_widget_scheme(&mut self, id: WidgetId, scheme: SchemeId) -> UiResult {
        if usize::from(scheme.0) >= self.schemes.len() {
            return Err(UiError::IndexOutOfRange);
        }
        self.tree.common_mut(id)?.scheme = Some(scheme);
        self.tree.invalidate(id)
    }

    // ── Layers ──────────────────────────────────────────────────────────

    /// Create a layer: a root widget covering the whole display. The
    /// first layer added becomes active.
    ///
    /// # Errors
    ///
    /// [`UiError::CapacityExceeded`] past [`MAX_LAYERS`] or when the
    /// widget arena is full.
    pub fn add_layer(&mut self, behavior: W) -> UiResult<WidgetId> {
        if self.layers.is_full() {
            return Err(UiError::CapacityExceeded);
        }
        let root = self
            .tree
            .alloc(behavior, Rectangle::new(Point::zero(), self.display_size))?;
        self.layers.push(root).map_err(|_| UiError::CapacityExceeded)?;
        Ok(root)
    }

    /// Root widget of the active layer, if any layer exists.
    #[must_use]
    pub fn active_root(&self) -> Option<WidgetId> {
        self.layers.get(self.active_layer).copied()
    }

    /// Number of layers.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Switch the active layer and schedule it for a full repaint.
    ///
    /// # Errors
    ///
    /// [`UiError::IndexOutOfRange`] for an unknown layer index.
    pub fn set_active_layer(&mut self, index: usize) -> UiResult {
        let root = *self.layers.get(index).ok_or(UiError::IndexOutOfRange)?;
        self.active_layer = index;
        self.tree.invalidate(root)
    }

    // ── Events and input ────────────────────────────────────────────────

    /// Install (or clear) the event filter. A filter returning `false`
    /// vetoes delivery; the event stays queued.
    pub fn set_event_filter(&mut self, filter: Option<EventFilter>) {
        self.filter = filter;
    }

    /// Queue an application event (e.g. a screen change).
    ///
    /// # Errors
    ///
    /// [`UiError::CapacityExceeded`] when the queue is full.
    pub fn push_event(&mut self, event: Event) -> UiResult {
        self.queue.push(event)
    }

    /// Number of events waiting to be processed.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.queue.len()
    }

    /// Enable or disable touch processing. Disabling also clears all
    /// tracked touches and captures.
    pub fn set_input_enabled(&mut self, enabled: bool) {
        self.input.set_enabled(enabled);
    }

    /// Last known position of a touch slot, if that touch is down.
    #[must_use]
    pub fn touch_position(&self, index: u8) -> Option<Point> {
        self.input.last_sample(index)
    }

    /// Queue a touch-down sample. The sole ingress point for pointer
    /// input from driver glue.
    ///
    /// # Errors
    ///
    /// [`UiError::CapacityExceeded`] when the queue is full.
    pub fn inject_touch_down(&mut self, index: u8, x: i32, y: i32) -> UiResult {
        self.queue.push(Event::TouchDown(TouchSample {
            index,
            point: Point::new(x, y),
        }))
    }

    /// Queue a touch-up sample.
    ///
    /// # Errors
    ///
    /// [`UiError::CapacityExceeded`] when the queue is full.
    pub fn inject_touch_up(&mut self, index: u8, x: i32, y: i32) -> UiResult {
        self.queue.push(Event::TouchUp(TouchSample {
            index,
            point: Point::new(x, y),
        }))
    }

    /// Queue a touch-moved sample.
    ///
    /// # Errors
    ///
    /// [`UiError::CapacityExceeded`] when the queue is full.
    pub fn inject_touch_moved(&mut self, index: u8, x: i32, y: i32) -> UiResult {
        self.queue.push(Event::TouchMoved(TouchSample {
            index,
            point: Point::new(x, y),
        }))
    }

    // ── Per-frame cycle ─────────────────────────────────────────────────

    /// One cooperative tick: drain the event queue, then run every
    /// widget's update hook. `dt` is elapsed milliseconds; `0` disables
    /// time-driven behavior for this tick.
    pub fn update(&mut self, dt: u32) {
        self.process_events();
        self.run_updates(dt);
    }

    fn process_events(&mut self) {
        let mut queue = core::mem::take(&mut self.queue);
        let filter = self.filter;

        queue.process(filter, |event| match event {
            Event::ScreenChange(index) => {
                // Unknown indices are consumed quietly (fail-quiet setter
                // contract).
                self.set_active_layer(usize::from(*index)).ok();
                Disposition::Handled
            }
            Event::TouchDown(_) | Event::TouchUp(_) | Event::TouchMoved(_) => {
                // Resolved per event: a touch queued behind a screen
                // change must land on the newly active layer.
                if let Some(root) = self.active_root() {
                    self.input.handle(&mut self.tree, root, event);
                }
                Disposition::Handled
            }
        });

        // Deferred events stay for the next call; anything a handler
        // queued meanwhile goes behind them.
        while let Some(event) = self.queue.pop_front() {
            queue.push(event).ok();
        }
        self.queue = queue;
    }

    fn run_updates(&mut self, dt: u32) {
        for layer_index in 0..self.layers.len() {
            let Some(root) = self.layers.get(layer_index).copied() else {
                continue;
            };
            let ids: Vec<WidgetId, MAX_WIDGETS> = self.tree.descendants(root).collect();
            for id in ids {
                if let Some(node) = self.tree.node_mut(id) {
                    node.behavior.update(&mut node.common, dt);
                    if node.common.dirty() == DirtyState::Dirty {
                        self.tree.propagate_dirty(id);
                    }
                }
            }
        }
    }

    /// Paint the active layer's dirty widgets top-down into `target`,
    /// returning every painted widget to `Clean`.
    ///
    /// # Errors
    ///
    /// Propagates the draw target's error; widgets already painted stay
    /// clean, the rest stay dirty and repaint next cycle.
    pub fn paint<D>(&mut self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(root) = self.active_root() else {
            return Ok(());
        };
        self.paint_widget(root, Point::zero(), false, target)
    }

    fn paint_widget<D>(
        &mut self,
        id: WidgetId,
        origin: Point,
        force: bool,
        target: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Ok(common) = self.tree.common(id) else {
            return Ok(());
        };
        if !common.visible || common.alpha == 0 {
            return Ok(());
        }
        let frame = rect::translate(&common.rect(), origin);
        let dirty = common.dirty();
        let paint_self = force || dirty == DirtyState::Dirty;

        if paint_self {
            let scheme = self.scheme_for(id);
            if let Some(node) = self.tree.node_mut(id) {
                node.behavior.paint(&node.common, frame, &scheme, target)?;
            }
        }

        if paint_self || dirty == DirtyState::ChildDirty {
            let children: Vec<WidgetId, MAX_CHILDREN> = {
                let Ok(count) = self.tree.child_count(id) else {
                    return Ok(());
                };
                (0..count)
                    .filter_map(|i| self.tree.child_at(id, i).ok())
                    .collect()
            };
            for child in children {
                self.paint_widget(child, frame.top_left, paint_self, target)?;
            }
            if let Ok(common) = self.tree.common_mut(id) {
                common.mark_clean();
            }
        }

        Ok(())
    }

    /// Convenience per-frame entry point: [`update`](Self::update) then
    /// [`paint`](Self::paint).
    ///
    /// # Errors
    ///
    /// Propagates the draw target's error from the paint pass.
    pub fn frame<D>(&mut self, dt: u32, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.update(dt);
        self.paint(target)
    }
}
