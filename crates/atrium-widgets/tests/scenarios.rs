//! End-to-end scenarios: widget set wired through a full `Ui` context,
//! driven by injected touches and per-frame updates.

use atrium_core::prelude::*;
use atrium_widgets::prelude::*;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

// ── Harness ─────────────────────────────────────────────────────────────

/// Draw target that counts draw calls and discards pixels.
struct NullDisplay {
    draws: u32,
}

impl NullDisplay {
    fn new() -> Self {
        Self { draws: 0 }
    }
}

impl Dimensions for NullDisplay {
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(320, 240))
    }
}

impl DrawTarget for NullDisplay {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.draws += 1;
        let _ = pixels.into_iter().count();
        Ok(())
    }
}

fn rect(x: i32, y: i32, w: u32, h: u32) -> Rectangle {
    Rectangle::new(Point::new(x, y), Size::new(w, h))
}

fn ui_with_root() -> (Ui<WidgetSet>, WidgetId) {
    let mut ui = Ui::new(Size::new(320, 240));
    let root = ui.add_layer(Panel.into()).unwrap();
    (ui, root)
}

fn add_widget(
    ui: &mut Ui<WidgetSet>,
    parent: WidgetId,
    widget: WidgetSet,
    frame: Rectangle,
) -> WidgetId {
    let id = ui.create_widget(widget, frame).unwrap();
    ui.tree_mut().add_child(parent, id).unwrap();
    id
}

// ── Paint cycle ─────────────────────────────────────────────────────────

#[test]
fn test_label_transitions_dirty_to_clean_after_one_frame() {
    let (mut ui, root) = ui_with_root();
    let label = add_widget(
        &mut ui,
        root,
        Label::new("Hello").into(),
        rect(10, 10, 60, 12),
    );
    assert_eq!(ui.tree().common(label).unwrap().dirty(), DirtyState::Dirty);

    let mut display = NullDisplay::new();
    ui.frame(16, &mut display).unwrap();

    assert_eq!(ui.tree().common(label).unwrap().dirty(), DirtyState::Clean);
    assert!(display.draws > 0);
}

#[test]
fn test_label_set_text_repaints_next_frame() {
    let (mut ui, root) = ui_with_root();
    let label = add_widget(
        &mut ui,
        root,
        Label::new("Hello").into(),
        rect(10, 10, 60, 12),
    );
    let mut display = NullDisplay::new();
    ui.frame(16, &mut display).unwrap();
    let settled = display.draws;

    // behavior_mut invalidates, so the new text shows next frame.
    let mut common = WidgetCommon::new(rect(0, 0, 1, 1));
    if let Some(l) = ui.behavior_mut(label).unwrap().as_label_mut() {
        l.set_text(&mut common, "World");
    }
    ui.frame(16, &mut display).unwrap();
    assert!(display.draws > settled);
}

// ── Button input ────────────────────────────────────────────────────────

#[test]
fn test_button_touch_down_is_accepted_and_event_drained() {
    let (mut ui, root) = ui_with_root();
    let button = add_widget(&mut ui, root, Button::new("OK").into(), rect(20, 20, 80, 24));

    ui.inject_touch_down(0, 30, 30).unwrap();
    assert_eq!(ui.event_count(), 1);

    ui.update(16);
    assert_eq!(ui.event_count(), 0, "handled event leaves the queue");
    let pressed = ui
        .tree()
        .behavior(button)
        .unwrap()
        .as_button()
        .map(Button::is_pressed);
    assert_eq!(pressed, Some(true), "accepted touch pressed the button");
}

#[test]
fn test_button_click_latches_through_full_touch_sequence() {
    let (mut ui, root) = ui_with_root();
    let button = add_widget(&mut ui, root, Button::new("OK").into(), rect(20, 20, 80, 24));

    ui.inject_touch_down(0, 30, 30).unwrap();
    ui.inject_touch_up(0, 32, 31).unwrap();
    ui.update(16);

    let clicked = ui
        .behavior_mut(button)
        .unwrap()
        .as_button_mut()
        .map(Button::take_click);
    assert_eq!(clicked, Some(true));
}

#[test]
fn test_button_capture_routes_up_outside_its_rect() {
    let (mut ui, root) = ui_with_root();
    let button = add_widget(&mut ui, root, Button::new("OK").into(), rect(20, 20, 80, 24));

    ui.inject_touch_down(0, 30, 30).unwrap();
    ui.inject_touch_up(0, 300, 200).unwrap(); // released far away
    ui.update(16);

    let b = ui.tree().behavior(button).unwrap().as_button().copied().unwrap();
    assert!(!b.is_pressed(), "captured up releases the button");
    let clicked = ui
        .behavior_mut(button)
        .unwrap()
        .as_button_mut()
        .map(Button::take_click);
    assert_eq!(clicked, Some(false), "release outside is not a click");
}

#[test]
fn test_disabled_input_drops_touches() {
    let (mut ui, root) = ui_with_root();
    let button = add_widget(&mut ui, root, Button::new("OK").into(), rect(20, 20, 80, 24));

    ui.set_input_enabled(false);
    ui.inject_touch_down(0, 30, 30).unwrap();
    ui.update(16);

    assert_eq!(ui.event_count(), 0, "events drain even while disabled");
    let pressed = ui
        .tree()
        .behavior(button)
        .unwrap()
        .as_button()
        .map(Button::is_pressed);
    assert_eq!(pressed, Some(false));
}

// ── Slider drag ─────────────────────────────────────────────────────────

#[test]
fn test_slider_drag_moves_value_through_injected_touches() {
    let (mut ui, root) = ui_with_root();
    // 112 wide with the default 12-pixel grip: a 100-pixel track.
    let slider = add_widget(
        &mut ui,
        root,
        Slider::new(0, 100).into(),
        rect(40, 100, 112, 16),
    );

    // Grip sits at the left edge; press inside it, drag to the far end.
    ui.inject_touch_down(0, 46, 108).unwrap();
    ui.inject_touch_moved(0, 146, 108).unwrap();
    ui.inject_touch_up(0, 146, 108).unwrap();
    ui.update(16);

    let value = ui
        .tree()
        .behavior(slider)
        .unwrap()
        .as_slider()
        .map(Slider::value);
    assert_eq!(value, Some(100));
}

#[test]
fn test_slider_percentage_round_trip_through_context() {
    let (mut ui, root) = ui_with_root();
    let slider = add_widget(
        &mut ui,
        root,
        Slider::new(-100, 100).into(),
        rect(40, 100, 112, 16),
    );

    let mut common = WidgetCommon::new(rect(0, 0, 112, 16));
    let s = ui.behavior_mut(slider).unwrap().as_slider_mut().unwrap();
    s.set_percentage(&mut common, 50);
    assert_eq!(s.value(), 0);
    assert_eq!(s.percentage(), 50);
}

// ── Scrollbar ───────────────────────────────────────────────────────────

#[test]
fn test_scrollbar_buttons_step_through_injected_touches() {
    let (mut ui, root) = ui_with_root();
    // 16 wide, 200 tall at (300, 20): square 16-pixel step buttons.
    let bar = add_widget(
        &mut ui,
        root,
        Scrollbar::new(100, 10).into(),
        rect(300, 20, 16, 200),
    );

    // Bottom button, twice; then the top button once.
    ui.inject_touch_down(0, 308, 215).unwrap();
    ui.inject_touch_up(0, 308, 215).unwrap();
    ui.inject_touch_down(0, 308, 215).unwrap();
    ui.inject_touch_up(0, 308, 215).unwrap();
    ui.inject_touch_down(0, 308, 25).unwrap();
    ui.inject_touch_up(0, 308, 25).unwrap();
    ui.update(16);

    let value = ui
        .tree()
        .behavior(bar)
        .unwrap()
        .as_scrollbar()
        .map(Scrollbar::value);
    assert_eq!(value, Some(10));
}

// ── List box ────────────────────────────────────────────────────────────

#[test]
fn test_listbox_touch_selects_row_through_context() {
    let (mut ui, root) = ui_with_root();
    let list_id = {
        let mut list = ListBox::new();
        let mut scratch = WidgetCommon::new(rect(0, 0, 1, 1));
        for name in ["alpha", "beta", "gamma"] {
            list.push_item(&mut scratch, name).unwrap();
        }
        add_widget(&mut ui, root, list.into(), rect(10, 10, 100, 80))
    };

    // Row height 14: local y 30 (screen y 40) is row 2.
    ui.inject_touch_down(0, 50, 40).unwrap();
    ui.update(16);

    let selected = ui
        .tree()
        .behavior(list_id)
        .unwrap()
        .as_list_box()
        .and_then(ListBox::selected);
    assert_eq!(selected, Some(2));
}

// ── Layers and schemes ──────────────────────────────────────────────────

#[test]
fn test_screen_change_event_switches_and_repaints_layer() {
    let (mut ui, _first) = ui_with_root();
    let second = ui.add_layer(Panel.into()).unwrap();
    let mut display = NullDisplay::new();
    ui.frame(16, &mut display).unwrap();

    ui.push_event(Event::ScreenChange(1)).unwrap();
    ui.update(16);
    assert_eq!(ui.active_root(), Some(second));
    assert_eq!(ui.tree().common(second).unwrap().dirty(), DirtyState::Dirty);
}

#[test]
fn test_widget_scheme_resolves_through_context() {
    let (mut ui, root) = ui_with_root();
    let label = add_widget(
        &mut ui,
        root,
        Label::new("hi").into(),
        rect(10, 10, 40, 12),
    );
    let red = ui
        .register_scheme(Scheme::stock().base(Rgb565::RED))
        .unwrap();
    ui.set_widget_scheme(label, red).unwrap();
    assert_eq!(ui.scheme_for(label).base, Rgb565::RED);
    assert_eq!(ui.scheme_for(root), Scheme::stock());
}
