//! Static gallery of every stock widget, one of each, with a second
//! layer reachable from a screen-change event (press any list row).
//!
//! Run with:
//!
//! ```sh
//! cargo run -p atrium-widgets --example gallery --features examples
//! ```

use std::thread::sleep;
use std::time::Duration;

use atrium_core::prelude::*;
use atrium_widgets::prelude::*;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};

const DISPLAY_SIZE: Size = Size::new(320, 240);

fn rect(x: i32, y: i32, w: u32, h: u32) -> Rectangle {
    Rectangle::new(Point::new(x, y), Size::new(w, h))
}

fn build_gallery(ui: &mut Ui<WidgetSet>) -> (WidgetId, WidgetId) {
    let root = ui.add_layer(Panel.into()).expect("layer");

    let mut scratch = WidgetCommon::new(rect(0, 0, 1, 1));
    let mut list = ListBox::new();
    for name in ["First entry", "Second entry", "Third entry"] {
        list.push_item(&mut scratch, name).expect("capacity");
    }

    let mut slider = Slider::new(0, 100);
    slider.set_value(&mut scratch, 35);
    let mut progress = ProgressBar::new();
    progress.set_percent(&mut scratch, 65);
    let mut scrollbar = Scrollbar::new(300, 40);
    scrollbar.set_scroll_value(&mut scratch, 120);

    let widgets: [(WidgetSet, Rectangle); 6] = [
        (Label::new("Widget gallery").into(), rect(16, 12, 200, 14)),
        (Button::new("Button").into(), rect(16, 40, 90, 26)),
        (slider.into(), rect(16, 84, 180, 18)),
        (progress.into(), rect(16, 118, 180, 10)),
        (scrollbar.into(), rect(290, 12, 16, 216)),
        (Bitmap::new().into(), rect(220, 40, 48, 48)),
    ];
    for (widget, frame) in widgets {
        let id = ui.create_widget(widget, frame).expect("widget");
        ui.tree_mut().add_child(root, id).expect("child");
    }
    let list_id = ui
        .create_widget(list.into(), rect(16, 144, 180, 60))
        .expect("list");
    ui.tree_mut().add_child(root, list_id).expect("child");
    (root, list_id)
}

fn build_second_screen(ui: &mut Ui<WidgetSet>) {
    let root = ui.add_layer(Panel.into()).expect("layer");
    let label = ui
        .create_widget(
            Label::new("Second screen (row tapped)").into(),
            rect(40, 110, 240, 16),
        )
        .expect("label");
    ui.tree_mut().add_child(root, label).expect("child");
}

fn main() -> Result<(), core::convert::Infallible> {
    let mut display = SimulatorDisplay::<Rgb565>::new(DISPLAY_SIZE);
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Atrium gallery", &output_settings);

    let mut ui: Ui<WidgetSet> = Ui::new(DISPLAY_SIZE);
    let (root, list_id) = build_gallery(&mut ui);
    build_second_screen(&mut ui);

    // Give the gallery a slightly warm palette.
    let scheme = ui
        .register_scheme(Scheme::stock().base(Rgb565::new(28, 56, 26)))
        .expect("scheme");
    ui.set_widget_scheme(root, scheme).expect("scheme");

    'running: loop {
        window.update(&display);
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::MouseButtonDown { point, .. } => {
                    ui.inject_touch_down(0, point.x, point.y).ok();
                }
                SimulatorEvent::MouseButtonUp { point, .. } => {
                    ui.inject_touch_up(0, point.x, point.y).ok();
                }
                _ => {}
            }
        }

        ui.update(33);

        // Tapping a list row switches to the second screen.
        let tapped = ui
            .tree()
            .behavior(list_id)
            .ok()
            .and_then(|w| w.as_list_box())
            .and_then(ListBox::selected)
            .is_some();
        if tapped && ui.active_root() == Some(root) {
            ui.push_event(Event::ScreenChange(1)).ok();
        }

        ui.paint(&mut display)?;
        sleep(Duration::from_millis(33));
    }

    Ok(())
}
