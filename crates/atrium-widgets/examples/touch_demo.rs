//! Interactive demo: a button, a slider, and a progress bar wired
//! together, driven by mouse input forwarded as touch events.
//!
//! Run with:
//!
//! ```sh
//! cargo run -p atrium-widgets --example touch_demo --features examples
//! ```
//!
//! Clicking the button advances the progress bar by 10%; dragging the
//! slider sets it directly.

use std::thread::sleep;
use std::time::{Duration, Instant};

use atrium_core::prelude::*;
use atrium_widgets::prelude::*;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};

const DISPLAY_SIZE: Size = Size::new(320, 240);
const FRAME: Duration = Duration::from_millis(33);

fn rect(x: i32, y: i32, w: u32, h: u32) -> Rectangle {
    Rectangle::new(Point::new(x, y), Size::new(w, h))
}

fn main() -> Result<(), core::convert::Infallible> {
    let mut display = SimulatorDisplay::<Rgb565>::new(DISPLAY_SIZE);
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Atrium touch demo", &output_settings);

    let mut ui: Ui<WidgetSet> = Ui::new(DISPLAY_SIZE);
    let root = ui.add_layer(Panel.into()).expect("layer");

    let title = ui
        .create_widget(Label::new("Atrium demo").into(), rect(20, 16, 280, 16))
        .expect("label");
    let button = ui
        .create_widget(Button::new("+10%").into(), rect(20, 48, 80, 28))
        .expect("button");
    let slider = ui
        .create_widget(Slider::new(0, 100).into(), rect(20, 96, 212, 20))
        .expect("slider");
    let bar = ui
        .create_widget(ProgressBar::new().into(), rect(20, 136, 212, 12))
        .expect("bar");
    for id in [title, button, slider, bar] {
        ui.tree_mut().add_child(root, id).expect("child");
    }

    let mut last = Instant::now();
    'running: loop {
        let now = Instant::now();
        let dt = u32::try_from(now.duration_since(last).as_millis()).unwrap_or(u32::MAX);
        last = now;

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
                SimulatorEvent::MouseMove { point } => {
                    if ui.touch_position(0).is_some() {
                        ui.inject_touch_moved(0, point.x, point.y).ok();
                    }
                }
                _ => {}
            }
        }

        ui.update(dt);

        // Button clicks bump the bar; the slider drives it directly while
        // dragging.
        let clicked = ui
            .behavior_mut(button)
            .expect("button alive")
            .as_button_mut()
            .is_some_and(Button::take_click);
        let slider_state = ui
            .tree()
            .behavior(slider)
            .expect("slider alive")
            .as_slider()
            .copied();
        if let Ok(behavior) = ui.behavior_mut(bar) {
            if let Some(p) = behavior.as_progress_bar_mut() {
                let mut scratch = WidgetCommon::new(rect(0, 0, 212, 12));
                if let Some(s) = slider_state.filter(Slider::is_dragging) {
                    let pct = u8::try_from(s.percentage()).unwrap_or(100);
                    p.set_percent(&mut scratch, pct);
                } else if clicked {
                    p.set_percent(&mut scratch, p.percent().saturating_add(10));
                }
            }
        }

        ui.paint(&mut display)?;
        sleep(FRAME);
    }

    Ok(())
}
