//! Drives a media seek bar on a headless surface with a scripted pointer.
//!
//! Run with `RUST_LOG=debug` to see the slider's gesture logs.

use seekbar::prelude::*;

fn main() {
    env_logger::init();

    let position = create_signal(0.3f32);
    let dragging = create_signal(false);

    let writer = position.clone();
    let drag_flag = dragging.clone();
    let drag_done = dragging.clone();
    let seek_bar = slider(&position)
        .scroll(true)
        .bar_color(Color::from_hex(0x4A90E2))
        .on_drag_start(move || drag_flag.set(true))
        .on_drag(|v| log::info!("scrubbing at {:.0}%", v * 100.0))
        .on_drag_end(move || drag_done.set(false))
        .on_change(move |v| writer.set(v.clamp(0.0, 1.0)));

    let reader = position.clone();
    let _log_position = create_effect(move || {
        log::info!("position is now {:.3}", reader.get());
    });

    let mut surface = Surface::new(
        SurfaceConfig::new().width(400).height(24).namespace("seek-demo"),
        seek_bar,
    );

    let script = [
        Event::MouseDown {
            x: 100.0,
            y: 12.0,
            button: MouseButton::Left,
        },
        Event::MouseMove { x: 180.0, y: 12.0 },
        Event::MouseLeave,
        Event::MouseMove { x: 520.0, y: 90.0 },
        Event::MouseUp {
            x: 520.0,
            y: 90.0,
            button: MouseButton::Left,
        },
        Event::Scroll {
            x: 200.0,
            y: 12.0,
            delta_x: 0.0,
            delta_y: 120.0,
            source: ScrollSource::Wheel,
        },
    ];

    for event in &script {
        surface.dispatch(event);
        if let Some(cursor) = surface.take_cursor() {
            log::info!("cursor -> {cursor:?}");
        }
        let frame = surface.render();
        log::debug!("frame with {} draw commands", frame.commands().len());
    }

    println!(
        "final position {:.3} (dragging: {})",
        position.get(),
        dragging.get()
    );
}
