#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use seekbar::prelude::*;

/// A callback invocation seen by the host
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Change(f32),
    DragStart,
    Drag(f32),
    DragEnd,
}

/// Collects slider callbacks in the order they fire
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Call>>>);

impl Recorder {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self::default()
    }

    fn push(&self, call: Call) {
        self.0.lock().expect("recorder lock").push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().expect("recorder lock").clone()
    }

    pub fn clear(&self) {
        self.0.lock().expect("recorder lock").clear();
    }

    /// Wire every callback of `slider` into this recorder
    pub fn attach(&self, slider: Slider) -> Slider {
        let (change, start, drag, end) = (self.clone(), self.clone(), self.clone(), self.clone());
        slider
            .on_change(move |v| change.push(Call::Change(v)))
            .on_drag_start(move || start.push(Call::DragStart))
            .on_drag(move |v| drag.push(Call::Drag(v)))
            .on_drag_end(move || end.push(Call::DragEnd))
    }
}

/// Lay `slider` out at `width` x 16 with its origin at (0, 0)
pub fn mount(mut slider: Slider, width: f32) -> Slider {
    slider.layout(Constraints::tight(Size::new(width, 16.0)));
    slider.set_origin(0.0, 0.0);
    slider
}

pub fn assert_change(call: &Call, expected: f32) {
    match call {
        Call::Change(v) => assert!(
            (v - expected).abs() < 1e-6,
            "expected change to {expected}, got {v}"
        ),
        other => panic!("expected Change({expected}), got {other:?}"),
    }
}

pub fn down(x: f32, y: f32) -> Event {
    Event::MouseDown {
        x,
        y,
        button: MouseButton::Left,
    }
}

pub fn up(x: f32, y: f32) -> Event {
    Event::MouseUp {
        x,
        y,
        button: MouseButton::Left,
    }
}

pub fn moved(x: f32, y: f32) -> Event {
    Event::MouseMove { x, y }
}

pub fn click(x: f32, y: f32) -> Event {
    Event::Click {
        x,
        y,
        button: MouseButton::Left,
    }
}

pub fn wheel(delta_x: f32, delta_y: f32) -> Event {
    Event::Scroll {
        x: 10.0,
        y: 8.0,
        delta_x,
        delta_y,
        source: ScrollSource::Wheel,
    }
}
