//! A draggable, clickable progress slider.
//!
//! The slider never owns its value. It reads the host's value (a plain `f32`,
//! a signal or a closure) and reports proposals through callbacks:
//!
//! - `on_change` commits a value: after a click, at the end of a drag, or on
//!   a wheel step.
//! - `on_drag` reports the live position while a drag is in progress.
//! - `on_drag_start` / `on_drag_end` bracket the gesture.
//!
//! ```ignore
//! let position = create_signal(0.0f32);
//! let writer = position.clone();
//! let seek = slider(&position)
//!     .scroll(true)
//!     .on_change(move |v| writer.set(v.clamp(0.0, 1.0)));
//! ```

use std::sync::Arc;

use crate::layout::{Constraints, Size};
use crate::reactive::{set_cursor, CursorIcon, DragSession, IntoMaybeDyn, MaybeDyn, WidgetId};
use crate::renderer::PaintContext;

use super::widget::{Color, Event, EventResponse, MouseButton, Rect, Widget};

/// Callback receiving a progress value
pub type ProgressCallback = Arc<dyn Fn(f32) + Send + Sync>;
/// Callback for drag gesture boundaries
pub type DragCallback = Arc<dyn Fn() + Send + Sync>;

/// Value step for one wheel unit
const WHEEL_STEP: f32 = 0.05;
/// Wheel delta that counts as one unit; finer touchpad deltas give partial steps
const WHEEL_DELTA_UNIT: f32 = 100.0;

/// Visual parameters of a slider
#[derive(Debug, Clone, PartialEq)]
pub struct SliderStyle {
    pub track_color: Color,
    /// Fill color of the bar up to the current progress
    pub bar_color: Color,
    pub knob_color: Color,
    /// Knob color while a drag is in progress
    pub knob_active_color: Color,
    pub track_height: f32,
    pub knob_radius: f32,
    /// Width used when the parent does not bound the width
    pub width: f32,
    pub height: f32,
}

impl Default for SliderStyle {
    fn default() -> Self {
        Self {
            track_color: Color::rgba(1.0, 1.0, 1.0, 0.15),
            bar_color: Color::rgb(0.35, 0.6, 1.0),
            knob_color: Color::rgb(0.9, 0.9, 0.95),
            knob_active_color: Color::WHITE,
            track_height: 4.0,
            knob_radius: 6.0,
            width: 200.0,
            height: 16.0,
        }
    }
}

/// Interaction state. While dragging, the drag progress replaces the host
/// value for painting and the session holds pointer capture.
#[derive(Debug, Default)]
pub enum SliderState {
    #[default]
    Idle,
    Dragging { progress: f32, session: DragSession },
}

impl SliderState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, SliderState::Dragging { .. })
    }

    pub fn drag_progress(&self) -> Option<f32> {
        match self {
            SliderState::Dragging { progress, .. } => Some(*progress),
            SliderState::Idle => None,
        }
    }
}

/// Progress to paint: the drag progress while dragging, otherwise the host
/// value clamped to [0, 1].
pub fn display_progress(state: &SliderState, value: f32) -> f32 {
    state
        .drag_progress()
        .unwrap_or_else(|| value.clamp(0.0, 1.0))
}

/// Map a horizontal pointer position onto `bounds` as a progress in [0, 1].
///
/// A zero width counts as 1 so an unmeasured layout cannot divide by zero.
pub fn progress_in(bounds: Rect, x: f32) -> f32 {
    let width = if bounds.width == 0.0 || bounds.width.is_nan() {
        1.0
    } else {
        bounds.width
    };
    ((x - bounds.x) / width).clamp(0.0, 1.0)
}

pub struct Slider {
    id: WidgetId,
    value: MaybeDyn<f32>,
    max: MaybeDyn<f32>,
    scroll: bool,
    style: SliderStyle,
    on_change: Option<ProgressCallback>,
    on_drag_start: Option<DragCallback>,
    on_drag: Option<ProgressCallback>,
    on_drag_end: Option<DragCallback>,
    state: SliderState,
    /// None until the first layout
    bounds: Option<Rect>,
    wheel_attached: bool,
}

impl Slider {
    pub fn new(value: impl IntoMaybeDyn<f32>) -> Self {
        Self {
            id: WidgetId::next(),
            value: value.into_maybe_dyn(),
            max: MaybeDyn::Static(1.0),
            scroll: false,
            style: SliderStyle::default(),
            on_change: None,
            on_drag_start: None,
            on_drag: None,
            on_drag_end: None,
            state: SliderState::Idle,
            bounds: None,
            wheel_attached: false,
        }
    }

    /// Declared upper bound of the value.
    ///
    /// Stored for the host; painting and wheel steps work on [0, 1] and do
    /// not divide by it.
    pub fn max(mut self, max: impl IntoMaybeDyn<f32>) -> Self {
        self.max = max.into_maybe_dyn();
        self
    }

    /// Enable wheel input. Takes effect when the slider is mounted.
    pub fn scroll(mut self, enabled: bool) -> Self {
        self.scroll = enabled;
        self
    }

    pub fn on_change<F: Fn(f32) + Send + Sync + 'static>(mut self, callback: F) -> Self {
        self.on_change = Some(Arc::new(callback));
        self
    }

    pub fn on_drag_start<F: Fn() + Send + Sync + 'static>(mut self, callback: F) -> Self {
        self.on_drag_start = Some(Arc::new(callback));
        self
    }

    pub fn on_drag<F: Fn(f32) + Send + Sync + 'static>(mut self, callback: F) -> Self {
        self.on_drag = Some(Arc::new(callback));
        self
    }

    pub fn on_drag_end<F: Fn() + Send + Sync + 'static>(mut self, callback: F) -> Self {
        self.on_drag_end = Some(Arc::new(callback));
        self
    }

    pub fn style(mut self, style: SliderStyle) -> Self {
        self.style = style;
        self
    }

    pub fn track_color(mut self, color: Color) -> Self {
        self.style.track_color = color;
        self
    }

    pub fn bar_color(mut self, color: Color) -> Self {
        self.style.bar_color = color;
        self
    }

    pub fn knob_color(mut self, color: Color) -> Self {
        self.style.knob_color = color;
        self
    }

    pub fn knob_active_color(mut self, color: Color) -> Self {
        self.style.knob_active_color = color;
        self
    }

    pub fn track_height(mut self, height: f32) -> Self {
        self.style.track_height = height;
        self
    }

    pub fn knob_radius(mut self, radius: f32) -> Self {
        self.style.knob_radius = radius;
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.style.width = width;
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.style.height = height;
        self
    }

    pub fn max_value(&self) -> f32 {
        self.max.get()
    }

    pub fn state(&self) -> &SliderState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    pub fn is_mounted(&self) -> bool {
        self.bounds.is_some()
    }

    pub fn is_wheel_attached(&self) -> bool {
        self.wheel_attached
    }

    /// Progress currently painted
    pub fn progress(&self) -> f32 {
        display_progress(&self.state, self.value.get())
    }

    /// Progress under a horizontal pointer position; 0 before the first layout.
    pub fn progress_at(&self, x: f32) -> f32 {
        match self.bounds {
            Some(bounds) => progress_in(bounds, x),
            None => 0.0,
        }
    }

    fn contains(&self, x: f32, y: f32) -> bool {
        self.bounds.is_some_and(|b| b.contains(x, y))
    }

    fn mount(&mut self) {
        if self.scroll {
            self.wheel_attached = true;
            log::trace!("slider {:?}: wheel listener attached", self.id);
        }
    }

    fn click(&self, x: f32) {
        let progress = self.progress_at(x);
        log::debug!("slider {:?}: click at {progress:.3}", self.id);
        if let Some(ref callback) = self.on_change {
            callback(progress);
        }
    }

    fn begin_drag(&mut self, x: f32) {
        let progress = self.progress_at(x);
        self.state = SliderState::Dragging {
            progress,
            session: DragSession::begin(self.id),
        };
        set_cursor(CursorIcon::Grabbing);
        self.id.request_paint();
        log::debug!("slider {:?}: drag start at {progress:.3}", self.id);

        if let Some(ref callback) = self.on_drag_start {
            callback();
        }
    }

    fn drag_to(&mut self, x: f32) {
        let next = self.progress_at(x);
        let SliderState::Dragging { progress, .. } = &mut self.state else {
            return;
        };
        *progress = next;
        self.id.request_paint();
        log::trace!("slider {:?}: drag to {next:.3}", self.id);

        if let Some(ref callback) = self.on_drag {
            callback(next);
        }
    }

    /// The only way out of a drag: releases capture, commits the drag
    /// progress, then reports the end of the gesture.
    fn end_drag(&mut self) {
        let SliderState::Dragging {
            progress,
            mut session,
        } = std::mem::take(&mut self.state)
        else {
            return;
        };
        session.end();

        if let Some(ref callback) = self.on_change {
            callback(progress);
        }

        set_cursor(CursorIcon::Default);
        self.id.request_paint();
        log::debug!("slider {:?}: drag end at {progress:.3}", self.id);

        if let Some(ref callback) = self.on_drag_end {
            callback();
        }
    }

    fn wheel(&self, delta_x: f32, delta_y: f32) {
        let Some(ref callback) = self.on_change else {
            return;
        };

        let dt = if delta_y != 0.0 { delta_y } else { delta_x };
        // Scrolling down (positive delta) moves the value down
        let direction = if dt == 0.0 {
            0.0
        } else if dt > 0.0 {
            -1.0
        } else {
            1.0
        };
        let multiplier = dt.abs() / WHEEL_DELTA_UNIT;
        let delta = WHEEL_STEP * multiplier;

        // Not clamped: the host clamps the value it feeds back in
        let value = self.value.get() + delta * direction;
        log::trace!("slider {:?}: wheel {dt} -> {value}", self.id);
        callback(value);
    }
}

impl Widget for Slider {
    fn layout(&mut self, constraints: Constraints) -> Size {
        let width = if constraints.has_bounded_width() {
            constraints.max_width
        } else {
            self.style.width
        };
        let size = constraints.constrain(Size::new(width, self.style.height));

        match self.bounds.as_mut() {
            Some(bounds) => {
                bounds.width = size.width;
                bounds.height = size.height;
            }
            None => {
                self.bounds = Some(Rect::from_size(size));
                self.mount();
            }
        }
        size
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        if let Some(bounds) = self.bounds.as_mut() {
            bounds.x = x;
            bounds.y = y;
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds.unwrap_or_default()
    }

    fn paint(&self, ctx: &mut PaintContext) {
        let Some(bounds) = self.bounds else {
            return;
        };
        let style = &self.style;
        let progress = self.progress();

        let track_height = style.track_height.min(bounds.height);
        let track_y = bounds.center_y() - track_height / 2.0;
        let radius = track_height / 2.0;
        let filled = progress * bounds.width;

        ctx.draw_rounded_rect(
            Rect::new(bounds.x, track_y, bounds.width, track_height),
            style.track_color,
            radius,
        );
        ctx.draw_rounded_rect(
            Rect::new(bounds.x, track_y, filled, track_height),
            style.bar_color,
            radius,
        );

        let knob_color = if self.is_dragging() {
            style.knob_active_color
        } else {
            style.knob_color
        };
        ctx.draw_circle(
            (bounds.x + filled, bounds.center_y()),
            style.knob_radius,
            knob_color,
        );
    }

    fn event(&mut self, event: &Event) -> EventResponse {
        match *event {
            Event::MouseDown { x, y, .. } => {
                if self.is_dragging() {
                    // Extra buttons during a drag belong to the same gesture
                    return EventResponse::Handled;
                }
                if self.contains(x, y) {
                    self.begin_drag(x);
                    return EventResponse::Handled;
                }
            }
            // Moves and releases count anywhere on the surface while dragging
            Event::MouseMove { x, .. } => {
                if self.is_dragging() {
                    self.drag_to(x);
                    return EventResponse::Handled;
                }
            }
            Event::MouseUp { .. } => {
                if self.is_dragging() {
                    self.end_drag();
                    return EventResponse::Handled;
                }
            }
            Event::Click {
                x,
                y,
                button: MouseButton::Left,
            } => {
                if !self.is_dragging() && self.contains(x, y) {
                    self.click(x);
                    return EventResponse::Handled;
                }
            }
            Event::Scroll {
                x,
                y,
                delta_x,
                delta_y,
                ..
            } => {
                if self.wheel_attached && self.contains(x, y) {
                    self.wheel(delta_x, delta_y);
                    return EventResponse::Handled;
                }
            }
            Event::Click { .. } | Event::MouseEnter { .. } | Event::MouseLeave => {}
        }

        EventResponse::Ignored
    }

    fn id(&self) -> WidgetId {
        self.id
    }
}

impl Drop for Slider {
    fn drop(&mut self) {
        if self.wheel_attached {
            self.wheel_attached = false;
            log::trace!("slider {:?}: wheel listener detached", self.id);
        }
        // Teardown mid-drag still releases capture and reports the commit
        self.end_drag();
    }
}

/// Create a slider showing `value`
pub fn slider(value: impl IntoMaybeDyn<f32>) -> Slider {
    Slider::new(value)
}
