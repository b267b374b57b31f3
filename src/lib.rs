//! A reactive slider widget: a draggable, clickable progress bar that reports
//! a normalized value in [0, 1] and optionally steps it with the scroll wheel.
//!
//! The host owns the value. The slider reads it through [`MaybeDyn`]
//! (plain value, signal or closure) and proposes new values through its
//! callbacks; see [`widgets::slider`].
//!
//! [`MaybeDyn`]: reactive::MaybeDyn

pub mod layout;
pub mod reactive;
pub mod renderer;
pub mod surface;
pub mod widgets;

pub mod prelude {
    pub use crate::layout::{Constraints, Size};
    pub use crate::reactive::{
        create_effect, create_signal, CursorIcon, Effect, IntoMaybeDyn, MaybeDyn, Signal,
    };
    pub use crate::renderer::{DrawCommand, PaintContext};
    pub use crate::surface::{Surface, SurfaceConfig};
    pub use crate::widgets::{
        slider, Color, Event, EventResponse, MouseButton, Rect, ScrollSource, Slider, SliderStyle,
        Widget,
    };
}

pub use surface::{Surface, SurfaceConfig};
