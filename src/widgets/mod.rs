pub mod slider;
pub mod widget;

pub use slider::{
    display_progress, progress_in, slider, DragCallback, ProgressCallback, Slider, SliderState,
    SliderStyle,
};
pub use widget::{Color, Event, EventResponse, MouseButton, Rect, ScrollSource, Widget};
