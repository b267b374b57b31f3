pub mod capture;
pub mod cursor;
pub mod effect;
pub mod invalidation;
pub mod maybe_dyn;
pub mod runtime;
pub mod signal;

pub use capture::{
    capture_pointer, has_pointer_capture, pointer_capture, release_pointer, DragSession,
};
pub use cursor::{current_cursor, set_cursor, take_cursor_change, CursorIcon};
pub use effect::{create_effect, Effect};
pub use invalidation::{
    request_frame, take_frame_request, with_app_state, with_app_state_mut, ChangeFlags, WidgetId,
};
pub use maybe_dyn::{IntoMaybeDyn, MaybeDyn};
pub use signal::{create_signal, Signal};
