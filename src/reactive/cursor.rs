//! Cursor requests from widgets.
//!
//! Widgets call `set_cursor`; the host polls `take_cursor_change` once per
//! frame and applies the icon through its platform layer.

use std::cell::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorIcon {
    #[default]
    Default,
    /// Closed hand, a drag is in progress.
    Grabbing,
}

thread_local! {
    static CURRENT_CURSOR: Cell<CursorIcon> = const { Cell::new(CursorIcon::Default) };
    static CURSOR_CHANGED: Cell<bool> = const { Cell::new(false) };
}

pub fn set_cursor(cursor: CursorIcon) {
    if CURRENT_CURSOR.with(|c| c.replace(cursor)) != cursor {
        CURSOR_CHANGED.with(|changed| changed.set(true));
    }
}

/// Take the pending cursor change, if the cursor changed since the last call.
pub fn take_cursor_change() -> Option<CursorIcon> {
    if CURSOR_CHANGED.with(|c| c.replace(false)) {
        Some(current_cursor())
    } else {
        None
    }
}

pub fn current_cursor() -> CursorIcon {
    CURRENT_CURSOR.with(|c| c.get())
}
