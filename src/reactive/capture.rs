//! Pointer capture for drag gestures.
//!
//! While a widget holds the capture, the host keeps routing pointer moves and
//! releases to it even after the pointer leaves its bounds. Only one widget
//! can hold the capture at a time (single pointer).

use std::cell::RefCell;

use super::invalidation::WidgetId;

thread_local! {
    /// The widget currently holding pointer capture, if any
    static CAPTURED_WIDGET: RefCell<Option<WidgetId>> = const { RefCell::new(None) };
}

/// Capture the pointer for a widget.
/// A widget that held the capture before loses it and is repainted.
pub fn capture_pointer(id: WidgetId) {
    CAPTURED_WIDGET.with(|cell| {
        let mut captured = cell.borrow_mut();
        if let Some(old_id) = *captured {
            if old_id != id {
                log::warn!("pointer capture moved from {old_id:?} to {id:?}");
                old_id.request_paint();
            }
        }
        *captured = Some(id);
    });
}

/// Release pointer capture. Only releases if `id` currently holds it.
pub fn release_pointer(id: WidgetId) {
    CAPTURED_WIDGET.with(|cell| {
        let mut captured = cell.borrow_mut();
        if *captured == Some(id) {
            *captured = None;
        }
    });
}

pub fn has_pointer_capture(id: WidgetId) -> bool {
    CAPTURED_WIDGET.with(|cell| *cell.borrow() == Some(id))
}

/// Get the widget holding pointer capture, if any.
pub fn pointer_capture() -> Option<WidgetId> {
    CAPTURED_WIDGET.with(|cell| *cell.borrow())
}

/// A scoped drag gesture.
///
/// Acquires pointer capture on `begin` and releases it exactly once, either
/// through `end` or when dropped.
#[derive(Debug)]
pub struct DragSession {
    owner: WidgetId,
    active: bool,
}

impl DragSession {
    pub fn begin(owner: WidgetId) -> Self {
        capture_pointer(owner);
        Self {
            owner,
            active: true,
        }
    }

    pub fn owner(&self) -> WidgetId {
        self.owner
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Release the capture. Calling this again is a no-op.
    pub fn end(&mut self) {
        if std::mem::take(&mut self.active) {
            release_pointer(self.owner);
        }
    }
}

impl Drop for DragSession {
    fn drop(&mut self) {
        self.end();
    }
}
