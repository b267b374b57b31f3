//! Headless surface hosting a widget tree.
//!
//! A platform backend owns one [`Surface`] per window. It feeds raw pointer
//! events into [`Surface::dispatch`], rasterizes what [`Surface::render`]
//! records, and applies cursor changes from [`Surface::take_cursor`].
//!
//! ```ignore
//! let mut surface = Surface::new(SurfaceConfig::new().width(400).height(32), seek_bar);
//! for event in platform.take_events() {
//!     surface.dispatch(&event);
//! }
//! backend.draw(surface.render());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use crate::layout::Constraints;
use crate::reactive::{
    pointer_capture, release_pointer, take_cursor_change, with_app_state_mut, CursorIcon,
    WidgetId,
};
use crate::renderer::PaintContext;
use crate::widgets::{Color, Event, EventResponse, MouseButton, Rect, Widget};

/// Unique identifier for each surface in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(u64);

impl SurfaceId {
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        SurfaceId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value (for debugging/logging).
    pub fn raw(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct SurfaceConfig {
    /// Width of the surface in logical pixels.
    pub width: u32,
    /// Height of the surface in logical pixels.
    pub height: u32,
    /// Namespace identifier for the surface, used in logs.
    pub namespace: String,
    pub background_color: Color,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 32,
            namespace: "seekbar".to_string(),
            background_color: Color::rgb(0.1, 0.1, 0.15),
        }
    }
}

impl SurfaceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }
}

pub struct Surface<W: Widget> {
    id: SurfaceId,
    config: SurfaceConfig,
    /// None once unmounted
    root: Option<W>,
    /// A primary press landed on the root and has not been released yet
    press_on_root: bool,
    /// Pointer capture taken while this surface was dispatching
    captured_here: Option<WidgetId>,
    paint_ctx: PaintContext,
}

impl<W: Widget> Surface<W> {
    /// Create the surface and mount `root` at its full size.
    pub fn new(config: SurfaceConfig, root: W) -> Self {
        let id = SurfaceId::next();
        log::info!(
            "Creating surface {} ({}): {}x{}",
            id.raw(),
            config.namespace,
            config.width,
            config.height
        );

        let mut surface = Self {
            id,
            config,
            root: Some(root),
            press_on_root: false,
            captured_here: None,
            paint_ctx: PaintContext::with_capacity(16),
        };
        surface.layout_root();
        surface
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn root(&self) -> Option<&W> {
        self.root.as_ref()
    }

    pub fn root_mut(&mut self) -> Option<&mut W> {
        self.root.as_mut()
    }

    pub fn is_mounted(&self) -> bool {
        self.root.is_some()
    }

    fn layout_root(&mut self) {
        let Some(root) = self.root.as_mut() else {
            return;
        };
        let constraints = Constraints::new(
            0.0,
            0.0,
            self.config.width as f32,
            self.config.height as f32,
        );
        root.layout(constraints);
        root.set_origin(0.0, 0.0);
        with_app_state_mut(|state| state.clear_layout_flag());
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.config.width && height == self.config.height {
            return;
        }
        log::info!(
            "Resizing surface {} to {}x{}",
            self.id.raw(),
            width,
            height
        );
        self.config.width = width;
        self.config.height = height;
        self.layout_root();
    }

    /// Deliver a platform event to the root widget.
    ///
    /// Every pointer event reaches the root regardless of position; widgets
    /// decide from their bounds and capture state. A primary release whose
    /// press also landed on the root is followed by a synthesized `Click`.
    pub fn dispatch(&mut self, event: &Event) -> EventResponse {
        let Some(root) = self.root.as_mut() else {
            return EventResponse::Ignored;
        };

        match *event {
            Event::MouseDown {
                x,
                y,
                button: MouseButton::Left,
            } => {
                self.press_on_root = root.bounds().contains(x, y);
            }
            // A captured drag keeps going while the pointer is outside the surface
            Event::MouseLeave if pointer_capture().is_none() => {
                self.press_on_root = false;
            }
            _ => {}
        }

        let capture_before = pointer_capture();
        let response = root.event(event);
        track_capture(&mut self.captured_here, capture_before);

        if let Event::MouseUp {
            x,
            y,
            button: MouseButton::Left,
        } = *event
        {
            let pressed = std::mem::take(&mut self.press_on_root);
            if pressed && root.bounds().contains(x, y) {
                let click = Event::Click {
                    x,
                    y,
                    button: MouseButton::Left,
                };
                let capture_before = pointer_capture();
                let clicked = root.event(&click);
                track_capture(&mut self.captured_here, capture_before);
                if clicked == EventResponse::Handled {
                    return EventResponse::Handled;
                }
            }
        }

        response
    }

    /// Record the frame: background first, then the widget tree.
    pub fn render(&mut self) -> &PaintContext {
        self.paint_ctx.clear();
        self.paint_ctx.draw_rect(
            Rect::new(
                0.0,
                0.0,
                self.config.width as f32,
                self.config.height as f32,
            ),
            self.config.background_color,
        );
        if let Some(ref root) = self.root {
            root.paint(&mut self.paint_ctx);
        }
        with_app_state_mut(|state| state.clear_paint_flag());
        &self.paint_ctx
    }

    /// Cursor the backend should show, if it changed since the last call.
    pub fn take_cursor(&self) -> Option<CursorIcon> {
        take_cursor_change()
    }

    /// Tear down the widget tree. Widgets finish any gesture in progress as
    /// they drop.
    pub fn unmount(&mut self) {
        let Some(root) = self.root.take() else {
            return;
        };
        let root_id = root.id();
        drop(root);
        // A nested widget may have held capture; nothing can release it now.
        // Capture held by another surface's drag is left alone.
        if let Some(owner) = self.captured_here.take() {
            if pointer_capture() == Some(owner) {
                log::warn!(
                    "surface {} unmounted while {owner:?} held the pointer",
                    self.id.raw()
                );
                release_pointer(owner);
            }
        }
        self.press_on_root = false;
        log::info!("Unmounted surface {} (root {root_id:?})", self.id.raw());
    }
}

/// Remember capture a dispatch just took; forget it once released or taken
/// over elsewhere.
fn track_capture(captured_here: &mut Option<WidgetId>, before: Option<WidgetId>) {
    let now = pointer_capture();
    if now.is_some() && now != before {
        *captured_here = now;
    } else if now != *captured_here {
        *captured_here = None;
    }
}

impl<W: Widget> Drop for Surface<W> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::slider;

    #[test]
    fn test_new_mounts_root_at_surface_size() {
        let surface = Surface::new(SurfaceConfig::new().width(300).height(16), slider(0.0));
        let root = surface.root().expect("root mounted");
        assert!(root.is_mounted());
        assert_eq!(root.bounds(), Rect::new(0.0, 0.0, 300.0, 16.0));
    }

    #[test]
    fn test_resize_relayouts_root() {
        let mut surface = Surface::new(SurfaceConfig::new().width(300).height(16), slider(0.0));
        surface.resize(600, 16);
        assert_eq!(surface.root().map(|r| r.bounds().width), Some(600.0));
        assert!(!crate::reactive::with_app_state(|state| state.needs_layout()));
    }

    #[test]
    fn test_render_starts_with_background() {
        let config = SurfaceConfig::new()
            .width(100)
            .height(16)
            .background_color(Color::BLACK);
        let mut surface = Surface::new(config, slider(0.5));
        let commands = surface.render().commands();
        assert_eq!(commands.len(), 4);
        assert_eq!(commands[0].color(), Color::BLACK);
    }

    #[test]
    fn test_unmount_is_idempotent() {
        let mut surface = Surface::new(SurfaceConfig::default(), slider(0.0));
        surface.unmount();
        surface.unmount();
        assert!(!surface.is_mounted());
        assert_eq!(surface.dispatch(&Event::MouseLeave), EventResponse::Ignored);
    }
}
