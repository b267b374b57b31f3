//! Paint recording.
//!
//! Widgets paint into a [`PaintContext`], which records [`DrawCommand`]s.
//! Rasterizing them is up to the host backend.

pub mod commands;

pub use commands::DrawCommand;

use crate::widgets::{Color, Rect};

pub struct PaintContext {
    commands: Vec<DrawCommand>,
}

impl PaintContext {
    pub fn new() -> Self {
        Self::with_capacity(16)
    }

    /// Create a PaintContext with pre-allocated capacity to avoid per-frame allocations
    pub fn with_capacity(commands: usize) -> Self {
        Self {
            commands: Vec::with_capacity(commands),
        }
    }

    /// Clear recorded commands for reuse, preserving allocated capacity
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.draw_rounded_rect(rect, color, 0.0);
    }

    pub fn draw_rounded_rect(&mut self, rect: Rect, color: Color, radius: f32) {
        self.commands
            .push(DrawCommand::rounded_rect(rect, color, radius));
    }

    pub fn draw_circle(&mut self, center: (f32, f32), radius: f32, color: Color) {
        self.commands
            .push(DrawCommand::circle(center, radius, color));
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for PaintContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_keep_paint_order() {
        let mut ctx = PaintContext::new();
        ctx.draw_rect(Rect::new(0.0, 0.0, 10.0, 4.0), Color::BLACK);
        ctx.draw_circle((5.0, 2.0), 3.0, Color::WHITE);

        assert_eq!(
            ctx.commands(),
            &[
                DrawCommand::rounded_rect(Rect::new(0.0, 0.0, 10.0, 4.0), Color::BLACK, 0.0),
                DrawCommand::circle((5.0, 2.0), 3.0, Color::WHITE),
            ]
        );
    }

    #[test]
    fn test_clear_empties_context() {
        let mut ctx = PaintContext::with_capacity(4);
        ctx.draw_circle((0.0, 0.0), 1.0, Color::WHITE);
        ctx.clear();
        assert!(ctx.is_empty());
    }
}
