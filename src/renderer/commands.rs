//! Draw command definitions.

use crate::widgets::{Color, Rect};

/// A single draw operation in surface coordinates (logical pixels).
///
/// Commands are recorded in paint order; a backend rasterizes them
/// front-to-back as given.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    RoundedRect {
        rect: Rect,
        color: Color,
        /// Corner radius, clamped by the backend to half the smaller side
        radius: f32,
    },

    Circle {
        center: (f32, f32),
        radius: f32,
        color: Color,
    },
}

impl DrawCommand {
    pub fn rounded_rect(rect: Rect, color: Color, radius: f32) -> Self {
        Self::RoundedRect {
            rect,
            color,
            radius,
        }
    }

    pub fn circle(center: (f32, f32), radius: f32, color: Color) -> Self {
        Self::Circle {
            center,
            radius,
            color,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            DrawCommand::RoundedRect { color, .. } | DrawCommand::Circle { color, .. } => *color,
        }
    }
}
