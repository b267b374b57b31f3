//! Box constraints passed down during layout and the sizes returned from it.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min_width: f32,
    pub min_height: f32,
    pub max_width: f32,
    pub max_height: f32,
}

impl Constraints {
    pub fn new(min_width: f32, min_height: f32, max_width: f32, max_height: f32) -> Self {
        Self {
            min_width,
            min_height,
            max_width,
            max_height,
        }
    }

    pub fn tight(size: Size) -> Self {
        Self::new(size.width, size.height, size.width, size.height)
    }

    pub fn loose(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn unbounded() -> Self {
        Self::new(0.0, 0.0, f32::INFINITY, f32::INFINITY)
    }

    /// Whether the parent imposes a finite width (fill-width widgets stretch to it)
    pub fn has_bounded_width(&self) -> bool {
        self.max_width.is_finite()
    }

    pub fn constrain(&self, size: Size) -> Size {
        Size {
            width: size.width.max(self.min_width).min(self.max_width),
            height: size.height.max(self.min_height).min(self.max_height),
        }
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tight_constraints_force_size() {
        let c = Constraints::tight(Size::new(120.0, 16.0));
        assert_eq!(c.constrain(Size::new(500.0, 2.0)), Size::new(120.0, 16.0));
    }

    #[test]
    fn test_loose_constraints_cap_size() {
        let c = Constraints::loose(Size::new(300.0, 24.0));
        assert_eq!(c.constrain(Size::new(200.0, 40.0)), Size::new(200.0, 24.0));
    }

    #[test]
    fn test_bounded_width() {
        assert!(!Constraints::unbounded().has_bounded_width());
        assert!(Constraints::loose(Size::new(10.0, 10.0)).has_bounded_width());
        assert_eq!(Constraints::default(), Constraints::unbounded());
    }
}
