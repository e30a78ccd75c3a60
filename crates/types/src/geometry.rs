//! Physical geometry primitives. Every length in this module is in millimetres
//! unless the type name says otherwise.

use serde::{Deserialize, Serialize};

/// Tolerance used when comparing physical extents.
pub const EPSILON_MM: f32 = 0.01;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True when `other` lies inside `self`, allowing for float noise.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x - EPSILON_MM
            && other.y >= self.y - EPSILON_MM
            && other.right() <= self.right() + EPSILON_MM
            && other.bottom() <= self.bottom() + EPSILON_MM
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both sides are finite and strictly positive.
    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn fuzzy_eq(&self, other: &Size) -> bool {
        (self.width - other.width).abs() < EPSILON_MM
            && (self.height - other.height).abs() < EPSILON_MM
    }
}

/// A size in device pixels as reported by a rendering surface.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PxSize {
    pub width: f32,
    pub height: f32,
}

impl PxSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Converts to millimetres using a measured pixels-per-millimetre ratio.
    pub fn to_mm(self, px_per_mm: f32) -> Size {
        Size {
            width: self.width / px_per_mm,
            height: self.height / px_per_mm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_to_mm() {
        let mm = PxSize::new(378.0, 189.0).to_mm(3.78);
        assert!(mm.fuzzy_eq(&Size::new(100.0, 50.0)));
    }

    #[test]
    fn test_size_is_positive() {
        assert!(Size::new(63.0, 88.0).is_positive());
        assert!(!Size::new(0.0, 88.0).is_positive());
        assert!(!Size::new(63.0, -1.0).is_positive());
        assert!(!Size::new(f32::INFINITY, 88.0).is_positive());
        assert!(!Size::new(f32::NAN, 88.0).is_positive());
    }

    #[test]
    fn test_rect_contains() {
        let outer = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(outer.contains(&Rect::new(10.0, 10.0, 90.0, 40.0)));
        assert!(!outer.contains(&Rect::new(10.0, 10.0, 90.5, 40.0)));
    }
}
