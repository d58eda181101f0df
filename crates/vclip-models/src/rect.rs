use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A normalized rectangle (0.0 to 1.0) representing a relative region of a frame.
///
/// Coordinates are relative to the visible source area, not the container
/// the source is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct NormalizedRect {
    /// X coordinate of the top-left corner (0.0 = left, 1.0 = right)
    pub x: f64,
    /// Y coordinate of the top-left corner (0.0 = top, 1.0 = bottom)
    pub y: f64,
    /// Width of the rectangle (0.0 to 1.0)
    pub width: f64,
    /// Height of the rectangle (0.0 to 1.0)
    pub height: f64,
}

impl NormalizedRect {
    /// Tolerance for float drift when checking the unit square.
    pub const EPSILON: f64 = 1e-3;

    /// Create a new normalized rectangle.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge (`x + width`).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if the rectangle is valid (within 0.0-1.0 range).
    pub fn is_valid(&self) -> bool {
        self.is_finite()
            && self.x >= 0.0
            && self.y >= 0.0
            && self.width > 0.0
            && self.height > 0.0
            && self.right() <= 1.0 + Self::EPSILON // Allow small epsilon for float precision
            && self.bottom() <= 1.0 + Self::EPSILON
    }

    /// All four components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Whether two rectangles share any interior area.
    ///
    /// Touching edges do not count as overlap.
    pub fn overlaps(&self, other: &NormalizedRect) -> bool {
        self.x < other.right() && other.x < self.right() && self.y < other.bottom() && other.y < self.bottom()
    }

    /// Clamp every component into the unit square, position first.
    pub fn clamped(&self) -> Self {
        let x = finite_or_zero(self.x).clamp(0.0, 1.0);
        let y = finite_or_zero(self.y).clamp(0.0, 1.0);
        Self {
            x,
            y,
            width: finite_or_zero(self.width).clamp(0.0, 1.0 - x),
            height: finite_or_zero(self.height).clamp(0.0, 1.0 - y),
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
