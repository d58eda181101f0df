//! Resize handles on a crop region.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geometry::{PixelRect, Point};

/// One of the eight resize handles: four corners, four edge midpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResizeHandle {
    TopLeft,
    Top,
    TopRight,
    Left,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl ResizeHandle {
    pub const ALL: &'static [ResizeHandle] = &[
        ResizeHandle::TopLeft,
        ResizeHandle::Top,
        ResizeHandle::TopRight,
        ResizeHandle::Left,
        ResizeHandle::Right,
        ResizeHandle::BottomLeft,
        ResizeHandle::Bottom,
        ResizeHandle::BottomRight,
    ];

    /// Which edge moves on each axis: -1 the left/top edge, +1 the
    /// right/bottom edge, 0 neither.
    ///
    /// Width changes by `sx * dx` and height by `sy * dy`, so the top-left
    /// handle shrinks the region by exactly what it moves its origin.
    pub fn axes(&self) -> (i8, i8) {
        match self {
            ResizeHandle::TopLeft => (-1, -1),
            ResizeHandle::Top => (0, -1),
            ResizeHandle::TopRight => (1, -1),
            ResizeHandle::Left => (-1, 0),
            ResizeHandle::Right => (1, 0),
            ResizeHandle::BottomLeft => (-1, 1),
            ResizeHandle::Bottom => (0, 1),
            ResizeHandle::BottomRight => (1, 1),
        }
    }

    pub fn is_corner(&self) -> bool {
        let (sx, sy) = self.axes();
        sx != 0 && sy != 0
    }

    /// Handle position on a rectangle.
    pub fn position(&self, rect: &PixelRect) -> Point {
        let (sx, sy) = self.axes();
        let x = match sx {
            -1 => rect.x,
            1 => rect.right(),
            _ => rect.x + rect.width / 2.0,
        };
        let y = match sy {
            -1 => rect.y,
            1 => rect.bottom(),
            _ => rect.y + rect.height / 2.0,
        };
        Point::new(x, y)
    }

    /// Square hit box of side `size` centred on the handle.
    pub fn hit_rect(&self, rect: &PixelRect, size: f64) -> PixelRect {
        PixelRect::centered_square(self.position(rect), size)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResizeHandle::TopLeft => "top_left",
            ResizeHandle::Top => "top",
            ResizeHandle::TopRight => "top_right",
            ResizeHandle::Left => "left",
            ResizeHandle::Right => "right",
            ResizeHandle::BottomLeft => "bottom_left",
            ResizeHandle::Bottom => "bottom",
            ResizeHandle::BottomRight => "bottom_right",
        }
    }
}

impl std::fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
