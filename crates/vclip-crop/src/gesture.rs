//! Drag and resize gestures.
//!
//! A [`Gesture`] is created on pointer-down and dropped on pointer-up. It
//! remembers where the pointer went down and the region as it was at that
//! moment, so every pointer-move is computed from the gesture start rather
//! than accumulated tick by tick (no drift, and clamping never "sticks").
//!
//! The start rectangle is kept normalized: if the container resizes in the
//! middle of a gesture the start is re-projected onto the new bounds.

use vclip_models::NormalizedRect;

use crate::bounds::VisibleBounds;
use crate::geometry::{PixelRect, Point};
use crate::handle::ResizeHandle;
use crate::normalize::to_pixel;

/// Guards relative-change maths against zero-sized starts.
const MIN_EXTENT: f64 = 1e-9;

/// Hard floor on region size in pixels, whatever the configured minimum.
const MIN_REGION_PX: f64 = 1.0;

/// Constraints applied to every resize tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeLimits {
    /// Minimum width in pixels, at least 1 and capped to the bounds width
    pub min_width: f64,
    /// Minimum height in pixels, at least 1 and capped to the bounds height
    pub min_height: f64,
    /// Locked width / height ratio, if any
    pub aspect_ratio: Option<f64>,
}

impl ResizeLimits {
    fn locked_ratio(&self) -> Option<f64> {
        self.aspect_ratio.filter(|r| r.is_finite() && *r > 0.0)
    }
}

/// Result of one gesture tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureStep {
    pub rect: PixelRect,
    /// The aspect lock could not be kept because the bounds or minimum size
    /// left no on-ratio rectangle; the rectangle is in-bounds but off-ratio.
    pub ratio_relaxed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Resize(ResizeHandle),
}

/// A single drag or resize in progress on one region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    region: usize,
    kind: GestureKind,
    origin: Point,
    start: NormalizedRect,
}

impl Gesture {
    pub fn begin(region: usize, kind: GestureKind, origin: Point, start: NormalizedRect) -> Self {
        Self {
            region,
            kind,
            origin,
            start,
        }
    }

    /// Index of the region being manipulated.
    pub fn region(&self) -> usize {
        self.region
    }

    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    /// Compute the region for the current pointer position.
    pub fn update(&self, pointer: Point, bounds: &VisibleBounds, limits: &ResizeLimits) -> GestureStep {
        let start = to_pixel(&self.start, bounds);
        let (dx, dy) = pointer.delta_from(self.origin);

        match self.kind {
            GestureKind::Drag => GestureStep {
                rect: translate_rect(&start, dx, dy, bounds),
                ratio_relaxed: false,
            },
            GestureKind::Resize(handle) => resize_rect(&start, handle, dx, dy, limits, bounds),
        }
    }
}

/// Move a rectangle by `(dx, dy)`, kept fully inside the bounds.
pub fn translate_rect(start: &PixelRect, dx: f64, dy: f64, bounds: &VisibleBounds) -> PixelRect {
    bounds.confine_rect(&PixelRect::new(start.x + dx, start.y + dy, start.width, start.height))
}

/// Resize a rectangle by dragging `handle` by `(dx, dy)`.
///
/// Constraints are applied in order: proposed size from the handle's edges,
/// aspect lock (the non-dragged dimension follows the dragged one), minimum
/// size, then bounds. Edges opposite the handle stay put; for edge handles
/// under an aspect lock the perpendicular axis grows around its centre.
/// When bounds and lock conflict the bounds win and the step is flagged
/// `ratio_relaxed`.
pub fn resize_rect(
    start: &PixelRect,
    handle: ResizeHandle,
    dx: f64,
    dy: f64,
    limits: &ResizeLimits,
    bounds: &VisibleBounds,
) -> GestureStep {
    if !bounds.is_ready() {
        return GestureStep {
            rect: *start,
            ratio_relaxed: false,
        };
    }

    let (sx, sy) = handle.axes();
    let min_width = limits.min_width.max(MIN_REGION_PX).min(bounds.width);
    let min_height = limits.min_height.max(MIN_REGION_PX).min(bounds.height);
    let center = start.center();

    let mut width = start.width + f64::from(sx) * dx;
    let mut height = start.height + f64::from(sy) * dy;

    let room_width = match sx {
        1 => bounds.right() - start.x,
        -1 => start.right() - bounds.left(),
        _ => 2.0 * (center.x - bounds.left()).min(bounds.right() - center.x),
    }
    .max(0.0);
    let room_height = match sy {
        1 => bounds.bottom() - start.y,
        -1 => start.bottom() - bounds.top(),
        _ => 2.0 * (center.y - bounds.top()).min(bounds.bottom() - center.y),
    }
    .max(0.0);

    let mut ratio_relaxed = false;
    match limits.locked_ratio() {
        Some(ratio) => {
            if sx == 0 {
                width = height * ratio;
            } else if sy == 0 {
                height = width / ratio;
            } else if relative_change(width, start.width) >= relative_change(height, start.height) {
                height = width / ratio;
            } else {
                width = height * ratio;
            }

            if width < min_width {
                width = min_width;
                height = width / ratio;
            }
            if height < min_height {
                height = min_height;
                width = height * ratio;
            }

            let scale = (room_width / width).min(room_height / height);
            if scale < 1.0 {
                width *= scale;
                height *= scale;
            }
            if width < min_width || height < min_height {
                ratio_relaxed = true;
                width = width.max(min_width);
                height = height.max(min_height);
            }
        }
        None => {
            if sx != 0 {
                width = width.min(room_width).max(min_width);
            }
            if sy != 0 {
                height = height.min(room_height).max(min_height);
            }
        }
    }

    let x = match sx {
        1 => start.x,
        -1 => start.right() - width,
        _ => center.x - width / 2.0,
    };
    let y = match sy {
        1 => start.y,
        -1 => start.bottom() - height,
        _ => center.y - height / 2.0,
    };

    GestureStep {
        rect: bounds.confine_rect(&PixelRect::new(x, y, width, height)),
        ratio_relaxed,
    }
}

fn relative_change(value: f64, reference: f64) -> f64 {
    ((value - reference) / reference.max(MIN_EXTENT)).abs()
}
