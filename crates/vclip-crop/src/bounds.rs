//! Visible bounds of a "contain"-fitted source.
//!
//! When a source frame is drawn into a container of a different shape it is
//! scaled uniformly until it touches the container on one axis, leaving
//! letterbox (or pillarbox) bands on the other. Crop regions must stay on
//! the picture, so every clamp in this crate is against the visible
//! rectangle computed here, never against the raw container.
//!
//! # Usage
//! ```rust
//! use vclip_crop::bounds::compute_visible_bounds;
//! use vclip_crop::geometry::Size;
//!
//! // Portrait source in a landscape container: pillarboxed
//! let bounds = compute_visible_bounds(Size::new(800.0, 450.0), Size::new(1080.0, 1920.0));
//! assert!(bounds.offset_x > 0.0);
//! assert_eq!(bounds.offset_y, 0.0);
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geometry::{PixelRect, Point, Size};

/// The rectangle, in container pixels, covered by the fitted source.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct VisibleBounds {
    pub width: f64,
    pub height: f64,
    /// Left band width
    pub offset_x: f64,
    /// Top band height
    pub offset_y: f64,
}

impl VisibleBounds {
    /// Sentinel for "not ready": no regions may be generated from it.
    pub const ZERO: VisibleBounds = VisibleBounds {
        width: 0.0,
        height: 0.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    /// Bounds with a positive, finite area, usable for region generation and
    /// clamping.
    pub fn is_ready(&self) -> bool {
        self.width > 0.0
            && self.height > 0.0
            && self.width.is_finite()
            && self.height.is_finite()
            && self.offset_x.is_finite()
            && self.offset_y.is_finite()
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.offset_x
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.offset_y
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.offset_x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.offset_y + self.height
    }

    /// The visible area as a container-space rectangle.
    pub fn as_rect(&self) -> PixelRect {
        PixelRect::new(self.offset_x, self.offset_y, self.width, self.height)
    }

    /// Check if a container point lies on the picture (not in a band).
    pub fn contains_point(&self, point: Point) -> bool {
        self.is_ready() && self.as_rect().contains(point)
    }

    /// Check a rectangle lies fully inside, allowing `tolerance` of float drift.
    pub fn contains_rect(&self, rect: &PixelRect, tolerance: f64) -> bool {
        rect.x >= self.left() - tolerance
            && rect.y >= self.top() - tolerance
            && rect.right() <= self.right() + tolerance
            && rect.bottom() <= self.bottom() + tolerance
    }

    /// Clamp a rectangle inside the bounds: position first, then size.
    ///
    /// The rectangle keeps its origin where possible and loses size at the
    /// far edges. This is the clamp the normalizer round-trips through.
    pub fn clamp_rect(&self, rect: &PixelRect) -> PixelRect {
        if !self.is_ready() {
            return self.collapsed();
        }
        let x = finite(rect.x, self.left()).clamp(self.left(), self.right());
        let y = finite(rect.y, self.top()).clamp(self.top(), self.bottom());
        PixelRect::new(
            x,
            y,
            finite(rect.width, 0.0).clamp(0.0, self.right() - x),
            finite(rect.height, 0.0).clamp(0.0, self.bottom() - y),
        )
    }

    fn collapsed(&self) -> PixelRect {
        PixelRect::new(finite(self.offset_x, 0.0), finite(self.offset_y, 0.0), 0.0, 0.0)
    }

    /// Move a rectangle inside the bounds without changing its size.
    ///
    /// A rectangle larger than the bounds on an axis is shrunk to fit first.
    pub fn confine_rect(&self, rect: &PixelRect) -> PixelRect {
        if !self.is_ready() {
            return self.collapsed();
        }
        let width = finite(rect.width, 0.0).clamp(0.0, self.width);
        let height = finite(rect.height, 0.0).clamp(0.0, self.height);
        // Rounding in `right() - width` can land an ulp below `left()`
        let max_x = (self.right() - width).max(self.left());
        let max_y = (self.bottom() - height).max(self.top());
        PixelRect::new(
            finite(rect.x, self.left()).clamp(self.left(), max_x),
            finite(rect.y, self.top()).clamp(self.top(), max_y),
            width,
            height,
        )
    }
}

/// Compute the visible rectangle of a source drawn with "contain" fit.
///
/// Returns [`VisibleBounds::ZERO`] when either size is zero, negative or not
/// finite.
pub fn compute_visible_bounds(container: Size, source: Size) -> VisibleBounds {
    let (Some(container_aspect), Some(source_aspect)) = (container.aspect_ratio(), source.aspect_ratio()) else {
        return VisibleBounds::ZERO;
    };

    if source_aspect > container_aspect {
        // Relatively wider source: full width, bands top and bottom
        let height = container.width / source_aspect;
        VisibleBounds {
            width: container.width,
            height,
            offset_x: 0.0,
            offset_y: (container.height - height) / 2.0,
        }
    } else {
        let width = container.height * source_aspect;
        VisibleBounds {
            width,
            height: container.height,
            offset_x: (container.width - width) / 2.0,
            offset_y: 0.0,
        }
    }
}

/// Reports the measured sizes the bounds are derived from.
///
/// Hosts implement this over whatever measures their container and media
/// element; tests use [`StaticSizes`].
pub trait SizeProvider {
    /// Current container size in pixels.
    fn container_size(&self) -> Size;

    /// Intrinsic source size in pixels, `Size::ZERO` until metadata is known.
    fn source_size(&self) -> Size;

    /// Visible bounds for the current measurements.
    fn visible_bounds(&self) -> VisibleBounds {
        compute_visible_bounds(self.container_size(), self.source_size())
    }
}

/// Fixed sizes, for tests and offline replay.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StaticSizes {
    pub container: Size,
    pub source: Size,
}

impl StaticSizes {
    pub fn new(container: Size, source: Size) -> Self {
        Self { container, source }
    }
}

impl SizeProvider for StaticSizes {
    fn container_size(&self) -> Size {
        self.container
    }

    fn source_size(&self) -> Size {
        self.source
    }
}

fn finite(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
