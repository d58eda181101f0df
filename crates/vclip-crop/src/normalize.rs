//! Conversion between container pixels and normalized coordinates.
//!
//! Normalized coordinates are fractions of the visible bounds, not of the
//! container, so a crop survives container resizes and letterbox changes
//! unchanged. Both directions clamp to the bounds; neither ever divides by
//! zero.
//!
//! Round-trip: for any rectangle `r` and ready bounds `b`,
//! `to_pixel(&to_normalized(&r, &b), &b) == b.clamp_rect(&r)` up to float
//! error.

use vclip_models::NormalizedRect;

use crate::bounds::VisibleBounds;
use crate::geometry::PixelRect;

/// Convert a container-space rectangle to normalized coordinates.
///
/// Degenerate bounds normalize everything to zero.
pub fn to_normalized(rect: &PixelRect, bounds: &VisibleBounds) -> NormalizedRect {
    if !bounds.is_ready() {
        return NormalizedRect::default();
    }

    let clamped = bounds.clamp_rect(rect);
    NormalizedRect::new(
        (clamped.x - bounds.offset_x) / bounds.width,
        (clamped.y - bounds.offset_y) / bounds.height,
        clamped.width / bounds.width,
        clamped.height / bounds.height,
    )
}

/// Convert a normalized rectangle to container pixels, clamped to `bounds`.
///
/// Clamping covers imported sets that were normalized against stale bounds.
pub fn to_pixel(rect: &NormalizedRect, bounds: &VisibleBounds) -> PixelRect {
    if !bounds.is_ready() {
        return PixelRect::new(bounds.offset_x, bounds.offset_y, 0.0, 0.0);
    }

    bounds.clamp_rect(&PixelRect::new(
        rect.x * bounds.width + bounds.offset_x,
        rect.y * bounds.height + bounds.offset_y,
        rect.width * bounds.width,
        rect.height * bounds.height,
    ))
}
