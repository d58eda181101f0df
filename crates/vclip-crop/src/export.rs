//! Projection of normalized crops onto the source frame for rendering.
//!
//! The export pipeline receives a [`NormalizedRegionSet`] and the source's
//! intrinsic size; it needs integer pixel crops with even dimensions
//! (libx264 requires width/height divisible by 2) and the output panel each
//! crop is scaled into.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use vclip_models::{LayoutTemplate, NormalizedRect, NormalizedRegionSet, OutputPanel};

use crate::error::{CropError, CropResult};
use crate::geometry::Size;

/// A crop rectangle in intrinsic source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SourceCrop {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SourceCrop {
    /// Project a normalized rectangle onto a source frame.
    ///
    /// Returns (x, y, width, height) with:
    /// - Even dimensions for codec compatibility
    /// - Coordinates clamped to keep the crop inside the frame
    pub fn from_normalized(rect: &NormalizedRect, source: Size) -> CropResult<Self> {
        if !source.is_positive() {
            return Err(CropError::source_not_ready(source.width, source.height));
        }

        let frame_width = source.width.round().max(2.0) as u32;
        let frame_height = source.height.round().max(2.0) as u32;
        let rect = rect.clamped();

        let width = make_even(((rect.width * frame_width as f64).round() as u32).min(frame_width)).max(2);
        let height = make_even(((rect.height * frame_height as f64).round() as u32).min(frame_height)).max(2);
        let x = ((rect.x * frame_width as f64).round() as u32).min(frame_width.saturating_sub(width));
        let y = ((rect.y * frame_height as f64).round() as u32).min(frame_height.saturating_sub(height));

        Ok(Self { x, y, width, height })
    }

    /// FFmpeg crop filter, e.g. `crop=608:1080:656:0`.
    pub fn to_ffmpeg_filter(&self) -> String {
        format!("crop={}:{}:{}:{}", self.width, self.height, self.x, self.y)
    }
}

/// Rounds down to the nearest even number.
#[inline]
pub fn make_even(value: u32) -> u32 {
    (value / 2) * 2
}

/// One region's crop paired with the output panel it is scaled into.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeInstruction {
    pub region_id: String,
    pub crop: SourceCrop,
    pub panel: OutputPanel,
}

impl CompositeInstruction {
    /// FFmpeg chain cropping the region and scaling it to its panel.
    pub fn to_ffmpeg_filter(&self) -> String {
        format!(
            "{},scale={}:{}:flags=lanczos,setsar=1",
            self.crop.to_ffmpeg_filter(),
            self.panel.width,
            self.panel.height
        )
    }
}

/// Build the composite plan for a region set on a source frame.
///
/// The set must match the template; a mismatch is an error here because
/// export has no editor to fall back to defaults.
pub fn composite_plan(
    template: LayoutTemplate,
    regions: &NormalizedRegionSet,
    source: Size,
) -> CropResult<Vec<CompositeInstruction>> {
    regions.validate_for(template)?;

    template
        .output_panels()
        .iter()
        .zip(regions)
        .map(|(panel, region)| {
            Ok(CompositeInstruction {
                region_id: region.id.clone(),
                crop: SourceCrop::from_normalized(&region.rect, source)?,
                panel: *panel,
            })
        })
        .collect()
}
