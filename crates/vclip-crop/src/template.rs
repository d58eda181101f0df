//! Default crop regions per layout template.
//!
//! Each template slot owns a disjoint cell of the normalized source frame.
//! A slot's region is the largest rectangle with the slot's target aspect
//! ratio (in source pixels) that fits inside 90% of its cell on both axes,
//! positioned by the slot's anchor. Disjoint cells plus the inset make the
//! defaults pairwise non-overlapping for every source aspect ratio.
//!
//! Placement tables are static data; resolution is a pure function of
//! `(template, source_aspect)`.

use tracing::{debug, warn};
use vclip_models::{AspectRatio, CropRegion, LayoutTemplate, NormalizedRect, NormalizedRegionSet};

/// Largest share of its cell a default region may claim on either axis.
pub const AXIS_CAP: f64 = 0.9;

/// Where a default region sits inside the capped area of its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Center,
    TopLeft,
    TopRight,
}

impl Anchor {
    /// Horizontal and vertical share of the leftover space placed before the region.
    fn factors(&self) -> (f64, f64) {
        match self {
            Anchor::Center => (0.5, 0.5),
            Anchor::TopLeft => (0.0, 0.0),
            Anchor::TopRight => (1.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Placement {
    cell: NormalizedRect,
    anchor: Anchor,
}

const SINGLE_PLACEMENTS: &[Placement] = &[Placement {
    cell: NormalizedRect::new(0.0, 0.0, 1.0, 1.0),
    anchor: Anchor::Center,
}];

const DOUBLE_PLACEMENTS: &[Placement] = &[
    Placement {
        cell: NormalizedRect::new(0.0, 0.0, 0.5, 1.0),
        anchor: Anchor::Center,
    },
    Placement {
        cell: NormalizedRect::new(0.5, 0.0, 0.5, 1.0),
        anchor: Anchor::Center,
    },
];

const TRIPLE_PLACEMENTS: &[Placement] = &[
    Placement {
        cell: NormalizedRect::new(0.0, 0.0, 0.5, 0.5),
        anchor: Anchor::TopLeft,
    },
    Placement {
        cell: NormalizedRect::new(0.5, 0.0, 0.5, 0.5),
        anchor: Anchor::TopRight,
    },
    Placement {
        cell: NormalizedRect::new(0.0, 0.5, 1.0, 0.5),
        anchor: Anchor::Center,
    },
];

fn placements(template: LayoutTemplate) -> &'static [Placement] {
    match template {
        LayoutTemplate::Single => SINGLE_PLACEMENTS,
        LayoutTemplate::Double => DOUBLE_PLACEMENTS,
        LayoutTemplate::Triple => TRIPLE_PLACEMENTS,
    }
}

/// One region slot of a template: identity, target ratio and default placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateSlot {
    pub id: &'static str,
    /// Target output ratio (width / height) the region must keep
    pub aspect_ratio: AspectRatio,
    /// Normalized cell the default region is fitted into
    pub cell: NormalizedRect,
    pub anchor: Anchor,
}

/// Slots of a template in region order.
pub fn template_slots(template: LayoutTemplate) -> impl Iterator<Item = TemplateSlot> {
    template
        .output_panels()
        .iter()
        .zip(placements(template))
        .map(|(panel, placement)| TemplateSlot {
            id: panel.id,
            aspect_ratio: panel.aspect_ratio,
            cell: placement.cell,
            anchor: placement.anchor,
        })
}

/// Default regions for a template and source aspect ratio (width / height).
///
/// Returns an empty set when the source aspect ratio is not a positive
/// finite number: the source is not ready and no regions can be derived.
pub fn resolve_default_regions(template: LayoutTemplate, source_aspect: f64) -> NormalizedRegionSet {
    if !(source_aspect.is_finite() && source_aspect > 0.0) {
        debug!(%template, source_aspect, "Source aspect not ready, no default regions");
        return NormalizedRegionSet::default();
    }

    template_slots(template)
        .map(|slot| CropRegion::new(slot.id, fit_slot(&slot, source_aspect)))
        .collect::<Vec<_>>()
        .into()
}

/// Use `initial` when it fits the template, otherwise the defaults.
///
/// A mismatching or invalid import is discarded whole. Accepted regions are
/// clamped into the unit square and take the template's ids in slot order.
pub fn initial_or_default(
    template: LayoutTemplate,
    source_aspect: f64,
    initial: Option<&NormalizedRegionSet>,
) -> NormalizedRegionSet {
    let Some(initial) = initial else {
        return resolve_default_regions(template, source_aspect);
    };

    match initial.validate_for(template) {
        Ok(()) => template
            .region_ids()
            .zip(initial.iter())
            .map(|(id, region)| CropRegion::new(id, region.rect.clamped()))
            .collect::<Vec<_>>()
            .into(),
        Err(e) => {
            warn!(%template, error = %e, "Discarding initial regions, using template defaults");
            resolve_default_regions(template, source_aspect)
        }
    }
}

/// Largest on-ratio rectangle inside the capped cell, placed by anchor.
fn fit_slot(slot: &TemplateSlot, source_aspect: f64) -> NormalizedRect {
    let target = slot.aspect_ratio.as_f64();
    let max_width = slot.cell.width * AXIS_CAP;
    let max_height = slot.cell.height * AXIS_CAP;

    // Source-pixel ratio: (w * src_w) / (h * src_h) == target
    let mut height = max_height;
    let mut width = height * target / source_aspect;
    if width > max_width {
        width = max_width;
        height = width * source_aspect / target;
    }

    let inset_x = slot.cell.width * (1.0 - AXIS_CAP) / 2.0;
    let inset_y = slot.cell.height * (1.0 - AXIS_CAP) / 2.0;
    let (fx, fy) = slot.anchor.factors();

    NormalizedRect::new(
        slot.cell.x + inset_x + (max_width - width) * fx,
        slot.cell.y + inset_y + (max_height - height) * fy,
        width,
        height,
    )
}
