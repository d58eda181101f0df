//! Crop regions and the ordered region sets exchanged with collaborators.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::layout::LayoutTemplate;
use crate::rect::NormalizedRect;

/// One crop rectangle in normalized coordinates.
///
/// Serialized flat as `{id, x, y, width, height}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CropRegion {
    /// Stable identifier, unique within a template instance
    pub id: String,
    #[serde(flatten)]
    pub rect: NormalizedRect,
}

impl CropRegion {
    pub fn new(id: impl Into<String>, rect: NormalizedRect) -> Self {
        Self { id: id.into(), rect }
    }
}

/// Ordered list of normalized crop regions, one per template slot.
///
/// Ordering follows template region order, not spatial order. The set is a
/// plain value; holders cannot reach back into the editor that produced it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct NormalizedRegionSet {
    regions: Vec<CropRegion>,
}

impl NormalizedRegionSet {
    pub fn new(regions: Vec<CropRegion>) -> Self {
        Self { regions }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CropRegion> {
        self.regions.iter()
    }

    pub fn get(&self, index: usize) -> Option<&CropRegion> {
        self.regions.get(index)
    }

    /// Look up a region by id.
    pub fn find(&self, id: &str) -> Option<&CropRegion> {
        self.regions.iter().find(|region| region.id == id)
    }

    pub fn as_slice(&self) -> &[CropRegion] {
        &self.regions
    }

    pub fn into_inner(self) -> Vec<CropRegion> {
        self.regions
    }

    /// Check that this set can seed the given template.
    ///
    /// The whole set is rejected on the first problem; callers fall back to
    /// generated defaults rather than merging partially.
    pub fn validate_for(&self, template: LayoutTemplate) -> Result<(), RegionSetError> {
        let expected = template.region_count();
        if self.regions.len() != expected {
            return Err(RegionSetError::CountMismatch {
                template,
                expected,
                actual: self.regions.len(),
            });
        }
        self.validate()
    }

    /// Check every region is finite, inside the unit square, with unique ids.
    pub fn validate(&self) -> Result<(), RegionSetError> {
        let mut seen = HashSet::new();
        for region in &self.regions {
            if !region.rect.is_valid() {
                return Err(RegionSetError::OutOfRange {
                    id: region.id.clone(),
                    rect: region.rect,
                });
            }
            if !seen.insert(region.id.as_str()) {
                return Err(RegionSetError::DuplicateId(region.id.clone()));
            }
        }
        Ok(())
    }

    /// Whether any two regions share interior area.
    pub fn has_overlap(&self) -> bool {
        self.regions.iter().enumerate().any(|(i, a)| {
            self.regions[i + 1..]
                .iter()
                .any(|b| a.rect.overlaps(&b.rect))
        })
    }
}

impl From<Vec<CropRegion>> for NormalizedRegionSet {
    fn from(regions: Vec<CropRegion>) -> Self {
        Self::new(regions)
    }
}

impl<'a> IntoIterator for &'a NormalizedRegionSet {
    type Item = &'a CropRegion;
    type IntoIter = std::slice::Iter<'a, CropRegion>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

/// Reasons an imported region set cannot be used.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegionSetError {
    #[error("Template {template} expects {expected} regions, got {actual}")]
    CountMismatch {
        template: LayoutTemplate,
        expected: usize,
        actual: usize,
    },
    #[error("Region {id} is outside the unit square: {rect:?}")]
    OutOfRange { id: String, rect: NormalizedRect },
    #[error("Duplicate region id: {0}")]
    DuplicateId(String),
}
