//! Shared crop data models for the ViralClip editor.
//!
//! This crate provides Serde-serializable types for:
//! - Normalized (0-1) rectangles relative to a visible source frame
//! - Crop regions and the ordered region sets exchanged with the
//!   preview compositor, persistence and the export pipeline
//! - Layout templates, their output panels and aspect ratios

pub mod layout;
pub mod rect;
pub mod region;

// Re-export common types
pub use layout::{AspectRatio, LayoutTemplate, OutputPanel, TemplateParseError};
pub use rect::NormalizedRect;
pub use region::{CropRegion, NormalizedRegionSet, RegionSetError};
