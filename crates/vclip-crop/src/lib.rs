//! Crop coordinate engine for ViralClip's multi-region portrait layouts.
//!
//! A source frame (video or still) is shown "contain"-fitted inside a
//! container; the user places one to three crop regions on it which are
//! later composited into a 1080x1920 output. This crate provides:
//!
//! - [`bounds`]: the visible (letterbox-aware) area of the source
//! - [`normalize`]: pixel <-> normalized (0-1) conversion against it
//! - [`template`]: default, non-overlapping, on-ratio regions per layout
//! - [`editor`]: the drag / resize state machine keeping regions legal
//! - [`ratio_label`]: human-readable ratio badges
//! - [`export`]: source-pixel crops and composite plans for rendering
//!
//! Everything is synchronous and single-threaded; the editor hands out
//! region sets by value after every mutation.

pub mod bounds;
pub mod config;
pub mod debug;
pub mod editor;
pub mod error;
pub mod export;
pub mod geometry;
pub mod gesture;
pub mod handle;
pub mod normalize;
pub mod ratio_label;
pub mod replay;
pub mod template;

pub use bounds::{compute_visible_bounds, SizeProvider, StaticSizes, VisibleBounds};
pub use config::CropEngineConfig;
pub use debug::{DebugRegion, DebugView};
pub use editor::{default_regions_for_source, CropEditor, EditorState, HitTarget};
pub use error::{CropError, CropResult};
pub use export::{composite_plan, CompositeInstruction, SourceCrop};
pub use geometry::{PixelRect, Point, Size};
pub use gesture::{Gesture, GestureKind, GestureStep, ResizeLimits};
pub use handle::ResizeHandle;
pub use normalize::{to_normalized, to_pixel};
pub use ratio_label::format_ratio_label;
pub use replay::{run_script, ReplayEvent, ReplayOutcome, ReplayScript};
pub use template::{resolve_default_regions, template_slots, TemplateSlot};

pub use vclip_models::{CropRegion, LayoutTemplate, NormalizedRect, NormalizedRegionSet};
