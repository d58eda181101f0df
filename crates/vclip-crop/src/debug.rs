//! Read-only debug projection for on-screen coordinate readouts.
//!
//! Nothing here feeds back into the editor.

use serde::Serialize;
use vclip_models::{LayoutTemplate, NormalizedRect};

use crate::bounds::VisibleBounds;
use crate::editor::{CropEditor, EditorState};
use crate::geometry::PixelRect;
use crate::ratio_label::format_ratio_label;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugRegion {
    pub id: String,
    pub pixel: PixelRect,
    pub normalized: NormalizedRect,
    /// Aspect ratio of the region as drawn, e.g. "9:16"
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugView {
    pub template: LayoutTemplate,
    pub bounds: VisibleBounds,
    pub state: EditorState,
    pub regions: Vec<DebugRegion>,
}

impl CropEditor {
    /// Snapshot of pixel rectangles and ratio labels per region.
    pub fn debug_view(&self) -> DebugView {
        let state = self.state();
        let selected = state.region();

        let regions = self
            .normalized_regions()
            .into_inner()
            .into_iter()
            .zip(self.pixel_regions())
            .enumerate()
            .map(|(index, (region, pixel))| DebugRegion {
                label: format_ratio_label(pixel.aspect_ratio().unwrap_or(0.0)),
                id: region.id,
                pixel,
                normalized: region.rect,
                selected: selected == Some(index),
            })
            .collect();

        DebugView {
            template: self.template(),
            bounds: self.bounds(),
            state,
            regions,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::CropEngineConfig;
    use crate::editor::CropEditor;
    use crate::geometry::Size;
    use vclip_models::LayoutTemplate;

    #[test]
    fn test_debug_view_labels_template_ratios() {
        let mut editor = CropEditor::new(CropEngineConfig::default(), LayoutTemplate::Triple);
        editor.set_source_size(Size::new(1920.0, 1080.0));
        editor.set_container_size(Size::new(1280.0, 720.0));
        editor.select(2);

        let view = editor.debug_view();
        let labels: Vec<_> = view.regions.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["9:16", "9:16", "9:8"]);
        assert!(view.regions[2].selected);
        assert!(!view.regions[0].selected);
    }

    #[test]
    fn test_debug_view_before_ready() {
        let editor = CropEditor::new(CropEngineConfig::default(), LayoutTemplate::Single);
        let view = editor.debug_view();
        assert!(view.regions.is_empty());
        assert!(!view.bounds.is_ready());
    }
}
