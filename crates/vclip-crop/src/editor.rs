//! Interactive crop region editor.
//!
//! [`CropEditor`] owns the current region list and drives it from pointer
//! input:
//!
//! ```text
//! idle ──down on body──▶ dragging ──up──▶ selected
//!   ▲                       ▲                │
//!   └──down on empty──┐     └─down on body───┤
//!                     │                      │
//!                     └──────────────────────┤
//!                        resizing ◀─down on handle
//! ```
//!
//! Regions are stored normalized against the visible bounds. Pixel
//! rectangles are derived on demand, so container resizes never drift the
//! crops. Every mutating call returns the updated [`NormalizedRegionSet`]
//! by value; there is no buffering across calls.

use schemars::JsonSchema;
use serde::Serialize;
use tracing::debug;
use vclip_models::{CropRegion, LayoutTemplate, NormalizedRect, NormalizedRegionSet};

use crate::bounds::{compute_visible_bounds, SizeProvider, VisibleBounds};
use crate::config::CropEngineConfig;
use crate::geometry::{PixelRect, Point, Size};
use crate::gesture::{translate_rect, Gesture, GestureKind, ResizeLimits};
use crate::handle::ResizeHandle;
use crate::normalize::{to_normalized, to_pixel};
use crate::template::{initial_or_default, resolve_default_regions, template_slots};

/// Position of the editor's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EditorState {
    Idle,
    Selected { region: usize },
    Dragging { region: usize },
    Resizing { region: usize, handle: ResizeHandle },
}

impl EditorState {
    /// Region currently selected or being manipulated.
    pub fn region(&self) -> Option<usize> {
        match *self {
            EditorState::Idle => None,
            EditorState::Selected { region }
            | EditorState::Dragging { region }
            | EditorState::Resizing { region, .. } => Some(region),
        }
    }
}

/// What a pointer position lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Handle { region: usize, handle: ResizeHandle },
    Body { region: usize },
    Empty,
}

#[derive(Debug, Clone)]
struct EditableRegion {
    id: String,
    rect: NormalizedRect,
    aspect_ratio: Option<f64>,
}

/// Crop region state machine for one source frame and one template.
#[derive(Debug, Clone)]
pub struct CropEditor {
    config: CropEngineConfig,
    template: LayoutTemplate,
    container: Size,
    source: Size,
    bounds: VisibleBounds,
    /// Imported regions waiting for the first ready bounds
    pending_initial: Option<NormalizedRegionSet>,
    regions: Vec<EditableRegion>,
    selected: Option<usize>,
    gesture: Option<Gesture>,
    disabled: bool,
}

impl CropEditor {
    pub fn new(config: CropEngineConfig, template: LayoutTemplate) -> Self {
        Self {
            config: config.sanitized(),
            template,
            container: Size::ZERO,
            source: Size::ZERO,
            bounds: VisibleBounds::ZERO,
            pending_initial: None,
            regions: Vec::new(),
            selected: None,
            gesture: None,
            disabled: false,
        }
    }

    /// Seed the first region set from a persisted one.
    ///
    /// Applied when bounds first become ready. A set that does not match the
    /// template is discarded in favour of defaults.
    pub fn with_initial_regions(mut self, initial: NormalizedRegionSet) -> Self {
        self.pending_initial = Some(initial);
        self
    }

    pub fn config(&self) -> &CropEngineConfig {
        &self.config
    }

    pub fn template(&self) -> LayoutTemplate {
        self.template
    }

    pub fn bounds(&self) -> VisibleBounds {
        self.bounds
    }

    pub fn container_size(&self) -> Size {
        self.container
    }

    pub fn source_size(&self) -> Size {
        self.source
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Bounds are positive and regions exist.
    pub fn is_ready(&self) -> bool {
        self.bounds.is_ready() && !self.regions.is_empty()
    }

    pub fn state(&self) -> EditorState {
        match (self.gesture, self.selected) {
            (Some(gesture), _) => match gesture.kind() {
                GestureKind::Drag => EditorState::Dragging {
                    region: gesture.region(),
                },
                GestureKind::Resize(handle) => EditorState::Resizing {
                    region: gesture.region(),
                    handle,
                },
            },
            (None, Some(region)) => EditorState::Selected { region },
            (None, None) => EditorState::Idle,
        }
    }

    /// Current regions as the ordered normalized set.
    pub fn normalized_regions(&self) -> NormalizedRegionSet {
        self.regions
            .iter()
            .map(|region| CropRegion::new(region.id.clone(), region.rect))
            .collect::<Vec<_>>()
            .into()
    }

    /// Current regions in container pixels, in template order.
    pub fn pixel_regions(&self) -> Vec<PixelRect> {
        self.regions
            .iter()
            .map(|region| to_pixel(&region.rect, &self.bounds))
            .collect()
    }

    /// Region ids in template order.
    pub fn region_ids(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|region| region.id.as_str())
    }

    /// Locked aspect ratio of a region, if any.
    pub fn region_aspect_ratio(&self, index: usize) -> Option<f64> {
        self.regions.get(index).and_then(|region| region.aspect_ratio)
    }

    // ── Sizes and template ──────────────────────────────────────────────

    /// Switch template, discarding every region and regenerating defaults.
    pub fn set_template(&mut self, template: LayoutTemplate) -> Option<NormalizedRegionSet> {
        if template == self.template {
            return if self.regions.is_empty() {
                self.generate_regions()
            } else {
                None
            };
        }
        debug!(from = %self.template, to = %template, "Template changed");
        self.template = template;
        self.pending_initial = None;
        self.regions.clear();
        self.selected = None;
        self.gesture = None;
        self.generate_regions()
    }

    /// Record a new container size and recompute bounds.
    pub fn set_container_size(&mut self, container: Size) -> Option<NormalizedRegionSet> {
        self.container = container;
        self.refresh_bounds()
    }

    /// Record a new intrinsic source size and recompute bounds.
    pub fn set_source_size(&mut self, source: Size) -> Option<NormalizedRegionSet> {
        self.source = source;
        self.refresh_bounds()
    }

    /// Pull both sizes from a provider and recompute bounds.
    pub fn sync_sizes(&mut self, provider: &impl SizeProvider) -> Option<NormalizedRegionSet> {
        self.container = provider.container_size();
        self.source = provider.source_size();
        self.refresh_bounds()
    }

    /// Replace all regions with the template defaults.
    pub fn reset_regions(&mut self) -> Option<NormalizedRegionSet> {
        self.pending_initial = None;
        self.regions.clear();
        self.gesture = None;
        self.generate_regions()
    }

    /// Enable or disable pointer interaction.
    ///
    /// Disabling ends any gesture in progress; the selection is kept.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.gesture = None;
        }
    }

    fn refresh_bounds(&mut self) -> Option<NormalizedRegionSet> {
        let bounds = compute_visible_bounds(self.container, self.source);
        if bounds != self.bounds {
            debug!(
                width = bounds.width,
                height = bounds.height,
                offset_x = bounds.offset_x,
                offset_y = bounds.offset_y,
                "Visible bounds changed"
            );
        }
        self.bounds = bounds;

        if self.regions.is_empty() {
            self.generate_regions()
        } else {
            None
        }
    }

    /// Build the region list for the current template. Emits only when
    /// bounds are ready.
    fn generate_regions(&mut self) -> Option<NormalizedRegionSet> {
        if !self.bounds.is_ready() {
            return None;
        }
        let source_aspect = self.source.aspect_ratio()?;

        let initial = self.pending_initial.take();
        let set = initial_or_default(self.template, source_aspect, initial.as_ref());
        let lock = self.config.lock_aspect_ratio;

        self.regions = template_slots(self.template)
            .zip(set.into_inner())
            .map(|(slot, region)| EditableRegion {
                id: region.id,
                rect: region.rect,
                aspect_ratio: lock.then(|| slot.aspect_ratio.as_f64()),
            })
            .collect();
        self.selected = self.selected.filter(|&i| i < self.regions.len());

        debug!(template = %self.template, regions = self.regions.len(), "Regions generated");
        Some(self.normalized_regions())
    }

    // ── Pointer input ───────────────────────────────────────────────────

    /// Find what lies under a container point.
    ///
    /// Later regions are on top; a region's handles win over its body.
    pub fn hit_test(&self, point: Point) -> HitTarget {
        if !self.is_ready() {
            return HitTarget::Empty;
        }

        for (index, rect) in self.pixel_regions().iter().enumerate().rev() {
            for handle in ResizeHandle::ALL {
                if handle.hit_rect(rect, self.config.handle_size).contains(point) {
                    return HitTarget::Handle {
                        region: index,
                        handle: *handle,
                    };
                }
            }
            if rect.contains(point) {
                return HitTarget::Body { region: index };
            }
        }
        HitTarget::Empty
    }

    /// Pointer pressed. Selects and starts a drag or resize, or deselects.
    ///
    /// Ignored while disabled or not ready; returns what was hit.
    pub fn pointer_down(&mut self, point: Point) -> HitTarget {
        if self.disabled || !self.is_ready() {
            return HitTarget::Empty;
        }

        let target = self.hit_test(point);
        match target {
            HitTarget::Handle { region, handle } => {
                self.begin_gesture(region, GestureKind::Resize(handle), point);
            }
            HitTarget::Body { region } => {
                self.begin_gesture(region, GestureKind::Drag, point);
            }
            HitTarget::Empty => {
                self.selected = None;
                self.gesture = None;
            }
        }
        target
    }

    /// Pointer moved. Applies the active gesture and emits the new set.
    pub fn pointer_move(&mut self, point: Point) -> Option<NormalizedRegionSet> {
        if self.disabled || !self.bounds.is_ready() {
            return None;
        }
        let gesture = self.gesture?;
        let region = self.regions.get(gesture.region())?;

        let limits = ResizeLimits {
            min_width: self.config.min_region_width,
            min_height: self.config.min_region_height,
            aspect_ratio: region.aspect_ratio,
        };
        let step = gesture.update(point, &self.bounds, &limits);
        if step.ratio_relaxed {
            debug!(region = %region.id, "Aspect lock relaxed to stay within bounds");
        }

        self.store_pixel_rect(gesture.region(), &step.rect);
        Some(self.normalized_regions())
    }

    /// Pointer released. Ends the gesture, keeping the selection.
    ///
    /// Returns true if a gesture was active.
    pub fn pointer_up(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        match self.gesture.take() {
            Some(gesture) => {
                debug!(region = gesture.region(), kind = ?gesture.kind(), "Gesture ended");
                true
            }
            None => false,
        }
    }

    // ── Programmatic selection and keyboard moves ───────────────────────

    /// Select a region by index. Ignored while disabled, during a gesture,
    /// or for an unknown index.
    pub fn select(&mut self, index: usize) -> bool {
        if self.disabled || self.gesture.is_some() || index >= self.regions.len() {
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Deselect all regions. Ignored while disabled or during a gesture.
    pub fn clear_selection(&mut self) -> bool {
        if self.disabled || self.gesture.is_some() {
            return false;
        }
        self.selected = None;
        true
    }

    /// Move the selected region by a pixel offset, clamped to the bounds.
    pub fn nudge_selected(&mut self, dx: f64, dy: f64) -> Option<NormalizedRegionSet> {
        if self.disabled || self.gesture.is_some() || !self.bounds.is_ready() {
            return None;
        }
        let index = self.selected?;
        let start = to_pixel(&self.regions.get(index)?.rect, &self.bounds);
        let (dx, dy) = Point::new(dx, dy).delta_from(Point::default());

        let moved = translate_rect(&start, dx, dy, &self.bounds);
        self.store_pixel_rect(index, &moved);
        Some(self.normalized_regions())
    }

    fn begin_gesture(&mut self, region: usize, kind: GestureKind, origin: Point) {
        let Some(start) = self.regions.get(region).map(|r| r.rect) else {
            return;
        };
        debug!(region, kind = ?kind, x = origin.x, y = origin.y, "Gesture started");
        self.selected = Some(region);
        self.gesture = Some(Gesture::begin(region, kind, origin, start));
    }

    fn store_pixel_rect(&mut self, index: usize, rect: &PixelRect) {
        if let Some(region) = self.regions.get_mut(index) {
            region.rect = to_normalized(rect, &self.bounds);
        }
    }
}

/// Default regions for a template without an editor, e.g. for server-side
/// rendering of a clip that was never opened in the editor.
pub fn default_regions_for_source(template: LayoutTemplate, source: Size) -> NormalizedRegionSet {
    source
        .aspect_ratio()
        .map(|aspect| resolve_default_regions(template, aspect))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::StaticSizes;

    fn ready_editor(template: LayoutTemplate) -> CropEditor {
        let mut editor = CropEditor::new(CropEngineConfig::default(), template);
        editor.set_source_size(Size::new(1920.0, 1080.0));
        editor.set_container_size(Size::new(800.0, 450.0));
        editor
    }

    fn body_center(editor: &CropEditor, index: usize) -> Point {
        editor.pixel_regions()[index].center()
    }

    #[test]
    fn test_regions_generated_when_bounds_ready() {
        let mut editor = CropEditor::new(CropEngineConfig::default(), LayoutTemplate::Double);
        assert!(editor.set_source_size(Size::new(1920.0, 1080.0)).is_none());

        let emitted = editor.set_container_size(Size::new(800.0, 450.0)).unwrap();
        assert_eq!(emitted.len(), 2);
        assert!(editor.is_ready());

        // Later resizes keep the normalized regions and emit nothing
        assert!(editor.set_container_size(Size::new(1600.0, 900.0)).is_none());
        assert_eq!(editor.normalized_regions(), emitted);
    }

    #[test]
    fn test_sync_sizes_from_provider() {
        let mut editor = CropEditor::new(CropEngineConfig::default(), LayoutTemplate::Single);
        let sizes = StaticSizes::new(Size::new(800.0, 450.0), Size::new(1080.0, 1920.0));

        let emitted = editor.sync_sizes(&sizes).unwrap();
        assert_eq!(emitted.len(), 1);
        assert!(editor.bounds().offset_x > 0.0);
    }

    #[test]
    fn test_click_body_selects_and_drags() {
        let mut editor = ready_editor(LayoutTemplate::Double);
        let center = body_center(&editor, 1);

        assert_eq!(editor.pointer_down(center), HitTarget::Body { region: 1 });
        assert_eq!(editor.state(), EditorState::Dragging { region: 1 });

        let before = editor.pixel_regions()[1];
        let emitted = editor.pointer_move(Point::new(center.x - 20.0, center.y)).unwrap();
        let after = editor.pixel_regions()[1];
        assert!((after.x - (before.x - 20.0)).abs() < 1e-9);
        assert!((after.width - before.width).abs() < 1e-9);
        assert_eq!(emitted, editor.normalized_regions());

        assert!(editor.pointer_up());
        assert_eq!(editor.state(), EditorState::Selected { region: 1 });
    }

    #[test]
    fn test_click_empty_deselects() {
        let mut editor = ready_editor(LayoutTemplate::Single);
        let center = body_center(&editor, 0);
        editor.pointer_down(center);
        editor.pointer_up();

        assert_eq!(editor.pointer_down(Point::new(2.0, 2.0)), HitTarget::Empty);
        assert_eq!(editor.state(), EditorState::Idle);
    }

    #[test]
    fn test_selecting_other_region_moves_selection() {
        let mut editor = ready_editor(LayoutTemplate::Triple);
        assert!(editor.select(0));
        let center = body_center(&editor, 2);
        editor.pointer_down(center);
        editor.pointer_up();
        assert_eq!(editor.state(), EditorState::Selected { region: 2 });
    }

    #[test]
    fn test_handle_starts_resize() {
        let mut editor = ready_editor(LayoutTemplate::Single);
        let rect = editor.pixel_regions()[0];

        let hit = editor.pointer_down(Point::new(rect.right(), rect.bottom()));
        assert_eq!(
            hit,
            HitTarget::Handle {
                region: 0,
                handle: ResizeHandle::BottomRight,
            }
        );
        assert!(matches!(editor.state(), EditorState::Resizing { region: 0, .. }));
    }

    #[test]
    fn test_drag_cannot_enter_letterbox() {
        let mut editor = CropEditor::new(CropEngineConfig::default(), LayoutTemplate::Single);
        editor.set_source_size(Size::new(1080.0, 1920.0));
        editor.set_container_size(Size::new(800.0, 450.0));
        let bounds = editor.bounds();

        let center = body_center(&editor, 0);
        editor.pointer_down(center);
        editor.pointer_move(Point::new(center.x - 1000.0, center.y - 1000.0));

        let rect = editor.pixel_regions()[0];
        assert!((rect.x - bounds.left()).abs() < 1e-9);
        assert!((rect.y - bounds.top()).abs() < 1e-9);
        assert!(bounds.contains_rect(&rect, 1e-9));
    }

    #[test]
    fn test_disabled_ignores_pointer() {
        let mut editor = ready_editor(LayoutTemplate::Double);
        editor.select(0);
        editor.set_disabled(true);

        let center = body_center(&editor, 1);
        assert_eq!(editor.pointer_down(center), HitTarget::Empty);
        assert!(editor.pointer_move(Point::new(0.0, 0.0)).is_none());
        assert!(!editor.select(1));
        assert_eq!(editor.state(), EditorState::Selected { region: 0 });
    }

    #[test]
    fn test_disable_mid_gesture_keeps_selection() {
        let mut editor = ready_editor(LayoutTemplate::Double);
        let center = body_center(&editor, 0);
        editor.pointer_down(center);
        editor.set_disabled(true);
        assert_eq!(editor.state(), EditorState::Selected { region: 0 });
    }

    #[test]
    fn test_template_change_regenerates() {
        let mut editor = ready_editor(LayoutTemplate::Single);
        editor.select(0);

        let emitted = editor.set_template(LayoutTemplate::Triple).unwrap();
        assert_eq!(emitted.len(), 3);
        assert_eq!(editor.state(), EditorState::Idle);
        assert!(editor.set_template(LayoutTemplate::Triple).is_none());
    }

    #[test]
    fn test_initial_regions_used_once() {
        let initial = NormalizedRegionSet::new(vec![CropRegion::new(
            "main",
            NormalizedRect::new(0.1, 0.1, 0.3, 0.5),
        )]);
        let mut editor =
            CropEditor::new(CropEngineConfig::default(), LayoutTemplate::Single).with_initial_regions(initial.clone());
        editor.set_source_size(Size::new(1920.0, 1080.0));
        let emitted = editor.set_container_size(Size::new(800.0, 450.0)).unwrap();
        assert_eq!(emitted, initial);

        let reset = editor.reset_regions().unwrap();
        assert_ne!(reset, initial);
    }

    #[test]
    fn test_nudge_selected() {
        let mut editor = ready_editor(LayoutTemplate::Single);
        assert!(editor.nudge_selected(5.0, 0.0).is_none());

        editor.select(0);
        let before = editor.pixel_regions()[0];
        editor.nudge_selected(5.0, 0.0).unwrap();
        assert!((editor.pixel_regions()[0].x - (before.x + 5.0)).abs() < 1e-9);
    }

    #[test]
    fn test_unlocked_config() {
        let config = CropEngineConfig {
            lock_aspect_ratio: false,
            ..CropEngineConfig::default()
        };
        let mut editor = CropEditor::new(config, LayoutTemplate::Double);
        editor.set_source_size(Size::new(1920.0, 1080.0));
        editor.set_container_size(Size::new(800.0, 450.0));
        assert_eq!(editor.region_aspect_ratio(0), None);
    }

    #[test]
    fn test_default_regions_for_source() {
        assert_eq!(default_regions_for_source(LayoutTemplate::Double, Size::new(1920.0, 1080.0)).len(), 2);
        assert!(default_regions_for_source(LayoutTemplate::Double, Size::ZERO).is_empty());
    }
}
