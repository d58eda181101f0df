//! Property-based invariant tests for crop regions.
//!
//! These tests verify invariants that must hold for any container, source
//! and gesture sequence:
//!
//! 1. Every emitted region stays inside the unit square.
//! 2. Every region's pixel rectangle stays inside the visible bounds.
//! 3. A locked resize never leaves a region below the minimum size.
//! 4. A locked resize keeps its ratio unless it reports `ratio_relaxed`.
//! 5. Pixel -> normalized -> pixel equals the bounds clamp.
//! 6. Template defaults never overlap and respect the per-axis cap.
//! 7. Default resolution is deterministic.
//! 8. Resizing the container mid-session never changes normalized regions.

use proptest::prelude::*;
use vclip_crop::gesture::resize_rect;
use vclip_crop::template::AXIS_CAP;
use vclip_crop::{
    compute_visible_bounds, resolve_default_regions, to_normalized, to_pixel, CropEditor, CropEngineConfig,
    EditorState, LayoutTemplate, NormalizedRegionSet, PixelRect, Point, ResizeHandle, ResizeLimits, Size,
    VisibleBounds,
};

const TOLERANCE: f64 = 1e-6;

// ── Helpers ─────────────────────────────────────────────────────────────

fn template() -> impl Strategy<Value = LayoutTemplate> {
    prop_oneof![
        Just(LayoutTemplate::Single),
        Just(LayoutTemplate::Double),
        Just(LayoutTemplate::Triple),
    ]
}

fn size(min: f64, max: f64) -> impl Strategy<Value = Size> {
    (min..max, min..max).prop_map(|(w, h)| Size::new(w, h))
}

fn bounds() -> impl Strategy<Value = VisibleBounds> {
    (100.0..2000.0f64, 100.0..2000.0f64, 0.0..400.0f64, 0.0..400.0f64).prop_map(
        |(width, height, offset_x, offset_y)| VisibleBounds {
            width,
            height,
            offset_x,
            offset_y,
        },
    )
}

fn handle() -> impl Strategy<Value = ResizeHandle> {
    prop::sample::select(ResizeHandle::ALL.to_vec())
}

/// One user action in a session, addressed relative to a region.
#[derive(Debug, Clone)]
enum Action {
    /// Grab a region by its body and move the pointer through the deltas
    Drag { region: usize, moves: Vec<(f64, f64)> },
    /// Grab a region by a handle and move the pointer through the deltas
    Resize {
        region: usize,
        handle: ResizeHandle,
        moves: Vec<(f64, f64)>,
    },
    ResizeContainer(Size),
}

fn moves() -> impl Strategy<Value = Vec<(f64, f64)>> {
    proptest::collection::vec((-1500.0..1500.0f64, -1500.0..1500.0f64), 1..6)
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (0usize..3, moves()).prop_map(|(region, moves)| Action::Drag { region, moves }),
        4 => (0usize..3, handle(), moves())
            .prop_map(|(region, handle, moves)| Action::Resize { region, handle, moves }),
        1 => size(80.0, 2500.0).prop_map(Action::ResizeContainer),
    ]
}

fn assert_unit_square(set: &NormalizedRegionSet) -> Result<(), TestCaseError> {
    for region in set {
        let r = region.rect;
        prop_assert!(r.is_finite(), "non-finite region {:?}", region);
        prop_assert!(r.x >= -TOLERANCE && r.y >= -TOLERANCE, "negative origin {:?}", region);
        prop_assert!(r.width > 0.0 && r.height > 0.0, "empty region {:?}", region);
        prop_assert!(
            r.right() <= 1.0 + TOLERANCE && r.bottom() <= 1.0 + TOLERANCE,
            "region escapes unit square {:?}",
            region
        );
    }
    Ok(())
}

fn assert_in_bounds(editor: &CropEditor) -> Result<(), TestCaseError> {
    let bounds = editor.bounds();
    for rect in editor.pixel_regions() {
        prop_assert!(
            bounds.contains_rect(&rect, TOLERANCE),
            "{:?} escapes bounds {:?}",
            rect,
            bounds
        );
    }
    Ok(())
}

fn rect_close(a: &PixelRect, b: &PixelRect) -> bool {
    (a.x - b.x).abs() < TOLERANCE
        && (a.y - b.y).abs() < TOLERANCE
        && (a.width - b.width).abs() < TOLERANCE
        && (a.height - b.height).abs() < TOLERANCE
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. Sessions of drags, resizes and container changes
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn sessions_keep_regions_in_bounds(
        template in template(),
        container in size(80.0, 2500.0),
        source in size(100.0, 4000.0),
        actions in proptest::collection::vec(action(), 1..12),
    ) {
        let config = CropEngineConfig::default();
        let mut editor = CropEditor::new(config.clone(), template);
        editor.set_source_size(source);
        let initial = editor.set_container_size(container);
        prop_assert!(initial.is_some(), "ready editor must emit defaults");
        assert_unit_square(&editor.normalized_regions())?;

        for action in actions {
            match action {
                Action::Drag { region, moves } => {
                    let Some(rect) = editor.pixel_regions().get(region % template.region_count()).copied() else {
                        continue;
                    };
                    let origin = rect.center();
                    editor.pointer_down(origin);
                    for (dx, dy) in moves {
                        if let Some(set) = editor.pointer_move(Point::new(origin.x + dx, origin.y + dy)) {
                            assert_unit_square(&set)?;
                            assert_in_bounds(&editor)?;
                        }
                    }
                    editor.pointer_up();
                }
                Action::Resize { region, handle, moves } => {
                    let Some(rect) = editor.pixel_regions().get(region % template.region_count()).copied() else {
                        continue;
                    };
                    let origin = handle.position(&rect);
                    editor.pointer_down(origin);
                    let resizing = match editor.state() {
                        EditorState::Resizing { region, .. } => Some(region),
                        _ => None,
                    };
                    for (dx, dy) in moves {
                        if let Some(set) = editor.pointer_move(Point::new(origin.x + dx, origin.y + dy)) {
                            assert_unit_square(&set)?;
                            assert_in_bounds(&editor)?;

                            if let Some(index) = resizing {
                                let bounds = editor.bounds();
                                let rect = editor.pixel_regions()[index];
                                let min_width = config.min_region_width.min(bounds.width);
                                let min_height = config.min_region_height.min(bounds.height);
                                prop_assert!(
                                    rect.width >= min_width - TOLERANCE && rect.height >= min_height - TOLERANCE,
                                    "{:?} below minimum {}x{}",
                                    rect,
                                    min_width,
                                    min_height
                                );
                            }
                        }
                    }
                    editor.pointer_up();
                }
                Action::ResizeContainer(size) => {
                    prop_assert!(editor.set_container_size(size).is_none());
                    assert_in_bounds(&editor)?;
                }
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Locked resizes keep their ratio unless relaxed
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn locked_resize_keeps_ratio_unless_relaxed(
        bounds in bounds(),
        ratio in prop::sample::select(vec![9.0 / 16.0, 9.0 / 8.0, 1.0, 16.0 / 9.0]),
        scale in 0.2..0.8f64,
        (fx, fy) in (0.0..1.0f64, 0.0..1.0f64),
        handle in handle(),
        (dx, dy) in (-2500.0..2500.0f64, -2500.0..2500.0f64),
    ) {
        let width = scale * bounds.width.min(bounds.height * ratio);
        let height = width / ratio;
        let start = PixelRect::new(
            bounds.left() + fx * (bounds.width - width),
            bounds.top() + fy * (bounds.height - height),
            width,
            height,
        );
        let limits = ResizeLimits {
            min_width: 50.0,
            min_height: 50.0,
            aspect_ratio: Some(ratio),
        };

        let step = resize_rect(&start, handle, dx, dy, &limits, &bounds);

        prop_assert!(bounds.contains_rect(&step.rect, TOLERANCE), "{:?} escapes {:?}", step.rect, bounds);
        prop_assert!(step.rect.width >= 50.0_f64.min(bounds.width) - TOLERANCE);
        prop_assert!(step.rect.height >= 50.0_f64.min(bounds.height) - TOLERANCE);
        if !step.ratio_relaxed {
            let actual = step.rect.width / step.rect.height;
            prop_assert!(
                (actual - ratio).abs() / ratio < 1e-9,
                "ratio {} drifted from {} without relaxing ({:?})",
                actual,
                ratio,
                step.rect
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Normalization round-trips through the bounds clamp
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn normalize_round_trip_equals_clamp(
        bounds in bounds(),
        (x, y) in (-500.0..2500.0f64, -500.0..2500.0f64),
        (width, height) in (0.0..3000.0f64, 0.0..3000.0f64),
    ) {
        let rect = PixelRect::new(x, y, width, height);
        let round_trip = to_pixel(&to_normalized(&rect, &bounds), &bounds);
        let clamped = bounds.clamp_rect(&rect);
        prop_assert!(
            rect_close(&round_trip, &clamped),
            "round trip {:?} != clamp {:?}",
            round_trip,
            clamped
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6-7. Template defaults
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn defaults_are_disjoint_and_capped(template in template(), aspect in 0.3..3.0f64) {
        let set = resolve_default_regions(template, aspect);

        prop_assert_eq!(set.len(), template.region_count());
        prop_assert!(set.validate_for(template).is_ok(), "invalid defaults {:?}", set);
        prop_assert!(!set.has_overlap(), "overlapping defaults for aspect {}: {:?}", aspect, set);
        for region in &set {
            prop_assert!(region.rect.width <= AXIS_CAP + TOLERANCE);
            prop_assert!(region.rect.height <= AXIS_CAP + TOLERANCE);
        }
    }

    #[test]
    fn defaults_are_deterministic(template in template(), aspect in 0.3..3.0f64) {
        prop_assert_eq!(
            resolve_default_regions(template, aspect),
            resolve_default_regions(template, aspect)
        );
    }

    #[test]
    fn defaults_match_target_ratio_in_source_pixels(
        template in template(),
        source in size(100.0, 4000.0),
    ) {
        let bounds = compute_visible_bounds(source, source);
        let aspect = source.width / source.height;
        let set = resolve_default_regions(template, aspect);

        for (region, slot) in set.iter().zip(vclip_crop::template_slots(template)) {
            let pixel = to_pixel(&region.rect, &bounds);
            let target = slot.aspect_ratio.as_f64();
            let actual = pixel.width / pixel.height;
            prop_assert!((actual - target).abs() / target < 1e-6, "{} vs {}", actual, target);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Container changes leave normalized regions untouched
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn container_resize_keeps_normalized_regions(
        template in template(),
        source in size(100.0, 4000.0),
        containers in proptest::collection::vec(size(50.0, 3000.0), 1..8),
    ) {
        let mut editor = CropEditor::new(CropEngineConfig::default(), template);
        editor.set_source_size(source);
        editor.set_container_size(Size::new(1280.0, 720.0));
        let before = editor.normalized_regions();

        for container in containers {
            prop_assert!(editor.set_container_size(container).is_none());
            prop_assert_eq!(&editor.normalized_regions(), &before);
        }
    }
}
