mod common;

use common::{approx_eq, approx_point, scene, FakeSurface};
use scroll_scenes::layout::layout_scene;
use scroll_scenes::{CaptionSpec, ContentBox, Point, Scene, SceneConfig, Size, StageFrame, ASPECT};

#[test]
fn content_box_keeps_aspect_and_centers() {
    let stages = [
        (1920.0, 1080.0),
        (1080.0, 1920.0),
        (500.0, 500.0),
        (3000.0, 400.0),
        (320.0, 2000.0),
        (1.0, 1.0),
    ];
    for (w, h) in stages {
        let b = ContentBox::letterbox(Size::new(w, h));
        assert!((b.width / b.height - ASPECT).abs() < 1e-9, "stage {w}x{h}: {b:?}");
        assert!(b.width <= w + 1e-9 && b.height <= h + 1e-9, "stage {w}x{h}: {b:?}");
        assert!(approx_eq(b.left, (w - b.width) / 2.0));
        assert!(approx_eq(b.top, (h - b.height) / 2.0));
        // One axis always fills the stage.
        assert!(approx_eq(b.width, w) || approx_eq(b.height, h));
    }
}

#[test]
fn square_stage_scenario() {
    let b = ContentBox::letterbox(Size::new(500.0, 500.0));
    assert!(approx_eq(b.width, 500.0));
    assert!(approx_eq(b.height, 281.25));
    assert!(approx_eq(b.left, 0.0));
    assert!(approx_eq(b.top, 109.375));

    let s = scene(500.0, 500.0, vec![CaptionSpec::at(50.0, 50.0)]);
    assert!(layout_scene(&s));
    assert!(approx_point(s.surface.position(0).unwrap(), 250.0, 250.0));
}

#[test]
fn corner_captions_land_on_box_corners() {
    let s = scene(
        1200.0,
        900.0,
        vec![CaptionSpec::at(0.0, 0.0), CaptionSpec::at(100.0, 100.0)],
    );
    layout_scene(&s);

    let b = ContentBox::letterbox(Size::new(1200.0, 900.0));
    assert!(approx_point(s.surface.position(0).unwrap(), b.left, b.top));
    assert!(approx_point(
        s.surface.position(1).unwrap(),
        b.left + b.width,
        b.top + b.height
    ));
}

#[test]
fn layout_is_idempotent() {
    let s = scene(
        777.0,
        333.0,
        vec![CaptionSpec::at(12.0, 88.0), CaptionSpec::default()],
    );
    layout_scene(&s);
    let first = s.surface.placed.borrow().clone();
    layout_scene(&s);
    assert_eq!(*s.surface.placed.borrow(), first);
}

#[test]
fn relayout_follows_resize() {
    let s = scene(1920.0, 1080.0, vec![CaptionSpec::at(25.0, 75.0)]);
    layout_scene(&s);
    assert!(approx_point(s.surface.position(0).unwrap(), 480.0, 810.0));

    s.surface.resize(960.0, 1080.0);
    layout_scene(&s);
    // 960 wide => 540 high box, centered vertically at 270.
    assert!(approx_point(s.surface.position(0).unwrap(), 240.0, 270.0 + 405.0));
}

#[test]
fn stage_origin_offsets_captions() {
    let frame = StageFrame::new(Size::new(1920.0, 1080.0)).with_origin(Point::new(10.0, -20.0));
    let surface = FakeSurface::with_frame(Some(frame), 1);
    let s = Scene::new(SceneConfig::default(), vec![CaptionSpec::at(0.0, 0.0)], surface);
    layout_scene(&s);
    assert!(approx_point(s.surface.position(0).unwrap(), 10.0, -20.0));
}

#[test]
fn scene_without_stage_is_skipped() {
    let surface = FakeSurface::with_frame(None, 1);
    let s = Scene::new(SceneConfig::default(), vec![CaptionSpec::default()], surface);
    assert!(!layout_scene(&s));
    assert_eq!(s.surface.position(0), None);
}

#[test]
fn empty_and_unlaid_scenes_are_tolerated() {
    let empty = scene(800.0, 600.0, Vec::new());
    assert!(layout_scene(&empty));

    let collapsed = scene(0.0, 0.0, vec![CaptionSpec::at(100.0, 100.0)]);
    assert!(layout_scene(&collapsed));
    assert!(approx_point(collapsed.surface.position(0).unwrap(), 0.0, 0.0));
}
