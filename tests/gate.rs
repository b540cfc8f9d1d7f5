mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{scene, FakeSource, FakeSurface};
use scroll_scenes::{
    CaptionSpec, Presentation, ProgressGate, ProgressHooks, Scene, SceneConfig, SceneError,
};

fn hooked(name: &str, captions: Vec<CaptionSpec>) -> Scene<FakeSurface> {
    let mut s = scene(1920.0, 1080.0, captions);
    s.config.progress_hook = Some(name.to_string());
    s
}

#[test]
fn threshold_scenario() {
    let s = scene(1920.0, 1080.0, vec![CaptionSpec::default().with_thresholds(0.25, 0.75)]);
    let mut gate = ProgressGate::default();

    let seen: Vec<bool> = [0.0, 0.25, 0.5, 0.9]
        .into_iter()
        .map(|p| {
            gate.apply(&s, p);
            s.surface.is_visible(0).unwrap()
        })
        .collect();
    assert_eq!(seen, [false, true, true, false]);
}

#[test]
fn default_thresholds_stay_visible() {
    let s = scene(1920.0, 1080.0, vec![CaptionSpec::default()]);
    let mut gate = ProgressGate::default();
    for p in [0.0, 0.1, 0.5, 0.99, 1.0] {
        assert_eq!(gate.apply(&s, p), 1);
        assert_eq!(s.surface.is_visible(0), Some(true));
    }
}

#[test]
fn captions_are_gated_independently() {
    let s = scene(
        1920.0,
        1080.0,
        vec![
            CaptionSpec::default().with_thresholds(0.0, 0.3),
            CaptionSpec::default().with_thresholds(0.3, 0.6),
            CaptionSpec::default().with_thresholds(0.6, 1.0),
        ],
    );
    let mut gate = ProgressGate::default();

    assert_eq!(gate.apply(&s, 0.3), 2);
    assert_eq!(*s.surface.visible.borrow(), [Some(true), Some(true), Some(false)]);

    assert_eq!(gate.apply(&s, 0.8), 1);
    assert_eq!(*s.surface.visible.borrow(), [Some(false), Some(false), Some(true)]);

    // Same progress again yields the same visible set.
    assert_eq!(gate.apply(&s, 0.8), 1);
    assert_eq!(*s.surface.visible.borrow(), [Some(false), Some(false), Some(true)]);
}

#[test]
fn registered_hook_receives_progress() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let hooks = {
        let calls = calls.clone();
        ProgressHooks::new().with("zoom", move |scene: &Scene<FakeSurface>, p| {
            calls.borrow_mut().push((scene.captions.len(), p));
        })
    };
    let mut gate = ProgressGate::new(hooks);

    let s = hooked("zoom", vec![CaptionSpec::default()]);
    gate.apply(&s, 0.4);
    gate.apply(&s, 0.6);
    assert_eq!(*calls.borrow(), [(1, 0.4), (1, 0.6)]);
}

#[test]
fn unknown_hook_is_ignored() {
    let mut gate = ProgressGate::new(ProgressHooks::new().with("other", |_: &Scene<FakeSurface>, _| {
        panic!("wrong hook dispatched")
    }));
    let s = hooked("missing", vec![CaptionSpec::default().with_thresholds(0.5, 2.0)]);
    assert_eq!(gate.apply(&s, 0.2), 0);
    assert_eq!(s.surface.is_visible(0), Some(false));
}

#[test]
fn presentation_drives_scenes_by_index() {
    let source = FakeSource(|| {
        vec![
            scene(500.0, 500.0, vec![CaptionSpec::at(50.0, 50.0).with_thresholds(0.5, 1.0)]),
            {
                let surface = FakeSurface::with_frame(None, 1);
                Scene::new(SceneConfig::default(), vec![CaptionSpec::default()], surface)
            },
        ]
    });
    let mut presentation = Presentation::discover(&source, ProgressHooks::new());
    assert_eq!(presentation.len(), 2);
    assert_eq!(presentation.layout_all(), 1);

    assert_eq!(presentation.set_progress(0, 0.1), Ok(0));
    assert_eq!(presentation.set_progress(0, 0.5), Ok(1));
    // Gating does not depend on the stage being laid out.
    assert_eq!(presentation.set_progress(1, 0.5), Ok(1));

    assert_eq!(
        presentation.set_progress(2, 0.5),
        Err(SceneError::UnknownScene { index: 2, count: 2 })
    );
}

#[test]
fn hooks_can_be_registered_after_discovery() {
    let hits = Rc::new(RefCell::new(0));
    let source = FakeSource(|| vec![hooked("count", Vec::new())]);
    let mut presentation = Presentation::discover(&source, ProgressHooks::new());

    presentation.set_progress(0, 0.5).unwrap();
    assert_eq!(*hits.borrow(), 0);

    let counter = hits.clone();
    presentation
        .hooks_mut()
        .register("count", move |_: &Scene<FakeSurface>, _| *counter.borrow_mut() += 1);
    presentation.set_progress(0, 0.5).unwrap();
    assert_eq!(*hits.borrow(), 1);
}

#[test]
fn reset_gates_captions_before_any_scroll() {
    let source = FakeSource(|| {
        vec![scene(
            1920.0,
            1080.0,
            vec![
                CaptionSpec::default().with_thresholds(0.0, 0.45),
                CaptionSpec::default().with_thresholds(0.5, 2.0),
            ],
        )]
    });
    let mut presentation = Presentation::discover(&source, ProgressHooks::new());

    // Nothing written until progress is applied.
    assert_eq!(presentation.scenes()[0].surface.is_visible(1), None);

    assert_eq!(presentation.reset_progress(), 1);
    let surface = &presentation.scenes()[0].surface;
    assert_eq!(surface.is_visible(0), Some(true));
    assert_eq!(surface.is_visible(1), Some(false));
}
