#![allow(dead_code)]

use std::cell::RefCell;

use scroll_scenes::{CaptionSpec, Point, Scene, SceneConfig, SceneSource, SceneSurface, Size, StageFrame};

/// In-memory scene surface recording what the engine wrote to it.
#[derive(Default)]
pub struct FakeSurface {
    pub frame: RefCell<Option<StageFrame>>,
    pub placed: RefCell<Vec<Option<Point>>>,
    pub visible: RefCell<Vec<Option<bool>>>,
}

impl FakeSurface {
    pub fn with_stage(width: f64, height: f64, captions: usize) -> Self {
        Self::with_frame(Some(StageFrame::new(Size::new(width, height))), captions)
    }

    pub fn with_frame(frame: Option<StageFrame>, captions: usize) -> Self {
        Self {
            frame: RefCell::new(frame),
            placed: RefCell::new(vec![None; captions]),
            visible: RefCell::new(vec![None; captions]),
        }
    }

    pub fn resize(&self, width: f64, height: f64) {
        *self.frame.borrow_mut() = Some(StageFrame::new(Size::new(width, height)));
    }

    pub fn position(&self, index: usize) -> Option<Point> {
        self.placed.borrow()[index]
    }

    pub fn is_visible(&self, index: usize) -> Option<bool> {
        self.visible.borrow()[index]
    }
}

impl SceneSurface for FakeSurface {
    fn stage_frame(&self) -> Option<StageFrame> {
        *self.frame.borrow()
    }

    fn place_caption(&self, index: usize, at: Point) {
        self.placed.borrow_mut()[index] = Some(at);
    }

    fn set_caption_visible(&self, index: usize, visible: bool) {
        self.visible.borrow_mut()[index] = Some(visible);
    }
}

pub fn scene(width: f64, height: f64, captions: Vec<CaptionSpec>) -> Scene<FakeSurface> {
    let surface = FakeSurface::with_stage(width, height, captions.len());
    Scene::new(SceneConfig::default(), captions, surface)
}

/// Hands out scenes built by a closure, like a document scan would.
pub struct FakeSource<F>(pub F);

impl<F: Fn() -> Vec<Scene<FakeSurface>>> SceneSource for FakeSource<F> {
    type Surface = FakeSurface;

    fn discover(&self) -> Vec<Scene<FakeSurface>> {
        (self.0)()
    }
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

pub fn approx_point(p: Point, left: f64, top: f64) -> bool {
    approx_eq(p.left, left) && approx_eq(p.top, top)
}
