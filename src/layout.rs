//! Caption placement inside a letterboxed 16:9 content box.

use tracing::trace;

use crate::scene::Scene;
use crate::surface::SceneSurface;

/// Aspect ratio of the authored frame (1920x1080).
pub const ASPECT: f64 = 16.0 / 9.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    // Unlaid-out or bogus boxes collapse to zero.
    fn sanitized(self) -> Self {
        let clean = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self::new(clean(self.width), clean(self.height))
    }
}

/// A pixel offset from the overlay container's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub left: f64,
    pub top: f64,
}

impl Point {
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

/// Current geometry of a scene's stage.
///
/// `origin` is the stage's top-left corner in the coordinate space of the
/// overlay container the captions are positioned in. It is zero when both
/// share an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StageFrame {
    pub size: Size,
    pub origin: Point,
}

impl StageFrame {
    pub fn new(size: Size) -> Self {
        Self { size, origin: Point::default() }
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }
}

/// The largest 16:9 rectangle centered in a stage, relative to the stage.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContentBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ContentBox {
    pub fn letterbox(stage: Size) -> Self {
        let stage = stage.sanitized();
        let mut width = stage.width;
        let mut height = width / ASPECT;
        if height > stage.height {
            height = stage.height;
            width = height * ASPECT;
        }
        Self {
            left: (stage.width - width) / 2.0,
            top: (stage.height - height) / 2.0,
            width,
            height,
        }
    }

    /// Maps percentages of the authored frame to a point relative to the stage.
    pub fn place(&self, x_pct: f64, y_pct: f64) -> Point {
        Point::new(
            self.left + x_pct / 100.0 * self.width,
            self.top + y_pct / 100.0 * self.height,
        )
    }
}

/// Positions every caption of `scene`. Returns `false` when the scene has no
/// stage or overlay container and was skipped.
pub fn layout_scene<S: SceneSurface>(scene: &Scene<S>) -> bool {
    let Some(frame) = scene.surface.stage_frame() else {
        return false;
    };
    let content = ContentBox::letterbox(frame.size);
    for (index, caption) in scene.captions.iter().enumerate() {
        let at = content.place(caption.x, caption.y);
        scene.surface.place_caption(
            index,
            Point::new(frame.origin.left + at.left, frame.origin.top + at.top),
        );
    }
    trace!(captions = scene.captions.len(), ?content, "scene laid out");
    true
}
