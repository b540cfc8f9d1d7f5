//! Seams between the scene logic and whatever renders it.

use crate::layout::{Point, StageFrame};
use crate::scene::Scene;

/// Rendering surface of a single scene.
///
/// Caption indices follow the order of [`Scene::captions`].
pub trait SceneSurface {
    /// Stage geometry, or `None` when the scene lacks a stage or an overlay
    /// container.
    fn stage_frame(&self) -> Option<StageFrame>;

    fn place_caption(&self, index: usize, at: Point);

    /// Opacity and interactivity/accessibility must change in one step.
    fn set_caption_visible(&self, index: usize, visible: bool);
}

/// Produces scene descriptors from some root (a document, a test fixture).
pub trait SceneSource {
    type Surface: SceneSurface;

    fn discover(&self) -> Vec<Scene<Self::Surface>>;
}
