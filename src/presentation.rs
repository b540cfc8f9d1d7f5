//! The set of scenes on a page and the two operations the host drives them with.

use tracing::debug;

use crate::error::{Result, SceneError};
use crate::gate::{ProgressGate, ProgressHooks};
use crate::layout::layout_scene;
use crate::scene::Scene;
use crate::surface::{SceneSource, SceneSurface};

/// Progress a scene is in before its first scroll update.
pub const INITIAL_PROGRESS: f64 = 0.0;

pub struct Presentation<S> {
    scenes: Vec<Scene<S>>,
    gate: ProgressGate<S>,
}

impl<S: SceneSurface> Presentation<S> {
    pub fn new(scenes: Vec<Scene<S>>, hooks: ProgressHooks<S>) -> Self {
        Self { scenes, gate: ProgressGate::new(hooks) }
    }

    pub fn discover<Src>(source: &Src, hooks: ProgressHooks<S>) -> Self
    where
        Src: SceneSource<Surface = S>,
    {
        let scenes = source.discover();
        debug!(scenes = scenes.len(), "scenes discovered");
        Self::new(scenes, hooks)
    }

    pub fn scenes(&self) -> &[Scene<S>] {
        &self.scenes
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn hooks_mut(&mut self) -> &mut ProgressHooks<S> {
        self.gate.hooks_mut()
    }

    /// Lays out the captions of every scene. Returns how many scenes were laid
    /// out; scenes with missing structure are skipped.
    pub fn layout_all(&self) -> usize {
        self.scenes.iter().filter(|scene| layout_scene(scene)).count()
    }

    /// Gates every scene at [`INITIAL_PROGRESS`] so captions start in the state
    /// their thresholds call for. Returns the number of visible captions.
    pub fn reset_progress(&mut self) -> usize {
        let Self { scenes, gate } = self;
        scenes
            .iter()
            .map(|scene| gate.apply(scene, INITIAL_PROGRESS))
            .sum()
    }

    /// Updates caption visibility of scene `index` for `progress`. Returns the
    /// number of visible captions.
    pub fn set_progress(&mut self, index: usize, progress: f64) -> Result<usize> {
        let count = self.scenes.len();
        let scene = self
            .scenes
            .get(index)
            .ok_or(SceneError::UnknownScene { index, count })?;
        Ok(self.gate.apply(scene, progress))
    }
}
