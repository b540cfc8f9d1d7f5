//! Progress-driven caption visibility and named progress hooks.

use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use crate::scene::{Scene, DEFAULT_SHOW_AT, NEVER_HIDE};
use crate::surface::SceneSurface;

/// Inclusive progress window in which a caption is shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub show_at: f64,
    pub hide_at: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { show_at: DEFAULT_SHOW_AT, hide_at: NEVER_HIDE }
    }
}

impl Thresholds {
    pub fn new(show_at: f64, hide_at: f64) -> Self {
        Self { show_at, hide_at }
    }

    pub fn contains(&self, progress: f64) -> bool {
        self.show_at <= progress && progress <= self.hide_at
    }
}

pub type ProgressHook<S> = Box<dyn FnMut(&Scene<S>, f64)>;

/// Callbacks keyed by the hook name a scene declares.
pub struct ProgressHooks<S> {
    hooks: HashMap<String, ProgressHook<S>>,
}

impl<S> Default for ProgressHooks<S> {
    fn default() -> Self {
        Self { hooks: HashMap::new() }
    }
}

impl<S> fmt::Debug for ProgressHooks<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.hooks.keys()).finish()
    }
}

impl<S> ProgressHooks<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `hook` under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, hook: impl FnMut(&Scene<S>, f64) + 'static) {
        self.hooks.insert(name.into(), Box::new(hook));
    }

    pub fn with(mut self, name: impl Into<String>, hook: impl FnMut(&Scene<S>, f64) + 'static) -> Self {
        self.register(name, hook);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.hooks.contains_key(name)
    }

    /// Invokes the hook named `name`. Unknown names are ignored.
    pub fn dispatch(&mut self, name: &str, scene: &Scene<S>, progress: f64) -> bool {
        match self.hooks.get_mut(name) {
            Some(hook) => {
                hook(scene, progress);
                true
            }
            None => false,
        }
    }
}

#[derive(Debug)]
pub struct ProgressGate<S> {
    hooks: ProgressHooks<S>,
}

impl<S> Default for ProgressGate<S> {
    fn default() -> Self {
        Self::new(ProgressHooks::new())
    }
}

impl<S> ProgressGate<S> {
    pub fn new(hooks: ProgressHooks<S>) -> Self {
        Self { hooks }
    }

    pub fn hooks_mut(&mut self) -> &mut ProgressHooks<S> {
        &mut self.hooks
    }
}

impl<S: SceneSurface> ProgressGate<S> {
    /// Shows the captions whose window contains `progress`, hides the rest,
    /// then runs the scene's progress hook. Returns the number of visible
    /// captions.
    pub fn apply(&mut self, scene: &Scene<S>, progress: f64) -> usize {
        let mut visible = 0;
        for (index, caption) in scene.captions.iter().enumerate() {
            let show = caption.thresholds.contains(progress);
            scene.surface.set_caption_visible(index, show);
            visible += usize::from(show);
        }
        if let Some(name) = scene.config.progress_hook.as_deref() {
            if !self.hooks.dispatch(name, scene, progress) {
                trace!(hook = name, "no progress hook registered");
            }
        }
        visible
    }
}
