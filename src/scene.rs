//! Declarative scene and caption settings read from element attributes.

use tracing::debug;

use crate::config::Markup;
use crate::gate::Thresholds;

pub const DEFAULT_PIN_PERCENT: f64 = 120.0;
pub const DEFAULT_CAPTION_X: f64 = 50.0;
pub const DEFAULT_CAPTION_Y: f64 = 50.0;
pub const DEFAULT_SHOW_AT: f64 = 0.0;
/// Larger than any attainable progress: the caption never hides once shown.
pub const NEVER_HIDE: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Pin duration as a percentage of the viewport height.
    pub pin_percent: f64,
    pub progress_hook: Option<String>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self { pin_percent: DEFAULT_PIN_PERCENT, progress_hook: None }
    }
}

impl SceneConfig {
    pub fn from_attributes(attr: impl Fn(&str) -> Option<String>, markup: &Markup) -> Self {
        let pin_percent = number(&markup.pin_attr, attr(&markup.pin_attr), DEFAULT_PIN_PERCENT);
        let progress_hook = attr(&markup.hook_attr)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        Self { pin_percent, progress_hook }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionSpec {
    /// Percent of the reference frame width.
    pub x: f64,
    /// Percent of the reference frame height.
    pub y: f64,
    pub thresholds: Thresholds,
}

impl Default for CaptionSpec {
    fn default() -> Self {
        Self { x: DEFAULT_CAPTION_X, y: DEFAULT_CAPTION_Y, thresholds: Thresholds::default() }
    }
}

impl CaptionSpec {
    pub fn at(x: f64, y: f64) -> Self {
        Self { x, y, ..Self::default() }
    }

    pub fn with_thresholds(mut self, show_at: f64, hide_at: f64) -> Self {
        self.thresholds = Thresholds::new(show_at, hide_at);
        self
    }

    pub fn from_attributes(attr: impl Fn(&str) -> Option<String>, markup: &Markup) -> Self {
        let x = number(&markup.x_attr, attr(&markup.x_attr), DEFAULT_CAPTION_X);
        let y = number(&markup.y_attr, attr(&markup.y_attr), DEFAULT_CAPTION_Y);
        let show_at = number(&markup.show_attr, attr(&markup.show_attr), DEFAULT_SHOW_AT);
        let hide_at = number(&markup.hide_attr, attr(&markup.hide_attr), NEVER_HIDE);
        Self { x, y, thresholds: Thresholds::new(show_at, hide_at) }
    }
}

/// A discovered scene: its settings, its captions and the surface they render on.
pub struct Scene<S> {
    pub config: SceneConfig,
    pub captions: Vec<CaptionSpec>,
    pub surface: S,
}

impl<S> Scene<S> {
    pub fn new(config: SceneConfig, captions: Vec<CaptionSpec>, surface: S) -> Self {
        Self { config, captions, surface }
    }
}

fn number(name: &str, raw: Option<String>, default: f64) -> f64 {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            debug!(attribute = name, value = %raw, default, "malformed numeric attribute");
            default
        }
    }
}
