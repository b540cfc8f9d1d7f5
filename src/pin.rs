//! Parameters handed to the scroll-pinning collaborator.

use crate::scene::SceneConfig;

/// Pin starts when the scene's top meets the viewport's top.
pub const PIN_START: &str = "top top";

#[derive(Debug, Clone, PartialEq)]
pub struct PinParams {
    pub pin_percent: f64,
    pub start: String,
    pub end: String,
}

impl PinParams {
    pub fn for_scene(config: &SceneConfig) -> Self {
        Self {
            pin_percent: config.pin_percent,
            start: PIN_START.to_string(),
            end: format!("+={}%", config.pin_percent),
        }
    }

    /// Scroll distance of the pin in pixels for a viewport of `viewport_height`.
    pub fn distance(&self, viewport_height: f64) -> f64 {
        self.pin_percent / 100.0 * viewport_height
    }

    /// CSS height a scene needs so a sticky frame inside it stays on screen
    /// for the whole pin distance.
    pub fn sticky_scene_height(&self) -> String {
        format!("{}vh", 100.0 + self.pin_percent.max(0.0))
    }
}

/// Progress of a pinned scene whose top has scrolled `scrolled` pixels past the
/// viewport top, clamped to `[0, 1]`. A zero-length pin reports 1 once reached.
pub fn native_progress(scrolled: f64, distance: f64) -> f64 {
    if !scrolled.is_finite() {
        return 0.0;
    }
    if distance <= 0.0 || !distance.is_finite() {
        return if scrolled >= 0.0 { 1.0 } else { 0.0 };
    }
    (scrolled / distance).clamp(0.0, 1.0)
}
