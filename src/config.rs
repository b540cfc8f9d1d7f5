//! Page-level configuration.
//!
//! Defaults cover the stock page layout. A page can override individual
//! values with `data-*` attributes on `<body>` (see [`PageConfig::apply_overrides`]).

use tracing::debug;

/// Reference frame the splash artwork and caption percentages are authored in.
pub const DEFAULT_VIEW_BOX: &str = "0 0 1920 1080";

#[derive(Debug, Clone, PartialEq)]
pub struct SplashConfig {
    /// URL of the SVG injected into the splash host.
    pub asset: String,
    /// `id` of the element that hosts the splash.
    pub host_id: String,
    /// Delay between starting the fade and removing the host, in ms.
    pub fade_ms: u32,
    /// Markup shown when the asset cannot be loaded.
    pub fallback_html: String,
    pub view_box: String,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            asset: "splashScreen_v3.svg".to_string(),
            host_id: "splashScreen".to_string(),
            fade_ms: 650,
            fallback_html:
                r#"<p style="color:white;font:600 1rem/1.4 system-ui">Loading…</p>"#.to_string(),
            view_box: DEFAULT_VIEW_BOX.to_string(),
        }
    }
}

/// Selectors and attribute names used to discover scenes in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Markup {
    pub scene: String,
    pub stage: String,
    pub overlays: String,
    pub caption: String,
    pub pin_attr: String,
    pub hook_attr: String,
    pub x_attr: String,
    pub y_attr: String,
    pub show_attr: String,
    pub hide_attr: String,
}

impl Default for Markup {
    fn default() -> Self {
        Self {
            scene: ".scene".to_string(),
            stage: ".stage".to_string(),
            overlays: ".overlays".to_string(),
            caption: ".caption".to_string(),
            pin_attr: "data-pin".to_string(),
            hook_attr: "data-progress-hook".to_string(),
            x_attr: "data-x".to_string(),
            y_attr: "data-y".to_string(),
            show_attr: "data-show-at".to_string(),
            hide_attr: "data-hide-at".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub splash: SplashConfig,
    pub markup: Markup,
    /// Fall back to a scroll-position progress driver when GSAP ScrollTrigger
    /// is not loaded.
    pub native_scroll_fallback: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            splash: SplashConfig::default(),
            markup: Markup::default(),
            native_scroll_fallback: true,
        }
    }
}

impl PageConfig {
    /// Applies `data-splash-src`, `data-splash-fade-ms` and
    /// `data-native-scroll` overrides. Unparseable values keep the current
    /// setting.
    pub fn apply_overrides(mut self, attr: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(src) = attr("data-splash-src").filter(|s| !s.trim().is_empty()) {
            self.splash.asset = src.trim().to_string();
        }
        if let Some(raw) = attr("data-splash-fade-ms") {
            match raw.trim().parse::<u32>() {
                Ok(ms) => self.splash.fade_ms = ms,
                Err(_) => debug!(value = %raw, "ignoring malformed data-splash-fade-ms"),
            }
        }
        if let Some(raw) = attr("data-native-scroll") {
            match raw.trim() {
                "true" | "on" | "1" | "" => self.native_scroll_fallback = true,
                "false" | "off" | "0" => self.native_scroll_fallback = false,
                other => debug!(value = %other, "ignoring malformed data-native-scroll"),
            }
        }
        self
    }
}
