//! Scene discovery and caption rendering over the live DOM.

use tracing::debug;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Element, HtmlElement, ResizeObserver};

use super::js_error;
use crate::config::Markup;
use crate::error::Result;
use crate::layout::{Point, Size, StageFrame};
use crate::scene::{CaptionSpec, Scene, SceneConfig};
use crate::surface::{SceneSource, SceneSurface};

/// Finds every scene below `root`.
pub struct DomSceneSource {
    root: Element,
    markup: Markup,
}

impl DomSceneSource {
    pub fn new(root: Element, markup: Markup) -> Self {
        Self { root, markup }
    }
}

impl SceneSource for DomSceneSource {
    type Surface = DomScene;

    fn discover(&self) -> Vec<Scene<DomScene>> {
        let Ok(nodes) = self.root.query_selector_all(&self.markup.scene) else {
            debug!(selector = %self.markup.scene, "invalid scene selector");
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i)?.dyn_into::<HtmlElement>().ok())
            .map(|element| DomScene::read(element, &self.markup))
            .collect()
    }
}

pub struct DomScene {
    element: HtmlElement,
    stage: Option<Element>,
    overlays: Option<Element>,
    captions: Vec<HtmlElement>,
}

impl DomScene {
    fn read(element: HtmlElement, markup: &Markup) -> Scene<DomScene> {
        let stage = element.query_selector(&markup.stage).ok().flatten();
        let overlays = element.query_selector(&markup.overlays).ok().flatten();

        let mut captions = Vec::new();
        let mut specs = Vec::new();
        if let Some(Ok(nodes)) = overlays.as_ref().map(|o| o.query_selector_all(&markup.caption)) {
            for i in 0..nodes.length() {
                let Some(caption) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
                    continue;
                };
                specs.push(CaptionSpec::from_attributes(|name| caption.get_attribute(name), markup));
                captions.push(caption);
            }
        }

        let config = SceneConfig::from_attributes(|name| element.get_attribute(name), markup);
        if stage.is_none() || overlays.is_none() {
            debug!(id = %element.id(), "scene without stage or overlays; layout skipped");
        }
        Scene::new(config, specs, DomScene { element, stage, overlays, captions })
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    /// Calls `on_resize` whenever the stage changes size. The observer lives
    /// for the rest of the page.
    pub fn observe_resize(&self, mut on_resize: impl FnMut() + 'static) -> Result<()> {
        let Some(stage) = self.stage.as_ref() else {
            return Ok(());
        };
        let callback = Closure::wrap(Box::new(move |_entries: js_sys::Array, _observer: ResizeObserver| {
            on_resize();
        }) as Box<dyn FnMut(js_sys::Array, ResizeObserver)>);
        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref()).map_err(js_error)?;
        observer.observe(stage);
        callback.forget();
        Ok(())
    }
}

impl SceneSurface for DomScene {
    fn stage_frame(&self) -> Option<StageFrame> {
        let stage = self.stage.as_ref()?.get_bounding_client_rect();
        let overlays = self.overlays.as_ref()?.get_bounding_client_rect();
        Some(
            StageFrame::new(Size::new(stage.width(), stage.height()))
                .with_origin(Point::new(stage.left() - overlays.left(), stage.top() - overlays.top())),
        )
    }

    fn place_caption(&self, index: usize, at: Point) {
        let Some(caption) = self.captions.get(index) else {
            return;
        };
        let style = caption.style();
        logged(style.set_property("left", &format!("{}px", at.left)), "left");
        logged(style.set_property("top", &format!("{}px", at.top)), "top");
    }

    fn set_caption_visible(&self, index: usize, visible: bool) {
        let Some(caption) = self.captions.get(index) else {
            return;
        };
        let style = caption.style();
        if visible {
            logged(style.set_property("opacity", "1"), "opacity");
            logged(style.remove_property("pointer-events"), "pointer-events");
            logged(caption.remove_attribute("aria-hidden"), "aria-hidden");
            logged(caption.remove_attribute("inert"), "inert");
        } else {
            logged(style.set_property("opacity", "0"), "opacity");
            logged(style.set_property("pointer-events", "none"), "pointer-events");
            logged(caption.set_attribute("aria-hidden", "true"), "aria-hidden");
            logged(caption.set_attribute("inert", ""), "inert");
        }
    }
}

fn logged<T>(result: std::result::Result<T, JsValue>, what: &str) {
    if let Err(err) = result {
        debug!(property = what, error = ?err, "caption write failed");
    }
}
