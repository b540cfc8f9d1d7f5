//! Scroll-linked scenes with letterboxed caption overlays and a dismissable
//! splash screen.
//!
//! The layout and gating logic is target-independent and driven through the
//! [`surface`] traits; the browser bindings live in `wasm` and only compile
//! for `wasm32`.

pub mod config;
pub mod error;
pub mod gate;
pub mod layout;
pub mod pin;
pub mod presentation;
pub mod scene;
pub mod surface;

pub use config::PageConfig;
pub use error::{Result, SceneError};
pub use gate::{ProgressGate, ProgressHooks, Thresholds};
pub use layout::{ContentBox, Point, Size, StageFrame, ASPECT};
pub use presentation::Presentation;
pub use scene::{CaptionSpec, Scene, SceneConfig};
pub use surface::{SceneSource, SceneSurface};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gloo::events::EventListener;
    use tracing::{info, warn};
    use wasm_bindgen::prelude::*;

    use crate::error::SceneError;
    use crate::gate::ProgressHooks;
    use crate::pin::PinParams;
    use crate::presentation::Presentation;
    use crate::PageConfig;

    pub mod dom;
    pub mod pin;
    pub mod splash;

    use dom::{DomScene, DomSceneSource};

    impl From<SceneError> for JsValue {
        fn from(err: SceneError) -> Self {
            JsValue::from(js_sys::Error::new(&err.to_string()))
        }
    }

    pub(crate) fn js_error(value: JsValue) -> SceneError {
        SceneError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }

    type Shared = Rc<RefCell<Presentation<DomScene>>>;

    thread_local! {
        // Page-lifetime state reachable from the exported entry points.
        static APP: RefCell<Option<Shared>> = const { RefCell::new(None) };
    }

    fn with_app<R>(f: impl FnOnce(&mut Presentation<DomScene>) -> R) -> Option<R> {
        let app = APP.with(|slot| slot.borrow().clone())?;
        let Ok(mut presentation) = app.try_borrow_mut() else {
            warn!("re-entrant scene update skipped");
            return None;
        };
        Some(f(&mut presentation))
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();

        let window = web_sys::window().ok_or(SceneError::MissingGlobal("window"))?;
        let document = window.document().ok_or(SceneError::MissingGlobal("document"))?;
        let config = match document.body() {
            Some(body) => PageConfig::default().apply_overrides(|name| body.get_attribute(name)),
            None => PageConfig::default(),
        };

        let driver = pin::detect(&window, &config);
        if driver.is_none() {
            info!("no scroll pinning available; captions are laid out but not progress-driven");
        }

        splash::Splash::install(&window, &document, &config.splash, driver.clone());

        let root = document
            .document_element()
            .ok_or(SceneError::MissingElement("documentElement".into()))?;
        let source = DomSceneSource::new(root, config.markup.clone());
        let app: Shared = Rc::new(RefCell::new(Presentation::discover(&source, ProgressHooks::new())));
        APP.with(|slot| *slot.borrow_mut() = Some(app.clone()));

        let laid_out = app.borrow().layout_all();
        let visible = app.borrow_mut().reset_progress();
        info!(scenes = app.borrow().len(), laid_out, visible, "scenes initialised");

        for scene in app.borrow().scenes() {
            let observed = scene.surface.observe_resize(|| {
                with_app(|p| p.layout_all());
            });
            if let Err(err) = observed {
                info!(%err, "stage resize not observed; relying on window resize");
            }
        }
        EventListener::new(&window, "resize", |_| {
            with_app(|p| p.layout_all());
        })
        .forget();

        if let Some(driver) = driver {
            let scenes: Vec<(web_sys::Element, PinParams)> = app
                .borrow()
                .scenes()
                .iter()
                .map(|scene| (scene.surface.element().clone().into(), PinParams::for_scene(&scene.config)))
                .collect();
            let pinned = pin::connect(
                driver.as_ref(),
                scenes,
                Box::new(|| {
                    with_app(|p| p.layout_all());
                }),
                |index| -> pin::ProgressCallback {
                    Box::new(move |progress: f64| {
                        if let Some(Err(err)) = with_app(|p| p.set_progress(index, progress)) {
                            warn!(%err, "progress update dropped");
                        }
                    })
                },
            );
            info!(driver = driver.name(), pinned, "scenes pinned");
        }
        Ok(())
    }

    /// Lays out the captions of every scene now.
    #[wasm_bindgen(js_name = layoutCaptions)]
    pub fn layout_captions() -> usize {
        with_app(|p| p.layout_all()).unwrap_or(0)
    }

    /// Updates caption visibility of scene `index` for `progress`.
    #[wasm_bindgen(js_name = setSceneProgress)]
    pub fn set_scene_progress(index: usize, progress: f64) -> Result<usize, JsValue> {
        match with_app(|p| p.set_progress(index, progress)) {
            Some(result) => Ok(result?),
            None => Ok(0),
        }
    }

    /// Registers `callback(sceneElement, progress)` for scenes declaring the hook `name`.
    #[wasm_bindgen(js_name = registerProgressHook)]
    pub fn register_progress_hook(name: String, callback: js_sys::Function) -> bool {
        with_app(move |p| {
            p.hooks_mut().register(name, move |scene, progress| {
                let element: &JsValue = scene.surface.element().as_ref();
                if let Err(err) = callback.call2(&JsValue::NULL, element, &JsValue::from_f64(progress)) {
                    warn!(error = ?err, "progress hook threw");
                }
            });
        })
        .is_some()
    }

    #[wasm_bindgen(js_name = sceneCount)]
    pub fn scene_count() -> usize {
        with_app(|p| p.len()).unwrap_or(0)
    }
}
