//! Scroll-pinning collaborators: GSAP ScrollTrigger when the page loads it,
//! otherwise an optional scroll-position fallback.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use js_sys::{Function, Object, Reflect};
use tracing::{debug, info};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Element, HtmlElement, Window};

use super::js_error;
use crate::config::PageConfig;
use crate::error::{Result, SceneError};
use crate::pin::{native_progress, PinParams};

pub type ProgressCallback = Box<dyn FnMut(f64)>;
pub type RefreshCallback = Box<dyn FnMut()>;

pub trait PinDriver {
    fn name(&self) -> &'static str;

    /// Pins `scene` and reports its progress through `on_update`.
    fn pin(&self, scene: &Element, params: &PinParams, on_update: ProgressCallback) -> Result<()>;

    /// Subscribes to global layout refreshes.
    fn on_refresh(&self, callback: RefreshCallback) -> Result<()>;

    /// Asks the driver to recompute its layout and notify refresh subscribers.
    fn refresh(&self);
}

/// Picks the pinning collaborator once for the page.
pub fn detect(window: &Window, config: &PageConfig) -> Option<Rc<dyn PinDriver>> {
    match ScrollTrigger::detect(window) {
        Ok(Some(driver)) => {
            info!(driver = driver.name(), "scroll pinning enabled");
            return Some(Rc::new(driver));
        }
        Ok(None) => debug!("GSAP ScrollTrigger not loaded"),
        Err(err) => info!(%err, "GSAP ScrollTrigger unusable"),
    }
    if config.native_scroll_fallback {
        let driver = NativeScroll::new(window.clone());
        info!(driver = driver.name(), "scroll pinning enabled");
        return Some(Rc::new(driver));
    }
    None
}

/// Subscribes `on_refresh` and pins every scene. Whatever the driver rejects is
/// logged and skipped. Returns how many scenes were pinned.
pub fn connect(
    driver: &dyn PinDriver,
    scenes: Vec<(Element, PinParams)>,
    on_refresh: RefreshCallback,
    mut on_progress: impl FnMut(usize) -> ProgressCallback,
) -> usize {
    if let Err(err) = driver.on_refresh(on_refresh) {
        info!(driver = driver.name(), %err, "refresh subscription failed");
    }
    let mut pinned = 0;
    for (index, (element, params)) in scenes.into_iter().enumerate() {
        match driver.pin(&element, &params, on_progress(index)) {
            Ok(()) => pinned += 1,
            Err(err) => info!(driver = driver.name(), index, %err, "scene could not be pinned"),
        }
    }
    pinned
}

fn get(target: &JsValue, key: &str) -> Result<JsValue> {
    Reflect::get(target, &JsValue::from_str(key)).map_err(js_error)
}

fn method(target: &JsValue, key: &str) -> Result<Function> {
    get(target, key)?
        .dyn_into::<Function>()
        .map_err(|_| SceneError::Js(format!("{key} is not a function")))
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<()> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(js_error)
}

fn progress_of(trigger: &JsValue) -> Option<f64> {
    get(trigger, "progress").ok().and_then(|p| p.as_f64())
}

/// Bridge to `window.ScrollTrigger`.
pub struct ScrollTrigger {
    plugin: JsValue,
}

impl ScrollTrigger {
    /// `Ok(None)` when GSAP or the plugin is absent from the page.
    pub fn detect(window: &Window) -> Result<Option<Self>> {
        let gsap = get(window, "gsap")?;
        let plugin = get(window, "ScrollTrigger")?;
        if gsap.is_undefined() || plugin.is_undefined() {
            return Ok(None);
        }

        let core = get(&gsap, "core")?;
        let globals = method(&core, "globals")?.call0(&core).map_err(js_error)?;
        if get(&globals, "ScrollTrigger")?.is_undefined() {
            method(&gsap, "registerPlugin")?
                .call1(&gsap, &plugin)
                .map_err(js_error)?;
            debug!("registered ScrollTrigger plugin");
        }
        Ok(Some(Self { plugin }))
    }
}

impl PinDriver for ScrollTrigger {
    fn name(&self) -> &'static str {
        "gsap-scrolltrigger"
    }

    fn pin(&self, scene: &Element, params: &PinParams, on_update: ProgressCallback) -> Result<()> {
        let options = Object::new();
        set(&options, "trigger", scene)?;
        set(&options, "start", &JsValue::from_str(&params.start))?;
        set(&options, "end", &JsValue::from_str(&params.end))?;
        set(&options, "pin", &JsValue::TRUE)?;
        set(&options, "scrub", &JsValue::TRUE)?;

        let on_update = Rc::new(RefCell::new(on_update));
        let update = {
            let on_update = on_update.clone();
            Closure::wrap(Box::new(move |trigger: JsValue| {
                if let Some(progress) = progress_of(&trigger) {
                    (*on_update.borrow_mut())(progress);
                }
            }) as Box<dyn FnMut(JsValue)>)
        };
        set(&options, "onUpdate", update.as_ref())?;

        let trigger = method(&self.plugin, "create")?
            .call1(&self.plugin, &options)
            .map_err(js_error)?;
        update.forget();

        // onUpdate only fires on change; report where the scene starts.
        if let Some(progress) = progress_of(&trigger) {
            (*on_update.borrow_mut())(progress);
        }
        Ok(())
    }

    fn on_refresh(&self, mut callback: RefreshCallback) -> Result<()> {
        let listener = Closure::wrap(Box::new(move || callback()) as Box<dyn FnMut()>);
        method(&self.plugin, "addEventListener")?
            .call2(&self.plugin, &JsValue::from_str("refresh"), listener.as_ref())
            .map_err(js_error)?;
        listener.forget();
        Ok(())
    }

    fn refresh(&self) {
        let refreshed = method(&self.plugin, "refresh")
            .and_then(|f| f.call0(&self.plugin).map_err(js_error));
        if let Err(err) = refreshed {
            info!(%err, "ScrollTrigger refresh failed");
        }
    }
}

/// Derives progress from how far a scene's top has scrolled past the viewport
/// top. The scene is stretched by the pin distance so its sticky `.frame`
/// (see `static/style.css`) stays on screen while progress runs from 0 to 1.
pub struct NativeScroll {
    window: Window,
    refresh_callbacks: RefCell<Vec<RefreshCallback>>,
}

impl NativeScroll {
    pub fn new(window: Window) -> Self {
        Self { window, refresh_callbacks: RefCell::new(Vec::new()) }
    }
}

fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

impl PinDriver for NativeScroll {
    fn name(&self) -> &'static str {
        "native-scroll"
    }

    fn pin(&self, scene: &Element, params: &PinParams, mut on_update: ProgressCallback) -> Result<()> {
        if let Some(styled) = scene.dyn_ref::<HtmlElement>() {
            if let Err(err) = styled.style().set_property("height", &params.sticky_scene_height()) {
                debug!(error = ?err, "scene height not applied");
            }
        }
        let window = self.window.clone();
        let scene = scene.clone();
        let params = params.clone();
        let mut report = move || {
            let scrolled = -scene.get_bounding_client_rect().top();
            on_update(native_progress(scrolled, params.distance(viewport_height(&window))));
        };
        report();
        // gloo listeners are passive unless asked otherwise.
        EventListener::new(&self.window, "scroll", move |_| report()).forget();
        Ok(())
    }

    fn on_refresh(&self, callback: RefreshCallback) -> Result<()> {
        self.refresh_callbacks.borrow_mut().push(callback);
        Ok(())
    }

    fn refresh(&self) {
        for callback in self.refresh_callbacks.borrow_mut().iter_mut() {
            callback();
        }
    }
}
