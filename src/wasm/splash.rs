//! Splash screen: injected SVG, dismissed on the first scroll or Space/Enter.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use tracing::{debug, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, Response, Window};

use super::pin::PinDriver;
use crate::config::SplashConfig;
use crate::error::SceneError;

/// The element the splash is rendered into.
pub struct SplashHost {
    document: Document,
    config: SplashConfig,
}

impl SplashHost {
    pub fn new(document: &Document, config: &SplashConfig) -> Self {
        Self { document: document.clone(), config: config.clone() }
    }

    pub fn element(&self) -> Option<Element> {
        self.document.get_element_by_id(&self.config.host_id)
    }

    pub fn inject(&self, markup: &str) {
        let Some(host) = self.element() else {
            return;
        };
        host.set_inner_html(markup);
        // Responsive scaling needs a viewBox.
        if let Ok(Some(svg)) = host.query_selector("svg") {
            if !svg.has_attribute("viewBox") {
                if let Err(err) = svg.set_attribute("viewBox", &self.config.view_box) {
                    debug!(error = ?err, "splash viewBox not set");
                }
            }
        }
    }

    pub fn fall_back(&self, reason: &str) {
        warn!(asset = %self.config.asset, %reason, "splash asset unavailable");
        if let Some(host) = self.element() {
            host.set_inner_html(&self.config.fallback_html);
        }
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

pub struct Splash {
    host: Rc<SplashHost>,
    driver: Option<Rc<dyn PinDriver>>,
    dismissed: Cell<bool>,
    listeners: RefCell<Vec<EventListener>>,
}

impl Splash {
    /// Starts loading the splash asset and arms dismissal.
    pub fn install(
        window: &Window,
        document: &Document,
        config: &SplashConfig,
        driver: Option<Rc<dyn PinDriver>>,
    ) -> Rc<Self> {
        let host = Rc::new(SplashHost::new(document, config));
        load(window, host.clone());
        Self::arm(window, host, driver)
    }

    /// Arms dismissal on the first scroll or Space/Enter for an already
    /// populated `host`.
    pub fn arm(window: &Window, host: Rc<SplashHost>, driver: Option<Rc<dyn PinDriver>>) -> Rc<Self> {
        let splash = Rc::new(Self {
            host,
            driver,
            dismissed: Cell::new(false),
            listeners: RefCell::new(Vec::new()),
        });

        let on_scroll = {
            let splash = splash.clone();
            EventListener::once(window, "scroll", move |_| splash.dismiss())
        };
        let on_key = {
            let splash = splash.clone();
            EventListener::new(window, "keydown", move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if matches!(event.code().as_str(), "Space" | "Enter") {
                    splash.dismiss();
                }
            })
        };
        splash.listeners.borrow_mut().extend([on_scroll, on_key]);
        splash
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed.get()
    }

    /// Whether the scroll/key listeners are still attached.
    pub fn is_armed(&self) -> bool {
        !self.listeners.borrow().is_empty()
    }

    // Listeners are dropped from a timer, never from inside their own callbacks.
    fn disarm_later(self: &Rc<Self>, delay_ms: u32, then: impl FnOnce() + 'static) {
        let splash = self.clone();
        Timeout::new(delay_ms, move || {
            then();
            splash.listeners.borrow_mut().clear();
        })
        .forget();
    }

    /// Fades the splash out, then removes it and refreshes scroll pinning.
    /// Only the first call has an effect.
    pub fn dismiss(self: &Rc<Self>) {
        if self.dismissed.replace(true) {
            return;
        }
        let Some(host) = self.host.element() else {
            debug!("splash host already gone");
            self.disarm_later(0, || {});
            return;
        };
        if let Some(styled) = host.dyn_ref::<HtmlElement>() {
            if let Err(err) = styled.style().set_property("opacity", "0") {
                debug!(error = ?err, "splash fade not applied");
            }
        }

        let driver = self.driver.clone();
        self.disarm_later(self.host.config.fade_ms, move || {
            host.remove();
            if let Some(driver) = driver {
                driver.refresh();
            }
            debug!("splash removed");
        });
    }
}

fn load(window: &Window, host: Rc<SplashHost>) {
    let request = window.fetch_with_str(&host.config.asset);

    let on_response = {
        let host = host.clone();
        Closure::once(move |response: JsValue| {
            let response = match response.dyn_into::<Response>() {
                Ok(response) => response,
                Err(other) => return host.fall_back(&describe(&other)),
            };
            if !response.ok() {
                return host.fall_back(&SceneError::SplashStatus(response.status()).to_string());
            }
            let text = match response.text() {
                Ok(text) => text,
                Err(err) => return host.fall_back(&describe(&err)),
            };
            let on_text = {
                let host = host.clone();
                Closure::once(move |markup: JsValue| host.inject(&markup.as_string().unwrap_or_default()))
            };
            let on_error = Closure::once(move |err: JsValue| host.fall_back(&describe(&err)));
            let _ = text.then2(&on_text, &on_error);
            on_text.forget();
            on_error.forget();
        })
    };
    let on_failure = Closure::once(move |err: JsValue| host.fall_back(&describe(&err)));

    let _ = request.then2(&on_response, &on_failure);
    on_response.forget();
    on_failure.forget();
}
