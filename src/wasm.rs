//! WASM entry point for the browser.
//!
//! On module start the spawner is bound to the page's `DOMContentLoaded`
//! signal (or run right away when the page has already parsed) and fills
//! `#particles` once. Failures are reported on the browser console and
//! never retried. The automatic start and `spawnParticles` share one
//! [`SpawnGate`], so a page never gets more than one field.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document as DomDocument, Element, HtmlElement};

use crate::config::ParticlesConfig;
use crate::document::Document;
use crate::error::SpawnError;
use crate::spawner::{ParticleSpawner, SpawnGate, SpawnReport};

thread_local! {
    static PAGE_GATE: SpawnGate = const { SpawnGate::new() };
}

/// [`Document`] backed by the live browser DOM.
pub struct WebDocument {
    inner: DomDocument,
}

impl WebDocument {
    pub fn new(inner: DomDocument) -> Self {
        Self { inner }
    }

    /// The document of the current window, if running in a page.
    pub fn current() -> Result<Self, SpawnError> {
        web_sys::window()
            .and_then(|w| w.document())
            .map(Self::new)
            .ok_or_else(|| SpawnError::dom("window.document", "no document available"))
    }

    fn is_loading(&self) -> bool {
        self.inner.ready_state() == "loading"
    }
}

fn js_error(operation: &'static str, err: JsValue) -> SpawnError {
    let message = err.as_string().unwrap_or_else(|| format!("{:?}", err));
    SpawnError::dom(operation, message)
}

impl Document for WebDocument {
    type Element = Element;

    fn get_element_by_id(&self, id: &str) -> Option<Element> {
        self.inner.get_element_by_id(id)
    }

    fn create_element(&mut self, tag: &str) -> Result<Element, SpawnError> {
        self.inner.create_element(tag).map_err(|e| js_error("createElement", e))
    }

    fn add_class(&mut self, element: &Element, class: &str) -> Result<(), SpawnError> {
        element.class_list().add_1(class).map_err(|e| js_error("classList.add", e))
    }

    fn set_style(&mut self, element: &Element, property: &str, value: &str) -> Result<(), SpawnError> {
        let html = element
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| SpawnError::dom("style.setProperty", "element is not an HTMLElement"))?;
        html.style().set_property(property, value).map_err(|e| js_error("style.setProperty", e))
    }

    fn append_child(&mut self, parent: &Element, child: &Element) -> Result<(), SpawnError> {
        parent.append_child(child).map(|_| ()).map_err(|e| js_error("appendChild", e))
    }
}

fn report_failure(err: &SpawnError) {
    web_sys::console::error_1(&JsValue::from_str(&format!("particlefield: {}", err)));
}

fn spawn_into(mut doc: WebDocument, config: &ParticlesConfig) -> Result<SpawnReport, SpawnError> {
    PAGE_GATE.with(|gate| {
        gate.run(|| {
            let spawner = ParticleSpawner::new(config)
                .map_err(|e| SpawnError::InvalidConfig(e.to_string()))?;
            spawner.spawn_with_entropy(&mut doc)
        })
    })
}

/// Module start: install the panic hook and schedule the default burst.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let doc = match WebDocument::current() {
        Ok(doc) => doc,
        Err(err) => {
            report_failure(&err);
            return;
        }
    };

    if !doc.is_loading() {
        if let Err(err) = spawn_into(doc, &ParticlesConfig::default()) {
            report_failure(&err);
        }
        return;
    }

    let target = doc.inner.clone();
    let listener = Closure::once_into_js(move || {
        if let Err(err) = spawn_into(doc, &ParticlesConfig::default()) {
            report_failure(&err);
        }
    });
    if let Err(err) =
        target.add_event_listener_with_callback("DOMContentLoaded", listener.unchecked_ref())
    {
        report_failure(&js_error("addEventListener", err));
    }
}

/// Explicit initialization for hosts that load the module themselves.
///
/// Spawns the default field into the element with `container_id`
/// (`"particles"` when omitted) and returns the number of particles created.
/// Throws if a field was already spawned on this page, by the automatic
/// start or an earlier call.
#[wasm_bindgen(js_name = spawnParticles)]
pub fn spawn_particles(container_id: Option<String>) -> Result<u32, JsValue> {
    let mut config = ParticlesConfig::default();
    if let Some(id) = container_id {
        config.spawner.container_id = id;
    }

    let doc = WebDocument::current().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let report = spawn_into(doc, &config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    u32::try_from(report.particles.len())
        .map_err(|_| JsValue::from_str("particle count does not fit in u32"))
}
