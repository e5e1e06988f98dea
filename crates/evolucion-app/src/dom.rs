// crates/evolucion-app/src/dom.rs
// DOM lookups, class/attribute helpers, and listener registration

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, NodeList, Window,
};

use evolucion_core::SiteError;

pub fn js_error(err: JsValue) -> SiteError {
    SiteError::Dom(format!("{:?}", err))
}

pub fn window() -> Result<Window, SiteError> {
    web_sys::window().ok_or_else(|| SiteError::Dom("no window".to_string()))
}

pub fn document() -> Result<Document, SiteError> {
    window()?
        .document()
        .ok_or_else(|| SiteError::Dom("no document".to_string()))
}

// ============================================================================
// Lookups
// ============================================================================

pub fn find(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn find_all(document: &Document, selector: &str) -> Vec<Element> {
    document
        .query_selector_all(selector)
        .map(|list| elements(&list))
        .unwrap_or_default()
}

pub fn find_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(|list| elements(&list))
        .unwrap_or_default()
}

pub fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

// ============================================================================
// Mutation helpers (failures here are cosmetic and ignored)
// ============================================================================

pub fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

pub fn set_attr(element: &Element, name: &str, value: &str) {
    let _ = element.set_attribute(name, value);
}

pub fn set_flag(element: &Element, name: &str, on: bool) {
    set_attr(element, name, if on { "true" } else { "false" });
}

pub fn set_visible(element: &Element, visible: bool) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html
            .style()
            .set_property("display", if visible { "block" } else { "none" });
    }
}

// ============================================================================
// Listener registration
// ============================================================================

struct Registration {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Event listeners owned by one component. `clear()` (or drop) removes
/// exactly the listeners that were added through this set.
#[derive(Default)]
pub struct ListenerSet {
    registrations: Vec<Registration>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen<F>(&mut self, target: &EventTarget, event: &'static str, handler: F)
    where
        F: FnMut(Event) + 'static,
    {
        self.register(target, event, handler, false);
    }

    /// Same as `listen`, flagged passive (scroll and resize)
    pub fn listen_passive<F>(&mut self, target: &EventTarget, event: &'static str, handler: F)
    where
        F: FnMut(Event) + 'static,
    {
        self.register(target, event, handler, true);
    }

    fn register<F>(&mut self, target: &EventTarget, event: &'static str, handler: F, passive: bool)
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);

        let added = if passive {
            let options = AddEventListenerOptions::new();
            options.set_passive(true);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                event,
                callback.as_ref().unchecked_ref(),
                &options,
            )
        } else {
            target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        };

        match added {
            Ok(()) => self.registrations.push(Registration {
                target: target.clone(),
                event,
                callback,
            }),
            Err(e) => log::warn!("Failed to add {} listener: {:?}", event, e),
        }
    }

    pub fn clear(&mut self) {
        for registration in self.registrations.drain(..) {
            let _ = registration.target.remove_event_listener_with_callback(
                registration.event,
                registration.callback.as_ref().unchecked_ref(),
            );
        }
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.clear();
    }
}
