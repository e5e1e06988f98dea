// crates/evolucion-app/src/navigation.rs
// Anchor link interception: in-page smooth scroll or redirect to home

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlElement, MouseEvent, ScrollBehavior, ScrollToOptions, Window,
};

use evolucion_core::config::NavigationConfig;
use evolucion_core::navigation::NAV_LINK_CLASS;
use evolucion_core::{
    AnchorDocument, AnchorResolver, ClickModifiers, LinkClick, NavAction, PageLocation, SiteError,
};

use crate::dom::{self, ListenerSet};

const ANCHOR_LINK: &str = "a[href^=\"#\"]";

/// Live page geometry read through the DOM
pub struct PageLayout<'a> {
    window: &'a Window,
    document: &'a Document,
    header_selector: &'a str,
}

impl<'a> PageLayout<'a> {
    pub fn new(window: &'a Window, document: &'a Document, header_selector: &'a str) -> Self {
        Self {
            window,
            document,
            header_selector,
        }
    }
}

impl AnchorDocument for PageLayout<'_> {
    fn section_top(&self, id: &str) -> Option<f64> {
        let element = self.document.get_element_by_id(id)?;
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        Some(element.get_bounding_client_rect().top() + scroll_y)
    }

    fn header_height(&self) -> f64 {
        dom::find(self.document, self.header_selector)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .map(|el| f64::from(el.offset_height()))
            .unwrap_or(0.0)
    }
}

pub fn current_location(window: &Window) -> Result<PageLocation, SiteError> {
    let location = window.location();
    Ok(PageLocation {
        origin: location.origin().map_err(dom::js_error)?,
        pathname: location.pathname().map_err(dom::js_error)?,
    })
}

/// `<body data-page="...">`, if the page declares one
pub fn page_marker(document: &Document) -> Option<String> {
    document.body()?.get_attribute("data-page")
}

/// Intercepts `#fragment` clicks on the header navigation links
pub struct AnchorNav {
    listeners: ListenerSet,
}

impl AnchorNav {
    pub fn mount(window: &Window, document: &Document, config: &NavigationConfig) -> Self {
        let config = Rc::new(config.clone());
        let mut listeners = ListenerSet::new();

        let win = window.clone();
        let doc = document.clone();
        listeners.listen(document, "click", move |event: Event| {
            let Some(link) = anchor_link(&event) else {
                return;
            };
            let href = link.get_attribute("href").unwrap_or_default();
            let click = LinkClick {
                href: &href,
                nav_link: link.class_list().contains(NAV_LINK_CLASS),
                modifiers: modifiers(&event),
            };
            if !click.is_intercepted() {
                return;
            }
            // The link is ours from here on, even when it resolves to nothing
            event.prevent_default();
            navigate(&win, &doc, &config, &href);
        });

        log::info!("Anchor navigation ready");
        Self { listeners }
    }

    pub fn teardown(&mut self) {
        self.listeners.clear();
    }
}

fn anchor_link(event: &Event) -> Option<Element> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    target.closest(ANCHOR_LINK).ok().flatten()
}

fn modifiers(event: &Event) -> ClickModifiers {
    event
        .dyn_ref::<MouseEvent>()
        .map(|mouse| ClickModifiers {
            ctrl: mouse.ctrl_key(),
            meta: mouse.meta_key(),
            shift: mouse.shift_key(),
            alt: mouse.alt_key(),
        })
        .unwrap_or_default()
}

/// Resolve and perform one anchor navigation
pub fn navigate(window: &Window, document: &Document, config: &NavigationConfig, href: &str) {
    let location = match current_location(window) {
        Ok(location) => location,
        Err(e) => {
            log::error!("Cannot read page location: {}", e);
            return;
        }
    };
    let marker = page_marker(document);
    let layout = PageLayout::new(window, document, &config.header_selector);

    match AnchorResolver::new(config).resolve(href, &location, marker.as_deref(), &layout) {
        Ok(NavAction::Scroll { top, fragment }) => {
            log::debug!("Scrolling to {} for {}", top, href);
            smooth_scroll(window, top);
            if let Some(fragment) = fragment {
                push_fragment(window, &fragment);
            }
        }
        Ok(NavAction::Redirect { url }) => {
            log::debug!("Redirecting to {}", url);
            if let Err(e) = window.location().set_href(&url) {
                log::warn!("Redirect to {} failed: {:?}", url, e);
            }
        }
        Err(SiteError::InvalidAnchor(_)) => {}
        Err(e) => log::debug!("Anchor {} ignored: {}", href, e),
    }
}

fn smooth_scroll(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

fn push_fragment(window: &Window, fragment: &str) {
    match window.history() {
        Ok(history) => {
            if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(fragment)) {
                log::warn!("Failed to push {} onto history: {:?}", fragment, e);
            }
        }
        Err(e) => log::warn!("History unavailable: {:?}", e),
    }
}
