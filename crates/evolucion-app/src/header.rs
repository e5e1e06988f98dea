// crates/evolucion-app/src/header.rs
// Fixed header: scrolled state and the mobile navigation menu

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, Node, Window};

use evolucion_core::config::{HeaderConfig, NavigationConfig};
use evolucion_core::{MobileMenu, ScrollEffect};

use crate::dom::{self, ListenerSet};

const TOGGLE: &str = ".header__toggle";
const NAV: &str = ".header__nav";
const NAV_LINK: &str = ".header__nav-link";

struct MenuMarkup {
    toggle: Element,
    nav: Element,
    body: Option<HtmlElement>,
}

impl MenuMarkup {
    fn render(&self, open: bool) {
        dom::set_class(&self.nav, "active", open);
        dom::set_class(&self.toggle, "active", open);
        dom::set_flag(&self.toggle, "aria-expanded", open);
        if let Some(body) = &self.body {
            dom::set_class(body, "no-scroll", open);
        }
    }
}

pub struct SiteHeader {
    listeners: ListenerSet,
}

impl SiteHeader {
    pub fn mount(
        window: &Window,
        document: &Document,
        config: &HeaderConfig,
        navigation: &NavigationConfig,
    ) -> Option<Self> {
        let Some(header) = dom::find(document, &navigation.header_selector) else {
            log::debug!("No header on this page");
            return None;
        };

        let mut listeners = ListenerSet::new();
        wire_scroll_effect(&mut listeners, window, header, config.scrolled_threshold);

        match (dom::find(document, TOGGLE), dom::find(document, NAV)) {
            (Some(toggle), Some(nav)) => {
                let markup = MenuMarkup {
                    toggle,
                    nav,
                    body: document.body(),
                };
                wire_menu(&mut listeners, window, document, markup, config.mobile_breakpoint);
            }
            _ => log::warn!("Mobile menu markup missing; header menu disabled"),
        }

        log::info!("Header ready");
        Some(Self { listeners })
    }

    pub fn teardown(&mut self) {
        self.listeners.clear();
    }
}

// ============================================================================
// Scroll effect
// ============================================================================

fn wire_scroll_effect(listeners: &mut ListenerSet, window: &Window, header: Element, threshold: f64) {
    let effect = Rc::new(RefCell::new(ScrollEffect::new(threshold)));

    let refresh = {
        let window = window.clone();
        move || {
            let y = window.scroll_y().unwrap_or(0.0);
            if let Some(scrolled) = effect.borrow_mut().update(y) {
                dom::set_class(&header, "scrolled", scrolled);
            }
        }
    };

    refresh();
    let on_scroll = refresh.clone();
    listeners.listen_passive(window, "scroll", move |_: Event| on_scroll());
    let on_resize = refresh;
    listeners.listen_passive(window, "resize", move |_: Event| on_resize());
}

// ============================================================================
// Mobile menu
// ============================================================================

fn wire_menu(
    listeners: &mut ListenerSet,
    window: &Window,
    document: &Document,
    markup: MenuMarkup,
    breakpoint: f64,
) {
    let markup = Rc::new(markup);
    let menu = Rc::new(RefCell::new(MobileMenu::new(breakpoint)));
    markup.render(false);

    {
        let (markup, menu) = (markup.clone(), menu.clone());
        let toggle = markup.toggle.clone();
        listeners.listen(&toggle, "click", move |event: Event| {
            event.stop_propagation();
            let open = menu.borrow_mut().toggle();
            markup.render(open);
        });
    }

    for link in dom::find_all_in(&markup.nav, NAV_LINK) {
        let (markup, menu) = (markup.clone(), menu.clone());
        listeners.listen(&link, "click", move |_: Event| {
            if menu.borrow_mut().close() {
                markup.render(false);
            }
        });
    }

    {
        let (markup, menu) = (markup.clone(), menu.clone());
        listeners.listen(document, "click", move |event: Event| {
            if !menu.borrow().is_open() {
                return;
            }
            let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
            let inside = target.is_some_and(|node| {
                markup.nav.contains(Some(&node)) || markup.toggle.contains(Some(&node))
            });
            if !inside && menu.borrow_mut().close() {
                markup.render(false);
            }
        });
    }

    let win = window.clone();
    listeners.listen_passive(window, "resize", move |_: Event| {
        let width = win
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0);
        if menu.borrow_mut().close_for_width(width) {
            markup.render(false);
        }
    });
}
