// crates/evolucion-app/src/timeline.rs
// Timeline section: category filter buttons and scroll reveal

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use evolucion_core::config::TimelineConfig;
use evolucion_core::{SiteError, TimelineFilter};

use crate::dom::{self, ListenerSet};

const FILTER: &str = ".timeline__filter";
const ITEM: &str = ".timeline__item";

/// Observer that adds `.visible` to items once they scroll into view
struct Reveal {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Reveal {
    fn new(threshold: f64) -> Result<Self, SiteError> {
        let callback = Closure::wrap(Box::new(
            |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        let target = entry.target();
                        dom::set_class(&target, "visible", true);
                        observer.unobserve(&target);
                    }
                }
            },
        ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        let observer = IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(dom::js_error)?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    fn observe(&self, item: &Element) {
        self.observer.observe(item);
    }

    fn unobserve(&self, item: &Element) {
        self.observer.unobserve(item);
    }
}

impl Drop for Reveal {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub struct Timeline {
    reveal: Option<Rc<Reveal>>,
    listeners: ListenerSet,
}

impl Timeline {
    pub fn mount(document: &Document, config: &TimelineConfig) -> Option<Self> {
        let items = dom::find_all(document, ITEM);
        if items.is_empty() {
            if dom::find(document, ".timeline").is_some() {
                log::warn!("Timeline has no items; filters and reveal disabled");
            }
            return None;
        }

        let reveal = match Reveal::new(config.reveal_threshold) {
            Ok(reveal) => {
                let reveal = Rc::new(reveal);
                items.iter().for_each(|item| reveal.observe(item));
                Some(reveal)
            }
            Err(e) => {
                log::warn!("Timeline reveal unavailable, showing all items: {}", e);
                items.iter().for_each(|item| dom::set_class(item, "visible", true));
                None
            }
        };

        let filters = dom::find_all(document, FILTER);
        let items = Rc::new(items);
        let buttons = Rc::new(filters.clone());
        let mut listeners = ListenerSet::new();

        for button in &filters {
            let filter = TimelineFilter::parse(button.get_attribute("data-filter").as_deref());
            let (items, buttons, reveal) = (items.clone(), buttons.clone(), reveal.clone());
            let this = button.clone();
            listeners.listen(button, "click", move |_: Event| {
                for other in buttons.iter() {
                    dom::set_class(other, "active", other == &this);
                }
                apply_filter(&items, &filter, reveal.as_deref());
            });
        }

        log::info!(
            "Timeline ready with {} items and {} filters",
            items.len(),
            filters.len()
        );
        Some(Self { reveal, listeners })
    }

    pub fn teardown(&mut self) {
        self.listeners.clear();
        self.reveal = None;
    }
}

fn apply_filter(items: &[Element], filter: &TimelineFilter, reveal: Option<&Reveal>) {
    for item in items {
        let show = filter.matches(item.get_attribute("data-category").as_deref());
        dom::set_visible(item, show);
        match reveal {
            Some(reveal) => {
                dom::set_class(item, "visible", false);
                if show {
                    reveal.observe(item);
                } else {
                    reveal.unobserve(item);
                }
            }
            None => dom::set_class(item, "visible", show),
        }
    }
}
