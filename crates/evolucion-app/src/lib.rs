// crates/evolucion-app/src/lib.rs
// Evolución Arqueología site - Leptos WASM frontend (CSR)

use std::any::Any;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use evolucion_core::{Catalog, SiteError};

mod carousel;
mod components;
mod config;
mod dom;
mod header;
mod navigation;
mod storage;
mod timeline;

use carousel::HeroCarousel;
use components::{ProjectDetail, ProjectGrid};
use header::SiteHeader;
use navigation::AnchorNav;
use timeline::Timeline;

const GRID_CONTAINER_ID: &str = "projects-grid-container";
const DETAIL_CONTAINER_ID: &str = "project-detail";

// ============================================================================
// WASM Entry Point
// ============================================================================

#[wasm_bindgen(start)]
pub fn main() {
    // Set up better panic messages
    console_error_panic_hook::set_once();

    // Initialize logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("Evolución site script loaded");
}

/// Wire up every component present on the current page.
///
/// Each component looks for its own markup and is skipped when the page does
/// not have it, so the same call works on every page of the site.
#[wasm_bindgen]
pub fn mount() -> Result<Site, JsValue> {
    Site::mount().map_err(|e| JsValue::from_str(&e.to_string()))
}

// ============================================================================
// Site
// ============================================================================

/// Everything mounted on one page. Dropping it (or `teardown()` from
/// JavaScript) cancels timers, removes listeners and unmounts views.
#[wasm_bindgen]
pub struct Site {
    carousel: Option<HeroCarousel>,
    header: Option<SiteHeader>,
    anchors: Option<AnchorNav>,
    timeline: Option<Timeline>,
    /// Leptos unmount handles
    views: Vec<Box<dyn Any>>,
}

impl Site {
    fn mount() -> Result<Self, SiteError> {
        let window = dom::window()?;
        let document = dom::document()?;
        let config = config::load(&document);

        let mut site = Site {
            carousel: HeroCarousel::mount(&document, &config.carousel),
            header: SiteHeader::mount(&window, &document, &config.header, &config.navigation),
            anchors: Some(AnchorNav::mount(&window, &document, &config.navigation)),
            timeline: Timeline::mount(&document, &config.timeline),
            views: Vec::new(),
        };
        site.mount_views(&window, &document);

        log::info!("Site mounted");
        Ok(site)
    }

    fn mount_views(&mut self, window: &Window, document: &Document) {
        let grid = dom::html_by_id(document, GRID_CONTAINER_ID);
        let detail = dom::html_by_id(document, DETAIL_CONTAINER_ID);
        if grid.is_none() && detail.is_none() {
            return;
        }

        let catalog = load_catalog();

        if let Some(parent) = grid {
            parent.set_inner_html("");
            let catalog = catalog.clone();
            let handle = leptos::mount::mount_to(parent, move || {
                view! { <ProjectGrid catalog=catalog/> }
            });
            self.views.push(Box::new(handle));
        }

        if let Some(parent) = detail {
            let search = window.location().search().unwrap_or_default();
            parent.set_inner_html("");
            let handle = leptos::mount::mount_to(parent, move || {
                view! { <ProjectDetail catalog=catalog search=search/> }
            });
            self.views.push(Box::new(handle));
        }
    }
}

#[wasm_bindgen]
impl Site {
    /// Remove everything this site added. Safe to call more than once.
    pub fn teardown(&mut self) {
        if let Some(carousel) = self.carousel.take() {
            carousel.teardown();
        }
        if let Some(mut header) = self.header.take() {
            header.teardown();
        }
        if let Some(mut anchors) = self.anchors.take() {
            anchors.teardown();
        }
        if let Some(mut timeline) = self.timeline.take() {
            timeline.teardown();
        }
        self.views.clear();
        log::info!("Site torn down");
    }

    /// Index of the slide currently showing, if the page has a carousel
    #[wasm_bindgen(getter, js_name = currentSlide)]
    pub fn current_slide(&self) -> Option<u32> {
        self.carousel
            .as_ref()
            .and_then(|c| u32::try_from(c.current()).ok())
    }
}

fn load_catalog() -> Catalog {
    match Catalog::bundled() {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("Bundled project data is unreadable: {}", e);
            Catalog::default()
        }
    }
}
