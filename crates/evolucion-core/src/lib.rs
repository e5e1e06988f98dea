// crates/evolucion-core/src/lib.rs
// Site behavior for Evolución (native + WASM compatible)
// No browser-only dependencies allowed here

pub mod carousel;
pub mod catalog;
pub mod config;
pub mod error;
pub mod header;
pub mod navigation;
pub mod preference;
pub mod timeline;

pub use carousel::{
    AutoplayGate, Carousel, Controls, KeyScope, Phase, Rejected, SlideCommand, Transition, WrapMode,
};
pub use catalog::{Catalog, GridContent, Project, ProjectCard};
pub use config::SiteConfig;
pub use error::{Result, SiteError};
pub use header::{MobileMenu, ScrollEffect};
pub use navigation::{
    AnchorDocument, AnchorResolver, ClickModifiers, LinkClick, NavAction, NavigationTarget, PageKind,
    PageLocation,
};
pub use preference::ViewMode;
pub use timeline::TimelineFilter;

/// Clamp a comparison slider input to a width percentage
pub fn comparison_percent(value: &str) -> Option<f64> {
    let value: f64 = value.trim().parse().ok()?;
    if value.is_nan() {
        return None;
    }
    Some(value.clamp(0.0, 100.0))
}
