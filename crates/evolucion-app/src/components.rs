// crates/evolucion-app/src/components.rs
// Leptos components for the projects pages

use leptos::prelude::*;

mod project_detail;
mod project_grid;

pub use project_detail::ProjectDetail;
pub use project_grid::ProjectGrid;

// ============================================================================
// Shared Components
// ============================================================================

#[component]
fn CategoryBadge(category: String, #[prop(into)] class: String) -> impl IntoView {
    view! { <span class=class>{category}</span> }
}
