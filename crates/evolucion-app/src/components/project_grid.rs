// crates/evolucion-app/src/components/project_grid.rs
// Project cards for proyectos.html with a grid/list view toggle

use leptos::prelude::*;

use evolucion_core::{Catalog, GridContent, ProjectCard, ViewMode};

use super::CategoryBadge;
use crate::storage;

#[component]
pub fn ProjectGrid(catalog: Catalog) -> impl IntoView {
    match catalog.grid() {
        GridContent::Empty { message } => {
            log::warn!("Project catalog is empty");
            view! { <p class="no-projects">{message}</p> }.into_any()
        }
        GridContent::Cards(cards) => {
            log::info!("Rendering {} project cards", cards.len());
            view! { <ProjectCards cards=cards/> }.into_any()
        }
    }
}

#[component]
fn ProjectCards(cards: Vec<ProjectCard>) -> impl IntoView {
    let (mode, set_mode) = signal(storage::load_view_mode());

    let toggle = move |_| {
        let next = mode.get_untracked().toggled();
        set_mode.set(next);
        storage::save_view_mode(next);
    };

    view! {
        <div class="projects-toolbar">
            <button
                type="button"
                class="projects-view-toggle"
                aria-pressed=move || (mode.get() == ViewMode::List).to_string()
                on:click=toggle
            >
                {move || match mode.get() {
                    ViewMode::Grid => "Ver como lista",
                    ViewMode::List => "Ver como cuadrícula",
                }}
            </button>
        </div>
        <div class=move || format!("projects-grid projects-grid--{}", mode.get())>
            {cards
                .into_iter()
                .map(|card| view! { <ProjectCardLink card=card/> })
                .collect_view()}
        </div>
    }
}

#[component]
fn ProjectCardLink(card: ProjectCard) -> impl IntoView {
    let alt = format!("Imagen de {}", card.title);

    view! {
        <a
            href=card.href
            class="project-card"
            data-category=card.category_slug
            data-project-id=card.id.to_string()
        >
            <div class="project-card__image-container">
                <img src=card.image alt=alt class="project-card__image" loading="lazy"/>
                <CategoryBadge category=card.category class="project-card__category"/>
            </div>
            <div class="project-card__content">
                <h3 class="project-card__title">{card.title}</h3>
                <p class="project-card__description">{card.excerpt}</p>
                <div class="project-card__meta">
                    <span class="project-card__year">{card.year}</span>
                    <span class="project-card__location">{card.location}</span>
                </div>
            </div>
        </a>
    }
}
