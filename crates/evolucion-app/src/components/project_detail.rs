// crates/evolucion-app/src/components/project_detail.rs
// proyecto-detalle.html: one project selected by ?id=<integer>

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use evolucion_core::catalog::or_dash;
use evolucion_core::{Catalog, Project, comparison_percent};

use super::CategoryBadge;

const INITIAL_COMPARISON: f64 = 50.0;

#[component]
pub fn ProjectDetail(catalog: Catalog, search: String) -> impl IntoView {
    provide_meta_context();

    match catalog.find_by_query(&search) {
        Ok(project) => {
            log::info!("Showing project {}: {}", project.id, project.title);
            view! { <ProjectView project=project.clone()/> }.into_any()
        }
        Err(e) => {
            log::warn!("Project detail unavailable: {}", e);
            view! { <ProjectNotFound/> }.into_any()
        }
    }
}

#[component]
fn ProjectNotFound() -> impl IntoView {
    view! {
        <section class="error-section">
            <div class="container">
                <div class="error-content">
                    <h1>"Proyecto No Encontrado"</h1>
                    <p>"Lo sentimos, no pudimos encontrar el proyecto solicitado."</p>
                    <a href="proyectos.html" class="btn btn--primary">"Volver a Proyectos"</a>
                </div>
            </div>
        </section>
    }
}

#[component]
fn ProjectView(project: Project) -> impl IntoView {
    let gallery: Vec<String> = project
        .gallery_images()
        .into_iter()
        .map(str::to_string)
        .collect();
    let full_description = project
        .full_description
        .clone()
        .unwrap_or_else(|| project.description.clone());
    let before = project
        .before_image
        .clone()
        .unwrap_or_else(|| project.image.clone());
    let after = project
        .after_image
        .clone()
        .unwrap_or_else(|| project.image.clone());

    view! {
        <Title text=project.page_title()/>
        <section class="project-hero">
            <div class="container">
                <CategoryBadge category=project.category.clone() class="project-hero__category"/>
                <h1 class="project-hero__title">{project.title.clone()}</h1>
                <p class="project-hero__description">{project.description.clone()}</p>
            </div>
        </section>
        <section class="project-info">
            <div class="container">
                <dl class="project-details">
                    <DetailItem label="Año" value=project.year.to_string()/>
                    <DetailItem label="Ubicación" value=or_dash(Some(&project.location))/>
                    <DetailItem label="Duración" value=or_dash(project.duration.as_deref())/>
                    <DetailItem label="Cliente" value=or_dash(project.client.as_deref())/>
                </dl>
                <div class="project-full-description">
                    <p>{full_description}</p>
                </div>
            </div>
        </section>
        <ComparisonSlider before=before after=after title=project.title.clone()/>
        <section class="project-gallery">
            <div class="container">
                <Gallery images=gallery/>
            </div>
        </section>
    }
}

#[component]
fn DetailItem(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="project-details__item">
            <dt>{label}</dt>
            <dd>{value}</dd>
        </div>
    }
}

// ============================================================================
// Before/After Comparison
// ============================================================================

#[component]
fn ComparisonSlider(before: String, after: String, title: String) -> impl IntoView {
    let (percent, set_percent) = signal(INITIAL_COMPARISON);

    let on_input = move |ev: web_sys::Event| {
        if let Some(value) = comparison_percent(&event_target_value(&ev)) {
            set_percent.set(value);
        }
    };

    view! {
        <section class="comparison">
            <div class="container comparison__frame">
                <div class="comparison-after">
                    <img src=after alt=format!("Después: {}", title)/>
                </div>
                <div class="comparison-before" style:width=move || format!("{}%", percent.get())>
                    <img src=before alt=format!("Antes: {}", title)/>
                </div>
                <input
                    type="range"
                    id="comparison-slider"
                    min="0"
                    max="100"
                    value=INITIAL_COMPARISON.to_string()
                    aria-label="Comparar antes y después"
                    on:input=on_input
                    on:touchstart=move |_| lock_body_scroll(true)
                    on:touchend=move |_| lock_body_scroll(false)
                />
            </div>
        </section>
    }
}

/// Keep the page from scrolling while the slider is dragged on touch screens
fn lock_body_scroll(lock: bool) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    let _ = body
        .style()
        .set_property("overflow", if lock { "hidden" } else { "" });
}

// ============================================================================
// Gallery
// ============================================================================

#[component]
fn Gallery(images: Vec<String>) -> impl IntoView {
    if images.is_empty() {
        return view! {
            <p class="no-gallery">"No hay imágenes adicionales para este proyecto."</p>
        }
        .into_any();
    }

    view! {
        <div class="gallery-grid">
            {images
                .into_iter()
                .enumerate()
                .map(|(index, url)| {
                    view! {
                        <div class="gallery-item">
                            <img
                                src=url
                                alt=format!("Imagen {} del proyecto", index + 1)
                                loading="lazy"
                            />
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
    .into_any()
}
