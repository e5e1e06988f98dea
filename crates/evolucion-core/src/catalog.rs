// crates/evolucion-core/src/catalog.rs
// Project catalog: read-only dataset, id lookup, grid and detail models

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiteError};

const BUNDLED_PROJECTS: &str = include_str!("../data/projects.json");

/// Characters of description shown on a grid card
pub const EXCERPT_CHARS: usize = 100;

pub const NO_PROJECTS_MESSAGE: &str = "No hay proyectos para mostrar en este momento.";

// ═══════════════════════════════════════
// DOMAIN TYPES
// ═══════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub full_description: Option<String>,
    pub image: String,
    #[serde(default)]
    pub before_image: Option<String>,
    #[serde(default)]
    pub after_image: Option<String>,
    pub year: i32,
    pub location: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
}

impl Project {
    /// Lowercased category, used as `data-category`
    pub fn category_slug(&self) -> String {
        self.category.to_lowercase()
    }

    /// Description cut to `max_chars` characters, with `...` when cut
    pub fn excerpt(&self, max_chars: usize) -> String {
        match self.description.char_indices().nth(max_chars) {
            Some((byte, _)) => format!("{}...", self.description[..byte].trim_end()),
            None => self.description.clone(),
        }
    }

    /// Gallery URLs that are not blank
    pub fn gallery_images(&self) -> Vec<&str> {
        self.gallery
            .iter()
            .map(|url| url.trim())
            .filter(|url| !url.is_empty())
            .collect()
    }

    pub fn detail_href(&self) -> String {
        format!("proyecto-detalle.html?id={}", self.id)
    }

    pub fn page_title(&self) -> String {
        format!("{} - Evolución Arqueología", self.title)
    }
}

/// Display value for an optional detail field
pub fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

// ═══════════════════════════════════════
// CATALOG
// ═══════════════════════════════════════

/// Immutable, ordered project dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    projects: Vec<Project>,
}

impl Catalog {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let projects: Vec<Project> = serde_json::from_str(json)?;
        Ok(Self::new(projects))
    }

    /// The dataset compiled into the binary
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_PROJECTS)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    pub fn get(&self, id: u32) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Look up the project named by a `?id=<integer>` query string
    pub fn find_by_query(&self, search: &str) -> Result<&Project> {
        let id = parse_project_id(search)?;
        self.get(id).ok_or(SiteError::ProjectNotFound(id))
    }

    pub fn grid(&self) -> GridContent {
        if self.is_empty() {
            GridContent::Empty {
                message: NO_PROJECTS_MESSAGE,
            }
        } else {
            GridContent::Cards(self.projects.iter().map(ProjectCard::from).collect())
        }
    }
}

/// Extract the project id from a query string such as `?id=3`
pub fn parse_project_id(search: &str) -> Result<u32> {
    let query = search.trim_start_matches('?');
    let raw = url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
        .ok_or(SiteError::ProjectIdMissing)?;

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SiteError::ProjectIdMissing);
    }
    trimmed
        .parse()
        .map_err(|_| SiteError::ProjectIdInvalid(raw.clone()))
}

// ═══════════════════════════════════════
// GRID MODEL
// ═══════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum GridContent {
    Empty { message: &'static str },
    Cards(Vec<ProjectCard>),
}

impl GridContent {
    pub fn card_count(&self) -> usize {
        match self {
            GridContent::Empty { .. } => 0,
            GridContent::Cards(cards) => cards.len(),
        }
    }
}

/// Everything a grid card shows
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectCard {
    pub id: u32,
    pub href: String,
    pub title: String,
    pub category: String,
    pub category_slug: String,
    pub image: String,
    pub excerpt: String,
    pub year: i32,
    pub location: String,
}

impl From<&Project> for ProjectCard {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            href: project.detail_href(),
            title: project.title.clone(),
            category: project.category.clone(),
            category_slug: project.category_slug(),
            image: project.image.clone(),
            excerpt: project.excerpt(EXCERPT_CHARS),
            year: project.year,
            location: project.location.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: u32, description: &str) -> Project {
        Project {
            id,
            title: format!("Proyecto {id}"),
            category: "Arqueología".to_string(),
            description: description.to_string(),
            full_description: None,
            image: "https://img.example/p.jpg".to_string(),
            before_image: None,
            after_image: None,
            year: 2020,
            location: "Mérida, España".to_string(),
            duration: None,
            client: None,
            gallery: vec![],
        }
    }

    // ============================================================================
    // Dataset tests
    // ============================================================================

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = Catalog::bundled().unwrap();
        assert!(!catalog.is_empty());
        let ids: Vec<u32> = catalog.iter().map(|p| p.id).collect();
        let mut unique = ids.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_from_json_optional_fields() {
        let json = r#"[{"id": 7, "title": "T", "category": "C", "description": "D",
            "image": "i.jpg", "year": 2001, "location": "L"}]"#;
        let catalog = Catalog::from_json(json).unwrap();
        let p = catalog.get(7).unwrap();
        assert_eq!(p.full_description, None);
        assert!(p.gallery.is_empty());
    }

    #[test]
    fn test_from_json_camel_case() {
        let json = r#"[{"id": 1, "title": "T", "category": "C", "description": "D",
            "fullDescription": "Full", "image": "i.jpg", "beforeImage": "b.jpg",
            "year": 2001, "location": "L"}]"#;
        let catalog = Catalog::from_json(json).unwrap();
        let p = catalog.get(1).unwrap();
        assert_eq!(p.full_description.as_deref(), Some("Full"));
        assert_eq!(p.before_image.as_deref(), Some("b.jpg"));
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            Catalog::from_json("{\"id\": 1}"),
            Err(SiteError::Json(_))
        ));
    }

    // ============================================================================
    // Query string tests
    // ============================================================================

    #[test]
    fn test_parse_project_id() {
        assert_eq!(parse_project_id("?id=3").unwrap(), 3);
        assert_eq!(parse_project_id("ref=home&id=12").unwrap(), 12);
        assert_eq!(parse_project_id("?id=%204").unwrap(), 4);
    }

    #[test]
    fn test_parse_project_id_missing() {
        assert!(matches!(parse_project_id(""), Err(SiteError::ProjectIdMissing)));
        assert!(matches!(parse_project_id("?id="), Err(SiteError::ProjectIdMissing)));
        assert!(matches!(
            parse_project_id("?ref=home"),
            Err(SiteError::ProjectIdMissing)
        ));
    }

    #[test]
    fn test_parse_project_id_not_numeric() {
        assert!(matches!(
            parse_project_id("?id=abc"),
            Err(SiteError::ProjectIdInvalid(ref raw)) if raw == "abc"
        ));
        assert!(matches!(
            parse_project_id("?id=-1"),
            Err(SiteError::ProjectIdInvalid(_))
        ));
    }

    #[test]
    fn test_find_by_query() {
        let catalog = Catalog::new(vec![project(1, "a"), project(2, "b")]);
        assert_eq!(catalog.find_by_query("?id=2").unwrap().id, 2);
        assert!(matches!(
            catalog.find_by_query("?id=9"),
            Err(SiteError::ProjectNotFound(9))
        ));
    }

    // ============================================================================
    // Card model tests
    // ============================================================================

    #[test]
    fn test_excerpt_cuts_on_char_boundary() {
        let long = "á".repeat(150);
        let p = project(1, &long);
        let excerpt = p.excerpt(EXCERPT_CHARS);
        assert!(excerpt.ends_with("..."));
        assert_eq!(excerpt.chars().count(), EXCERPT_CHARS + 3);
    }

    #[test]
    fn test_excerpt_short_description_unchanged() {
        let p = project(1, "Corta.");
        assert_eq!(p.excerpt(EXCERPT_CHARS), "Corta.");
    }

    #[test]
    fn test_card_from_project() {
        let card = ProjectCard::from(&project(4, "desc"));
        assert_eq!(card.href, "proyecto-detalle.html?id=4");
        assert_eq!(card.category_slug, "arqueología");
    }

    #[test]
    fn test_gallery_skips_blank_urls() {
        let mut p = project(1, "d");
        p.gallery = vec!["a.jpg".to_string(), "  ".to_string(), String::new()];
        assert_eq!(p.gallery_images(), vec!["a.jpg"]);
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(Some("24 meses")), "24 meses");
        assert_eq!(or_dash(Some(" ")), "-");
        assert_eq!(or_dash(None), "-");
    }
}
