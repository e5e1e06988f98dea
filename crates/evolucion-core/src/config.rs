// crates/evolucion-core/src/config.rs
// Site configuration, parsed from an inline TOML block on the page

use serde::Deserialize;

use crate::carousel::WrapMode;
use crate::error::Result;

/// Top-level config structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub carousel: CarouselConfig,
    pub navigation: NavigationConfig,
    pub header: HeaderConfig,
    pub timeline: TimelineConfig,
}

/// Hero carousel timings and behavior
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub autoplay_delay_ms: u32,
    /// Must match the CSS transition length of `.slide`
    pub transition_ms: u32,
    pub wrap: WrapMode,
    pub pause_on_hover: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_delay_ms: 7_000,
            transition_ms: 600,
            wrap: WrapMode::Wrap,
            pause_on_hover: true,
        }
    }
}

/// Anchor navigation and page classification
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub home_filename: String,
    /// Other last-segment names that also denote the home page
    pub home_aliases: Vec<String>,
    pub secondary_pages: Vec<String>,
    pub top_anchor: String,
    /// Gap left between the fixed header and a scrolled-to section
    pub scroll_margin: f64,
    pub header_selector: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            home_filename: "index.html".to_string(),
            home_aliases: vec![
                "index".to_string(),
                "index.htm".to_string(),
                "index.php".to_string(),
            ],
            secondary_pages: vec![
                "proyectos.html".to_string(),
                "proyectos".to_string(),
                "proyecto-detalle.html".to_string(),
                "contacto.html".to_string(),
                "acerca.html".to_string(),
            ],
            top_anchor: "#inicio".to_string(),
            scroll_margin: 20.0,
            header_selector: ".header".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub scrolled_threshold: f64,
    pub mobile_breakpoint: f64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold: 50.0,
            mobile_breakpoint: 768.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// IntersectionObserver threshold for revealing items
    pub reveal_threshold: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            reveal_threshold: 0.2,
        }
    }
}

impl SiteConfig {
    /// Parse config from TOML text. Missing sections and keys take defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Problems worth a warning. Values are kept as given.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let carousel = &self.carousel;

        if carousel.autoplay_delay_ms == 0 {
            problems.push("carousel.autoplay_delay_ms is 0".to_string());
        }
        if carousel.transition_ms >= carousel.autoplay_delay_ms {
            problems.push(format!(
                "carousel.transition_ms ({}) is not shorter than autoplay_delay_ms ({})",
                carousel.transition_ms, carousel.autoplay_delay_ms
            ));
        }
        if !self.navigation.top_anchor.starts_with('#') {
            problems.push(format!(
                "navigation.top_anchor {:?} does not start with '#'",
                self.navigation.top_anchor
            ));
        }
        if self.navigation.home_filename.is_empty() {
            problems.push("navigation.home_filename is empty".to_string());
        }
        if !(0.0..=1.0).contains(&self.timeline.reveal_threshold) {
            problems.push(format!(
                "timeline.reveal_threshold {} is outside 0..=1",
                self.timeline.reveal_threshold
            ));
        }

        problems
    }
}
