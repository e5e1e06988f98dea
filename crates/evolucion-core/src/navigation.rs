// crates/evolucion-core/src/navigation.rs
// Anchor navigation: page classification, in-page scroll, home redirect

use url::Url;

use crate::config::NavigationConfig;
use crate::error::{Result, SiteError};

/// Which kind of page the browser is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Home,
    Secondary,
}

impl PageKind {
    /// Parse the explicit `<body data-page="...">` marker
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker.trim().to_ascii_lowercase().as_str() {
            "home" => Some(PageKind::Home),
            "secondary" => Some(PageKind::Secondary),
            _ => None,
        }
    }
}

/// A `#fragment` link target. Never just `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor(String);

impl Anchor {
    pub fn parse(href: &str) -> Result<Self> {
        let href = href.trim();
        match href.strip_prefix('#') {
            Some(id) if !id.is_empty() && !id.contains(char::is_whitespace) => {
                Ok(Anchor(href.to_string()))
            }
            _ => Err(SiteError::InvalidAnchor(href.to_string())),
        }
    }

    /// The fragment including the leading `#`
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The element id the fragment points at
    pub fn id(&self) -> &str {
        &self.0[1..]
    }
}

/// Computed fresh for every anchor click
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    pub anchor: Anchor,
    pub page: PageKind,
}

impl NavigationTarget {
    pub fn is_home_page(&self) -> bool {
        self.page == PageKind::Home
    }
}

/// The parts of `window.location` the resolver needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    pub origin: String,
    pub pathname: String,
}

/// Read access to the page layout, implemented over the DOM by the app
pub trait AnchorDocument {
    /// Document-relative top of the element with this id, if it exists
    fn section_top(&self, id: &str) -> Option<f64>;

    /// Rendered height of the fixed header, 0 when there is none
    fn header_height(&self) -> f64;
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavAction {
    /// Smooth scroll on the current page. `fragment` is pushed onto history
    /// when present.
    Scroll { top: f64, fragment: Option<String> },
    /// Full page load of the home page with the fragment appended
    Redirect { url: String },
}

/// Class marking the header navigation links whose `#fragment` clicks are
/// resolved here. Other fragment links keep browser behavior.
pub const NAV_LINK_CLASS: &str = "header__nav-link";

/// Modifier keys held during a click
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickModifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl ClickModifiers {
    pub fn any(&self) -> bool {
        self.ctrl || self.meta || self.shift || self.alt
    }
}

/// A click on a link, as far as interception cares
#[derive(Debug, Clone, Copy)]
pub struct LinkClick<'a> {
    pub href: &'a str,
    /// The link carries [`NAV_LINK_CLASS`]
    pub nav_link: bool,
    pub modifiers: ClickModifiers,
}

impl LinkClick<'_> {
    /// Whether the click is taken over and handed to [`AnchorResolver`].
    /// Modified clicks (new tab, new window, download) stay with the browser.
    pub fn is_intercepted(&self) -> bool {
        self.nav_link && !self.modifiers.any() && self.href.trim_start().starts_with('#')
    }
}

/// Scroll position that puts a section just below the fixed header
pub fn scroll_offset(section_top: f64, header_height: f64, margin: f64) -> f64 {
    (section_top - header_height - margin).max(0.0)
}

/// Classify a path with the filename heuristic.
///
/// Empty last segment (including a trailing slash) or a home filename is home;
/// a listed secondary page is secondary; otherwise a segment without an
/// extension is treated as home.
pub fn classify_path(pathname: &str, config: &NavigationConfig) -> PageKind {
    let segment = pathname.rsplit('/').next().unwrap_or("");

    if segment.is_empty()
        || segment == config.home_filename
        || config.home_aliases.iter().any(|alias| alias == segment)
    {
        return PageKind::Home;
    }
    if config.secondary_pages.iter().any(|page| page == segment) {
        return PageKind::Secondary;
    }
    if segment.contains('.') {
        PageKind::Secondary
    } else {
        PageKind::Home
    }
}

/// Classify the page. An explicit marker wins over the path heuristic.
pub fn classify(pathname: &str, marker: Option<&str>, config: &NavigationConfig) -> PageKind {
    marker
        .and_then(PageKind::from_marker)
        .unwrap_or_else(|| classify_path(pathname, config))
}

/// URL of the home page in the current directory, with the fragment appended
pub fn home_url(location: &PageLocation, anchor: &Anchor, config: &NavigationConfig) -> String {
    let directory = match location.pathname.rfind('/') {
        Some(slash) => &location.pathname[..=slash],
        None => "/",
    };
    let path = collapse_slashes(&format!(
        "{}{}{}",
        directory,
        config.home_filename,
        anchor.as_str()
    ));

    match Url::parse(&location.origin).and_then(|base| base.join(&path)) {
        Ok(url) => url.to_string(),
        Err(_) => origin_relative(&location.origin, &path),
    }
}

fn origin_relative(origin: &str, path: &str) -> String {
    // file:// pages report an opaque "null" origin
    if origin.is_empty() || origin == "null" {
        return path.to_string();
    }
    let separator = if path.starts_with('/') { "" } else { "/" };
    format!("{}{}{}", origin.trim_end_matches('/'), separator, path)
}

fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_slash = false;
    for c in path.chars() {
        if c == '/' && previous_slash {
            continue;
        }
        previous_slash = c == '/';
        out.push(c);
    }
    out
}

/// Turns anchor link clicks into scroll or redirect actions
#[derive(Debug, Clone)]
pub struct AnchorResolver<'a> {
    config: &'a NavigationConfig,
}

impl<'a> AnchorResolver<'a> {
    pub fn new(config: &'a NavigationConfig) -> Self {
        Self { config }
    }

    pub fn target(
        &self,
        href: &str,
        location: &PageLocation,
        marker: Option<&str>,
    ) -> Result<NavigationTarget> {
        Ok(NavigationTarget {
            anchor: Anchor::parse(href)?,
            page: classify(&location.pathname, marker, self.config),
        })
    }

    pub fn resolve(
        &self,
        href: &str,
        location: &PageLocation,
        marker: Option<&str>,
        document: &dyn AnchorDocument,
    ) -> Result<NavAction> {
        let target = self.target(href, location, marker)?;

        if !target.is_home_page() {
            return Ok(NavAction::Redirect {
                url: home_url(location, &target.anchor, self.config),
            });
        }

        match document.section_top(target.anchor.id()) {
            Some(top) => Ok(NavAction::Scroll {
                top: scroll_offset(top, document.header_height(), self.config.scroll_margin),
                fragment: Some(target.anchor.as_str().to_string()),
            }),
            None if target.anchor.as_str() == self.config.top_anchor => Ok(NavAction::Scroll {
                top: 0.0,
                fragment: None,
            }),
            None => Err(SiteError::SectionNotFound(target.anchor.as_str().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeDocument {
        sections: HashMap<&'static str, f64>,
        header: f64,
    }

    impl AnchorDocument for FakeDocument {
        fn section_top(&self, id: &str) -> Option<f64> {
            self.sections.get(id).copied()
        }

        fn header_height(&self) -> f64 {
            self.header
        }
    }

    fn location(pathname: &str) -> PageLocation {
        PageLocation {
            origin: "https://evolucion.example".to_string(),
            pathname: pathname.to_string(),
        }
    }

    // ============================================================================
    // Anchor tests
    // ============================================================================

    #[test]
    fn test_anchor_parse() {
        let anchor = Anchor::parse("#contacto").unwrap();
        assert_eq!(anchor.as_str(), "#contacto");
        assert_eq!(anchor.id(), "contacto");
    }

    #[test]
    fn test_anchor_rejects_bare_hash() {
        assert!(matches!(Anchor::parse("#"), Err(SiteError::InvalidAnchor(_))));
        assert!(matches!(Anchor::parse(""), Err(SiteError::InvalidAnchor(_))));
        assert!(matches!(
            Anchor::parse("proyectos.html"),
            Err(SiteError::InvalidAnchor(_))
        ));
    }

    // ============================================================================
    // Classification tests
    // ============================================================================

    #[test]
    fn test_classify_home_paths() {
        let config = NavigationConfig::default();
        for path in ["/", "", "/site/", "/index.html", "/site/index.php", "/about"] {
            assert_eq!(classify_path(path, &config), PageKind::Home, "{path}");
        }
    }

    #[test]
    fn test_classify_secondary_paths() {
        let config = NavigationConfig::default();
        for path in ["/proyectos.html", "/site/proyectos", "/legal.html"] {
            assert_eq!(classify_path(path, &config), PageKind::Secondary, "{path}");
        }
    }

    #[test]
    fn test_marker_overrides_path() {
        let config = NavigationConfig::default();
        assert_eq!(
            classify("/proyectos.html", Some("home"), &config),
            PageKind::Home
        );
        assert_eq!(classify("/", Some("Secondary"), &config), PageKind::Secondary);
        assert_eq!(classify("/", Some("landing"), &config), PageKind::Home);
    }

    // ============================================================================
    // URL construction tests
    // ============================================================================

    #[test]
    fn test_home_url_preserves_directory() {
        let config = NavigationConfig::default();
        let anchor = Anchor::parse("#servicios").unwrap();
        assert_eq!(
            home_url(&location("/sitio/proyectos.html"), &anchor, &config),
            "https://evolucion.example/sitio/index.html#servicios"
        );
    }

    #[test]
    fn test_home_url_collapses_slashes() {
        let config = NavigationConfig::default();
        let anchor = Anchor::parse("#contacto").unwrap();
        assert_eq!(
            home_url(&location("//sitio//proyectos.html"), &anchor, &config),
            "https://evolucion.example/sitio/index.html#contacto"
        );
    }

    #[test]
    fn test_home_url_falls_back_for_opaque_origin() {
        let config = NavigationConfig::default();
        let anchor = Anchor::parse("#contacto").unwrap();
        let file_page = PageLocation {
            origin: "null".to_string(),
            pathname: "/home/user/sitio/proyectos.html".to_string(),
        };
        assert_eq!(
            home_url(&file_page, &anchor, &config),
            "/home/user/sitio/index.html#contacto"
        );
    }

    #[test]
    fn test_origin_relative_concatenation() {
        assert_eq!(origin_relative("http://host/", "/a.html"), "http://host/a.html");
        assert_eq!(origin_relative("http://host", "a.html"), "http://host/a.html");
    }

    // ============================================================================
    // Interception tests
    // ============================================================================

    #[test]
    fn test_only_header_nav_links_are_intercepted() {
        let nav = LinkClick {
            href: "#contacto",
            nav_link: true,
            modifiers: ClickModifiers::default(),
        };
        assert!(nav.is_intercepted());

        // An in-page link on a detail page keeps scrolling locally
        let local = LinkClick {
            href: "#galeria",
            nav_link: false,
            ..nav
        };
        assert!(!local.is_intercepted());

        let external = LinkClick {
            href: "proyectos.html",
            ..nav
        };
        assert!(!external.is_intercepted());
    }

    #[test]
    fn test_bare_hash_nav_link_is_swallowed() {
        let click = LinkClick {
            href: "#",
            nav_link: true,
            modifiers: ClickModifiers::default(),
        };
        assert!(click.is_intercepted());
        assert!(matches!(Anchor::parse(click.href), Err(SiteError::InvalidAnchor(_))));
    }

    #[test]
    fn test_modified_clicks_stay_with_browser() {
        let base = LinkClick {
            href: "#contacto",
            nav_link: true,
            modifiers: ClickModifiers::default(),
        };
        for modifiers in [
            ClickModifiers { ctrl: true, ..Default::default() },
            ClickModifiers { meta: true, ..Default::default() },
            ClickModifiers { shift: true, ..Default::default() },
        ] {
            let click = LinkClick { modifiers, ..base };
            assert!(!click.is_intercepted(), "{modifiers:?}");
        }
    }

    // ============================================================================
    // Resolve tests
    // ============================================================================

    #[test]
    fn test_resolve_scrolls_below_header() {
        let config = NavigationConfig::default();
        let document = FakeDocument {
            sections: HashMap::from([("acerca", 900.0)]),
            header: 80.0,
        };
        let action = AnchorResolver::new(&config)
            .resolve("#acerca", &location("/"), None, &document)
            .unwrap();
        assert_eq!(
            action,
            NavAction::Scroll {
                top: 800.0,
                fragment: Some("#acerca".to_string())
            }
        );
    }

    #[test]
    fn test_resolve_clamps_negative_offset() {
        let config = NavigationConfig::default();
        let document = FakeDocument {
            sections: HashMap::from([("inicio", 10.0)]),
            header: 80.0,
        };
        let action = AnchorResolver::new(&config)
            .resolve("#inicio", &location("/index.html"), None, &document)
            .unwrap();
        assert!(matches!(action, NavAction::Scroll { top, .. } if top == 0.0));
    }

    #[test]
    fn test_resolve_missing_section() {
        let config = NavigationConfig::default();
        let document = FakeDocument {
            sections: HashMap::new(),
            header: 0.0,
        };
        let err = AnchorResolver::new(&config)
            .resolve("#equipo", &location("/"), None, &document)
            .unwrap_err();
        assert!(matches!(err, SiteError::SectionNotFound(ref s) if s == "#equipo"));
    }

    #[test]
    fn test_resolve_redirects_from_secondary() {
        let config = NavigationConfig::default();
        let document = FakeDocument {
            sections: HashMap::from([("contacto", 100.0)]),
            header: 0.0,
        };
        let action = AnchorResolver::new(&config)
            .resolve("#contacto", &location("/proyectos.html"), None, &document)
            .unwrap();
        assert_eq!(
            action,
            NavAction::Redirect {
                url: "https://evolucion.example/index.html#contacto".to_string()
            }
        );
    }
}
