// crates/evolucion-core/src/timeline.rs
// Category filter for the "about" timeline

/// Value of a `data-filter` attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineFilter {
    All,
    Category(String),
}

impl TimelineFilter {
    /// Missing, empty and `all` filters show everything
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => TimelineFilter::All,
            Some(v) if v.eq_ignore_ascii_case("all") => TimelineFilter::All,
            Some(v) => TimelineFilter::Category(v.to_string()),
        }
    }

    /// Whether an item with this `data-category` stays visible
    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            TimelineFilter::All => true,
            TimelineFilter::Category(wanted) => category.is_some_and(|c| c.trim() == wanted),
        }
    }
}
