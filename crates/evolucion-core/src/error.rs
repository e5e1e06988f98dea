// crates/evolucion-core/src/error.rs
// Error types for the Evolución site behavior

use thiserror::Error;

/// Main error type for site behavior
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("missing markup: {0}")]
    MissingMarkup(String),

    #[error("indicator count {indicators} does not match slide count {slides}")]
    IndicatorMismatch { slides: usize, indicators: usize },

    #[error("invalid anchor: {0:?}")]
    InvalidAnchor(String),

    #[error("section {0} not found on this page")]
    SectionNotFound(String),

    #[error("project id missing from query string")]
    ProjectIdMissing,

    #[error("project id is not a number: {0:?}")]
    ProjectIdInvalid(String),

    #[error("project {0} not found")]
    ProjectNotFound(u32),

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Convenience type alias for Result using SiteError
pub type Result<T> = std::result::Result<T, SiteError>;

impl SiteError {
    /// True for errors caused by page markup rather than data or input
    pub fn is_markup(&self) -> bool {
        matches!(
            self,
            SiteError::MissingMarkup(_) | SiteError::IndicatorMismatch { .. }
        )
    }
}
