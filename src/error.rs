//! Error types for the html-pdf-maker library

use thiserror::Error;

/// Result type alias using MakerError
pub type Result<T> = std::result::Result<T, MakerError>;

/// Errors that can occur when rendering templates to PDF
#[derive(Debug, Error)]
pub enum MakerError {
    /// Template file could not be read
    #[error("template file could not be read: {0}")]
    Io(#[from] std::io::Error),

    /// Template compilation error
    #[error("template compilation failed: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    /// Template rendering error
    #[error("template rendering failed: {0}")]
    Render(#[from] handlebars::RenderError),

    /// Template data could not be serialized
    #[error("template data is not valid JSON: {0}")]
    Data(#[from] serde_json::Error),

    /// Error from the underlying browser automation library
    #[error("browser operation failed: {0}")]
    Browser(#[from] anyhow::Error),

    /// Mandatory element missing from the rendered document
    #[error("required element {0:?} not found in rendered document")]
    ContentNotFound(String),

    /// Invalid page geometry
    #[error("invalid page geometry: {0}")]
    InvalidGeometry(String),

    /// Helper name already registered
    #[error("helper {0:?} is already registered")]
    HelperCollision(String),

    /// Invalid helper registration
    #[error("invalid helper registration: {0}")]
    HelperRegistration(String),

    /// Locale identifier not recognized by the formatting backend
    #[error("unsupported locale {0:?}")]
    UnknownLocale(String),
}

impl From<handlebars::TemplateError> for MakerError {
    fn from(err: handlebars::TemplateError) -> Self {
        MakerError::Template(Box::new(err))
    }
}
