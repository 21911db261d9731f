//! Error types and error handling

use thiserror::Error;

/// Scaffold generation error type
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The model identifier is unknown or does not name a persisted entity
    #[error("Invalid model [{0}] !")]
    InvalidModel(String),

    /// The data connection cannot serve the requested schema capability
    #[error("Schema unavailable: {0}")]
    SchemaUnavailable(String),

    /// Database error raised by a schema backend
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A line template failed to compile
    #[error("Template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    /// A line template failed to render
    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<handlebars::TemplateError> for ScaffoldError {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::Template(Box::new(err))
    }
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_model_message() {
        let err = ScaffoldError::InvalidModel("App\\Missing".to_string());
        assert_eq!(err.to_string(), "Invalid model [App\\Missing] !");
    }

    #[test]
    fn test_schema_unavailable_message() {
        let err = ScaffoldError::SchemaUnavailable("no modern schema API".to_string());
        assert_eq!(err.to_string(), "Schema unavailable: no modern schema API");
    }
}
