//! Shared primitives for all Rust crates in the component settings service.

#![forbid(unsafe_code)]

/// Naming transforms shared by the resolver, builders, and validator.
pub mod text;

use thiserror::Error;

pub use text::{camel_case, pluralize, singularize, studly_case, title_case};

/// Result type used across crates.
pub type AppResult<T> = Result<T, AppError>;

/// Closed set of failure kinds produced while resolving component settings.
///
/// Every variant carries the human-readable message verbatim; callers render
/// it as-is in error payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// The entity or its schema could not be resolved.
    #[error("{0}")]
    EntityNotFound(String),

    /// The requested view block does not exist.
    #[error("{0}")]
    ViewNotFound(String),

    /// The component block or its template does not exist.
    #[error("{0}")]
    ComponentConfigNotFound(String),

    /// A schema-less block did not declare its column schema.
    #[error("{0}")]
    MissingSchema(String),

    /// A bare column token is not part of the schema.
    #[error("{0}")]
    InvalidReference(String),

    /// The left segment of a dot token names no known relation.
    #[error("{0}")]
    UnknownRelation(String),

    /// The right segment of a dot token is not part of the relation schema.
    #[error("{0}")]
    UndefinedColumn(String),

    /// A select/filter definition cannot produce options.
    #[error("{0}")]
    InvalidFilterConfig(String),

    /// A configuration document is not valid JSON or has the wrong shape.
    #[error("{0}")]
    MalformedConfig(String),

    /// Request input is invalid.
    #[error("{0}")]
    InvalidRequest(String),

    /// Internal unexpected error.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Returns a stable machine-readable identifier for the failure kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EntityNotFound(_) => "entity_not_found",
            Self::ViewNotFound(_) => "view_not_found",
            Self::ComponentConfigNotFound(_) => "component_config_not_found",
            Self::MissingSchema(_) => "missing_schema",
            Self::InvalidReference(_) => "invalid_reference",
            Self::UnknownRelation(_) => "unknown_relation",
            Self::UndefinedColumn(_) => "undefined_column",
            Self::InvalidFilterConfig(_) => "invalid_filter_config",
            Self::MalformedConfig(_) => "malformed_config",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Internal(_) => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn error_display_is_the_bare_message() {
        let error =
            AppError::MissingSchema("noModel mode requires columnsSchema in view config".to_owned());
        assert_eq!(
            error.to_string(),
            "noModel mode requires columnsSchema in view config"
        );
        assert_eq!(error.kind(), "missing_schema");
    }
}
