//! Application error taxonomy.
//!
//! Two tiers: `AppError` is what operations return to callers and maps onto
//! HTTP-style status codes; `GenerationError` / `SearchError` are provider-level
//! failures that the orchestration layer absorbs via fallback content and never
//! surfaces directly.

use thiserror::Error;

/// Failure from the text-generation provider.
///
/// Both variants are recoverable: the caller substitutes fallback content
/// instead of propagating them.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Network, auth or quota failure while talking to the provider.
    #[error("generation provider call failed: {0}")]
    Transport(String),
    /// The provider answered, but the text was not the JSON object we asked
    /// for. Carries the raw text for diagnostics.
    #[error("generation response could not be parsed as the expected JSON shape")]
    Parse { raw: String },
}

/// Failure from the search provider.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Network, auth or quota failure while talking to the provider.
    #[error("search provider call failed: {0}")]
    Transport(String),
    /// Well-formed response without a `results` field.
    #[error("search response missing results field")]
    MissingResults,
}

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Required input fields are missing or empty. Names each missing field.
    #[error("missing required field(s): {}", .0.join(", "))]
    Validation(Vec<String>),

    /// The requested record does not exist.
    #[error("{kind} not found with id {id}")]
    NotFound { kind: &'static str, id: String },

    /// Caller is not the owner of the record.
    #[error("not authorized")]
    Authorization,

    /// Document store read/write failure. Fatal to the operation.
    #[error("document store failure: {0}")]
    Persistence(String),

    /// Generation failure that escaped absorption. Orchestrator code must
    /// not let this reach callers; the variant exists so `?` works inside
    /// the service layer.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Search failure that escaped absorption.
    #[error(transparent)]
    Search(#[from] SearchError),
}

impl AppError {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        AppError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn persistence(source: impl std::fmt::Display) -> Self {
        AppError::Persistence(source.to_string())
    }

    /// HTTP-equivalent status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Validation(_) => 400,
            AppError::NotFound { .. } => 404,
            AppError::Authorization => 401,
            AppError::Persistence(_) => 500,
            AppError::Generation(_) | AppError::Search(_) => 500,
        }
    }
}

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_missing_fields() {
        let err = AppError::Validation(vec!["topic".to_string(), "subject".to_string()]);
        assert_eq!(err.to_string(), "missing required field(s): topic, subject");
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(AppError::not_found("lesson", "abc").status_code(), 404);
        assert_eq!(AppError::Authorization.status_code(), 401);
        assert_eq!(AppError::persistence("disk full").status_code(), 500);
    }
}
