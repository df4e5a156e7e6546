use thiserror::Error;

use crate::config::ConfigError;

/// Rejection raised by an entity when a requested value breaks one of its
/// field rules. The entity keeps its previous state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Validation: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }

    /// Human-readable reason without the variant prefix.
    pub fn reason(&self) -> &str {
        match self {
            Self::Validation(reason) => reason,
        }
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{:?}", e.code));
                    format!("{}: {}", field, msg)
                })
            })
            .collect();
        field_errors.sort();

        if field_errors.is_empty() {
            Self::Validation("validation failed".to_string())
        } else {
            Self::Validation(field_errors.join("; "))
        }
    }
}

/// Failures raised by a repository while persisting or loading entities.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Already exists: {entity} with {field}={value}")]
    Duplicate {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Missing required field: {entity}.{field}")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("Invalid reference: {entity}.{field} -> {target}")]
    InvalidReference {
        entity: &'static str,
        field: &'static str,
        target: String,
    },

    #[error("Not found: {entity} with id={id}")]
    NotFound { entity: &'static str, id: i32 },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for entity construction and change operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Result type for repository operations
pub type StoreResult<T> = Result<T, StoreError>;
