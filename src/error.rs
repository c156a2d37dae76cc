//! Crate-wide error type.

use crate::validation::ValidationError;

/// Errors surfaced by the simulation engine, the optimizer and result stores.
#[derive(Debug, thiserror::Error)]
pub enum TwinError {
    /// Malformed scenario, request or configuration. Never retried.
    #[error("validation failed: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// A numerical step produced a non-finite value.
    #[error("computation failed: {reason}")]
    Computation { reason: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    #[error("invalid model configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl TwinError {
    pub(crate) fn computation(reason: impl Into<String>) -> Self {
        Self::Computation {
            reason: reason.into(),
        }
    }

    /// Validation errors carried by this error, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }
}

impl From<Vec<ValidationError>> for TwinError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, TwinError>;
