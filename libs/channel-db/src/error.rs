use thiserror::Error;

/// Failures surfaced by the store, the repositories and the listing layer.
///
/// Every variant is recoverable: callers report it back as a structured
/// failure, nothing here is fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    Validation(String),

    #[error("{entity} {id} is {status} and cannot be changed")]
    InvalidStateTransition {
        entity: &'static str,
        id: String,
        status: String,
    },
}

impl StoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
