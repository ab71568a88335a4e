use std::error::Error as StdError;

use models::{Entity, EntityId};
use thiserror::Error;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Opaque failure raised by a storage port.
///
/// The service layer never wraps, retries or swallows it; callers receive
/// the value the adapter produced.
#[derive(Debug, Error)]
#[error("storage failure: {message}")]
pub struct StorageError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), source: None }
    }

    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self { message: message.into(), source: Some(source.into()) }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: EntityId },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ServiceError {
    pub fn not_found<E: Entity>(id: EntityId) -> Self {
        Self::NotFound { entity: E::KIND, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::NotFound { .. } => 1003,
            ServiceError::Storage(_) => 1200,
        }
    }

    /// Text a presentation layer may show to end users.
    pub fn public_message(&self) -> &'static str {
        match self {
            ServiceError::NotFound { .. } => "resource does not exist",
            ServiceError::Storage(_) => "internal error, try again",
        }
    }
}
