use thiserror::Error;

use crate::errors::{ServiceError, StorageError};

/// Diagnostic reason carried by [`AuthError::Unauthorized`] when the login is unknown.
pub const NO_SUCH_USER: &str = "no such user";
/// Diagnostic reason carried by [`AuthError::Unauthorized`] when the password is wrong.
pub const BAD_CREDENTIALS: &str = "bad credentials";

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    /// Both an unknown login and a wrong password end up here; the reason is
    /// for logs only and must not drive caller behaviour.
    #[error("authentication failed: {0}")]
    Unauthorized(&'static str),
    #[error("login {0} is already taken")]
    Conflict(String),
    /// The lookup itself failed, so nothing was verified.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Any other service failure, kept as the service reported it.
    #[error(transparent)]
    Service(ServiceError),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Conflict(_) => 1002,
            AuthError::Unauthorized(_) => 1004,
            AuthError::Storage(_) => 1200,
            AuthError::Service(e) => e.code(),
        }
    }

    /// Text a presentation layer may show; never reveals which half of the
    /// credentials was wrong.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::Unauthorized(_) => "invalid login or password",
            AuthError::Conflict(_) => "login is already taken",
            AuthError::Storage(_) => "internal error, try again",
            AuthError::Service(e) => e.public_message(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AuthError::Unauthorized(_))
    }
}

/// Only `login` decides that credentials are wrong, so a service error never
/// becomes [`AuthError::Unauthorized`].
impl From<ServiceError> for AuthError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Storage(e) => AuthError::Storage(e),
            other => AuthError::Service(other),
        }
    }
}
