//! Auth module: driver login and signup.
//!
//! Sits on top of the driver service rather than a storage port of its own.

pub mod errors;
pub mod service;

pub use errors::AuthError;
pub use service::AuthenticationService;
