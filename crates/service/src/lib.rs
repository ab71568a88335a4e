//! Service layer of the taxi fleet back office.
//! - Wraps one storage port per entity (drivers, cars, manufacturers).
//! - Turns absent records into `NotFound`, passes storage failures through untouched.
//! - Maintains the driver/car assignment and checks driver credentials.

pub mod errors;
pub mod repository;
pub mod entity_service;
pub mod driver_service;
pub mod car_service;
pub mod manufacturer_service;
pub mod auth;
pub mod storage;
#[cfg(test)]
pub mod test_support;

pub use auth::{AuthError, AuthenticationService};
pub use car_service::CarService;
pub use driver_service::DriverService;
pub use entity_service::EntityService;
pub use errors::{ServiceError, StorageError};
pub use manufacturer_service::ManufacturerService;
