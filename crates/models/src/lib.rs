//! Domain records of the taxi fleet: drivers, manufacturers and cars.
//!
//! These are plain data types; persistence lives behind the storage ports in
//! the `service` crate.

pub mod entity;
pub mod driver;
pub mod manufacturer;
pub mod car;

pub use car::Car;
pub use driver::Driver;
pub use entity::{Entity, EntityId};
pub use manufacturer::Manufacturer;
