//! Storage ports consumed by the entity services.
//!
//! Adapters implement these traits; the services only ever see the traits,
//! injected through their constructors.

use async_trait::async_trait;
use models::{Car, Driver, Entity, EntityId, Manufacturer};

use crate::errors::StorageError;

/// Per-entity persistence capability.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Persist a new record and return it with its storage-assigned id.
    async fn create(&self, entity: E) -> Result<E, StorageError>;
    async fn get(&self, id: EntityId) -> Result<Option<E>, StorageError>;
    async fn get_all(&self) -> Result<Vec<E>, StorageError>;
    /// Replace the stored record with `entity` (id must be set).
    async fn update(&self, entity: E) -> Result<E, StorageError>;
    /// Returns whether a record existed and was removed.
    async fn delete(&self, id: EntityId) -> Result<bool, StorageError>;
}

#[async_trait]
pub trait DriverRepository: Repository<Driver> {
    async fn find_by_login(&self, login: &str) -> Result<Option<Driver>, StorageError>;
}

#[async_trait]
pub trait CarRepository: Repository<Car> {
    /// Cars that have the driver with `driver_id` assigned.
    async fn get_all_by_driver(&self, driver_id: EntityId) -> Result<Vec<Car>, StorageError>;
}

/// Manufacturers need nothing beyond the generic port.
pub trait ManufacturerRepository: Repository<Manufacturer> {}
