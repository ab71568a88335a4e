//! Reference storage adapter for the service layer.
//!
//! [`EntityStore`] implements every storage port over an id-keyed map that
//! can be mirrored to a JSON file. Production deployments plug their own
//! adapters into the same ports.

pub mod entity_store;

use std::path::Path;
use std::sync::Arc;

use models::{Car, Driver, Manufacturer};

use crate::errors::StorageError;

pub use entity_store::EntityStore;

/// The three stores a fleet needs, opened together.
#[derive(Clone)]
pub struct FleetStores {
    pub drivers: Arc<EntityStore<Driver>>,
    pub cars: Arc<EntityStore<Car>>,
    pub manufacturers: Arc<EntityStore<Manufacturer>>,
}

impl FleetStores {
    pub fn in_memory() -> Self {
        Self {
            drivers: EntityStore::in_memory(),
            cars: EntityStore::in_memory(),
            manufacturers: EntityStore::in_memory(),
        }
    }

    /// Open `drivers.json`, `cars.json` and `manufacturers.json` under `dir`.
    pub async fn open(dir: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            drivers: EntityStore::open(dir.join("drivers.json")).await?,
            cars: EntityStore::open(dir.join("cars.json")).await?,
            manufacturers: EntityStore::open(dir.join("manufacturers.json")).await?,
        })
    }
}
