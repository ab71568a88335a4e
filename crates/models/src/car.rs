use serde::{Deserialize, Serialize};

use crate::driver::Driver;
use crate::entity::{Entity, EntityId};
use crate::manufacturer::Manufacturer;

/// A fleet car. `drivers` keeps assignment order and may hold duplicates.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Car {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub model: String,
    pub manufacturer: Manufacturer,
    #[serde(default)]
    pub drivers: Vec<Driver>,
}

impl Car {
    pub fn new(model: impl Into<String>, manufacturer: Manufacturer) -> Self {
        Self { id: None, model: model.into(), manufacturer, drivers: Vec::new() }
    }

    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    /// Appends to the end of the driver list; no uniqueness check.
    pub fn add_driver(&mut self, driver: Driver) {
        self.drivers.push(driver);
    }

    /// Removes the most recently added structurally-equal driver, so an add
    /// followed by a remove always restores the previous list. Returns
    /// whether one was removed.
    pub fn remove_driver(&mut self, driver: &Driver) -> bool {
        match self.drivers.iter().rposition(|d| d == driver) {
            Some(idx) => {
                self.drivers.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn has_driver_id(&self, driver_id: EntityId) -> bool {
        self.drivers.iter().any(|d| d.id == Some(driver_id))
    }
}

impl Entity for Car {
    const KIND: &'static str = "car";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }
}
