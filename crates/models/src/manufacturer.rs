use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};

#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Manufacturer {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub name: String,
    pub country: String,
}

impl Manufacturer {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self { id: None, name: name.into(), country: country.into() }
    }

    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }
}

impl Entity for Manufacturer {
    const KIND: &'static str = "manufacturer";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }
}
