use std::fmt;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};

/// A licensed driver; `login` is the unique business key used to sign in.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Driver {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub login: String,
    pub name: String,
    pub password: String,
    pub license_number: String,
}

impl Driver {
    pub fn new(
        login: impl Into<String>,
        name: impl Into<String>,
        password: impl Into<String>,
        license_number: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            login: login.into(),
            name: name.into(),
            password: password.into(),
            license_number: license_number.into(),
        }
    }

    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }
}

// Keeps the credential out of log lines and panic messages.
impl fmt::Debug for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Driver")
            .field("id", &self.id)
            .field("login", &self.login)
            .field("name", &self.name)
            .field("password", &"***")
            .field("license_number", &self.license_number)
            .finish()
    }
}

impl Entity for Driver {
    const KIND: &'static str = "driver";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }
}
