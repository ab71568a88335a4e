use models::Driver;
use tracing::debug;

use crate::entity_service::EntityService;
use crate::errors::StorageError;
use crate::repository::DriverRepository;

pub type DriverService<R> = EntityService<Driver, R>;

impl<R: DriverRepository + ?Sized> EntityService<Driver, R> {
    /// Look a driver up by login. Unlike `get`, absence is a normal outcome.
    pub async fn find_by_login(&self, login: &str) -> Result<Option<Driver>, StorageError> {
        let found = self.repository().find_by_login(login).await?;
        debug!(login, found = found.is_some(), "driver lookup by login");
        Ok(found)
    }
}
