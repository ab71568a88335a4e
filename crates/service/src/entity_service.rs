use std::marker::PhantomData;
use std::sync::Arc;

use models::{Entity, EntityId};
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::repository::Repository;

/// CRUD façade over one entity's storage port.
///
/// Storage failures pass through untouched; the only translation this layer
/// makes is turning an absent record in [`EntityService::get`] into
/// [`ServiceError::NotFound`].
pub struct EntityService<E, R: ?Sized> {
    repo: Arc<R>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R: ?Sized> Clone for EntityService<E, R> {
    fn clone(&self) -> Self {
        Self { repo: Arc::clone(&self.repo), _entity: PhantomData }
    }
}

impl<E, R> EntityService<E, R>
where
    E: Entity,
    R: Repository<E> + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo, _entity: PhantomData }
    }

    pub(crate) fn repository(&self) -> &R {
        &self.repo
    }

    #[instrument(skip(self, entity), fields(entity = E::KIND))]
    pub async fn create(&self, entity: E) -> Result<E, ServiceError> {
        info!(params = ?entity, "create method was called");
        let created = self.repo.create(entity).await?;
        Ok(created)
    }

    /// Fetch a persistent record.
    ///
    /// # Errors
    /// [`ServiceError::NotFound`] when storage has no record with `id`; this
    /// is a recoverable outcome, not a crash.
    pub async fn get(&self, id: EntityId) -> Result<E, ServiceError> {
        match self.repo.get(id).await? {
            Some(found) => Ok(found),
            None => {
                debug!(entity = E::KIND, id, "record not found");
                Err(ServiceError::not_found::<E>(id))
            }
        }
    }

    /// All records; an empty store yields an empty vector.
    pub async fn get_all(&self) -> Result<Vec<E>, ServiceError> {
        let all = self.repo.get_all().await?;
        debug!(entity = E::KIND, count = all.len(), "listed records");
        Ok(all)
    }

    #[instrument(skip(self, entity), fields(entity = E::KIND, id = ?entity.id()))]
    pub async fn update(&self, entity: E) -> Result<E, ServiceError> {
        info!(params = ?entity, "update method was called");
        let updated = self.repo.update(entity).await?;
        Ok(updated)
    }

    /// `Ok(false)` means there was nothing to delete.
    #[instrument(skip(self), fields(entity = E::KIND))]
    pub async fn delete(&self, id: EntityId) -> Result<bool, ServiceError> {
        info!("delete method was called");
        let deleted = self.repo.delete(id).await?;
        Ok(deleted)
    }
}
