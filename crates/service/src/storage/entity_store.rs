use std::{collections::BTreeMap, path::{Path, PathBuf}, sync::Arc};

use async_trait::async_trait;
use models::{Car, Driver, Entity, EntityId, Manufacturer};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::{fs, sync::RwLock};

use crate::errors::StorageError;
use crate::repository::{CarRepository, DriverRepository, ManufacturerRepository, Repository};

#[derive(Clone, Serialize, Deserialize)]
struct Snapshot<E> {
    next_id: EntityId,
    records: BTreeMap<EntityId, E>,
}

impl<E> Default for Snapshot<E> {
    fn default() -> Self {
        Self { next_id: 1, records: BTreeMap::new() }
    }
}

/// Id-keyed record store, optionally mirrored to a JSON file.
///
/// Ids come from a monotonically increasing sequence and are never reused.
/// Every write is applied to a copy, persisted, and only then made visible,
/// so a failed file write leaves the in-memory view unchanged.
pub struct EntityStore<E> {
    inner: RwLock<Snapshot<E>>,
    file_path: Option<PathBuf>,
}

impl<E> EntityStore<E>
where
    E: Entity + Serialize + DeserializeOwned,
{
    pub fn in_memory() -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(Snapshot::default()), file_path: None })
    }

    /// Open a file-backed store. Creates the file (and parent directories)
    /// with an empty snapshot if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, StorageError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::with_source(format!("cannot create {}", parent.display()), e)
            })?;
        }

        let snapshot = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                let msg = format!("corrupt store file {}", file_path.display());
                StorageError::with_source(msg, e)
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty = Snapshot::default();
                write_snapshot(&file_path, &empty).await?;
                empty
            }
            Err(e) => {
                let msg = format!("cannot read {}", file_path.display());
                return Err(StorageError::with_source(msg, e));
            }
        };

        Ok(Arc::new(Self { inner: RwLock::new(snapshot), file_path: Some(file_path) }))
    }

    async fn commit<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&mut Snapshot<E>) -> Result<T, StorageError>,
    {
        let mut guard = self.inner.write().await;
        let mut next = guard.clone();
        let out = f(&mut next)?;
        if let Some(path) = &self.file_path {
            write_snapshot(path, &next).await?;
        }
        *guard = next;
        Ok(out)
    }

    pub async fn insert(&self, mut entity: E) -> Result<E, StorageError> {
        if let Some(id) = entity.id() {
            return Err(StorageError::new(format!("{} already has id {id}", E::KIND)));
        }
        self.commit(|snap| {
            let id = snap.next_id;
            snap.next_id += 1;
            entity.assign_id(id);
            snap.records.insert(id, entity.clone());
            Ok(entity)
        })
        .await
    }

    pub async fn get(&self, id: EntityId) -> Option<E> {
        self.inner.read().await.records.get(&id).cloned()
    }

    /// All records ordered by id.
    pub async fn list(&self) -> Vec<E> {
        self.inner.read().await.records.values().cloned().collect()
    }

    pub async fn filter<F>(&self, pred: F) -> Vec<E>
    where
        F: Fn(&E) -> bool,
    {
        self.inner.read().await.records.values().filter(|e| pred(*e)).cloned().collect()
    }

    /// Overwrite an existing record.
    pub async fn replace(&self, entity: E) -> Result<E, StorageError> {
        let id = entity.id().ok_or_else(|| {
            StorageError::new(format!("cannot update a {} without an id", E::KIND))
        })?;
        self.commit(|snap| match snap.records.get_mut(&id) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(entity)
            }
            None => Err(StorageError::new(format!("no {} with id {id} to update", E::KIND))),
        })
        .await
    }

    /// Remove a record; returns whether it existed.
    pub async fn remove(&self, id: EntityId) -> Result<bool, StorageError> {
        if !self.inner.read().await.records.contains_key(&id) {
            return Ok(false);
        }
        self.commit(|snap| Ok(snap.records.remove(&id).is_some())).await
    }
}

async fn write_snapshot<E: Serialize>(
    path: &Path,
    snapshot: &Snapshot<E>,
) -> Result<(), StorageError> {
    let data = serde_json::to_vec_pretty(snapshot)
        .map_err(|e| StorageError::with_source("cannot serialize store", e))?;
    fs::write(path, data)
        .await
        .map_err(|e| StorageError::with_source(format!("cannot write {}", path.display()), e))
}

#[async_trait]
impl<E> Repository<E> for EntityStore<E>
where
    E: Entity + Serialize + DeserializeOwned,
{
    async fn create(&self, entity: E) -> Result<E, StorageError> {
        self.insert(entity).await
    }

    async fn get(&self, id: EntityId) -> Result<Option<E>, StorageError> {
        Ok(EntityStore::get(self, id).await)
    }

    async fn get_all(&self) -> Result<Vec<E>, StorageError> {
        Ok(self.list().await)
    }

    async fn update(&self, entity: E) -> Result<E, StorageError> {
        self.replace(entity).await
    }

    async fn delete(&self, id: EntityId) -> Result<bool, StorageError> {
        self.remove(id).await
    }
}

#[async_trait]
impl DriverRepository for EntityStore<Driver> {
    async fn find_by_login(&self, login: &str) -> Result<Option<Driver>, StorageError> {
        Ok(self.filter(|d| d.login == login).await.into_iter().next())
    }
}

#[async_trait]
impl CarRepository for EntityStore<Car> {
    async fn get_all_by_driver(&self, driver_id: EntityId) -> Result<Vec<Car>, StorageError> {
        Ok(self.filter(|c| c.has_driver_id(driver_id)).await)
    }
}

impl ManufacturerRepository for EntityStore<Manufacturer> {}
