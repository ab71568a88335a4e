#![cfg(test)]
use async_trait::async_trait;
use models::{Car, Driver, Entity, EntityId, Manufacturer};

use crate::errors::StorageError;
use crate::repository::{CarRepository, DriverRepository, ManufacturerRepository, Repository};

pub fn driver(n: u32) -> Driver {
    Driver::new(
        format!("driver{n}@mail.com"),
        format!("driver {n}"),
        format!("driver {n} password"),
        format!("driver {n} license"),
    )
}

pub fn manufacturer(n: u32) -> Manufacturer {
    Manufacturer::new(format!("Manufacturer {n} name"), format!("Manufacturer {n} country"))
}

pub fn car(n: u32, manufacturer: Manufacturer) -> Car {
    Car::new(format!("Car {n}"), manufacturer)
}

/// Storage port whose every call fails with the same message.
pub struct FailingRepository {
    message: String,
}

impl FailingRepository {
    pub fn new(message: &str) -> Self {
        Self { message: message.to_string() }
    }

    fn fail<T>(&self) -> Result<T, StorageError> {
        Err(StorageError::new(self.message.clone()))
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for FailingRepository {
    async fn create(&self, _entity: E) -> Result<E, StorageError> { self.fail() }
    async fn get(&self, _id: EntityId) -> Result<Option<E>, StorageError> { self.fail() }
    async fn get_all(&self) -> Result<Vec<E>, StorageError> { self.fail() }
    async fn update(&self, _entity: E) -> Result<E, StorageError> { self.fail() }
    async fn delete(&self, _id: EntityId) -> Result<bool, StorageError> { self.fail() }
}

#[async_trait]
impl DriverRepository for FailingRepository {
    async fn find_by_login(&self, _login: &str) -> Result<Option<Driver>, StorageError> {
        self.fail()
    }
}

#[async_trait]
impl CarRepository for FailingRepository {
    async fn get_all_by_driver(&self, _driver_id: EntityId) -> Result<Vec<Car>, StorageError> {
        self.fail()
    }
}

impl ManufacturerRepository for FailingRepository {}
