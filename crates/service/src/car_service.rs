use models::{Car, Driver, EntityId};
use tracing::{debug, info, instrument};

use crate::entity_service::EntityService;
use crate::errors::ServiceError;
use crate::repository::CarRepository;

pub type CarService<R> = EntityService<Car, R>;

/// Driver assignment. Both operations build the car's complete new driver
/// list and hand the whole car to the port's `update`; the port owns the
/// read-modify-write. The car is taken by value so a failed persist leaves
/// the caller without a half-applied instance.
impl<R: CarRepository + ?Sized> EntityService<Car, R> {
    #[instrument(skip(self, driver, car), fields(car_id = ?car.id, driver_id = ?driver.id))]
    pub async fn add_driver_to_car(
        &self,
        driver: Driver,
        mut car: Car,
    ) -> Result<Car, ServiceError> {
        car.add_driver(driver);
        info!(drivers = car.drivers.len(), "driver assigned to car");
        let persisted = self.repository().update(car).await?;
        Ok(persisted)
    }

    /// Removes the most recently added structurally-equal driver. A car
    /// without that driver is still written back unchanged.
    #[instrument(skip(self, driver, car), fields(car_id = ?car.id, driver_id = ?driver.id))]
    pub async fn remove_driver_from_car(
        &self,
        driver: &Driver,
        mut car: Car,
    ) -> Result<Car, ServiceError> {
        let removed = car.remove_driver(driver);
        info!(removed, drivers = car.drivers.len(), "driver unassigned from car");
        let persisted = self.repository().update(car).await?;
        Ok(persisted)
    }

    pub async fn get_all_by_driver(&self, driver_id: EntityId) -> Result<Vec<Car>, ServiceError> {
        let cars = self.repository().get_all_by_driver(driver_id).await?;
        debug!(driver_id, count = cars.len(), "cars listed by driver");
        Ok(cars)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use models::Manufacturer;
    use proptest::prelude::*;

    use super::*;
    use crate::storage::EntityStore;
    use crate::test_support::{car, driver, manufacturer, FailingRepository};

    fn service() -> CarService<EntityStore<Car>> {
        CarService::new(EntityStore::in_memory())
    }

    async fn seeded() -> Result<(CarService<EntityStore<Car>>, Car), ServiceError> {
        let svc = service();
        let created = svc.create(car(1, manufacturer(1).with_id(1))).await?;
        Ok((svc, created))
    }

    #[tokio::test]
    async fn add_driver_appends_in_order() -> Result<(), anyhow::Error> {
        let (svc, c) = seeded().await?;
        let d1 = driver(1).with_id(1);
        let d2 = driver(2).with_id(2);

        let c = svc.add_driver_to_car(d1.clone(), c).await?;
        assert_eq!(c.drivers, vec![d1.clone()]);
        let c = svc.add_driver_to_car(d2.clone(), c).await?;
        assert_eq!(c.drivers, vec![d1.clone(), d2.clone()]);

        let stored = svc.get(c.id.unwrap()).await?;
        assert_eq!(stored.drivers, vec![d1, d2]);
        Ok(())
    }

    #[tokio::test]
    async fn add_driver_allows_duplicates() -> Result<(), anyhow::Error> {
        let (svc, c) = seeded().await?;
        let d1 = driver(1).with_id(1);
        let c = svc.add_driver_to_car(d1.clone(), c).await?;
        let c = svc.add_driver_to_car(d1.clone(), c).await?;
        assert_eq!(c.drivers, vec![d1.clone(), d1]);
        Ok(())
    }

    #[tokio::test]
    async fn relationship_scenario() -> Result<(), anyhow::Error> {
        let m = Manufacturer::new("M", "Japan").with_id(1);
        let svc = service();
        let c = svc.create(Car::new("X", m)).await?;
        assert_eq!(c.id, Some(1));
        assert!(c.drivers.is_empty());

        let d1 = driver(1).with_id(1);
        let d2 = driver(2).with_id(2);
        let c = svc.add_driver_to_car(d1.clone(), c).await?;
        assert_eq!(c.drivers, vec![d1.clone()]);
        let c = svc.add_driver_to_car(d2.clone(), c).await?;
        assert_eq!(c.drivers, vec![d1.clone(), d2.clone()]);
        let c = svc.remove_driver_from_car(&d1, c).await?;
        assert_eq!(c.drivers, vec![d2]);
        Ok(())
    }

    #[tokio::test]
    async fn remove_driver_until_empty() -> Result<(), anyhow::Error> {
        let (svc, mut c) = seeded().await?;
        let d1 = driver(1).with_id(1);
        let d2 = driver(2).with_id(2);
        c.drivers = vec![d1.clone(), d2.clone()];
        let c = svc.update(c).await?;

        let c = svc.remove_driver_from_car(&d1, c).await?;
        assert_eq!(c.drivers.len(), 1);
        assert!(!c.drivers.contains(&d1));
        assert!(c.drivers.contains(&d2));
        let c = svc.remove_driver_from_car(&d2, c).await?;
        assert!(c.drivers.is_empty());
        assert!(svc.get(c.id.unwrap()).await?.drivers.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn remove_absent_driver_still_persists() -> Result<(), anyhow::Error> {
        let (svc, c) = seeded().await?;
        let d1 = driver(1).with_id(1);
        let before = c.clone();
        let c = svc.remove_driver_from_car(&d1, c).await?;
        assert_eq!(c, before);
        Ok(())
    }

    #[tokio::test]
    async fn get_all_by_driver_delegates() -> Result<(), anyhow::Error> {
        let svc = service();
        let d1 = driver(1).with_id(1);
        let d2 = driver(2).with_id(2);
        let first = svc.create(car(1, manufacturer(1).with_id(1))).await?;
        let second = svc.create(car(2, manufacturer(2).with_id(2))).await?;

        let first = svc.add_driver_to_car(d1.clone(), first).await?;
        assert_eq!(svc.get_all_by_driver(1).await?, vec![first.clone()]);

        let second = svc.add_driver_to_car(d1.clone(), second).await?;
        let second = svc.add_driver_to_car(d2, second).await?;
        assert_eq!(svc.get_all_by_driver(1).await?, vec![first, second.clone()]);
        assert_eq!(svc.get_all_by_driver(2).await?, vec![second]);
        assert!(svc.get_all_by_driver(3).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn failed_persist_surfaces_storage_failure() {
        let svc = CarService::new(Arc::new(FailingRepository::new("update rejected")));
        let c = car(1, manufacturer(1)).with_id(1);
        match svc.add_driver_to_car(driver(1).with_id(1), c.clone()).await {
            Err(ServiceError::Storage(e)) => assert_eq!(e.message(), "update rejected"),
            other => panic!("expected storage failure, got {other:?}"),
        }
        match svc.remove_driver_from_car(&driver(1), c).await {
            Err(ServiceError::Storage(e)) => assert_eq!(e.message(), "update rejected"),
            other => panic!("expected storage failure, got {other:?}"),
        }
        assert!(matches!(svc.get_all_by_driver(1).await, Err(ServiceError::Storage(_))));
    }

    fn driver_strategy() -> impl Strategy<Value = Driver> {
        (1i64..20, "[a-z]{1,8}").prop_map(|(id, name)| {
            Driver::new(format!("{name}@mail.com"), name, "secret", format!("L{id}")).with_id(id)
        })
    }

    proptest! {
        #[test]
        fn add_then_remove_restores_drivers(
            existing in proptest::collection::vec(driver_strategy(), 0..6),
            extra in driver_strategy(),
        ) {
            let svc = service();
            let result: Result<Car, ServiceError> = tokio_test::block_on(async {
                let mut c = car(1, manufacturer(1).with_id(1));
                c.drivers = existing.clone();
                let c = svc.create(c).await?;
                let c = svc.add_driver_to_car(extra.clone(), c).await?;
                svc.remove_driver_from_car(&extra, c).await
            });
            let restored = result.map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(restored.drivers, existing);
        }

        #[test]
        fn drivers_keep_insertion_order(
            added in proptest::collection::vec(driver_strategy(), 1..8),
        ) {
            let svc = service();
            let result: Result<Car, ServiceError> = tokio_test::block_on(async {
                let mut c = svc.create(car(1, manufacturer(1).with_id(1))).await?;
                for d in &added {
                    c = svc.add_driver_to_car(d.clone(), c).await?;
                }
                Ok(c)
            });
            let c = result.map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(c.drivers, added);
        }
    }
}
