use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use models::{Car, Driver, EntityId, Manufacturer};
use serde::Deserialize;
use service::storage::{EntityStore, FleetStores};
use service::{AuthError, AuthenticationService, CarService, DriverService, ManufacturerService};
use tracing::{error, info, warn};

type Drivers = DriverService<EntityStore<Driver>>;

/// Fixture file imported through the services at startup.
#[derive(Debug, Default, Deserialize)]
struct Seed {
    #[serde(default)]
    manufacturers: Vec<Manufacturer>,
    #[serde(default)]
    drivers: Vec<Driver>,
    #[serde(default)]
    cars: Vec<SeedCar>,
}

/// Cars reference their manufacturer by name and their drivers by login.
#[derive(Debug, Deserialize)]
struct SeedCar {
    model: String,
    manufacturer: String,
    #[serde(default)]
    drivers: Vec<String>,
}

struct Fleet {
    drivers: Arc<Drivers>,
    cars: CarService<EntityStore<Car>>,
    manufacturers: ManufacturerService<EntityStore<Manufacturer>>,
    auth: AuthenticationService<EntityStore<Driver>>,
}

impl Fleet {
    fn new(stores: FleetStores) -> Self {
        let drivers = Arc::new(DriverService::new(stores.drivers));
        Self {
            auth: AuthenticationService::new(drivers.clone()),
            drivers,
            cars: CarService::new(stores.cars),
            manufacturers: ManufacturerService::new(stores.manufacturers),
        }
    }

    async fn import(&self, seed: Seed) -> anyhow::Result<()> {
        let mut by_name: HashMap<String, Manufacturer> = self
            .manufacturers
            .get_all()
            .await?
            .into_iter()
            .map(|m| (m.name.clone(), m))
            .collect();
        for m in seed.manufacturers {
            if by_name.contains_key(&m.name) {
                continue;
            }
            let created = self.manufacturers.create(m).await?;
            by_name.insert(created.name.clone(), created);
        }

        for d in seed.drivers {
            match self.auth.register(d).await {
                Ok(_) => {}
                Err(AuthError::Conflict(login)) => {
                    warn!(%login, "driver already present, skipping")
                }
                Err(e) => return Err(e.into()),
            }
        }

        // A car is identified by its model and manufacturer.
        let mut known_cars: HashSet<(String, Option<EntityId>)> = self
            .cars
            .get_all()
            .await?
            .into_iter()
            .map(|c| (c.model, c.manufacturer.id))
            .collect();
        for c in seed.cars {
            let manufacturer = by_name.get(&c.manufacturer).cloned().with_context(|| {
                format!("car {} references unknown manufacturer {}", c.model, c.manufacturer)
            })?;
            let key = (c.model.clone(), manufacturer.id);
            if known_cars.contains(&key) {
                warn!(
                    model = %c.model,
                    manufacturer = %c.manufacturer,
                    "car already present, skipping"
                );
                continue;
            }

            let mut drivers = Vec::with_capacity(c.drivers.len());
            for login in &c.drivers {
                let driver = self
                    .drivers
                    .find_by_login(login)
                    .await?
                    .with_context(|| format!("car {} references unknown driver {login}", c.model))?;
                drivers.push(driver);
            }

            let mut car = self.cars.create(Car::new(c.model, manufacturer)).await?;
            for driver in drivers {
                car = self.cars.add_driver_to_car(driver, car).await?;
            }
            known_cars.insert(key);
        }
        Ok(())
    }

    async fn summary(&self) -> anyhow::Result<()> {
        let drivers = self.drivers.get_all().await?;
        let cars = self.cars.get_all().await?;
        let manufacturers = self.manufacturers.get_all().await?;
        info!(
            drivers = drivers.len(),
            cars = cars.len(),
            manufacturers = manufacturers.len(),
            "fleet loaded"
        );
        for d in &drivers {
            let Some(id) = d.id else { continue };
            let assigned: Vec<String> =
                self.cars.get_all_by_driver(id).await?.into_iter().map(|c| c.model).collect();
            info!(driver_id = id, login = %d.login, cars = ?assigned, "driver assignments");
        }
        Ok(())
    }
}

async fn load_seed(path: &Path) -> anyhow::Result<Seed> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("cannot read seed file {}", path.display()))?;
    let seed = serde_json::from_slice(&bytes)
        .with_context(|| format!("invalid seed file {}", path.display()))?;
    Ok(seed)
}

async fn run(cfg: configs::AppConfig) -> anyhow::Result<()> {
    let stores = match cfg.storage.data_dir.as_deref() {
        Some(dir) => FleetStores::open(Path::new(dir)).await?,
        None => {
            info!("no storage.data_dir configured, using in-memory stores");
            FleetStores::in_memory()
        }
    };
    let fleet = Fleet::new(stores);

    if let Some(seed_file) = cfg.storage.seed_file.as_deref() {
        let seed = load_seed(Path::new(seed_file)).await?;
        fleet.import(seed).await?;
        info!(seed_file, "seed imported");
    }

    fleet.summary().await
}

fn main() -> std::process::ExitCode {
    dotenv().ok();

    let cfg = match configs::AppConfig::load_or_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(
                service = "taxi",
                event = "config_invalid",
                error = %e,
                "cannot load configuration"
            );
            return std::process::ExitCode::FAILURE;
        }
    };
    common::utils::logging::init_logging(&cfg.logging);
    info!(
        service = "taxi",
        event = "start",
        version = env!("CARGO_PKG_VERSION"),
        pid = std::process::id(),
        "taxi starting"
    );

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(
                service = "taxi",
                event = "runtime_build_failed",
                error = %e,
                "failed to build tokio runtime"
            );
            return std::process::ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cfg)) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!(
                service = "taxi",
                event = "run_failed",
                error = %format!("{e:#}"),
                "taxi failed"
            );
            std::process::ExitCode::FAILURE
        }
    }
}
