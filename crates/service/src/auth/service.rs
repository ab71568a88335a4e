use std::sync::Arc;

use models::Driver;
use tracing::{debug, info, instrument, warn};

use super::errors::{AuthError, BAD_CREDENTIALS, NO_SUCH_USER};
use crate::driver_service::DriverService;
use crate::repository::DriverRepository;

/// Credential check and signup on top of the driver service.
///
/// Holds no session state; every call is answered from storage.
pub struct AuthenticationService<R: DriverRepository + ?Sized> {
    drivers: Arc<DriverService<R>>,
}

impl<R: DriverRepository + ?Sized> AuthenticationService<R> {
    pub fn new(drivers: Arc<DriverService<R>>) -> Self { Self { drivers } }

    /// Verify `login`/`password` and return the matching driver.
    ///
    /// # Examples
    /// ```
    /// use service::auth::AuthenticationService;
    /// use service::driver_service::DriverService;
    /// use service::storage::EntityStore;
    /// use models::Driver;
    /// use std::sync::Arc;
    /// let drivers = Arc::new(DriverService::new(EntityStore::<Driver>::in_memory()));
    /// let auth = AuthenticationService::new(drivers.clone());
    /// tokio_test::block_on(drivers.create(Driver::new("a@x.com", "A", "p", "L1"))).unwrap();
    /// let driver = tokio_test::block_on(auth.login("a@x.com", "p")).unwrap();
    /// assert_eq!(driver.id, Some(1));
    /// assert!(tokio_test::block_on(auth.login("a@x.com", "wrong")).is_err());
    /// ```
    ///
    /// # Errors
    /// [`AuthError::Unauthorized`] for an unknown login or a wrong password;
    /// [`AuthError::Storage`] when the lookup could not be performed.
    #[instrument(skip(self, password), fields(login = %login))]
    pub async fn login(&self, login: &str, password: &str) -> Result<Driver, AuthError> {
        let driver = match self.drivers.find_by_login(login).await? {
            Some(driver) => driver,
            None => {
                warn!(reason = NO_SUCH_USER, "login_rejected");
                return Err(AuthError::Unauthorized(NO_SUCH_USER));
            }
        };
        if driver.password != password {
            warn!(reason = BAD_CREDENTIALS, "login_rejected");
            return Err(AuthError::Unauthorized(BAD_CREDENTIALS));
        }
        info!(driver_id = ?driver.id, "login_succeeded");
        Ok(driver)
    }

    /// Sign a new driver up. The login must not be in use yet.
    #[instrument(skip(self, driver), fields(login = %driver.login))]
    pub async fn register(&self, driver: Driver) -> Result<Driver, AuthError> {
        if let Some(existing) = self.drivers.find_by_login(&driver.login).await? {
            debug!(driver_id = ?existing.id, "login already registered");
            return Err(AuthError::Conflict(driver.login));
        }
        let created = self.drivers.create(driver).await?;
        info!(driver_id = ?created.id, "driver_registered");
        Ok(created)
    }
}
