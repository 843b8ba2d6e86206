//! Service Container - Centralized service access.
//!
//! Handlers and middleware reach services through this container so they
//! depend on service traits, not implementations.

use std::sync::Arc;

use super::{AdvertisementService, AuthService, TokenService};
use crate::config::Config;
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get advertisement service
    fn advertisements(&self) -> Arc<dyn AdvertisementService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    advertisement_service: Arc<dyn AdvertisementService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        advertisement_service: Arc<dyn AdvertisementService>,
    ) -> Self {
        Self {
            auth_service,
            advertisement_service,
        }
    }

    /// Wire every service over one database connection
    pub fn from_connection(db: Arc<sea_orm::DatabaseConnection>, config: &Config) -> Self {
        use super::{AdvertisementManager, Authenticator};

        let uow = Arc::new(Persistence::new(db));
        let tokens = TokenService::new(config.jwt_secret_bytes());

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), tokens)),
            advertisement_service: Arc::new(AdvertisementManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn advertisements(&self) -> Arc<dyn AdvertisementService> {
        self.advertisement_service.clone()
    }
}
