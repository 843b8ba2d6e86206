//! Application state - Dependency injection container.
//!
//! Provides handlers and middleware with the services and the database handle.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{AdvertisementService, AuthService, ServiceContainer, Services};

/// Application state shared by every request.
#[derive(Clone)]
pub struct AppState {
    /// Registration, login and token verification
    pub auth_service: Arc<dyn AuthService>,
    /// Advertisement creation and listing
    pub advertisement_service: Arc<dyn AdvertisementService>,
    /// Database handle, used by the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire all services over the given database.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::from_container(&container, database)
    }

    /// Take services from any container implementation.
    pub fn from_container(container: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: container.auth(),
            advertisement_service: container.advertisements(),
            database,
        }
    }

    /// Create application state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        advertisement_service: Arc<dyn AdvertisementService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            advertisement_service,
            database,
        }
    }
}
