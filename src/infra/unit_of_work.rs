//! Unit of Work pattern implementation.
//!
//! Centralizes repository access so services depend on one abstraction
//! instead of wiring each repository separately.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    AdvertisementRepository, AdvertisementStore, UserRepository, UserStore,
};

/// Unit of Work trait for dependency injection.
///
/// Every operation is a single statement, so no transaction API is exposed.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get advertisement repository
    fn advertisements(&self) -> Arc<dyn AdvertisementRepository>;
}

/// Concrete implementation of UnitOfWork over a pooled connection
pub struct Persistence {
    user_repo: Arc<UserStore>,
    advertisement_repo: Arc<AdvertisementStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(Arc::clone(&db))),
            advertisement_repo: Arc::new(AdvertisementStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn advertisements(&self) -> Arc<dyn AdvertisementRepository> {
        self.advertisement_repo.clone()
    }
}
