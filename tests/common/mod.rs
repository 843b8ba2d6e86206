//! Shared fixtures for integration tests.
//!
//! In-memory repositories stand in for PostgreSQL so the real services and
//! router can be exercised end to end.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use chrono::{Duration, Utc};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use marketplace_api::api::{create_router, AppState};
use marketplace_api::domain::{
    Advertisement, AdvertisementListing, ListingQuerySpec, NewAdvertisement, SortDirection,
    SortField, User,
};
use marketplace_api::errors::{AppError, AppResult};
use marketplace_api::infra::{AdvertisementRepository, Database, UnitOfWork, UserRepository};
use marketplace_api::services::{
    AdvertisementManager, AdvertisementService, AuthService, Authenticator, TokenService,
};

pub const TEST_SECRET: &[u8] = b"integration-secret-key-minimum-32-chars";

/// Users kept in insertion order
#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<User>>,
}

impl InMemoryUsers {
    fn login_of(&self, id: Uuid) -> Option<String> {
        let rows = self.rows.lock().unwrap();
        rows.iter().find(|u| u.id == id).map(|u| u.login.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>> {
        let key = User::normalize_login(login);
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|u| User::normalize_login(&u.login) == key)
            .cloned())
    }

    async fn create(&self, login: String, password_hash: String) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        let key = User::normalize_login(&login);
        if rows.iter().any(|u| User::normalize_login(&u.login) == key) {
            return Err(AppError::conflict("user login"));
        }

        let user = User {
            id: Uuid::new_v4(),
            login,
            password_hash,
            created_at: Utc::now(),
        };
        rows.push(user.clone());
        Ok(user)
    }
}

/// Advertisements joined against `InMemoryUsers` for author logins
pub struct InMemoryAdvertisements {
    users: Arc<InMemoryUsers>,
    rows: Mutex<Vec<Advertisement>>,
}

#[async_trait]
impl AdvertisementRepository for InMemoryAdvertisements {
    async fn create(&self, advertisement: NewAdvertisement) -> AppResult<Advertisement> {
        if self.users.login_of(advertisement.author_id).is_none() {
            return Err(AppError::internal("author does not exist"));
        }

        let mut rows = self.rows.lock().unwrap();
        // Strictly increasing timestamps keep creation order observable
        let created_at = Utc::now() + Duration::milliseconds(rows.len() as i64);
        let stored = Advertisement {
            id: Uuid::new_v4(),
            title: advertisement.title,
            description: advertisement.description,
            image_url: advertisement.image_url,
            price_kopecks: advertisement.price_kopecks,
            author_id: advertisement.author_id,
            created_at,
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn query(&self, spec: &ListingQuerySpec) -> AppResult<Vec<AdvertisementListing>> {
        let mut matching: Vec<Advertisement> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|ad| spec.min_price().map_or(true, |min| ad.price_kopecks >= min))
            .filter(|ad| spec.max_price().map_or(true, |max| ad.price_kopecks <= max))
            .cloned()
            .collect();

        match spec.sort_by {
            SortField::Price => matching.sort_by_key(|ad| ad.price_kopecks),
            SortField::CreatedAt => matching.sort_by_key(|ad| ad.created_at),
        }
        if spec.sort_direction == SortDirection::Desc {
            matching.reverse();
        }

        Ok(matching
            .into_iter()
            .skip(spec.offset() as usize)
            .take(spec.limit as usize)
            .map(|ad| AdvertisementListing {
                author_login: self.users.login_of(ad.author_id).unwrap_or_default(),
                is_owner: spec.is_owner(ad.author_id),
                title: ad.title,
                description: ad.description,
                image_url: ad.image_url,
                price_kopecks: ad.price_kopecks,
            })
            .collect())
    }
}

/// UnitOfWork over the in-memory repositories
pub struct InMemoryUnitOfWork {
    users: Arc<InMemoryUsers>,
    advertisements: Arc<InMemoryAdvertisements>,
}

impl InMemoryUnitOfWork {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUsers::default());
        let advertisements = Arc::new(InMemoryAdvertisements {
            users: users.clone(),
            rows: Mutex::new(Vec::new()),
        });
        Self {
            users,
            advertisements,
        }
    }
}

impl UnitOfWork for InMemoryUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn advertisements(&self) -> Arc<dyn AdvertisementRepository> {
        self.advertisements.clone()
    }
}

/// Real services wired over one in-memory store
pub struct TestServices {
    pub auth: Arc<dyn AuthService>,
    pub advertisements: Arc<dyn AdvertisementService>,
}

pub fn services() -> TestServices {
    let uow = Arc::new(InMemoryUnitOfWork::new());
    TestServices {
        auth: Arc::new(Authenticator::new(uow.clone(), TokenService::new(TEST_SECRET))),
        advertisements: Arc::new(AdvertisementManager::new(uow)),
    }
}

/// Router over in-memory services. The database handle answers one ping.
pub fn app() -> Router {
    let services = services();
    let connection = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    create_router(AppState::new(
        services.auth,
        services.advertisements,
        Arc::new(Database::from_connection(connection)),
    ))
}
