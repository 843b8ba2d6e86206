//! Test doubles shared by service unit tests.

use std::sync::Arc;

use super::TokenService;
use crate::infra::{
    AdvertisementRepository, MockAdvertisementRepository, MockUserRepository, UnitOfWork,
    UserRepository,
};

pub(crate) const TEST_SECRET: &[u8] = b"test-secret-key-minimum-32-chars!!";

pub(crate) fn test_tokens() -> TokenService {
    TokenService::new(TEST_SECRET)
}

/// UnitOfWork over mock repositories
pub(crate) struct TestUnitOfWork {
    user_repo: Arc<MockUserRepository>,
    advertisement_repo: Arc<MockAdvertisementRepository>,
}

impl TestUnitOfWork {
    pub(crate) fn new(
        user_repo: MockUserRepository,
        advertisement_repo: MockAdvertisementRepository,
    ) -> Self {
        Self {
            user_repo: Arc::new(user_repo),
            advertisement_repo: Arc::new(advertisement_repo),
        }
    }

    pub(crate) fn with_users(user_repo: MockUserRepository) -> Self {
        Self::new(user_repo, MockAdvertisementRepository::new())
    }

    pub(crate) fn with_advertisements(advertisement_repo: MockAdvertisementRepository) -> Self {
        Self::new(MockUserRepository::new(), advertisement_repo)
    }
}

impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn advertisements(&self) -> Arc<dyn AdvertisementRepository> {
        self.advertisement_repo.clone()
    }
}
