//! Advertisement service - Creation and listing use cases.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    Advertisement, AdvertisementListing, CreateAdvertisement, ListParams, ListingQuerySpec,
};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Advertisement service trait for dependency injection.
#[async_trait]
pub trait AdvertisementService: Send + Sync {
    /// Validate and store an advertisement written by `author_id`
    async fn create(&self, author_id: Uuid, input: CreateAdvertisement)
        -> AppResult<Advertisement>;

    /// Normalize listing parameters and run the query.
    ///
    /// `params.viewer_id` only affects the per-row ownership flag.
    async fn list(&self, params: ListParams) -> AppResult<Vec<AdvertisementListing>>;
}

/// Concrete implementation of AdvertisementService using Unit of Work.
pub struct AdvertisementManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AdvertisementManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> AdvertisementService for AdvertisementManager<U> {
    async fn create(
        &self,
        author_id: Uuid,
        input: CreateAdvertisement,
    ) -> AppResult<Advertisement> {
        let advertisement = input.into_new(author_id)?;
        self.uow.advertisements().create(advertisement).await
    }

    async fn list(&self, params: ListParams) -> AppResult<Vec<AdvertisementListing>> {
        let spec = ListingQuerySpec::normalize(params)?;
        self.uow.advertisements().query(&spec).await
    }
}
