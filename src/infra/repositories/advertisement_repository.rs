//! Advertisement repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    Order, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use super::entities::advertisement::{self, ActiveModel, Entity as AdvertisementEntity};
use super::entities::user;
use crate::domain::{
    Advertisement, AdvertisementListing, ListingQuerySpec, NewAdvertisement, SortDirection,
    SortField,
};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Advertisement repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AdvertisementRepository: Send + Sync {
    /// Persist a validated advertisement, assigning id and creation time
    async fn create(&self, advertisement: NewAdvertisement) -> AppResult<Advertisement>;

    /// Run a normalized listing query
    async fn query(&self, spec: &ListingQuerySpec) -> AppResult<Vec<AdvertisementListing>>;
}

/// Concrete implementation of AdvertisementRepository
pub struct AdvertisementStore {
    db: Arc<DatabaseConnection>,
}

impl AdvertisementStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// Flat listing row joined with the author's login
#[derive(Debug, FromQueryResult)]
struct ListingRow {
    title: String,
    description: String,
    image_url: String,
    price_kopecks: i64,
    author_id: Uuid,
    author_login: String,
}

impl ListingRow {
    fn into_listing(self, spec: &ListingQuerySpec) -> AdvertisementListing {
        AdvertisementListing {
            is_owner: spec.is_owner(self.author_id),
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            price_kopecks: self.price_kopecks,
            author_login: self.author_login,
        }
    }
}

/// Build the filtered, ordered and paginated listing select.
fn listing_select(spec: &ListingQuerySpec) -> Select<AdvertisementEntity> {
    let mut select = AdvertisementEntity::find()
        .select_only()
        .columns([
            advertisement::Column::Title,
            advertisement::Column::Description,
            advertisement::Column::ImageUrl,
            advertisement::Column::PriceKopecks,
            advertisement::Column::AuthorId,
        ])
        .column_as(user::Column::Login, "author_login")
        .join(JoinType::InnerJoin, advertisement::Relation::Author.def());

    if let Some(min) = spec.min_price() {
        select = select.filter(advertisement::Column::PriceKopecks.gte(min));
    }
    if let Some(max) = spec.max_price() {
        select = select.filter(advertisement::Column::PriceKopecks.lte(max));
    }

    let column = match spec.sort_by {
        SortField::Price => advertisement::Column::PriceKopecks,
        SortField::CreatedAt => advertisement::Column::CreatedAt,
    };
    let order = match spec.sort_direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    };

    select
        .order_by(column, order)
        .offset(spec.offset())
        .limit(spec.limit)
}

#[async_trait]
impl AdvertisementRepository for AdvertisementStore {
    async fn create(&self, advertisement: NewAdvertisement) -> AppResult<Advertisement> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(advertisement.title),
            description: Set(advertisement.description),
            image_url: Set(advertisement.image_url),
            price_kopecks: Set(advertisement.price_kopecks),
            author_id: Set(advertisement.author_id),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(self.db.as_ref()).await.map_err(AppError::from)?;
        Ok(Advertisement::from(model))
    }

    async fn query(&self, spec: &ListingQuerySpec) -> AppResult<Vec<AdvertisementListing>> {
        let rows = listing_select(spec)
            .into_model::<ListingRow>()
            .all(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(rows.into_iter().map(|row| row.into_listing(spec)).collect())
    }
}
