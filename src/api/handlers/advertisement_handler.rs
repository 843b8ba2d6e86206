//! Advertisement handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, UNBOUNDED_PRICE};
use crate::domain::{Advertisement, AdvertisementListing, CreateAdvertisement, ListParams};
use crate::errors::{AppError, AppResult};

/// Advertisement creation request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CreateAdvertisementRequest {
    /// 3-100 letters (Latin or Cyrillic), digits and spaces
    #[validate(length(min = 1, message = "all fields are required"))]
    #[schema(example = "Bicycle")]
    pub title: String,
    /// 1-1000 characters
    #[validate(length(min = 1, message = "all fields are required"))]
    #[schema(example = "Almost new, used twice")]
    pub description: String,
    /// http(s) URL ending in .jpg, .jpeg or .png
    #[validate(length(min = 1, message = "all fields are required"))]
    #[schema(example = "https://example.com/bike.jpg")]
    pub image_url: String,
    /// Price in kopecks, greater than zero
    #[schema(example = 1500000)]
    pub price_kopecks: i64,
}

impl CreateAdvertisementRequest {
    /// Convert to domain input. A zero price counts as a missing field.
    pub fn into_input(self) -> AppResult<CreateAdvertisement> {
        if self.price_kopecks == 0 {
            return Err(AppError::validation("all fields are required"));
        }

        Ok(CreateAdvertisement {
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            price_kopecks: self.price_kopecks,
        })
    }
}

/// Listing query string.
///
/// Numbers arrive as text so each one can be reported by name when it is
/// not an integer. Empty values count as absent.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListAdvertisementsQuery {
    /// Page number, starting at 1
    #[param(value_type = Option<i64>, example = 1)]
    pub page: Option<String>,
    /// Page size
    #[param(value_type = Option<i64>, example = 10)]
    pub limit: Option<String>,
    /// `price` or `created_at` (default)
    #[param(example = "created_at")]
    pub sort_by: Option<String>,
    /// `asc` or `desc` (default)
    #[param(example = "desc")]
    pub sort_direction: Option<String>,
    /// Lower price bound in kopecks, 0 for none
    #[param(value_type = Option<i64>, example = 0)]
    pub min_price_kopecks: Option<String>,
    /// Upper price bound in kopecks, 0 for none
    #[param(value_type = Option<i64>, example = 0)]
    pub max_price_kopecks: Option<String>,
}

fn parse_integer(name: &str, value: Option<&str>, default: i64) -> AppResult<i64> {
    match value.filter(|v| !v.is_empty()) {
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::validation(format!("{} must be an integer", name))),
        None => Ok(default),
    }
}

impl ListAdvertisementsQuery {
    /// Convert to raw listing parameters for the given viewer.
    pub fn into_params(self, viewer: Option<CurrentUser>) -> AppResult<ListParams> {
        Ok(ListParams {
            page: parse_integer("page", self.page.as_deref(), DEFAULT_PAGE_NUMBER)?,
            limit: parse_integer("limit", self.limit.as_deref(), DEFAULT_PAGE_SIZE)?,
            min_price_kopecks: parse_integer(
                "min_price_kopecks",
                self.min_price_kopecks.as_deref(),
                UNBOUNDED_PRICE,
            )?,
            max_price_kopecks: parse_integer(
                "max_price_kopecks",
                self.max_price_kopecks.as_deref(),
                UNBOUNDED_PRICE,
            )?,
            sort_by: self.sort_by.unwrap_or_default(),
            sort_direction: self.sort_direction.unwrap_or_default(),
            viewer_id: viewer.map(|user| user.id),
        })
    }
}

/// Create an advertisement as the authenticated user
#[utoipa::path(
    post,
    path = "/advertisement",
    tag = "Advertisements",
    request_body = CreateAdvertisementRequest,
    responses(
        (status = 201, description = "Advertisement created", body = Advertisement),
        (status = 400, description = "Invalid advertisement"),
        (status = 401, description = "Missing or invalid token"),
        (status = 405, description = "Method not allowed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_advertisement(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateAdvertisementRequest>,
) -> AppResult<(StatusCode, Json<Advertisement>)> {
    let advertisement = state
        .advertisement_service
        .create(current_user.id, payload.into_input()?)
        .await?;

    Ok((StatusCode::CREATED, Json(advertisement)))
}

/// List advertisements.
///
/// With a valid token each row carries `is_owner`; without one the field
/// is omitted.
#[utoipa::path(
    get,
    path = "/advertisement/",
    tag = "Advertisements",
    params(ListAdvertisementsQuery),
    responses(
        (status = 200, description = "Advertisements page", body = [AdvertisementListing]),
        (status = 400, description = "Invalid query parameters"),
        (status = 405, description = "Method not allowed")
    ),
    security((), ("bearer_auth" = []))
)]
pub async fn list_advertisements(
    State(state): State<AppState>,
    current_user: Option<Extension<CurrentUser>>,
    Query(query): Query<ListAdvertisementsQuery>,
) -> AppResult<Json<Vec<AdvertisementListing>>> {
    let params = query.into_params(current_user.map(|Extension(user)| user))?;
    let rows = state.advertisement_service.list(params).await?;

    Ok(Json(rows))
}
