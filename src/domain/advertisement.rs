//! Advertisement domain entity and content rules.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{
    IMAGE_EXTENSIONS, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH, MIN_DESCRIPTION_LENGTH,
    MIN_TITLE_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Latin and Cyrillic letters, digits and spaces.
static TITLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Zа-яА-ЯёЁ0-9 ]+$").expect("valid title regex"));

/// Stored advertisement
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Advertisement {
    pub id: Uuid,
    #[schema(example = "Bicycle")]
    pub title: String,
    #[schema(example = "Almost new, used twice")]
    pub description: String,
    #[schema(example = "https://example.com/bike.jpg")]
    pub image_url: String,
    #[schema(example = 1500000)]
    pub price_kopecks: i64,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Advertisement content as submitted by a client
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAdvertisement {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub price_kopecks: i64,
}

/// Validated advertisement ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdvertisement {
    pub author_id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub price_kopecks: i64,
}

impl CreateAdvertisement {
    /// Run the content checks in order (title, description, price, image)
    /// and return the first failure.
    pub fn validate(&self) -> AppResult<()> {
        validate_title(&self.title)?;
        validate_description(&self.description)?;
        validate_price(self.price_kopecks)?;
        validate_image_url(&self.image_url)?;
        Ok(())
    }

    /// Validate and bind the content to its author.
    ///
    /// The title is stored as submitted; trimming only applies to the checks.
    pub fn into_new(self, author_id: Uuid) -> AppResult<NewAdvertisement> {
        self.validate()?;
        Ok(NewAdvertisement {
            author_id,
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            price_kopecks: self.price_kopecks,
        })
    }
}

fn validate_title(title: &str) -> AppResult<()> {
    let trimmed = title.trim();
    let length = trimmed.chars().count();
    if !(MIN_TITLE_LENGTH..=MAX_TITLE_LENGTH).contains(&length) {
        return Err(AppError::validation(format!(
            "title must be {}-{} characters",
            MIN_TITLE_LENGTH, MAX_TITLE_LENGTH
        )));
    }

    if !TITLE_PATTERN.is_match(trimmed) {
        return Err(AppError::validation(
            "title may contain only letters, digits and spaces",
        ));
    }

    Ok(())
}

fn validate_description(description: &str) -> AppResult<()> {
    let length = description.chars().count();
    if !(MIN_DESCRIPTION_LENGTH..=MAX_DESCRIPTION_LENGTH).contains(&length) {
        return Err(AppError::validation(format!(
            "description must be {}-{} characters",
            MIN_DESCRIPTION_LENGTH, MAX_DESCRIPTION_LENGTH
        )));
    }
    Ok(())
}

fn validate_price(price_kopecks: i64) -> AppResult<()> {
    if price_kopecks <= 0 {
        return Err(AppError::validation("price must be greater than 0"));
    }
    Ok(())
}

fn validate_image_url(image_url: &str) -> AppResult<()> {
    let url = Url::parse(image_url)
        .map_err(|_| AppError::validation("image_url must be an absolute URL"))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::validation("image_url must use http or https"));
    }

    let path = url.path().to_lowercase();
    if !IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return Err(AppError::validation(
            "image_url must point to a .jpg, .jpeg or .png file",
        ));
    }

    Ok(())
}

/// One row of the public listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdvertisementListing {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub price_kopecks: i64,
    pub author_login: String,
    /// Present only when the request carried a valid token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_owner: Option<bool>,
}
