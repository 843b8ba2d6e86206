//! Listing query parameters and their normalization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, UNBOUNDED_PRICE};
use crate::errors::{AppError, AppResult};

/// Column the listing is ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    CreatedAt,
    Price,
}

impl From<&str> for SortField {
    /// Only `"price"` selects price ordering.
    fn from(s: &str) -> Self {
        match s {
            "price" => SortField::Price,
            _ => SortField::CreatedAt,
        }
    }
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::Price => "price",
        }
    }
}

/// Ordering direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl From<&str> for SortDirection {
    /// Only the exact `"asc"` selects ascending order.
    fn from(s: &str) -> Self {
        match s {
            "asc" => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Raw listing parameters as received from the client.
///
/// Missing query values are represented by their zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub page: i64,
    pub limit: i64,
    pub sort_by: String,
    pub sort_direction: String,
    pub min_price_kopecks: i64,
    pub max_price_kopecks: i64,
    pub viewer_id: Option<Uuid>,
}

/// Normalized listing query, consumed once by the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuerySpec {
    pub page: u64,
    pub limit: u64,
    pub sort_by: SortField,
    pub sort_direction: SortDirection,
    pub min_price_kopecks: i64,
    pub max_price_kopecks: i64,
    pub viewer_id: Option<Uuid>,
}

impl ListingQuerySpec {
    /// Clamp raw parameters into a bounded query.
    ///
    /// Out-of-range page, limit and price bounds are clamped silently. A page
    /// past the last addressable offset is pulled back to it. Two
    /// bounded prices with max below min are rejected.
    ///
    /// # Errors
    /// Returns `AppError::InvalidPriceRange` for an inverted price range.
    pub fn normalize(params: ListParams) -> AppResult<Self> {
        let page = if params.page < 1 {
            DEFAULT_PAGE_NUMBER
        } else {
            params.page
        };
        let limit = if params.limit < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            params.limit
        };
        // Keep (page - 1) * limit representable as a signed 64-bit offset
        let page = page.min((i64::MAX / limit).saturating_add(1));

        let min_price_kopecks = params.min_price_kopecks.max(UNBOUNDED_PRICE);
        let max_price_kopecks = params.max_price_kopecks.max(UNBOUNDED_PRICE);

        if min_price_kopecks != UNBOUNDED_PRICE
            && max_price_kopecks != UNBOUNDED_PRICE
            && max_price_kopecks < min_price_kopecks
        {
            return Err(AppError::InvalidPriceRange);
        }

        Ok(Self {
            page: page.unsigned_abs(),
            limit: limit.unsigned_abs(),
            sort_by: SortField::from(params.sort_by.as_str()),
            sort_direction: SortDirection::from(params.sort_direction.as_str()),
            min_price_kopecks,
            max_price_kopecks,
            viewer_id: params.viewer_id,
        })
    }

    /// Number of rows skipped before the requested page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Lower price bound, if any.
    pub fn min_price(&self) -> Option<i64> {
        (self.min_price_kopecks != UNBOUNDED_PRICE).then_some(self.min_price_kopecks)
    }

    /// Upper price bound, if any.
    pub fn max_price(&self) -> Option<i64> {
        (self.max_price_kopecks != UNBOUNDED_PRICE).then_some(self.max_price_kopecks)
    }

    /// Ownership flag for a row written by `author_id`.
    ///
    /// `None` for anonymous viewers.
    pub fn is_owner(&self, author_id: Uuid) -> Option<bool> {
        self.viewer_id.map(|viewer| viewer == author_id)
    }
}

impl From<&ListingQuerySpec> for ListParams {
    fn from(spec: &ListingQuerySpec) -> Self {
        Self {
            page: i64::try_from(spec.page).unwrap_or(i64::MAX),
            limit: i64::try_from(spec.limit).unwrap_or(i64::MAX),
            sort_by: spec.sort_by.as_str().to_string(),
            sort_direction: spec.sort_direction.as_str().to_string(),
            min_price_kopecks: spec.min_price_kopecks,
            max_price_kopecks: spec.max_price_kopecks,
            viewer_id: spec.viewer_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_empty_params() {
        let spec = ListingQuerySpec::normalize(ListParams::default()).unwrap();

        assert_eq!(spec.page, 1);
        assert_eq!(spec.limit, 10);
        assert_eq!(spec.sort_by, SortField::CreatedAt);
        assert_eq!(spec.sort_direction, SortDirection::Desc);
        assert_eq!(spec.min_price(), None);
        assert_eq!(spec.max_price(), None);
        assert_eq!(spec.offset(), 0);
    }

    #[test]
    fn test_page_and_limit_always_positive() {
        for raw in [i64::MIN, -5, -1, 0] {
            let spec = ListingQuerySpec::normalize(ListParams {
                page: raw,
                limit: raw,
                ..Default::default()
            })
            .unwrap();
            assert_eq!(spec.page, 1);
            assert_eq!(spec.limit, 10);
        }

        let spec = ListingQuerySpec::normalize(ListParams {
            page: 3,
            limit: 25,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(spec.offset(), 50);
    }

    #[test]
    fn test_extreme_page_offset_fits_in_i64() {
        for limit in [1, 10, i64::MAX] {
            let spec = ListingQuerySpec::normalize(ListParams {
                page: i64::MAX,
                limit,
                ..Default::default()
            })
            .unwrap();

            assert!(i64::try_from(spec.offset()).is_ok(), "limit {limit}");
            assert!(i64::try_from(spec.limit).is_ok());
            assert!(spec.page >= 1);
        }

        let spec = ListingQuerySpec::normalize(ListParams {
            page: i64::MAX,
            limit: 10,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(spec.offset(), (i64::MAX / 10 * 10) as u64);
    }

    #[test]
    fn test_sort_enums_are_closed() {
        assert_eq!(SortField::from("price"), SortField::Price);
        assert_eq!(SortField::from("Price"), SortField::CreatedAt);
        assert_eq!(SortField::from("title"), SortField::CreatedAt);
        assert_eq!(SortField::from(""), SortField::CreatedAt);

        assert_eq!(SortDirection::from("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::from("ASC"), SortDirection::Desc);
        assert_eq!(SortDirection::from(""), SortDirection::Desc);
    }

    #[test]
    fn test_negative_prices_become_unbounded() {
        let spec = ListingQuerySpec::normalize(ListParams {
            min_price_kopecks: -100,
            max_price_kopecks: -1,
            ..Default::default()
        })
        .unwrap();

        assert_eq!(spec.min_price_kopecks, 0);
        assert_eq!(spec.max_price_kopecks, 0);
    }

    #[test]
    fn test_inverted_bounded_range_rejected() {
        let result = ListingQuerySpec::normalize(ListParams {
            min_price_kopecks: 500,
            max_price_kopecks: 100,
            ..Default::default()
        });
        assert!(matches!(result, Err(AppError::InvalidPriceRange)));
    }

    #[test]
    fn test_half_open_ranges_accepted() {
        let only_min = ListingQuerySpec::normalize(ListParams {
            min_price_kopecks: 500,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(only_min.min_price(), Some(500));
        assert_eq!(only_min.max_price(), None);

        // Negative max clamps to unbounded, so no range error
        let clamped = ListingQuerySpec::normalize(ListParams {
            min_price_kopecks: 500,
            max_price_kopecks: -10,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(clamped.max_price(), None);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let viewer = Uuid::new_v4();
        let inputs = [
            ListParams::default(),
            ListParams {
                page: -3,
                limit: 0,
                sort_by: "price".into(),
                sort_direction: "asc".into(),
                min_price_kopecks: -1,
                max_price_kopecks: 900,
                viewer_id: Some(viewer),
            },
            ListParams {
                page: i64::MAX,
                limit: 10,
                ..Default::default()
            },
            ListParams {
                page: 7,
                limit: 3,
                sort_by: "whatever".into(),
                sort_direction: "DESC".into(),
                min_price_kopecks: 100,
                max_price_kopecks: 100,
                viewer_id: None,
            },
        ];

        for params in inputs {
            let once = ListingQuerySpec::normalize(params).unwrap();
            let twice = ListingQuerySpec::normalize(ListParams::from(&once)).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_ownership_flag() {
        let author = Uuid::new_v4();
        let anonymous = ListingQuerySpec::normalize(ListParams::default()).unwrap();
        assert_eq!(anonymous.is_owner(author), None);

        let viewer = ListingQuerySpec::normalize(ListParams {
            viewer_id: Some(author),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(viewer.is_owner(author), Some(true));
        assert_eq!(viewer.is_owner(Uuid::new_v4()), Some(false));
    }
}
