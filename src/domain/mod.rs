//! Domain layer - Core business entities and rules.
//!
//! Holds users, advertisements and listing queries, independent of
//! HTTP and persistence concerns.

pub mod advertisement;
pub mod listing;
pub mod login;
pub mod password;
pub mod user;

pub use advertisement::{
    Advertisement, AdvertisementListing, CreateAdvertisement, NewAdvertisement,
};
pub use listing::{ListParams, ListingQuerySpec, SortDirection, SortField};
pub use login::validate_login;
pub use password::Password;
pub use user::{User, UserResponse};
