//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain rules and persistence to fulfill the
//! application use cases. They depend on the `UnitOfWork` abstraction
//! rather than concrete repositories.

mod advertisement_service;
mod auth_service;
pub mod container;
mod token_service;

#[cfg(test)]
pub(crate) mod testing;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use advertisement_service::{AdvertisementManager, AdvertisementService};
pub use auth_service::{AuthService, Authenticator};
pub use token_service::{Claims, TokenError, TokenService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
