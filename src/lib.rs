//! Marketplace API
//!
//! Backend for a small marketplace: user registration, stateless session
//! tokens, and advertisement creation and listing with filtering, sorting
//! and pagination.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Entities, validation rules and listing normalization
//! - **services**: Token, authentication and advertisement use cases
//! - **infra**: Database, migrations and repositories
//! - **api**: HTTP handlers, middleware, and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Advertisement, AdvertisementListing, ListingQuerySpec, Password, User};
pub use errors::{AppError, AppResult};
