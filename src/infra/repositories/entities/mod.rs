//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod advertisement;
pub mod user;
