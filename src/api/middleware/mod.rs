//! API middleware.

mod auth;

pub use auth::{
    auth_middleware, bearer_token, optional_auth_middleware, optional_identity,
    required_identity, CurrentUser,
};
