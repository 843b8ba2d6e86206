//! Authentication service - Registration, login and token verification.
//!
//! Login rules live in `domain::login`, password policy and hashing in
//! `domain::Password`, token handling in `TokenService`.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::TokenService;
use crate::domain::{validate_login, Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user.
    ///
    /// The login format is checked before the uniqueness lookup, then the
    /// password policy before hashing.
    async fn register(&self, login: String, password: String) -> AppResult<User>;

    /// Check credentials and return a session token
    async fn login(&self, login: String, password: String) -> AppResult<String>;

    /// Verify a session token and return the user id it carries
    fn verify_token(&self, token: &str) -> AppResult<Uuid>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    tokens: TokenService,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, tokens: TokenService) -> Self {
        Self { uow, tokens }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, login: String, password: String) -> AppResult<User> {
        validate_login(&login)?;

        if self.uow.users().find_by_login(&login).await?.is_some() {
            return Err(AppError::conflict("user login"));
        }

        let password_hash = Password::new(&password)?.into_string();
        self.uow.users().create(login, password_hash).await
    }

    async fn login(&self, login: String, password: String) -> AppResult<String> {
        let user = self
            .uow
            .users()
            .find_by_login(&login)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if !Password::from_hash(user.password_hash).verify(&password) {
            return Err(AppError::InvalidPassword);
        }

        Ok(self.tokens.issue(user.id)?)
    }

    fn verify_token(&self, token: &str) -> AppResult<Uuid> {
        Ok(self.tokens.verify(token)?)
    }
}
