//! Password value object.
//!
//! Holds the strength policy and the Argon2 digest handling in one place.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, PASSWORD_SYMBOLS};
use crate::errors::{AppError, AppResult};

/// Hashed password.
///
/// Never holds plaintext; the digest is salted per instance.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Validate the plaintext against the strength policy, then hash it.
    ///
    /// # Errors
    /// Returns a validation error naming the first rule the password breaks.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        Self::validate(plain_text)?;
        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Check the strength policy without hashing.
    ///
    /// Rules are checked in order: length, allowed characters, then one
    /// uppercase letter, one lowercase letter and one digit. Each rule has its
    /// own message.
    pub fn validate(plain_text: &str) -> AppResult<()> {
        let length = plain_text.chars().count();
        if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
            return Err(AppError::validation(format!(
                "invalid password: must be {}-{} characters",
                MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
            )));
        }

        if !plain_text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c))
        {
            return Err(AppError::validation(
                "invalid password: contains forbidden characters",
            ));
        }

        if !plain_text.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(AppError::validation(
                "invalid password: must contain at least one uppercase letter",
            ));
        }

        if !plain_text.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(AppError::validation(
                "invalid password: must contain at least one lowercase letter",
            ));
        }

        if !plain_text.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::validation(
                "invalid password: must contain at least one digit",
            ));
        }

        Ok(())
    }

    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash in constant time.
    ///
    /// An unparseable stored hash never verifies.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Self::argon2()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    fn hash(plain_text: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}
