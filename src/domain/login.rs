//! Login format rules.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{MAX_LOGIN_LENGTH, MIN_LOGIN_LENGTH};
use crate::errors::{AppError, AppResult};

/// Starts with a Latin letter, ends alphanumeric, login length bounds total.
static LOGIN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"^[a-zA-Z][a-zA-Z0-9_.]{{{},{}}}[a-zA-Z0-9]$",
        MIN_LOGIN_LENGTH - 2,
        MAX_LOGIN_LENGTH - 2
    );
    Regex::new(&pattern).expect("valid login regex")
});

const SEPARATOR_RUNS: [&str; 4] = ["..", "__", "_.", "._"];

/// Validate a login as supplied by the client (no trimming).
///
/// # Errors
/// Returns a validation error if the login does not match the pattern or
/// contains two adjacent separators.
pub fn validate_login(login: &str) -> AppResult<()> {
    if !LOGIN_PATTERN.is_match(login) {
        return Err(AppError::validation(
            "invalid login: must be 3-30 characters (letters, numbers, underscore, dots)",
        ));
    }

    if SEPARATOR_RUNS.iter().any(|run| login.contains(run)) {
        return Err(AppError::validation(
            "invalid login: must not contain repeated underscores and dots",
        ));
    }

    Ok(())
}
