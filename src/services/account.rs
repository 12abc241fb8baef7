//! Account service — email/password registration and login.
//!
//! DESIGN
//! ======
//! Users are keyed by email. Registration checks for an existing user and
//! inserts in one statement (`ON CONFLICT DO NOTHING`), so two concurrent
//! registrations for the same email cannot both succeed. Passwords are
//! stored as Argon2id hashes; hashing runs on the blocking pool.
//!
//! Login issues no session: each call is authenticated on its own and
//! returns the profile plus whatever cloud payload has been synced.

use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Row};

use super::cloud_sync::{self, CloudData};
use super::non_blank;
use super::password::{self, PasswordError};

pub const DEFAULT_FIRSTNAME: &str = "Guest";
pub const DEFAULT_LASTNAME: &str = "User";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Email and password are required")]
    MissingCredentials,
    #[error("User already exists")]
    AlreadyExists,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("password error: {0}")]
    Password(#[from] PasswordError),
    #[error("password worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Registration request. Field names follow the browser client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Registration {
    pub email: Option<String>,
    pub password: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub bday: Option<String>,
    pub phnum: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Profile and cloud payload returned on a successful login.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginProfile {
    pub user_email: String,
    pub firstname: String,
    pub lastname: String,
    #[serde(rename = "cloudData")]
    pub cloud_data: CloudData,
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Create a new user.
///
/// # Errors
///
/// `MissingCredentials` if email or password is absent or blank,
/// `AlreadyExists` if the email is taken.
pub async fn register(pool: &PgPool, registration: Registration) -> Result<(), AccountError> {
    let (email, plaintext) = match (
        non_blank(registration.email.as_deref()),
        non_blank(registration.password.as_deref()),
    ) {
        (Some(email), Some(password)) => (email.to_owned(), password.to_owned()),
        _ => return Err(AccountError::MissingCredentials),
    };

    let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&plaintext)).await??;

    let inserted = sqlx::query(
        r"INSERT INTO users (email, firstname, lastname, password_hash, birthday, phone_number)
          VALUES ($1, $2, $3, $4, $5, $6)
          ON CONFLICT (email) DO NOTHING
          RETURNING email",
    )
    .bind(&email)
    .bind(registration.firstname.as_deref().unwrap_or(DEFAULT_FIRSTNAME))
    .bind(registration.lastname.as_deref().unwrap_or(DEFAULT_LASTNAME))
    .bind(&password_hash)
    .bind(registration.bday.as_deref())
    .bind(registration.phnum.as_deref())
    .fetch_optional(pool)
    .await?;

    if inserted.is_none() {
        return Err(AccountError::AlreadyExists);
    }

    tracing::info!(%email, "user registered");
    Ok(())
}

/// Verify credentials and return the profile with its synced payload.
///
/// # Errors
///
/// `InvalidCredentials` for a missing field, an unknown email or a wrong
/// password; the three cases are indistinguishable to the caller.
pub async fn login(pool: &PgPool, credentials: Credentials) -> Result<LoginProfile, AccountError> {
    let (Some(email), Some(plaintext)) = (credentials.email, credentials.password) else {
        return Err(AccountError::InvalidCredentials);
    };

    let row = sqlx::query("SELECT firstname, lastname, password_hash FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Err(AccountError::InvalidCredentials);
    };

    let stored_hash: String = row.try_get("password_hash")?;
    let verified = tokio::task::spawn_blocking(move || password::verify_password(&plaintext, &stored_hash)).await??;
    if !verified {
        return Err(AccountError::InvalidCredentials);
    }

    let cloud_data = cloud_sync::fetch_cloud_data(pool, &email)
        .await?
        .unwrap_or_default();

    Ok(LoginProfile {
        user_email: email,
        firstname: row.try_get("firstname")?,
        lastname: row.try_get("lastname")?,
        cloud_data,
    })
}

#[cfg(test)]
#[path = "account_test.rs"]
mod tests;
