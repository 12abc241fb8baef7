//! Cloud sync service — full-replace upsert of a user's habit payload.
//!
//! DESIGN
//! ======
//! One `user_cloud_data` row per email. Every sync overwrites all payload
//! columns and the metadata in a single `INSERT ... ON CONFLICT` statement.
//! There is no merge and no version check: the last writer wins.
//! Fields missing from the request are stored as NULL and read back as
//! empty containers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use time::OffsetDateTime;

use super::non_blank;

pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Client-submitted sync request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPayload {
    pub email: Option<String>,
    pub habits: Option<Vec<Value>>,
    pub progress_data: Option<Map<String, Value>>,
    pub daily_notes: Option<Map<String, Value>>,
    pub timezone: Option<String>,
}

/// Stored payload as returned to a client on login.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudData {
    pub habits: Vec<Value>,
    pub progress_data: Map<String, Value>,
    pub daily_notes: Map<String, Value>,
}

impl CloudData {
    /// Build from nullable stored columns, defaulting each to empty.
    #[must_use]
    pub fn from_stored(
        habits: Option<Vec<Value>>,
        progress_data: Option<Map<String, Value>>,
        daily_notes: Option<Map<String, Value>>,
    ) -> Self {
        Self {
            habits: habits.unwrap_or_default(),
            progress_data: progress_data.unwrap_or_default(),
            daily_notes: daily_notes.unwrap_or_default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Email required")]
    MissingEmail,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Upsert the caller's payload, keyed by email. Returns the `lastSynced` stamp.
///
/// # Errors
///
/// Returns `MissingEmail` before touching the database if no email was sent.
pub async fn sync_cloud_data(pool: &PgPool, payload: SyncPayload) -> Result<OffsetDateTime, SyncError> {
    let email = non_blank(payload.email.as_deref()).ok_or(SyncError::MissingEmail)?;
    let timezone = payload.timezone.as_deref().unwrap_or(DEFAULT_TIMEZONE);
    let last_synced = OffsetDateTime::now_utc();

    sqlx::query(
        r"INSERT INTO user_cloud_data (email, habits, progress_data, daily_notes, last_synced, timezone)
          VALUES ($1, $2, $3, $4, $5, $6)
          ON CONFLICT (email) DO UPDATE SET
              habits = EXCLUDED.habits,
              progress_data = EXCLUDED.progress_data,
              daily_notes = EXCLUDED.daily_notes,
              last_synced = EXCLUDED.last_synced,
              timezone = EXCLUDED.timezone",
    )
    .bind(email)
    .bind(payload.habits.map(Json))
    .bind(payload.progress_data.map(Json))
    .bind(payload.daily_notes.map(Json))
    .bind(last_synced)
    .bind(timezone)
    .execute(pool)
    .await?;

    tracing::info!(%email, %timezone, "cloud data synced");
    Ok(last_synced)
}

/// Load the stored payload for an email, if any sync has happened.
///
/// # Errors
///
/// Returns a database error if the query fails or a column does not decode.
pub async fn fetch_cloud_data(pool: &PgPool, email: &str) -> Result<Option<CloudData>, sqlx::Error> {
    let row = sqlx::query("SELECT habits, progress_data, daily_notes FROM user_cloud_data WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let habits: Option<Json<Vec<Value>>> = row.try_get("habits")?;
    let progress_data: Option<Json<Map<String, Value>>> = row.try_get("progress_data")?;
    let daily_notes: Option<Json<Map<String, Value>>> = row.try_get("daily_notes")?;

    Ok(Some(CloudData::from_stored(
        habits.map(|j| j.0),
        progress_data.map(|j| j.0),
        daily_notes.map(|j| j.0),
    )))
}

#[cfg(test)]
#[path = "cloud_sync_test.rs"]
mod tests;
