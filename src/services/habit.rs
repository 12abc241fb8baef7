//! Habit service — catalog CRUD and the daily completion toggle.
//!
//! DESIGN
//! ======
//! Habits and their logs live in separate tables with no foreign key, so a
//! toggle may log an id the catalog has never seen. Deleting a habit removes
//! its logs in the same transaction, leaving no orphan window.
//!
//! A unique `(habit_id, log_date)` constraint backs the toggle: insert with
//! `status = true`, or flip the existing row, in one statement. Concurrent
//! toggles serialize on the row instead of racing to insert duplicates.

use serde::Serialize;
use sqlx::PgPool;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum HabitError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Catalog entry as listed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitRow {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
}

/// Current calendar day in UTC. Logs and progress are bucketed by this.
#[must_use]
pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Add a habit dated `today`. Title is stored as given.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn add_habit(pool: &PgPool, title: &str, today: Date) -> Result<HabitRow, HabitError> {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO habits (id, title, created_on) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(title)
        .bind(today)
        .execute(pool)
        .await?;

    tracing::debug!(%id, %title, "habit added");
    Ok(HabitRow { id, title: title.to_owned() })
}

/// List every habit, oldest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_habits(pool: &PgPool) -> Result<Vec<HabitRow>, HabitError> {
    let rows = sqlx::query_as::<_, (Uuid, String)>("SELECT id, title FROM habits ORDER BY created_at, id")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(id, title)| HabitRow { id, title })
        .collect())
}

/// Delete a habit and all of its logs atomically. Unknown ids are a no-op.
/// Returns whether a catalog row was removed.
///
/// # Errors
///
/// Returns a database error if either delete or the commit fails; in that
/// case neither delete takes effect.
pub async fn delete_habit(pool: &PgPool, habit_id: Uuid) -> Result<bool, HabitError> {
    let mut tx = pool.begin().await?;

    let logs = sqlx::query("DELETE FROM habit_logs WHERE habit_id = $1")
        .bind(habit_id)
        .execute(&mut *tx)
        .await?;
    let habits = sqlx::query("DELETE FROM habits WHERE id = $1")
        .bind(habit_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::debug!(%habit_id, logs = logs.rows_affected(), "habit deleted");
    Ok(habits.rows_affected() > 0)
}

/// Flip the completion flag for `habit_id` on `day`, creating it as `true`
/// if no log exists yet. Returns the new status.
///
/// # Errors
///
/// Returns a database error if the upsert fails.
pub async fn toggle_habit(pool: &PgPool, habit_id: Uuid, day: Date) -> Result<bool, HabitError> {
    let status: bool = sqlx::query_scalar(
        r"INSERT INTO habit_logs (habit_id, log_date, status)
          VALUES ($1, $2, TRUE)
          ON CONFLICT (habit_id, log_date) DO UPDATE SET status = NOT habit_logs.status
          RETURNING status",
    )
    .bind(habit_id)
    .bind(day)
    .fetch_one(pool)
    .await?;

    Ok(status)
}

#[cfg(test)]
#[path = "habit_test.rs"]
mod tests;
