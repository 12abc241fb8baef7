//! Daily progress aggregate.
//!
//! `completed` counts logs marked done on the given day; `total` counts every
//! habit in the catalog, logged or not. The two are independent queries, so
//! `completed` can exceed `total` when logs exist for unknown habit ids.

use serde::Serialize;
use sqlx::PgPool;
use time::Date;

use super::habit::HabitError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: i64,
    pub total: i64,
    pub percentage: i64,
}

impl Progress {
    /// `percentage` is `floor(100 * completed / total)`, or 0 with no habits.
    #[must_use]
    pub fn from_counts(completed: i64, total: i64) -> Self {
        let percentage = if total > 0 { completed * 100 / total } else { 0 };
        Self { completed, total, percentage }
    }
}

/// Compute progress for `day`.
///
/// # Errors
///
/// Returns a database error if either count fails.
pub async fn daily_progress(pool: &PgPool, day: Date) -> Result<Progress, HabitError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM habits")
        .fetch_one(pool)
        .await?;
    let completed: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM habit_logs WHERE log_date = $1 AND status")
        .bind(day)
        .fetch_one(pool)
        .await?;

    Ok(Progress::from_counts(completed, total))
}

#[cfg(test)]
#[path = "progress_test.rs"]
mod tests;
