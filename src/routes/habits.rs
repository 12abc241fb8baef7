//! Habit routes — catalog, toggle and daily progress.
//!
//! "Today" is the UTC calendar day at the moment the request is handled.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use super::{MessageResponse, internal_error, message};
use crate::services::habit::{self, HabitError, HabitRow};
use crate::services::progress::{self, Progress};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AddHabitBody {
    pub title: String,
}

#[derive(Deserialize)]
pub struct ToggleBody {
    #[serde(rename = "habitId")]
    pub habit_id: Uuid,
}

/// `POST /habits` — add a habit dated today.
pub async fn add_habit(
    State(state): State<AppState>,
    Json(body): Json<AddHabitBody>,
) -> Result<MessageResponse, MessageResponse> {
    habit::add_habit(&state.pool, &body.title, habit::today_utc())
        .await
        .map_err(habit_error_to_response)?;
    Ok(message(StatusCode::CREATED, "Habit added"))
}

/// `GET /habits` — list every habit as `{_id, title}`.
pub async fn list_habits(State(state): State<AppState>) -> Result<Json<Vec<HabitRow>>, MessageResponse> {
    let rows = habit::list_habits(&state.pool)
        .await
        .map_err(habit_error_to_response)?;
    Ok(Json(rows))
}

/// `DELETE /habits/:id` — delete a habit and its logs. Unknown ids succeed.
pub async fn delete_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<Uuid>,
) -> Result<MessageResponse, MessageResponse> {
    habit::delete_habit(&state.pool, habit_id)
        .await
        .map_err(habit_error_to_response)?;
    Ok(message(StatusCode::OK, "Deleted"))
}

/// `POST /toggle` — flip today's completion for a habit.
pub async fn toggle_habit(
    State(state): State<AppState>,
    Json(body): Json<ToggleBody>,
) -> Result<MessageResponse, MessageResponse> {
    let status = habit::toggle_habit(&state.pool, body.habit_id, habit::today_utc())
        .await
        .map_err(habit_error_to_response)?;
    tracing::debug!(habit_id = %body.habit_id, status, "habit toggled");
    Ok(message(StatusCode::OK, "Updated"))
}

/// `GET /progress` — today's completed count against the catalog size.
pub async fn progress(State(state): State<AppState>) -> Result<Json<Progress>, MessageResponse> {
    let daily = progress::daily_progress(&state.pool, habit::today_utc())
        .await
        .map_err(habit_error_to_response)?;
    Ok(Json(daily))
}

pub(crate) fn habit_error_to_response(err: HabitError) -> MessageResponse {
    tracing::error!(error = %err, "habit request failed");
    internal_error()
}
