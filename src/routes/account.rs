//! Account routes — registration, login and cloud sync.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;
use serde_json::{Value, json};

use super::{MessageResponse, internal_error, message};
use crate::services::account::{self, AccountError, Credentials, LoginProfile, Registration};
use crate::services::cloud_sync::{self, SyncError, SyncPayload};
use crate::state::AppState;

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub profile: LoginProfile,
}

/// `POST /register` — create a user.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<Registration>,
) -> Result<MessageResponse, MessageResponse> {
    account::register(&state.pool, body)
        .await
        .map_err(account_error_to_response)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Registration successful", "status": "success" })),
    ))
}

/// `POST /login` — verify credentials, return profile and synced payload.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<Credentials>,
) -> Result<Json<LoginResponse>, MessageResponse> {
    let profile = account::login(&state.pool, body)
        .await
        .map_err(account_error_to_response)?;

    Ok(Json(LoginResponse { message: "Login successful", profile }))
}

/// `POST /api/migrate` — replace the caller's cloud payload.
pub async fn migrate(
    State(state): State<AppState>,
    Json(body): Json<SyncPayload>,
) -> Result<Json<Value>, MessageResponse> {
    cloud_sync::sync_cloud_data(&state.pool, body)
        .await
        .map_err(sync_error_to_response)?;

    Ok(Json(json!({ "message": "Cloud Sync Complete", "status": "success" })))
}

pub(crate) fn account_error_to_response(err: AccountError) -> MessageResponse {
    match err {
        AccountError::MissingCredentials => message(StatusCode::BAD_REQUEST, &err.to_string()),
        AccountError::AlreadyExists => message(StatusCode::CONFLICT, &err.to_string()),
        AccountError::InvalidCredentials => message(StatusCode::UNAUTHORIZED, &err.to_string()),
        AccountError::Password(_) | AccountError::Worker(_) | AccountError::Database(_) => {
            tracing::error!(error = %err, "account request failed");
            internal_error()
        }
    }
}

pub(crate) fn sync_error_to_response(err: SyncError) -> MessageResponse {
    match err {
        SyncError::MissingEmail => message(StatusCode::BAD_REQUEST, &err.to_string()),
        SyncError::Database(e) => {
            tracing::error!(error = %e, "cloud sync failed");
            internal_error()
        }
    }
}
