use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{NewUser, User};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    /// Signed so that negative ages surface as validation errors
    pub age: i64,
}

/// Create a new user
///
/// The name is stored trimmed, the same as a CSV cell, so `" Alice"` and
/// `"Alice"` are the same user. Returns 201 with the stored record, 400 if the
/// name is empty or the age is negative, and 409 Conflict if a user with the
/// same name already exists. Bodies that do not deserialize are reported with
/// the rejection's own status and a JSON error body.
pub async fn create_user(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>)> {
    let Json(payload) = payload?;

    let new_user = NewUser::parse(&payload.name, payload.age).map_err(|reason| {
        tracing::warn!("Rejected user creation: {}", reason);
        AppError::InvalidInput(reason.to_string())
    })?;

    let user = state.store.write().await.create(new_user)?;

    tracing::info!("Created user {} ({})", user.id, user.name);

    Ok((StatusCode::CREATED, Json(user)))
}

/// List all users in insertion order
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.store.read().await.list())
}

/// Parse a path segment as a user id
///
/// Only the canonical decimal form is accepted: `+1` and `01` do not name
/// user 1.
fn parse_user_id(raw: &str) -> Option<u64> {
    raw.parse::<u64>()
        .ok()
        .filter(|id| id.to_string() == raw)
}

/// Delete a user by id
///
/// A path segment that is not a canonical integer cannot name a stored user
/// and is reported as 404 like any other missing id.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_user_id(&user_id).ok_or_else(|| {
        tracing::warn!("Delete attempt with non-canonical id: {}", user_id);
        AppError::UserNotFound
    })?;

    let user = state.store.write().await.delete(id)?;

    tracing::info!("Deleted user {} ({})", user.id, user.name);

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("1"), Some(1));
        assert_eq!(parse_user_id("0"), Some(0));
        assert_eq!(parse_user_id("18446744073709551615"), Some(u64::MAX));

        assert_eq!(parse_user_id("+1"), None);
        assert_eq!(parse_user_id("01"), None);
        assert_eq!(parse_user_id(" 1"), None);
        assert_eq!(parse_user_id("abc"), None);
    }
}
