use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use super::auth::{find_verified_user, hash_password_blocking};
use super::error::{require, ApiError, ResultExt};
use crate::db::{Goal, LoginRequest, NewUser, ObjectId, RegisterRequest, Task, User, UserResponse};
use crate::AppState;

/// Register a new user. Emails must be unique.
///
/// POST /user/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    const CONTEXT: &str = "Failed to add new user";

    let Json(req) = body.context(CONTEXT)?;
    let name = require(req.name, "name").context(CONTEXT)?;
    let email = require(req.email, "email").context(CONTEXT)?;
    let password = require(req.password, "password").context(CONTEXT)?;

    let existing = User::find_by_email(&state.db, &email).await.context(CONTEXT)?;
    if !existing.is_empty() {
        return Err(ApiError::duplicate("Email already existed"));
    }

    let password_hash = hash_password_blocking(password).await.context(CONTEXT)?;

    let user = User::insert_one(
        &state.db,
        NewUser {
            name,
            email,
            password_hash,
        },
    )
    .await
    .context(CONTEXT)?;

    info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User added successfully",
            "user": UserResponse::from(user),
        })),
    ))
}

/// Look a user up by email and password.
///
/// POST /user/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    const CONTEXT: &str = "Failed to login";

    let Json(req) = body.context(CONTEXT)?;
    let email = require(req.email, "email").context(CONTEXT)?;
    let password = require(req.password, "password").context(CONTEXT)?;

    let candidates = User::find_by_email(&state.db, &email).await.context(CONTEXT)?;
    let user = find_verified_user(candidates, password)
        .await?
        .ok_or_else(|| ApiError::invalid_login("Email or password is incorrect"))?;

    info!(user_id = %user.id, "User logged in");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Login successfully",
            "user": UserResponse::from(user),
        })),
    ))
}

/// Delete a user together with all of their tasks and goals.
///
/// DELETE /user/delete/:id
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    const CONTEXT: &str = "Failed to delete user";

    let id = ObjectId::parse_str(&id).context(CONTEXT)?;

    let users = User::delete_one(&state.db, &id).await.context(CONTEXT)?;
    let tasks = Task::delete_many_by_user(&state.db, &id).await.context(CONTEXT)?;
    let goals = Goal::delete_many_by_user(&state.db, &id).await.context(CONTEXT)?;

    info!(
        user_id = %id,
        users_deleted = users,
        tasks_deleted = tasks,
        goals_deleted = goals,
        "User deleted"
    );

    Ok(Json(json!({ "message": "User deleted successfully" })))
}
