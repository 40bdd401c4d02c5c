use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use super::error::{require, require_id, ApiError, ResultExt};
use super::query::QueryArgs;
use crate::db::{CreateTaskRequest, NewTask, ObjectId, Task, TaskUpdate, UpdateTaskRequest};
use crate::AppState;

/// Create a task under a goal
///
/// POST /task
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    const CONTEXT: &str = "Failed to add new task";

    let Json(req) = body.context(CONTEXT)?;
    let user_id = require_id(req.user_id, "user_id").context(CONTEXT)?;
    let goal_id = require_id(req.goal_id, "goal_id").context(CONTEXT)?;
    let name = require(req.name, "name").context(CONTEXT)?;
    let date = require(req.date, "date").context(CONTEXT)?;

    let task = Task::insert_one(
        &state.db,
        NewTask {
            user_id,
            goal_id,
            name,
            date,
        },
    )
    .await
    .context(CONTEXT)?;

    info!(task_id = %task.id, goal_id = %task.goal_id, "Task created");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Task added successfully", "task": task })),
    ))
}

/// List a user's tasks filtered by finish state and, when `goal_id` is
/// non-empty, by goal
///
/// GET /task?user_id=..&finish=1&goal_id=..
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    query: Result<QueryArgs, QueryRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    const CONTEXT: &str = "Failed to get task data";

    let args = query.context(CONTEXT)?;
    let user_id = require_id(args.first("user_id"), "user_id").context(CONTEXT)?;
    let finish = require(args.first("finish"), "finish").context(CONTEXT)? == "1";
    let goal_id = match args.first("goal_id").as_deref() {
        None | Some("") => None,
        Some(raw) => Some(ObjectId::parse_str(raw).context(CONTEXT)?),
    };

    let tasks = Task::find(&state.db, &user_id, goal_id.as_ref(), finish)
        .await
        .context(CONTEXT)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Get task data successfully", "tasks": tasks })),
    ))
}

/// Replace a task's goal, name and date
///
/// PUT /task/:id
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    const CONTEXT: &str = "Failed to update task";

    let Json(req) = body.context(CONTEXT)?;
    let goal_id = require_id(req.goal_id, "goal_id").context(CONTEXT)?;
    let name = require(req.name, "name").context(CONTEXT)?;
    let date = require(req.date, "date").context(CONTEXT)?;
    let task_id = ObjectId::parse_str(&id).context(CONTEXT)?;

    let modified = Task::update_one(&state.db, &task_id, &goal_id, &name, &date)
        .await
        .context(CONTEXT)?;
    if modified == 0 {
        return Err(ApiError::not_found("Task not found"));
    }

    info!(task_id = %task_id, "Task updated");

    let task = TaskUpdate {
        id,
        goal_id: goal_id.to_hex(),
        name,
        date,
    };
    Ok(Json(json!({ "message": "Task updated successfully", "task": task })))
}

/// DELETE /task/:id
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    const CONTEXT: &str = "Failed to delete task";

    let task_id = ObjectId::parse_str(&id).context(CONTEXT)?;
    let deleted = Task::delete_one(&state.db, &task_id).await.context(CONTEXT)?;
    if deleted == 0 {
        return Err(ApiError::not_found("Task not found"));
    }

    info!(task_id = %task_id, "Task deleted");
    Ok(Json(json!({ "message": "Task deleted successfully" })))
}

/// Mark a task finished
///
/// PUT /task/finish/:id
pub async fn finish_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    const CONTEXT: &str = "Failed to update task";

    let task_id = ObjectId::parse_str(&id).context(CONTEXT)?;
    let modified = Task::mark_finished(&state.db, &task_id).await.context(CONTEXT)?;
    if modified == 0 {
        return Err(ApiError::not_found("Task not found"));
    }

    info!(task_id = %task_id, "Task finished");
    Ok(Json(json!({ "message": "Task updated successfully" })))
}
