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
use crate::db::{CreateGoalRequest, Goal, NewGoal, ObjectId, UpdateGoalRequest};
use crate::AppState;

/// POST /goal
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateGoalRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    const CONTEXT: &str = "Failed to add new goal";

    let Json(req) = body.context(CONTEXT)?;
    let user_id = require_id(req.user_id, "user_id").context(CONTEXT)?;
    let name = require(req.name, "name").context(CONTEXT)?;
    let date = require(req.date, "date").context(CONTEXT)?;

    let goal = Goal::insert_one(&state.db, NewGoal { user_id, name, date })
        .await
        .context(CONTEXT)?;

    info!(goal_id = %goal.id, user_id = %goal.user_id, "Goal created");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Goal added successfully", "goal": goal })),
    ))
}

/// GET /goal?user_id=..&finish=1
pub async fn list_goals(
    State(state): State<Arc<AppState>>,
    query: Result<QueryArgs, QueryRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    const CONTEXT: &str = "Failed to get goal data";

    let args = query.context(CONTEXT)?;
    let user_id = require_id(args.first("user_id"), "user_id").context(CONTEXT)?;
    let finish = require(args.first("finish"), "finish").context(CONTEXT)? == "1";

    let goals = Goal::find(&state.db, &user_id, finish).await.context(CONTEXT)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Get goal data successfully", "goals": goals })),
    ))
}

/// PUT /goal/:id
pub async fn update_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateGoalRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    const CONTEXT: &str = "Failed to update goal";

    let Json(req) = body.context(CONTEXT)?;
    let name = require(req.name, "name").context(CONTEXT)?;
    let date = require(req.date, "date").context(CONTEXT)?;
    let goal_id = ObjectId::parse_str(&id).context(CONTEXT)?;

    let modified = Goal::update_one(&state.db, &goal_id, &name, &date)
        .await
        .context(CONTEXT)?;
    if modified == 0 {
        return Err(ApiError::not_found("Goal not found"));
    }

    info!(goal_id = %goal_id, "Goal updated");
    Ok(Json(json!({ "message": "Goal updated successfully" })))
}

/// PUT /goal/finish/:id
pub async fn finish_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    const CONTEXT: &str = "Failed to update goal";

    let goal_id = ObjectId::parse_str(&id).context(CONTEXT)?;
    let modified = Goal::mark_finished(&state.db, &goal_id).await.context(CONTEXT)?;
    if modified == 0 {
        return Err(ApiError::not_found("Goal not found"));
    }

    info!(goal_id = %goal_id, "Goal finished");
    Ok(Json(json!({ "message": "Goal updated successfully" })))
}

/// Delete a goal. Its tasks are left in place.
///
/// DELETE /goal/:id
pub async fn delete_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    const CONTEXT: &str = "Failed to delete goal";

    let goal_id = ObjectId::parse_str(&id).context(CONTEXT)?;
    let deleted = Goal::delete_one(&state.db, &goal_id).await.context(CONTEXT)?;
    if deleted == 0 {
        return Err(ApiError::not_found("Goal not found"));
    }

    info!(goal_id = %goal_id, "Goal deleted");
    Ok(Json(json!({ "message": "Goal deleted successfully" })))
}
