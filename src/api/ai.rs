//! AI task suggestion endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

use super::error::{require, require_id, ApiError, ResultExt};
use super::query::QueryArgs;
use crate::db::{Goal, NewGoal, NewTask, ObjectId, Task};
use crate::suggestion::{build_prompt, parse_suggestion, SuggestionInput};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SaveGeneratedTaskRequest {
    pub user_id: Option<String>,
    pub goal_name: Option<String>,
    pub goal_date: Option<String>,
    pub task_list: Option<Vec<GeneratedTaskItem>>,
}

/// One entry of `task_list`; each carries its own owner
#[derive(Debug, Default, Deserialize)]
pub struct GeneratedTaskItem {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub date: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Ask the completion service for a task breakdown of a goal, starting today.
///
/// GET /ai/getTaskSuggestion?goal=..&end=..&requirement=..
pub async fn get_task_suggestion(
    State(state): State<Arc<AppState>>,
    query: Result<QueryArgs, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let args = query?;

    // `end` is the target date
    let (Some(goal), Some(end), Some(requirement)) = (
        non_empty(args.first("goal")),
        non_empty(args.first("end")),
        non_empty(args.first("requirement")),
    ) else {
        return Err(ApiError::bad_request("Missing parameters"));
    };

    let input = SuggestionInput::starting_today(goal, end, requirement);
    let prompt = build_prompt(&input);

    let reply = state.completion.complete(&prompt).await?;
    debug!(reply = %reply, "Raw suggestion reply");

    let parsed = parse_suggestion(&reply);
    debug!(message = %parsed.message, tasks = ?parsed.tasks, "Parsed suggestion");

    if !parsed.is_usable() {
        return Err(ApiError::parse_failure(
            "Failed to parse task suggestions",
            reply,
        ));
    }

    info!(tasks = parsed.tasks.len(), "Task suggestion generated");

    Ok(Json(json!({
        "message": parsed.message,
        "task": parsed.tasks,
    })))
}

/// Persist an accepted suggestion: one goal plus its tasks, in one transaction.
///
/// POST /ai/saveGeneratedTask
pub async fn save_generated_task(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SaveGeneratedTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    const CONTEXT: &str = "Failed to add new data";

    let Json(req) = body.context(CONTEXT)?;
    let user_id = require_id(req.user_id, "user_id").context(CONTEXT)?;
    let goal_name = require(req.goal_name, "goal_name").context(CONTEXT)?;
    let goal_date = require(req.goal_date, "goal_date").context(CONTEXT)?;
    let items = req
        .task_list
        .ok_or_else(|| ApiError::missing_field("task_list"))
        .context(CONTEXT)?;
    if items.is_empty() {
        return Err(ApiError::bad_request("task_list must not be empty").context(CONTEXT));
    }

    // Validate every entry before touching the store
    let mut pending = Vec::with_capacity(items.len());
    for item in items {
        let owner = require_id(item.user_id, "task_list[].user_id").context(CONTEXT)?;
        let name = require(item.name, "task_list[].name").context(CONTEXT)?;
        let date = require(item.date, "task_list[].date").context(CONTEXT)?;
        pending.push((owner, name, date));
    }

    let mut tx = state.db.begin().await.context(CONTEXT)?;

    let goal = Goal::insert_one(
        &mut *tx,
        NewGoal {
            user_id,
            name: goal_name,
            date: goal_date,
        },
    )
    .await
    .context(CONTEXT)?;
    let goal_id = ObjectId::parse_str(&goal.id).context(CONTEXT)?;

    let tasks = pending
        .into_iter()
        .map(|(owner, name, date)| NewTask {
            user_id: owner,
            goal_id,
            name,
            date,
        })
        .collect();
    let inserted = Task::insert_many(&mut *tx, tasks).await.context(CONTEXT)?;

    tx.commit().await.context(CONTEXT)?;

    info!(goal_id = %goal.id, tasks = inserted.len(), "Generated tasks saved");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Data added successfully" })),
    ))
}
