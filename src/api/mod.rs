mod ai;
pub mod auth;
pub mod error;
mod goals;
mod query;
mod tasks;
mod users;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let ai_routes = Router::new()
        .route("/getTaskSuggestion", get(ai::get_task_suggestion))
        .route("/saveGeneratedTask", post(ai::save_generated_task));

    let user_routes = Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/delete/:id", delete(users::delete_user));

    Router::new()
        .route("/health", get(health_check))
        // Tasks
        .route("/task", post(tasks::create_task).get(tasks::list_tasks))
        .route("/task/:id", put(tasks::update_task).delete(tasks::delete_task))
        .route("/task/finish/:id", put(tasks::finish_task))
        // Goals
        .route("/goal", post(goals::create_goal).get(goals::list_goals))
        .route("/goal/:id", put(goals::update_goal).delete(goals::delete_goal))
        .route("/goal/finish/:id", put(goals::finish_goal))
        .nest("/ai", ai_routes)
        .nest("/user", user_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
