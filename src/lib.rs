pub mod api;
pub mod completion;
pub mod config;
pub mod db;
pub mod suggestion;

pub use db::DbPool;

use std::sync::Arc;

use crate::completion::CompletionService;

/// Everything the route layer needs, built once at startup.
pub struct AppState {
    pub db: DbPool,
    pub completion: Arc<dyn CompletionService>,
}

impl AppState {
    pub fn new(db: DbPool, completion: Arc<dyn CompletionService>) -> Self {
        Self { db, completion }
    }
}
