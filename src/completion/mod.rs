//! Hosted language-model completion service.
//!
//! The suggestion flow only needs "prompt in, text out", so the service is a
//! small trait with one HTTP implementation talking to a chat-completions
//! style endpoint.

mod client;

pub use client::{CompletionRequest, HttpCompletionClient};

use async_trait::async_trait;

/// Sampling temperature sent with every request
pub const TEMPERATURE: f64 = 0.7;
/// Nucleus sampling probability sent with every request
pub const TOP_P: f64 = 0.9;
/// Cap on generated tokens
pub const MAX_TOKENS: u32 = 500;

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API request failed: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),
}

#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Send `prompt` as a single user turn and return the first choice's text.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}
