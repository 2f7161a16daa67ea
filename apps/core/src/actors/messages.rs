use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::oneshot;

use crate::models::GatewayResponse;

/// Defines errors that can occur within the actor system.
#[derive(Debug, thiserror::Error, Serialize, Clone)]
pub enum ActorError {
    /// An error originating from the provider actor.
    #[error("Completion request failed: {0}")]
    CompletionError(String),
    /// A generic internal error within an actor.
    #[error("Internal system error: {0}")]
    Internal(String),
    /// An error indicating that an actor operation timed out.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl From<tokio::time::error::Elapsed> for ActorError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        ActorError::Timeout(format!("Actor operation timed out: {}", err))
    }
}

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Messages that can be sent to the provider actor.
#[derive(Debug)]
pub enum ProviderMessage {
    /// A request for a complete text response with explicit parameters.
    Complete {
        model: String,
        prompt: String,
        system_prompt: Option<String>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
        /// A channel to send the final `String` result back.
        responder: oneshot::Sender<Result<String, AppError>>,
    },
}

/// Messages that can be sent to the supervisor actor.
#[derive(Debug)]
pub enum SupervisorMessage {
    /// A request to process one user input end to end: rate limit, model
    /// selection, upstream call, response post-processing.
    ProcessInput {
        client_id: String,
        input: String,
        context: Option<HashMap<String, String>>,
        /// A channel to send the finished gateway response back.
        responder: oneshot::Sender<Result<GatewayResponse, AppError>>,
    },
    /// A command to shut down the supervisor and its child actors.
    #[allow(dead_code)]
    Shutdown,
}
