use async_trait::async_trait;

use crate::actors::messages::AppError;

/// Defines the public interface for an upstream completion actor.
///
/// This trait abstracts the specific provider behind the gateway, allowing
/// different backends (remote API, local server, test double) to be used
/// interchangeably.
#[async_trait]
pub trait CompletionActor: Send + Sync + 'static {
    /// Requests a complete text response for a prompt with explicit
    /// generation parameters.
    async fn complete(
        &self,
        model: String,
        prompt: String,
        system_prompt: Option<String>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> Result<String, AppError>;
}
