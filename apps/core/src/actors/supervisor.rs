use lru::LruCache;
use std::num::NonZeroUsize;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout, Duration};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::actors::messages::{ActorError, AppError, SupervisorMessage};
use crate::actors::provider::ProviderActorHandle;
use crate::actors::traits::CompletionActor;
use crate::config::GatewayConfig;
use crate::models::{GatewayRequest, GatewayResponse};
use crate::pipeline::{QualityAnalyzer, ResponseProcessor};
use crate::rate_limiter::RateLimiter;
use crate::selector::{ModelSelector, SelectionResult};

const HANDLE_TIMEOUT: Duration = Duration::from_secs(180);

/// Selection results memoized per normalized input.
const STRATEGY_CACHE_SIZE: usize = 256;

/// A handle to the supervisor actor.
///
/// This is the primary entry point for all business logic in the gateway. It
/// orchestrates rate limiting, model selection, the upstream completion call,
/// and response post-processing.
#[derive(Clone)]
pub struct SupervisorHandle {
    sender: mpsc::Sender<SupervisorMessage>,
}

impl SupervisorHandle {
    /// Creates a supervisor wired to a live provider actor.
    pub fn new(config: GatewayConfig) -> Self {
        let provider = ProviderActorHandle::new(
            config.provider_url.clone(),
            config.api_key.clone(),
            config.request_timeout,
        );
        Self::with_completion_actor(config, Box::new(provider))
    }

    /// Creates a supervisor with an explicit completion backend.
    ///
    /// Tests inject a double here; production uses [`SupervisorHandle::new`].
    pub fn with_completion_actor(
        config: GatewayConfig,
        provider: Box<dyn CompletionActor>,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let actor = SupervisorActorRunner::new(receiver, config, provider);
        tokio::spawn(async move { actor.run().await });
        Self { sender }
    }

    /// Processes one gateway request end to end and returns the finished
    /// response.
    #[instrument(skip(self, request), fields(client_id = %request.client_id))]
    pub async fn process_request(
        &self,
        request: GatewayRequest,
    ) -> Result<GatewayResponse, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = SupervisorMessage::ProcessInput {
            client_id: request.client_id,
            input: request.input,
            context: request.context,
            responder: send,
        };
        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(ActorError::Internal(e.to_string())))?;
        timeout(HANDLE_TIMEOUT, recv)
            .await?
            .map_err(|e| AppError::Actor(ActorError::Internal(e.to_string())))?
    }
}

// --- Actor Runner (Internal Logic) ---
struct SupervisorActorRunner {
    receiver: mpsc::Receiver<SupervisorMessage>,
    provider: Box<dyn CompletionActor>,
    selector: ModelSelector,
    processor: ResponseProcessor,
    quality: QualityAnalyzer,
    limiter: RateLimiter,
    strategy_cache: LruCache<String, SelectionResult>,
}

impl SupervisorActorRunner {
    fn new(
        receiver: mpsc::Receiver<SupervisorMessage>,
        config: GatewayConfig,
        provider: Box<dyn CompletionActor>,
    ) -> Self {
        let cache_size = NonZeroUsize::new(STRATEGY_CACHE_SIZE)
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            receiver,
            provider,
            selector: ModelSelector::with_default_key(config.default_model.clone()),
            processor: ResponseProcessor::new(),
            quality: QualityAnalyzer::new(),
            limiter: RateLimiter::new(config.rate_limit, config.rate_window),
            strategy_cache: LruCache::new(cache_size),
        }
    }

    async fn run(mut self) {
        info!("SupervisorActor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SupervisorMessage::ProcessInput {
                    client_id,
                    input,
                    context,
                    responder,
                } => {
                    let result = self.process(client_id, input, context).await;
                    let _ = responder.send(result);
                }
                SupervisorMessage::Shutdown => break,
            }
        }

        info!("SupervisorActor stopped");
    }

    async fn process(
        &mut self,
        client_id: String,
        input: String,
        context: Option<std::collections::HashMap<String, String>>,
    ) -> Result<GatewayResponse, AppError> {
        if !self.limiter.check(&client_id) {
            warn!(%client_id, "rate limit exceeded");
            return Err(AppError::RateLimited);
        }

        let selection = self.select_cached(&input);
        let config = &selection.selected_model;

        let raw = self
            .provider
            .complete(
                config.name.clone(),
                input.clone(),
                Some(config.system_prompt.clone()),
                Some(selection.strategy.temperature),
                Some(selection.strategy.max_tokens),
            )
            .await?;

        let processed = self.processor.process(&raw);
        let content_type = processed.content_type();

        // Diagnostics only; the score never gates the response.
        let report = self
            .quality
            .analyze(&processed.formatted, content_type, context.as_ref());
        info!(
            model = %config.name,
            content_type = content_type.label(),
            overall_score = report.overall_score,
            "response processed"
        );

        Ok(GatewayResponse {
            request_id: Uuid::new_v4().to_string(),
            content: processed.formatted,
            model: config.name.clone(),
            content_type,
            strategy: selection.strategy.clone(),
            created_at: chrono::Utc::now(),
        })
    }

    /// Selection memoized per input; repeated inputs skip re-analysis.
    fn select_cached(&mut self, input: &str) -> SelectionResult {
        let key = input.trim().to_lowercase();
        if let Some(hit) = self.strategy_cache.get(&key) {
            return hit.clone();
        }
        let selection = self.selector.select(input);
        self.strategy_cache.put(key, selection.clone());
        selection
    }
}
