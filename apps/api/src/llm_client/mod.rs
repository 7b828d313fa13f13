//! LLM Client — the single point of entry for every completion call in the service.
//!
//! ARCHITECTURAL RULE: No other module may talk to a provider directly.
//! All prompts go through `CompletionClient::complete`, which owns the timeout,
//! retry and concurrency policy. Providers only know how to turn one prompt
//! into one piece of text.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

pub mod gemini;

/// Failure reported by a provider for a single attempt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// Network fault, 5xx, or an empty reply. Worth another attempt.
    #[error("transient provider failure: {0}")]
    Transient(String),

    /// Content policy, quota, or a request the provider will never accept.
    #[error("provider rejected the request: {0}")]
    Rejected(String),
}

/// Failure surfaced by `CompletionClient::complete` once the policy has run its course.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompletionError {
    #[error("completion provider unavailable after {attempts} attempts: {message}")]
    ProviderUnavailable { attempts: u32, message: String },

    #[error("completion rejected: {0}")]
    Rejected(String),

    #[error("completion timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

/// A text-generation backend. Implement this to swap providers without
/// touching the analysis pipeline; `CompletionClient` holds it as `Arc<dyn CompletionProvider>`.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Retry schedule for transient provider failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    /// Each retry waits `factor` times longer than the previous one.
    pub factor: u32,
}

impl Default for RetryPolicy {
    /// Two retries: 250ms, then 1000ms.
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(250),
            factor: 4,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay * self.factor.saturating_pow(retry.saturating_sub(1))
    }
}

/// Wraps a provider with timeout, retry and a concurrency cap.
#[derive(Clone)]
pub struct CompletionClient {
    provider: Arc<dyn CompletionProvider>,
    timeout: Duration,
    retry: RetryPolicy,
    permits: Arc<Semaphore>,
}

impl CompletionClient {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        timeout: Duration,
        max_concurrent: usize,
    ) -> Self {
        Self {
            provider,
            timeout,
            retry: RetryPolicy::default(),
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    #[cfg(test)]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Sends `prompt` to the provider and returns the raw completion text.
    ///
    /// Transient failures are retried per the `RetryPolicy`. Rejections and
    /// timeouts are returned immediately. A timed-out attempt is dropped, which
    /// cancels the underlying HTTP request.
    pub async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let _permit = self.permits.acquire().await.map_err(|_| {
            CompletionError::ProviderUnavailable {
                attempts: 0,
                message: "completion client is shut down".to_string(),
            }
        })?;

        let mut attempt = 0;
        loop {
            attempt += 1;

            let outcome = tokio::time::timeout(self.timeout, self.provider.generate(prompt)).await;

            let failure = match outcome {
                Err(_) => {
                    warn!(
                        provider = self.provider.name(),
                        attempt, "completion timed out after {}ms",
                        self.timeout.as_millis()
                    );
                    return Err(CompletionError::Timeout(self.timeout));
                }
                Ok(Ok(text)) => {
                    debug!(
                        provider = self.provider.name(),
                        attempt,
                        chars = text.len(),
                        "completion succeeded"
                    );
                    return Ok(text);
                }
                Ok(Err(ProviderError::Rejected(reason))) => {
                    warn!(provider = self.provider.name(), "completion rejected: {reason}");
                    return Err(CompletionError::Rejected(reason));
                }
                Ok(Err(ProviderError::Transient(message))) => message,
            };

            if attempt > self.retry.max_retries {
                return Err(CompletionError::ProviderUnavailable {
                    attempts: attempt,
                    message: failure,
                });
            }

            let delay = self.retry.delay_for(attempt);
            warn!(
                "Completion attempt {} failed ({}), retrying after {}ms...",
                attempt,
                failure,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
        }
    }
}
