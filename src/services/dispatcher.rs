//! Fallback Dispatcher
//!
//! Walks the configured provider chain until one provider answers

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::models::{AttemptError, DispatchOutcome, ProviderId, ProviderReply};
use crate::providers::Provider;

/// Answer returned when every provider fails
pub const FALLBACK_TEXT: &str = "No provider could answer. Please try again later.";

/// Fallback Dispatcher
///
/// Holds the resolved provider chain and attempts each provider in order,
/// racing every attempt against a bounded timeout. Adapter failures never
/// escape: they become attempt records inside the outcome.
pub struct FallbackDispatcher {
    /// Providers in priority order
    chain: Vec<Arc<dyn Provider>>,
    /// Configured provider order, reported in every outcome
    order: Vec<ProviderId>,
    /// Per-attempt timeout
    attempt_timeout: Duration,
}

impl std::fmt::Debug for FallbackDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackDispatcher")
            .field("order", &self.order)
            .field("attempt_timeout", &self.attempt_timeout)
            .finish()
    }
}

impl FallbackDispatcher {
    /// Create a new dispatcher from an ordered provider list
    ///
    /// Every identifier in the order must be present in the registry; a
    /// missing adapter is a configuration defect caught at startup.
    pub fn new(
        order: &[ProviderId],
        registry: &HashMap<ProviderId, Arc<dyn Provider>>,
        attempt_timeout: Duration,
    ) -> Result<Self> {
        if order.is_empty() {
            anyhow::bail!("Provider order cannot be empty");
        }

        let chain = order
            .iter()
            .map(|id| {
                registry
                    .get(id)
                    .cloned()
                    .with_context(|| format!("No adapter registered for provider: {}", id))
            })
            .collect::<Result<Vec<_>>>()?;

        info!("Fallback dispatcher initialized with {} providers", chain.len());

        Ok(Self {
            chain,
            order: order.to_vec(),
            attempt_timeout,
        })
    }

    /// Providers in the configured order
    pub fn order(&self) -> &[ProviderId] {
        &self.order
    }

    /// Number of providers in the chain
    pub fn provider_count(&self) -> usize {
        self.chain.len()
    }

    /// Walk the chain until a provider answers
    ///
    /// Infallible to the caller: the all-failed case is still an outcome,
    /// carrying the fixed fallback text and one error per provider.
    pub async fn dispatch(&self, prompt: &str, system: Option<&str>) -> DispatchOutcome {
        let mut errors: Vec<AttemptError> = Vec::new();

        for provider in &self.chain {
            let id = provider.id();
            debug!("Attempting provider: {}", id);

            match timeout(self.attempt_timeout, provider.invoke(prompt, system)).await {
                Ok(Ok(reply)) => {
                    let text = reply.text.trim();
                    if text.is_empty() {
                        warn!("Provider {} returned an empty answer", id);
                        errors.push(AttemptError {
                            provider: id,
                            error: format!("{} returned empty response", id),
                        });
                        continue;
                    }

                    info!("Provider {} answered with model {}", id, reply.model);
                    return DispatchOutcome::success(
                        ProviderReply {
                            provider: id,
                            model: reply.model,
                            text: text.to_string(),
                        },
                        self.order.clone(),
                        errors,
                    );
                }
                Ok(Err(error)) => {
                    warn!("Provider {} failed: {:#}", id, error);
                    errors.push(AttemptError {
                        provider: id,
                        error: format!("{:#}", error),
                    });
                }
                Err(_elapsed) => {
                    // The invoke future is dropped here, so a late result
                    // cannot reach the outcome
                    warn!(
                        "Provider {} timed out after {}ms",
                        id,
                        self.attempt_timeout.as_millis()
                    );
                    errors.push(AttemptError {
                        provider: id,
                        error: format!("{} timeout after {}ms", id, self.attempt_timeout.as_millis()),
                    });
                }
            }
        }

        info!("All {} providers failed, returning fallback answer", self.order.len());

        DispatchOutcome::exhausted(FALLBACK_TEXT.to_string(), self.order.clone(), errors)
    }
}
