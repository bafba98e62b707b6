//! Fallback waterfall across provider adapters.
//!
//! Adapters are tried strictly one after another in their configured order.
//! The first non-empty reply wins and nothing after it is called.

use std::sync::Arc;
use tracing::{error, info, warn};

use super::provider::{AdapterOutcome, ProviderAdapter};
use crate::prompt::AssembledPrompt;

/// Reply used when every adapter came back empty-handed
pub const PROVIDERS_EXHAUSTED_REPLY: &str = "Beta internet slow hai... ek min ruko...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackOutcome {
    Answered {
        provider: &'static str,
        model: String,
        text: String,
    },
    Exhausted,
}

impl FallbackOutcome {
    /// Text to send back, substituting the fixed reply on exhaustion
    pub fn text(&self) -> &str {
        match self {
            FallbackOutcome::Answered { text, .. } => text,
            FallbackOutcome::Exhausted => PROVIDERS_EXHAUSTED_REPLY,
        }
    }
}

pub struct FallbackOrchestrator {
    adapters: Vec<Arc<dyn ProviderAdapter>>,
}

impl FallbackOrchestrator {
    pub fn new(adapters: Vec<Arc<dyn ProviderAdapter>>) -> Self {
        Self { adapters }
    }

    /// Adapter names in priority order
    pub fn order(&self) -> Vec<&'static str> {
        self.adapters.iter().map(|a| a.name()).collect()
    }

    pub async fn run(&self, prompt: &AssembledPrompt) -> FallbackOutcome {
        for (position, adapter) in self.adapters.iter().enumerate() {
            match adapter.generate(prompt).await {
                AdapterOutcome::Success { provider, model, text } => {
                    info!(provider, model = %model, position, "Reply generated");
                    return FallbackOutcome::Answered { provider, model, text };
                }
                AdapterOutcome::Failure { provider, reason } => {
                    warn!(
                        provider,
                        position,
                        error_class = reason.class(),
                        error = %reason,
                        "Provider failed, falling through"
                    );
                }
            }
        }

        error!(
            providers = self.adapters.len(),
            "All providers exhausted, sending fixed reply"
        );
        FallbackOutcome::Exhausted
    }
}
