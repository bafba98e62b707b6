// src/llm/provider/mod.rs
// Provider adapters: one per hosted LLM service, each retrying its own model list

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::llm::error::ProviderFailure;
use crate::prompt::AssembledPrompt;

pub mod anthropic;
pub mod gemini;
pub mod openai;

pub use anthropic::AnthropicClient;
pub use gemini::GeminiClient;
pub use openai::OpenAiCompatClient;

/// Hosted providers the service knows how to call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Gemini,
    OpenAi,
    Anthropic,
    DeepSeek,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::DeepSeek => "deepseek",
        }
    }

    pub fn api_key_var(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::DeepSeek => "DEEPSEEK_API_KEY",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "openai" | "gpt" => Ok(ProviderKind::OpenAi),
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            "deepseek" => Ok(ProviderKind::DeepSeek),
            other => Err(format!("unknown provider '{}'", other)),
        }
    }
}

/// Result of one adapter invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterOutcome {
    Success {
        provider: &'static str,
        model: String,
        text: String,
    },
    Failure {
        provider: &'static str,
        reason: ProviderFailure,
    },
}

impl AdapterOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AdapterOutcome::Success { .. })
    }
}

/// Single call against one model of a provider. Implementations translate
/// the prompt into whatever request shape the provider expects.
#[async_trait]
pub trait ModelClient: Send + Sync {
    fn provider(&self) -> &'static str;

    async fn call(&self, model: &str, prompt: &AssembledPrompt) -> Result<String, ProviderFailure>;
}

/// Uniform adapter interface used by the fallback orchestrator.
/// Never fails: every problem is reported as `AdapterOutcome::Failure`.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(&self, prompt: &AssembledPrompt) -> AdapterOutcome;
}

/// Adapter that tries each model id of a [`ModelClient`] in order
pub struct ModelAdapter<C: ModelClient> {
    client: C,
    models: Vec<String>,
}

impl<C: ModelClient> ModelAdapter<C> {
    pub fn new(client: C, models: Vec<String>) -> Self {
        Self { client, models }
    }
}

#[async_trait]
impl<C: ModelClient> ProviderAdapter for ModelAdapter<C> {
    fn name(&self) -> &'static str {
        self.client.provider()
    }

    async fn generate(&self, prompt: &AssembledPrompt) -> AdapterOutcome {
        let provider = self.client.provider();

        if self.models.is_empty() {
            return AdapterOutcome::Failure {
                provider,
                reason: ProviderFailure::Unavailable,
            };
        }

        for model in &self.models {
            let failure = match self.client.call(model, prompt).await {
                Ok(text) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        debug!(provider, model = %model, "Model returned a reply");
                        return AdapterOutcome::Success {
                            provider,
                            model: model.clone(),
                            text: text.to_string(),
                        };
                    }
                    ProviderFailure::EmptyResponse
                }
                Err(failure) => failure,
            };

            warn!(
                provider,
                model = %model,
                error_class = failure.class(),
                error = %failure,
                "Model call failed, trying next model"
            );
        }

        AdapterOutcome::Failure {
            provider,
            reason: ProviderFailure::ModelsExhausted {
                attempts: self.models.len(),
            },
        }
    }
}

/// Stand-in for a provider without credentials. Always fails, never calls out.
pub struct DisabledAdapter {
    name: &'static str,
}

impl DisabledAdapter {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[async_trait]
impl ProviderAdapter for DisabledAdapter {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn generate(&self, _prompt: &AssembledPrompt) -> AdapterOutcome {
        AdapterOutcome::Failure {
            provider: self.name,
            reason: ProviderFailure::Unavailable,
        }
    }
}

/// Reads a provider API key from the environment; blank counts as missing
pub(crate) fn api_key(kind: ProviderKind) -> anyhow::Result<String> {
    std::env::var(kind.api_key_var())
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or_else(|| anyhow::anyhow!("{} not set", kind.api_key_var()))
}

/// Turns a non-2xx response into `HttpStatus`, otherwise decodes the body
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ProviderFailure> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderFailure::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ProviderFailure::Decode(e.to_string()))
}

fn build_adapter(
    kind: ProviderKind,
    models: Vec<String>,
    timeout: Duration,
) -> anyhow::Result<Arc<dyn ProviderAdapter>> {
    if models.is_empty() {
        anyhow::bail!("no models configured");
    }

    let adapter: Arc<dyn ProviderAdapter> = match kind {
        ProviderKind::Gemini => Arc::new(ModelAdapter::new(GeminiClient::from_env(timeout)?, models)),
        ProviderKind::OpenAi => Arc::new(ModelAdapter::new(OpenAiCompatClient::openai_from_env(timeout)?, models)),
        ProviderKind::Anthropic => Arc::new(ModelAdapter::new(AnthropicClient::from_env(timeout)?, models)),
        ProviderKind::DeepSeek => Arc::new(ModelAdapter::new(OpenAiCompatClient::deepseek_from_env(timeout)?, models)),
    };
    Ok(adapter)
}

/// Builds adapters in priority order. Providers that cannot be set up are
/// logged once here and replaced with a [`DisabledAdapter`].
pub fn build_adapters<F>(
    order: &[ProviderKind],
    models_for: F,
    timeout: Duration,
) -> Vec<Arc<dyn ProviderAdapter>>
where
    F: Fn(ProviderKind) -> Vec<String>,
{
    order
        .iter()
        .map(|&kind| match build_adapter(kind, models_for(kind), timeout) {
            Ok(adapter) => {
                info!(provider = %kind, "Provider adapter enabled");
                adapter
            }
            Err(e) => {
                warn!(provider = %kind, "Provider adapter disabled: {}", e);
                Arc::new(DisabledAdapter::new(kind.as_str())) as Arc<dyn ProviderAdapter>
            }
        })
        .collect()
}
