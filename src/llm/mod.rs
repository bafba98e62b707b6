// src/llm/mod.rs
// Hosted LLM access: provider adapters and the fallback waterfall

pub mod error;
pub mod fallback;
pub mod provider;

pub use error::ProviderFailure;
pub use fallback::{FallbackOrchestrator, FallbackOutcome, PROVIDERS_EXHAUSTED_REPLY};
pub use provider::{
    build_adapters, AdapterOutcome, DisabledAdapter, ModelAdapter, ModelClient, ProviderAdapter,
    ProviderKind,
};
