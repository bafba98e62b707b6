//! Response pipeline: handover check, persona selection, prompt assembly and
//! the provider waterfall.
//!
//! `respond` never fails. Every failure mode maps to a fixed reply string so
//! the HTTP layer can always answer the scammer.

pub mod guard;

pub use guard::{HandoverGuard, HANDOVER_ALERT};

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::config::{HoneypotConfig, PersonaMode, PipelineConfig};
use crate::llm::{build_adapters, FallbackOrchestrator, FallbackOutcome, ProviderAdapter};
use crate::persona::{PersonaId, PersonaSelector, SessionPersonaStore};
use crate::prompt::{build_prompt, ConversationTurn};

/// Substituted for an absent or blank inbound message
pub const DEFAULT_GREETING: &str = "Hello";

/// How a reply was produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyKind {
    Handover { trigger: String },
    Generated { provider: &'static str, model: String },
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReply {
    pub text: String,
    /// `None` for handovers, where no persona is selected
    pub persona: Option<PersonaId>,
    pub kind: ReplyKind,
}

impl PipelineReply {
    pub fn is_handover(&self) -> bool {
        matches!(self.kind, ReplyKind::Handover { .. })
    }
}

/// Session id plus the store that remembers its persona
#[derive(Clone, Copy)]
pub struct SessionContext<'a> {
    pub id: &'a str,
    pub store: &'a SessionPersonaStore,
}

pub struct ResponsePipeline {
    guard: HandoverGuard,
    selector: PersonaSelector,
    persona_mode: PersonaMode,
    history_window: Option<usize>,
    orchestrator: FallbackOrchestrator,
}

impl ResponsePipeline {
    pub fn new(config: PipelineConfig, adapters: Vec<Arc<dyn ProviderAdapter>>) -> Self {
        Self {
            guard: HandoverGuard::new(&config.handover_keywords),
            selector: PersonaSelector::new(config.persona_tiers),
            persona_mode: config.persona_mode,
            history_window: config.history_window,
            orchestrator: FallbackOrchestrator::new(adapters),
        }
    }

    /// Production wiring: adapters built from the environment in the
    /// configured priority order.
    pub fn from_config(config: &HoneypotConfig) -> Self {
        let adapters = build_adapters(
            &config.provider_order(),
            |kind| config.models_for(kind),
            Duration::from_secs(config.provider_timeout_secs),
        );
        let pipeline = Self::new(config.pipeline(), adapters);
        info!(order = ?pipeline.orchestrator.order(), "Response pipeline ready");
        pipeline
    }

    /// Reply text for the scammer's latest message. Always non-empty.
    pub async fn respond(&self, user_text: Option<&str>, history: &[ConversationTurn]) -> String {
        self.reply(user_text, history, None).await.text
    }

    /// Like [`respond`](Self::respond) but reports persona and provider, and
    /// honors session persona assignment when a session is supplied.
    #[instrument(skip_all, fields(turns = history.len()))]
    pub async fn reply(
        &self,
        user_text: Option<&str>,
        history: &[ConversationTurn],
        session: Option<SessionContext<'_>>,
    ) -> PipelineReply {
        let user_text = match user_text.map(str::trim) {
            Some(text) if !text.is_empty() => text,
            _ => {
                debug!("Empty inbound message, substituting greeting");
                DEFAULT_GREETING
            }
        };

        if let Some(trigger) = self.guard.matched_trigger(user_text) {
            info!(trigger, "Handover trigger matched");
            return PipelineReply {
                text: HANDOVER_ALERT.to_string(),
                persona: None,
                kind: ReplyKind::Handover {
                    trigger: trigger.to_string(),
                },
            };
        }

        let persona = self.select_persona(history.len(), session);
        let prompt = build_prompt(persona, history, self.history_window, user_text);

        let outcome = self.orchestrator.run(&prompt).await;
        let text = outcome.text().to_string();
        let kind = match outcome {
            FallbackOutcome::Answered { provider, model, .. } => ReplyKind::Generated { provider, model },
            FallbackOutcome::Exhausted => ReplyKind::Exhausted,
        };

        PipelineReply {
            text,
            persona: Some(persona),
            kind,
        }
    }

    fn select_persona(&self, turn_count: usize, session: Option<SessionContext<'_>>) -> PersonaId {
        match (self.persona_mode, session) {
            (PersonaMode::Session, Some(session)) => session.store.assign_random(session.id),
            _ => self.selector.select(turn_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_ignores_session_in_tiered_mode() {
        let pipeline = ResponsePipeline::new(PipelineConfig::default(), Vec::new());
        let store = SessionPersonaStore::new();
        let session = SessionContext { id: "s", store: &store };

        assert_eq!(pipeline.select_persona(0, Some(session)), PersonaId::Savitri);
        assert_eq!(pipeline.select_persona(12, Some(session)), PersonaId::Rahul);
        assert!(store.is_empty());
    }

    #[test]
    fn test_session_mode_uses_store() {
        let config = PipelineConfig {
            persona_mode: PersonaMode::Session,
            ..PipelineConfig::default()
        };
        let pipeline = ResponsePipeline::new(config, Vec::new());
        let store = SessionPersonaStore::new();
        store.assign_with("known", || PersonaId::Ramesh);
        let session = SessionContext { id: "known", store: &store };

        assert_eq!(pipeline.select_persona(0, Some(session)), PersonaId::Ramesh);
        assert_eq!(pipeline.select_persona(30, Some(session)), PersonaId::Ramesh);
        // No session supplied: tier rule
        assert_eq!(pipeline.select_persona(0, None), PersonaId::Savitri);
    }
}
