// src/state.rs
// Shared state handed to every HTTP handler

use std::sync::Arc;

use crate::config::HoneypotConfig;
use crate::forensics::{BaitGenerator, ComplianceReporter, InteractionStore};
use crate::persona::SessionPersonaStore;
use crate::pipeline::ResponsePipeline;

#[derive(Clone)]
pub struct AppState {
    // -------- Reply --------
    pub pipeline: Arc<ResponsePipeline>,
    pub sessions: Arc<SessionPersonaStore>,

    // -------- Forensics --------
    pub interactions: InteractionStore,
    pub reporter: ComplianceReporter,
    pub bait: BaitGenerator,

    // -------- Access --------
    pub api_key: String,
}

impl AppState {
    pub fn new(
        pipeline: ResponsePipeline,
        interactions: InteractionStore,
        reporter: ComplianceReporter,
        api_key: impl Into<String>,
        bait: BaitGenerator,
    ) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            sessions: Arc::new(SessionPersonaStore::new()),
            interactions,
            reporter,
            bait,
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &HoneypotConfig, interactions: InteractionStore) -> Self {
        Self::new(
            ResponsePipeline::from_config(config),
            interactions,
            ComplianceReporter::new(&config.report_url, &config.report_team),
            config.api_key.clone(),
            BaitGenerator::new(&config.bait_amount, &config.bait_link_base),
        )
    }
}
