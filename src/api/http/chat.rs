// src/api/http/chat.rs

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult, IntoApiError};
use crate::forensics::{self, risk, BaitPayload, Intelligence, InteractionRecord, NewInteraction};
use crate::pipeline::{PipelineReply, ReplyKind, SessionContext};
use crate::prompt::ConversationTurn;
use crate::state::AppState;

pub const HONEYPOT_AGENT_ID: &str = "savitri_devi";
pub const AGENT_OFFLINE_REPLY: &str = "Other agents are currently offline. Switching to Savitri Devi.";
const AGENT_DISPLAY_NAME: &str = "Savitri Devi";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub agent_id: Option<String>,
    pub text: Option<String>,
    #[serde(default, alias = "conversationHistory")]
    pub history: Vec<ConversationTurn>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub status: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub reply: String,
    pub risk_score: u8,
    pub agent_used: String,
    pub persona: Option<String>,
    pub provider: Option<String>,
    pub handover: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bait: Option<BaitPayload>,
    pub intelligence: Intelligence,
}

#[derive(Serialize)]
pub struct SessionLogResponse {
    pub session_id: String,
    pub interactions: Vec<InteractionRecord>,
}

pub(crate) fn check_api_key(headers: &HeaderMap, expected: &str) -> ApiResult<()> {
    let provided = headers.get("x-api-key").and_then(|v| v.to_str().ok());
    if provided == Some(expected) {
        Ok(())
    } else {
        Err(ApiError::unauthorized("Unauthorized"))
    }
}

fn fresh_session_id() -> String {
    format!("anon-{}", uuid::Uuid::new_v4())
}

pub async fn chat_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        check_api_key(&headers, &app_state.api_key)?;

        let Json(request) = payload.map_err(|e| {
            warn!("Rejected chat body: {}", e);
            ApiError::bad_request("Invalid JSON Body")
        })?;

        // Minted ids are for logging only; they never enter the persona store
        let supplied_session = request.session_id.filter(|s| !s.trim().is_empty());
        let session_id = supplied_session.clone().unwrap_or_else(fresh_session_id);
        let agent_id = request.agent_id.as_deref().unwrap_or(HONEYPOT_AGENT_ID);
        let user_text = request.text.as_deref().unwrap_or_default();

        info!(session_id = %session_id, agent_id, turns = request.history.len(), "Incoming scammer message");

        // Only the honeypot agent is served; other agent ids get a fixed notice
        let reply: Option<PipelineReply> = if agent_id == HONEYPOT_AGENT_ID {
            let session = supplied_session.as_deref().map(|id| SessionContext {
                id,
                store: &app_state.sessions,
            });
            Some(
                app_state
                    .pipeline
                    .reply(request.text.as_deref(), &request.history, session)
                    .await,
            )
        } else {
            info!(agent_id, "Unknown agent requested");
            None
        };

        let reply_text = reply
            .as_ref()
            .map(|r| r.text.clone())
            .unwrap_or_else(|| AGENT_OFFLINE_REPLY.to_string());
        let handover = reply.as_ref().is_some_and(PipelineReply::is_handover);
        let persona = reply.as_ref().and_then(|r| r.persona).map(|p| p.to_string());
        let provider = reply.as_ref().and_then(|r| match &r.kind {
            ReplyKind::Generated { provider, .. } => Some(provider.to_string()),
            _ => None,
        });

        let risk_score = risk::score(user_text, handover);
        let intelligence = forensics::extract(user_text);

        let bait: Option<BaitPayload> = (risk::is_payment_risk(risk_score) && !handover).then(|| {
            let bait = app_state.bait.generate(&mut rand::rng());
            info!(
                session_id = %session_id,
                file = bait.tracking_link.file_name,
                "Payment talk detected, attaching bait"
            );
            bait
        });

        let interaction = NewInteraction {
            session_id: session_id.clone(),
            user_text: user_text.to_string(),
            reply: reply_text.clone(),
            risk_score,
            persona: persona.clone(),
            provider: provider.clone(),
            intelligence: intelligence.clone(),
        };
        if let Err(e) = app_state.interactions.record(&interaction).await {
            warn!(session_id = %session_id, "Failed to log interaction: {}", e);
        }

        app_state.reporter.spawn(app_state.reporter.build(
            &session_id,
            user_text,
            &reply_text,
            risk_score,
            persona.as_deref(),
        ));

        Ok(Json(ChatResponse {
            status: "success".to_string(),
            session_id,
            reply: reply_text,
            risk_score,
            agent_used: AGENT_DISPLAY_NAME.to_string(),
            persona,
            provider,
            handover,
            bait,
            intelligence,
        }))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn session_log_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        check_api_key(&headers, &app_state.api_key)?;

        let interactions = app_state
            .interactions
            .for_session(&session_id)
            .await
            .into_api_error("Failed to fetch session log")?;

        Ok(Json(SessionLogResponse {
            session_id,
            interactions,
        }))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}
