// src/llm/provider/openai.rs
// OpenAI-compatible chat completions client (OpenAI itself and DeepSeek)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{api_key, read_json, ModelClient, ProviderKind};
use crate::llm::error::ProviderFailure;
use crate::prompt::AssembledPrompt;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEEPSEEK_API_URL: &str = "https://api.deepseek.com/v1/chat/completions";
const MAX_TOKENS: u32 = 256;

pub struct OpenAiCompatClient {
    client: Client,
    provider: &'static str,
    url: &'static str,
    api_key: String,
    timeout: Duration,
}

impl OpenAiCompatClient {
    pub fn openai_from_env(timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::new(),
            provider: ProviderKind::OpenAi.as_str(),
            url: OPENAI_API_URL,
            api_key: api_key(ProviderKind::OpenAi)?,
            timeout,
        })
    }

    pub fn deepseek_from_env(timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::new(),
            provider: ProviderKind::DeepSeek.as_str(),
            url: DEEPSEEK_API_URL,
            api_key: api_key(ProviderKind::DeepSeek)?,
            timeout,
        })
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Option<Vec<ChatChoice>>,
    error: Option<ChatError>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatError {
    message: String,
}

fn build_request(model: &str, prompt: &AssembledPrompt) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage {
                role: "system".to_string(),
                content: prompt.system.clone(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: prompt.body.clone(),
            },
        ],
        max_tokens: MAX_TOKENS,
    }
}

fn extract_text(response: ChatResponse) -> Result<String, ProviderFailure> {
    if let Some(error) = response.error {
        return Err(ProviderFailure::Api(error.message));
    }

    Ok(response
        .choices
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.message.content)
        .unwrap_or_default())
}

#[async_trait]
impl ModelClient for OpenAiCompatClient {
    fn provider(&self) -> &'static str {
        self.provider
    }

    async fn call(&self, model: &str, prompt: &AssembledPrompt) -> Result<String, ProviderFailure> {
        let response = self
            .client
            .post(self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&build_request(model, prompt))
            .timeout(self.timeout)
            .send()
            .await?;

        extract_text(read_json(response).await?)
    }
}
