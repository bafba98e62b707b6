// src/llm/provider/anthropic.rs
// Anthropic Messages API client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{api_key, read_json, ModelClient, ProviderKind};
use crate::llm::error::ProviderFailure;
use crate::prompt::AssembledPrompt;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 256;

pub struct AnthropicClient {
    client: Client,
    api_key: String,
    timeout: Duration,
}

impl AnthropicClient {
    pub fn from_env(timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::new(),
            api_key: api_key(ProviderKind::Anthropic)?,
            timeout,
        })
    }
}

#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<AnthropicMessage>,
}

#[derive(Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Option<Vec<AnthropicContent>>,
    error: Option<AnthropicError>,
}

#[derive(Deserialize)]
struct AnthropicContent {
    #[serde(rename = "type")]
    content_type: Option<String>,
    text: Option<String>,
}

#[derive(Deserialize)]
struct AnthropicError {
    message: String,
}

fn build_request(model: &str, prompt: &AssembledPrompt) -> AnthropicRequest {
    AnthropicRequest {
        model: model.to_string(),
        max_tokens: MAX_TOKENS,
        system: prompt.system.clone(),
        messages: vec![AnthropicMessage {
            role: "user".to_string(),
            content: prompt.body.clone(),
        }],
    }
}

fn extract_text(response: AnthropicResponse) -> Result<String, ProviderFailure> {
    if let Some(error) = response.error {
        return Err(ProviderFailure::Api(error.message));
    }

    Ok(response
        .content
        .map(|contents| {
            contents
                .into_iter()
                .filter(|c| c.content_type.as_deref() == Some("text"))
                .filter_map(|c| c.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default())
}

#[async_trait]
impl ModelClient for AnthropicClient {
    fn provider(&self) -> &'static str {
        ProviderKind::Anthropic.as_str()
    }

    async fn call(&self, model: &str, prompt: &AssembledPrompt) -> Result<String, ProviderFailure> {
        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&build_request(model, prompt))
            .timeout(self.timeout)
            .send()
            .await?;

        extract_text(read_json(response).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::PersonaId;
    use crate::prompt::build_prompt;

    #[test]
    fn test_system_is_top_level() {
        let prompt = build_prompt(PersonaId::Ramesh, &[], None, "Sir urgent");
        let value = serde_json::to_value(build_request("claude-3-5-haiku-latest", &prompt)).unwrap();

        assert_eq!(value["system"], prompt.system);
        assert_eq!(value["messages"].as_array().unwrap().len(), 1);
        assert_eq!(value["messages"][0]["content"], prompt.body);
    }

    #[test]
    fn test_extract_only_text_blocks() {
        let response: AnthropicResponse = serde_json::from_str(
            r#"{"content":[{"type":"thinking","thinking":"hmm"},{"type":"text","text":"Haan haan kar raha hu"}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "Haan haan kar raha hu");
    }
}
