// src/llm/provider/gemini.rs
// Google Gemini generateContent client. Gemini gets the whole prompt as one text part.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{api_key, read_json, ModelClient, ProviderKind};
use crate::llm::error::ProviderFailure;
use crate::prompt::AssembledPrompt;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn from_env(timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::new(),
            base_url: GEMINI_API_BASE.to_string(),
            api_key: api_key(ProviderKind::Gemini)?,
            timeout,
        })
    }
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiError>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContentResponse>,
}

#[derive(Deserialize)]
struct GeminiContentResponse {
    parts: Option<Vec<GeminiPartResponse>>,
}

#[derive(Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiError {
    message: String,
}

// The key travels in a header so it never shows up in request URLs or their errors
fn request_url(base_url: &str, model: &str) -> String {
    format!("{}/{}:generateContent", base_url, model)
}

fn build_request(prompt: &AssembledPrompt) -> GeminiRequest {
    GeminiRequest {
        contents: vec![GeminiContent {
            role: "user".to_string(),
            parts: vec![GeminiPart { text: prompt.blob() }],
        }],
    }
}

fn extract_text(response: GeminiResponse) -> Result<String, ProviderFailure> {
    if let Some(error) = response.error {
        return Err(ProviderFailure::Api(error.message));
    }

    Ok(response
        .candidates
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.content)
        .and_then(|c| c.parts)
        .map(|parts| parts.into_iter().filter_map(|p| p.text).collect::<Vec<_>>().join(""))
        .unwrap_or_default())
}

#[async_trait]
impl ModelClient for GeminiClient {
    fn provider(&self) -> &'static str {
        ProviderKind::Gemini.as_str()
    }

    async fn call(&self, model: &str, prompt: &AssembledPrompt) -> Result<String, ProviderFailure> {
        let response = self
            .client
            .post(request_url(&self.base_url, model))
            .header("x-goog-api-key", &self.api_key)
            .json(&build_request(prompt))
            .timeout(self.timeout)
            .send()
            .await?;

        extract_text(read_json(response).await?)
    }
}
