// src/llm/error.rs
// Failure reasons for a single provider/model call

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderFailure {
    #[error("provider is not configured (missing API key or model list)")]
    Unavailable,

    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("provider error: {0}")]
    Api(String),

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("empty response")]
    EmptyResponse,

    #[error("all {attempts} model(s) failed")]
    ModelsExhausted { attempts: usize },
}

impl ProviderFailure {
    /// Short, stable label for log fields
    pub fn class(&self) -> &'static str {
        match self {
            ProviderFailure::Unavailable => "unavailable",
            ProviderFailure::Timeout => "timeout",
            ProviderFailure::Transport(_) => "transport",
            ProviderFailure::HttpStatus { .. } => "http_status",
            ProviderFailure::Api(_) => "api",
            ProviderFailure::Decode(_) => "decode",
            ProviderFailure::EmptyResponse => "empty_response",
            ProviderFailure::ModelsExhausted { .. } => "models_exhausted",
        }
    }
}

impl From<reqwest::Error> for ProviderFailure {
    fn from(err: reqwest::Error) -> Self {
        // URLs can carry credentials; keep them out of logged messages
        let err = err.without_url();
        if err.is_timeout() {
            ProviderFailure::Timeout
        } else if err.is_decode() {
            ProviderFailure::Decode(err.to_string())
        } else {
            ProviderFailure::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_are_distinct() {
        let failures = [
            ProviderFailure::Unavailable,
            ProviderFailure::Timeout,
            ProviderFailure::Transport("x".into()),
            ProviderFailure::HttpStatus { status: 500, body: String::new() },
            ProviderFailure::Api("x".into()),
            ProviderFailure::Decode("x".into()),
            ProviderFailure::EmptyResponse,
            ProviderFailure::ModelsExhausted { attempts: 2 },
        ];
        let mut classes: Vec<_> = failures.iter().map(|f| f.class()).collect();
        classes.sort();
        classes.dedup();
        assert_eq!(classes.len(), failures.len());
    }

    #[test]
    fn test_display() {
        let failure = ProviderFailure::HttpStatus { status: 429, body: "quota".into() };
        assert_eq!(failure.to_string(), "HTTP 429: quota");
    }
}
