use std::fmt;

use async_trait::async_trait;

use super::types::{ScopeBrief, ScopeResponse};

/// Errors that can occur while generating a scope.
/// Every failure is terminal for that generation attempt; the user re-triggers.
#[derive(Debug)]
pub enum ProviderError {
    /// Provider misconfigured (missing API key, bad URL). Not retryable.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned a non-success status.
    Api { status: u16, message: String },
    /// The reply was not parseable JSON or violated the expected shape.
    Parse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Config(msg) => write!(f, "config error: {msg}"),
            ProviderError::Network(msg) => write!(f, "network error: {msg}"),
            ProviderError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ProviderError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Generation parameters sent with every chat-completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            top_p: 0.85,
            max_tokens: 2048,
            presence_penalty: 0.1,
            frequency_penalty: 0.3,
        }
    }
}

#[async_trait]
pub trait ScopeProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Generates a validated project scope for the given brief.
    async fn generate(&self, brief: &ScopeBrief) -> Result<ScopeResponse, ProviderError>;
}
