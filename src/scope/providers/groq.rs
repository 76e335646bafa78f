//! Groq provider implementation using the OpenAI-compatible Chat Completions API.
//!
//! One POST per generation, no streaming. The model's answer arrives as a JSON
//! string nested inside `choices[0].message.content`; it is parsed and
//! shape-validated here so downstream code only ever sees a well-formed
//! `ScopeResponse`.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::scope::prompt;
use crate::scope::{
    GenerationParams, ProviderError, ScopeBrief, ScopeProvider, ScopeResponse,
};
use async_trait::async_trait;

// ============================================================================
// Chat Completions API Types
// ============================================================================

#[derive(Serialize, Debug)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// Forced-JSON response mode. Groq rejects requests combining this with a
/// prompt that never mentions JSON, which the scope prompt always does.
#[derive(Serialize, Debug)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// The request body for the Chat Completions API.
#[derive(Serialize, Debug)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    presence_penalty: f32,
    frequency_penalty: f32,
    response_format: ResponseFormat,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize, Debug)]
struct AssistantMessage {
    content: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Groq chat-completion provider.
pub struct GroqProvider {
    api_key: String,
    base_url: String,
    model: String,
    params: GenerationParams,
    client: reqwest::Client,
}

impl GroqProvider {
    /// Creates a new Groq provider.
    ///
    /// # Arguments
    /// * `api_key` - Groq API key (injected, never read from the environment here)
    /// * `base_url` - Optional custom base URL (defaults to Groq's OpenAI-compatible API)
    /// * `model` - Target model name
    /// * `params` - Generation parameters sent with every request
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: String,
        params: GenerationParams,
    ) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.groq.com/openai/v1".to_string()),
            model,
            params,
            client: reqwest::Client::new(),
        }
    }

    fn build_request(&self, brief: &ScopeBrief) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt::SYSTEM_DIRECTIVE.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt::user_prompt(brief),
                },
            ],
            temperature: self.params.temperature,
            top_p: self.params.top_p,
            max_tokens: self.params.max_tokens,
            presence_penalty: self.params.presence_penalty,
            frequency_penalty: self.params.frequency_penalty,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        }
    }

    async fn send_request(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        debug!("Groq response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Groq API error: {} - {}", status, err_body);
            return Err(ProviderError::Api {
                status,
                message: err_body,
            });
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| ProviderError::Parse(format!("malformed completion envelope: {e}")))
    }
}

#[async_trait]
impl ScopeProvider for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    async fn generate(&self, brief: &ScopeBrief) -> Result<ScopeResponse, ProviderError> {
        let request = self.build_request(brief);
        info!(
            "Groq request: model={}, user_prompt_len={}",
            request.model,
            request.messages[1].content.len()
        );

        let response = self.send_request(&request).await?;

        let content = &response
            .choices
            .first()
            .ok_or_else(|| ProviderError::Parse("reply carried no choices".to_string()))?
            .message
            .content;

        debug!("Groq message content: {} bytes", content.len());

        // The message content is itself a JSON document.
        let scope: ScopeResponse = serde_json::from_str(content)
            .map_err(|e| ProviderError::Parse(format!("message content is not a scope: {e}")))?;

        scope
            .validate()
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        info!("Groq reply validated: {} components", scope.components.len());
        Ok(scope)
    }
}
