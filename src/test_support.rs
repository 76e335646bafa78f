//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::state::App;
use crate::scope::{
    ProviderError, ScopeBrief, ScopeComponent, ScopeProvider, ScopeResponse,
};

/// A provider that returns a canned reply without touching the network.
pub struct CannedProvider {
    pub reply: Result<ScopeResponse, String>,
}

impl CannedProvider {
    pub fn ok() -> Self {
        Self {
            reply: Ok(sample_scope()),
        }
    }
}

#[async_trait]
impl ScopeProvider for CannedProvider {
    fn name(&self) -> &str {
        "canned"
    }

    async fn generate(&self, _brief: &ScopeBrief) -> Result<ScopeResponse, ProviderError> {
        match &self.reply {
            Ok(scope) => Ok(scope.clone()),
            Err(msg) => Err(ProviderError::Network(msg.clone())),
        }
    }
}

/// A well-formed 4x4 scope reply.
pub fn sample_scope() -> ScopeResponse {
    let component = |title: &str| ScopeComponent {
        title: title.to_string(),
        overview: "A brief overview spanning two sentences. It explains the significance."
            .to_string(),
        items: (1..=4).map(|i| format!("task {i}")).collect(),
    };
    ScopeResponse {
        components: vec![
            component("Market Opportunity Assessment"),
            component("Digital Outreach Strategy"),
            component("Partnership Development"),
            component("Growth Measurement Framework"),
        ],
    }
}

/// The example brief from the product walkthrough.
pub fn complete_brief() -> ScopeBrief {
    ScopeBrief::new(
        "education",
        "noida",
        "attract more small to medium sized businesses for growth.",
    )
}

/// Creates a test App with a CannedProvider.
pub fn test_app() -> App {
    App::new(Arc::new(CannedProvider::ok()), "test-model".to_string())
}
