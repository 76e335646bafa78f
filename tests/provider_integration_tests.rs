use marvin::scope::types::ScopeBrief;
use marvin::scope::{GenerationParams, GroqProvider, ProviderError, ScopeProvider};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, body_string_contains, header, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

/// Creates a complete test brief
fn create_test_brief() -> ScopeBrief {
    ScopeBrief {
        sector: "education".to_string(),
        location: "noida".to_string(),
        required_scope: "attract more small to medium sized businesses for growth.".to_string(),
    }
}

/// A well-formed scope as the nested JSON string the model returns
fn valid_scope_content() -> String {
    let components: Vec<_> = (1..=4)
        .map(|n| {
            json!({
                "title": format!("Component {n}"),
                "overview": format!("Overview for component {n}."),
                "items": [
                    format!("{n}-a"), format!("{n}-b"),
                    format!("{n}-c"), format!("{n}-d"),
                ],
            })
        })
        .collect();
    json!({ "components": components }).to_string()
}

/// Wraps model output content into a chat-completion response body
fn chat_completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop",
            }
        ],
    })
}

fn create_provider(mock_server: &MockServer) -> GroqProvider {
    GroqProvider::new(
        "test-key".to_string(),
        Some(mock_server.uri()),
        "test-model".to_string(),
        GenerationParams::default(),
    )
}

// ============================================================================
// Success Path Tests
// ============================================================================

#[tokio::test]
async fn test_generate_parses_nested_scope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_completion_body(&valid_scope_content())),
        )
        .mount(&mock_server)
        .await;

    let provider = create_provider(&mock_server);
    let scope = provider.generate(&create_test_brief()).await.unwrap();

    assert_eq!(scope.components.len(), 4);
    assert_eq!(scope.components[0].title, "Component 1");
    assert_eq!(scope.components[3].items.len(), 4);
}

#[tokio::test]
async fn test_generate_sends_expected_request_shape() {
    let mock_server = MockServer::start().await;

    // Request assertions live in the matchers: model + sampling params +
    // JSON-object response format, bearer auth, and the raw brief text
    // interpolated into the user prompt.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "temperature": 0.3,
            "top_p": 0.85,
            "max_tokens": 2048,
            "response_format": { "type": "json_object" },
        })))
        .and(body_string_contains("education"))
        .and(body_string_contains("noida"))
        .and(body_string_contains(
            "attract more small to medium sized businesses for growth.",
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_completion_body(&valid_scope_content())),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = create_provider(&mock_server);
    let result = provider.generate(&create_test_brief()).await;

    assert!(result.is_ok());
}

// ============================================================================
// Error Path Tests
// ============================================================================

#[tokio::test]
async fn test_generate_api_error_carries_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let provider = create_provider(&mock_server);
    let result = provider.generate(&create_test_brief()).await;

    assert!(matches!(result, Err(ProviderError::Api { status: 500, .. })));
}

#[tokio::test]
async fn test_generate_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let provider = create_provider(&mock_server);
    let result = provider.generate(&create_test_brief()).await;

    assert!(matches!(result, Err(ProviderError::Api { status: 401, .. })));
}

#[tokio::test]
async fn test_generate_non_json_content_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_completion_body("Sure! Here is your scope: ...")),
        )
        .mount(&mock_server)
        .await;

    let provider = create_provider(&mock_server);
    let result = provider.generate(&create_test_brief()).await;

    assert!(matches!(result, Err(ProviderError::Parse(_))));
}

#[tokio::test]
async fn test_generate_wrong_component_count_is_parse_error() {
    let mock_server = MockServer::start().await;

    // Well-formed JSON, wrong shape: only three components
    let content = json!({
        "components": (1..=3).map(|n| json!({
            "title": format!("Component {n}"),
            "overview": "o",
            "items": ["a", "b", "c", "d"],
        })).collect::<Vec<_>>(),
    })
    .to_string();

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_body(&content)))
        .mount(&mock_server)
        .await;

    let provider = create_provider(&mock_server);
    let result = provider.generate(&create_test_brief()).await;

    assert!(matches!(result, Err(ProviderError::Parse(_))));
}

#[tokio::test]
async fn test_generate_empty_choices_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-test",
            "choices": [],
        })))
        .mount(&mock_server)
        .await;

    let provider = create_provider(&mock_server);
    let result = provider.generate(&create_test_brief()).await;

    assert!(matches!(result, Err(ProviderError::Parse(_))));
}
