#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gemini_quickstart::Client;

pub const TEST_KEY: &str = "test-key";

pub fn build_gemini_client(base_url: &str) -> Client {
    Client::builder()
        .api_key(TEST_KEY)
        .base_url(base_url)
        .build()
        .unwrap()
}

pub fn model_descriptors() -> Value {
    json!([
        {
            "name": "models/gemini-pro",
            "displayName": "Gemini Pro",
            "supportedGenerationMethods": ["generateContent", "countTokens"]
        },
        {
            "name": "models/gemini-1.5-flash",
            "displayName": "Gemini 1.5 Flash",
            "inputTokenLimit": 1_048_576
        },
        {
            "name": "models/embedding-001",
            "supportedGenerationMethods": ["embedContent"]
        }
    ])
}

pub fn text_response(text: &str) -> Value {
    json!({
        "candidates": [
            {
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }
        ]
    })
}

pub async fn mount_models_list(server: &MockServer, models: Value) {
    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .and(header("x-goog-api-key", TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "models": models })))
        .expect(1)
        .mount(server)
        .await;
}

pub async fn mount_generate(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-pro:generateContent"))
        .and(header("x-goog-api-key", TEST_KEY))
        .respond_with(template)
        .expect(1)
        .mount(server)
        .await;
}

/// Anything not matched above, including requests without the credential.
pub async fn forbid_unmatched(server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(401))
        .with_priority(u8::MAX)
        .expect(0)
        .mount(server)
        .await;
}
