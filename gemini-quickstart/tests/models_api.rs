mod support;

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gemini_quickstart::types::config::GenerationConfig;
use gemini_quickstart::types::content::Content;
use gemini_quickstart::types::models::{GenerateContentConfig, ListModelsConfig};
use gemini_quickstart::Error;

use support::build_gemini_client;

#[tokio::test]
async fn test_generate_content_gemini_api() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-pro:generateContent"))
        .and(body_json(json!({
            "contents": [
                {"role": "user", "parts": [{"text": "Test"}]}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(support::text_response("Hello")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_gemini_client(&mock_server.uri());
    let response = client
        .models()
        .generate_content("gemini-pro", vec![Content::text("Test")])
        .await
        .unwrap();
    assert_eq!(response.text(), Some("Hello".to_string()));
}

#[tokio::test]
async fn test_generative_model_sends_prompt_as_user_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-pro:generateContent"))
        .and(body_json(json!({
            "contents": [
                {"role": "user", "parts": [{"text": "What is the capital of France?"}]}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(support::text_response("Paris.")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_gemini_client(&mock_server.uri());
    let response = client
        .generative_model("gemini-pro")
        .generate_content("What is the capital of France?")
        .await
        .unwrap();
    assert_eq!(response.text().as_deref(), Some("Paris."));
}

#[tokio::test]
async fn test_generate_content_with_config() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-pro:generateContent"))
        .and(body_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "hi"}]}],
            "systemInstruction": {"role": "user", "parts": [{"text": "answer in one word"}]},
            "generationConfig": {"temperature": 0.25, "maxOutputTokens": 16}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(support::text_response("Hello")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_gemini_client(&mock_server.uri());
    let config = GenerateContentConfig {
        system_instruction: Some(Content::user("answer in one word")),
        generation_config: Some(GenerationConfig {
            temperature: Some(0.25),
            max_output_tokens: Some(16),
            ..Default::default()
        }),
    };
    let response = client
        .generative_model("models/gemini-pro")
        .generate_content_with_config(vec![Content::user("hi")], config)
        .await
        .unwrap();
    assert_eq!(response.text(), Some("Hello".to_string()));
}

#[tokio::test]
async fn test_generate_content_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/no-such-model:generateContent"))
        .respond_with(ResponseTemplate::new(404).set_body_string("model not found"))
        .mount(&mock_server)
        .await;

    let client = build_gemini_client(&mock_server.uri());
    let err = client
        .generative_model("no-such-model")
        .generate_content("hello")
        .await
        .unwrap_err();
    assert!(
        matches!(err, Error::ApiError { status: 404, ref message } if message == "model not found")
    );
}

#[tokio::test]
async fn test_generate_content_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = build_gemini_client(&mock_server.uri());
    let err = client
        .generative_model("gemini-pro")
        .generate_content("hello")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Serialization { .. }));
}

#[tokio::test]
async fn test_list_models_wrong_shape_is_serialization_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"models": "none"})))
        .mount(&mock_server)
        .await;

    let client = build_gemini_client(&mock_server.uri());
    let err = client.models().list().await.unwrap_err();
    assert!(matches!(err, Error::Serialization { .. }));
}

#[tokio::test]
async fn test_empty_error_body_falls_back_to_reason() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-pro:generateContent"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = build_gemini_client(&mock_server.uri());
    let err = client
        .generative_model("gemini-pro")
        .generate_content("hello")
        .await
        .unwrap_err();
    assert!(
        matches!(err, Error::ApiError { status: 503, ref message } if message == "Service Unavailable")
    );
}

#[tokio::test]
async fn test_list_models_first_page_only() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": support::model_descriptors(),
            "nextPageToken": "page-2"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_gemini_client(&mock_server.uri());
    let response = client.models().list().await.unwrap();
    let models = response.models.unwrap();
    assert_eq!(models.len(), 3);
    assert_eq!(models[0].name.as_deref(), Some("models/gemini-pro"));
    assert_eq!(response.next_page_token.as_deref(), Some("page-2"));
}

#[tokio::test]
async fn test_list_models_with_page_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .and(query_param("pageSize", "2"))
        .and(query_param("pageToken", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"models": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_gemini_client(&mock_server.uri());
    let config = ListModelsConfig {
        page_size: Some(2),
        page_token: Some("page-2".into()),
    };
    let response = client.models().list_with_config(config).await.unwrap();
    assert_eq!(response.models, Some(Vec::new()));
}

#[tokio::test]
async fn test_list_models_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .respond_with(ResponseTemplate::new(400).set_body_string("API key not valid"))
        .mount(&mock_server)
        .await;

    let client = build_gemini_client(&mock_server.uri());
    let err = client.models().list().await.unwrap_err();
    assert!(matches!(err, Error::ApiError { status: 400, .. }));
}

#[tokio::test]
async fn test_get_model() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/models/gemini-pro"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "models/gemini-pro",
            "version": "001",
            "outputTokenLimit": 2048
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_gemini_client(&mock_server.uri());
    let model = client.models().get("gemini-pro").await.unwrap();
    assert_eq!(model.version.as_deref(), Some("001"));
    assert_eq!(model.output_token_limit, Some(2048));
}
