//! Gemini client against a mock HTTP server: payload shape, credential
//! placement, response parsing and the failure contract.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use printshop_backend::{
    config::Config,
    services::ai::{create_generator, gemini::GeminiClient, AiError, EditOptions, ImageGenerator, Provider},
    utils::cookies::SameSite,
};

const MODEL: &str = "gemini-2.5-flash-image-preview";

fn config_for(server: &MockServer) -> Config {
    Config {
        database_url: String::new(),
        session_ttl_seconds: 0,
        cookie_secure: false,
        cookie_same_site: SameSite::Lax,
        cors_allow_origins: vec![],
        storage_root: None,
        gemini_api_key: Some("test-key".into()),
        gemini_image_model: MODEL.into(),
        gemini_base_url: server.uri(),
    }
}

fn generate_content_path() -> String {
    format!("/{MODEL}:generateContent")
}

#[tokio::test]
async fn edit_decodes_every_candidate_image() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_content_path()))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": {"candidateCount": 2}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                {"content": {"parts": [
                    {"text": "first result"},
                    {"inlineData": {"mimeType": "image/png", "data": STANDARD.encode(b"edited-1")}}
                ]}},
                {"content": {"parts": [
                    {"inlineData": {"mimeType": "image/png", "data": STANDARD.encode(b"edited-2")}}
                ]}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let generator = create_generator(Provider::Gemini, &config_for(&server)).unwrap();
    let options = EditOptions {
        candidate_count: 2,
        mime_type: Some("image/png".into()),
        ..EditOptions::default()
    };
    let images = generator
        .edit(b"source-image", "replace the sky", &options)
        .await
        .unwrap();

    assert_eq!(images.len(), 2);
    assert_eq!(images[0], b"edited-1");
    assert_eq!(images[1], b"edited-2");
}

#[tokio::test]
async fn provider_error_object_is_surfaced_with_its_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_content_path()))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"code": 429, "status": "RESOURCE_EXHAUSTED", "message": "quota exceeded"}
        })))
        .mount(&server)
        .await;

    let generator = create_generator(Provider::Gemini, &config_for(&server)).unwrap();
    let err = generator
        .edit(b"img", "prompt", &EditOptions::default())
        .await
        .unwrap_err();

    match err {
        AiError::Upstream { code, message, .. } => {
            assert_eq!(code, Some(429));
            assert!(message.contains("quota exceeded"));
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn error_object_wins_even_on_a_successful_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_content_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": {"code": 400, "status": "INVALID_ARGUMENT", "message": "bad image"}
        })))
        .mount(&server)
        .await;

    let generator = create_generator(Provider::Gemini, &config_for(&server)).unwrap();
    let err = generator
        .edit(b"img", "prompt", &EditOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::Upstream { code: Some(400), .. }));
}

#[tokio::test]
async fn text_only_responses_are_an_error_not_an_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_content_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                {"content": {"parts": [{"text": "Sorry, I can only describe this image."}]}}
            ]
        })))
        .mount(&server)
        .await;

    let generator = create_generator(Provider::Gemini, &config_for(&server)).unwrap();
    let err = generator
        .edit(b"img", "prompt", &EditOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::NoImageData));
}

#[tokio::test]
async fn non_success_without_error_body_reports_the_http_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_content_path()))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({})))
        .mount(&server)
        .await;

    let generator = create_generator(Provider::Gemini, &config_for(&server)).unwrap();
    let err = generator
        .edit(b"img", "prompt", &EditOptions::default())
        .await
        .unwrap_err();
    match err {
        AiError::Upstream { code, message, .. } => {
            assert_eq!(code, Some(503));
            assert!(message.contains("503"));
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn explicit_credentials_take_precedence_over_config() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/custom-model:generateContent"))
        .and(query_param("key", "explicit-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                {"content": {"parts": [
                    {"inlineData": {"mimeType": "image/png", "data": STANDARD.encode(b"ok")}}
                ]}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(
        "explicit-key".into(),
        "custom-model".into(),
        server.uri(),
    )
    .unwrap();
    let images = client
        .edit(b"img", "prompt", &EditOptions::default())
        .await
        .unwrap();
    assert_eq!(images, vec![b"ok".to_vec()]);
}

#[tokio::test]
async fn request_carries_prompt_and_inline_image() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_content_path()))
        .and(body_partial_json(json!({
            "contents": [{"parts": [
                {"text": "make it sepia"},
                {"inlineData": {"mimeType": "image/jpeg", "data": STANDARD.encode(b"jpeg-bytes")}}
            ]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                {"content": {"parts": [
                    {"inlineData": {"mimeType": "image/png", "data": STANDARD.encode(b"out")}}
                ]}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let generator = create_generator(Provider::Gemini, &config_for(&server)).unwrap();
    let options = EditOptions {
        mime_type: Some("image/jpeg".into()),
        ..EditOptions::default()
    };
    let images = generator
        .edit(b"jpeg-bytes", "make it sepia", &options)
        .await
        .unwrap();
    assert_eq!(images, vec![b"out".to_vec()]);
}
