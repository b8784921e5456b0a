/*!
 * Integration tests for the MyMemory client against a local mock server
 */

use std::time::Duration;
use anyhow::Result;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use blogtrans::errors::ProviderError;
use blogtrans::providers::mymemory::MyMemory;
use blogtrans::providers::{Provider, TranslationRequest};

fn client_for(server: &MockServer) -> MyMemory {
    MyMemory::new(format!("{}/get", server.uri()), Duration::from_secs(5))
}

#[tokio::test]
async fn test_translate_withSuccessfulResponse_shouldReturnTranslatedText() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .and(query_param("q", "Xin chào"))
        .and(query_param("langpair", "vi-VN|en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responseStatus": 200,
            "responseData": { "translatedText": "Hello" },
            "responseDetails": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let translated = client.translate(TranslationRequest::new("Xin chào", "vi-VN", "en-US")).await?;

    assert_eq!(translated, "Hello");
    Ok(())
}

#[tokio::test]
async fn test_translate_withContactEmail_shouldSendDeParameter() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .and(query_param("de", "me@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responseStatus": 200,
            "responseData": { "translatedText": "Bonjour" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).with_contact_email(Some("me@example.com".to_string()));
    let translated = client.translate(TranslationRequest::new("Hello", "en-US", "fr")).await?;

    assert_eq!(translated, "Bonjour");
    Ok(())
}

#[tokio::test]
async fn test_translate_withQuotaStatus_shouldReportRateLimit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responseStatus": 403,
            "responseData": { "translatedText": "MYMEMORY WARNING: YOU USED ALL AVAILABLE FREE TRANSLATIONS FOR TODAY" },
            "responseDetails": "MYMEMORY WARNING: YOU USED ALL AVAILABLE FREE TRANSLATIONS FOR TODAY"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .translate(TranslationRequest::new("Hello", "en-US", "vi-VN"))
        .await
        .unwrap_err();

    assert!(err.is_rate_limited());
}

#[tokio::test]
async fn test_translate_withStringStatus_shouldStillBeUnderstood() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responseStatus": "403",
            "responseData": { "translatedText": "" },
            "responseDetails": "quota"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .translate(TranslationRequest::new("Hello", "en-US", "vi-VN"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::RateLimited(ref details) if details == "quota"));
}

#[tokio::test]
async fn test_translate_withErrorStatus_shouldReturnTranslationFailed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responseStatus": 400,
            "responseData": { "translatedText": "" },
            "responseDetails": "'AUTO' IS AN INVALID SOURCE LANGUAGE"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .translate(TranslationRequest::new("Hello", "auto", "vi-VN"))
        .await
        .unwrap_err();

    match err {
        ProviderError::TranslationFailed { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("INVALID SOURCE LANGUAGE"));
        }
        other => panic!("expected TranslationFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_translate_withHttp500AndHtmlBody_shouldReturnTranslationFailed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .translate(TranslationRequest::new("Hello", "en-US", "vi-VN"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::TranslationFailed { status: 500, .. }));
}

#[tokio::test]
async fn test_translate_withHttp429_shouldReportRateLimit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .translate(TranslationRequest::new("Hello", "en-US", "vi-VN"))
        .await
        .unwrap_err();

    assert!(err.is_rate_limited());
}

#[tokio::test]
async fn test_translate_withUnreachableServer_shouldReturnRequestFailed() {
    // Non-pooled server so that dropping it actually closes the port.
    let server = MockServer::builder().start().await;
    let endpoint = format!("{}/get", server.uri());
    drop(server);

    let client = MyMemory::new(endpoint, Duration::from_secs(2));
    let err = client
        .translate(TranslationRequest::new("Hello", "en-US", "vi-VN"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::RequestFailed(_)));
}
