//! Tests for `ApiEmbeddings` against a mock model server.

use httpmock::{Method::POST, MockServer};
use llmapi_client::{ApiEmbeddings, ClientConfig, Embeddings, Error};
use serde_json::json;

fn embeddings(server: &MockServer) -> ApiEmbeddings {
    ApiEmbeddings::from_config(&ClientConfig::new(server.base_url())).expect("embeddings")
}

#[tokio::test]
async fn embed_query_returns_floats() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/embeddings")
                .json_body(json!({"text": "hello"}));
            then.status(200)
                .header("content-type", "application/json")
                .body("[1.0, 2.5, -3]");
        })
        .await;

    let vector = embeddings(&server).embed_query("hello").await.unwrap();
    mock.assert_async().await;
    assert_eq!(vector, vec![1.0, 2.5, -3.0]);
}

#[tokio::test]
async fn embed_documents_keeps_input_order() {
    let server = MockServer::start_async().await;
    let first = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/embeddings")
                .json_body(json!({"text": "first"}));
            then.status(200).body("[1.0]");
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/embeddings")
                .json_body(json!({"text": "second"}));
            then.status(200).body("[2.0]");
        })
        .await;

    let texts = vec!["first".to_owned(), "second".to_owned()];
    let vectors = embeddings(&server).embed_documents(&texts).await.unwrap();
    first.assert_async().await;
    second.assert_async().await;
    assert_eq!(vectors, vec![vec![1.0], vec![2.0]]);
}

#[tokio::test]
async fn embed_documents_of_nothing_sends_nothing() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/embeddings");
            then.status(200).body("[0.0]");
        })
        .await;

    let vectors = embeddings(&server).embed_documents(&[]).await.unwrap();
    assert!(vectors.is_empty());
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn non_2xx_is_an_api_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/embeddings");
            then.status(500).body("boom");
        })
        .await;

    let err = embeddings(&server).embed_query("hello").await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 500, ref body } if body == "boom"));
}

#[tokio::test]
async fn non_numeric_body_is_a_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/embeddings");
            then.status(200).body(r#"{"embedding": [1.0]}"#);
        })
        .await;

    let err = embeddings(&server).embed_query("hello").await.unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}
