//! Tests for the Zenya client

use super::*;
use crate::config::ZenyaConfig;
use crate::error::Error;
use crate::normalize::FieldPaths;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_token(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(TOKENS_ENDPOINT))
        .and(header("x-api-version", "5"))
        .and(body_json(json!({"api_key": "zen-key", "username": "svc-agent"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("zen-token")))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> ZenyaClient {
    ZenyaClient::new(&ZenyaConfig::new(server.uri(), "zen-key", "svc-agent")).unwrap()
}

fn content_item(id: i64, title: &str) -> serde_json::Value {
    json!({
        "source_item_id": id,
        "title": title,
        "sub_type_field": {"name": "Protocol", "value_id": 3},
        "last_modified_date_time": "2024-02-02T12:00:00Z"
    })
}

// ============================================================================
// SearchRequest Tests
// ============================================================================

#[test]
fn test_search_request_params() {
    let request = SearchRequest::new("pensioen")
        .portal_id(119)
        .search_scope("in_portal")
        .collection_id(7)
        .continuation_token("abc")
        .param("pageSize", 25);

    let params = request.base_params();
    assert_eq!(params.get("searchText").map(String::as_str), Some("pensioen"));
    assert_eq!(params.get("portalId").map(String::as_str), Some("119"));
    assert_eq!(params.get("searchScope").map(String::as_str), Some("in_portal"));
    assert_eq!(params.get("collectionId").map(String::as_str), Some("7"));
    assert_eq!(params.get("pageSize").map(String::as_str), Some("25"));
    assert!(!params.contains_key("continuationToken"));
}

#[test]
fn test_search_request_omits_absent_params() {
    let params = SearchRequest::new("verlof").base_params();
    assert_eq!(params.len(), 1);
    assert!(params.contains_key("searchText"));
}

#[test]
fn test_search_request_defaults_from_config() {
    let server_uri = "https://zenya.example.com/api";
    let client = ZenyaClient::new(&ZenyaConfig::new(server_uri, "k", "u")).unwrap();

    let request = client.search_request("pensioen", None);
    assert_eq!(request.portal_id, Some(119));
    assert_eq!(request.search_scope.as_deref(), Some("in_portal"));

    let request = client.search_request("pensioen", Some(4));
    assert_eq!(request.portal_id, Some(4));
}

#[test]
fn test_download_endpoint() {
    assert_eq!(download_endpoint("981"), "/documents/981/download");
}

// ============================================================================
// Client Tests
// ============================================================================

#[tokio::test]
async fn test_new_makes_no_request() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 0).await;

    let _client = client_for(&mock_server);
}

#[tokio::test]
async fn test_token_reused_within_lifetime() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 1).await;

    Mock::given(method("GET"))
        .and(path(CONTENT_ITEMS_ENDPOINT))
        .and(header("Authorization", "token zen-token"))
        .and(header("x-api-version", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.load_content(50, 0).await.unwrap();
    client.load_content(50, 50).await.unwrap();
}

#[tokio::test]
async fn test_token_failure_is_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKENS_ENDPOINT))
        .respond_with(ResponseTemplate::new(500).set_body_string("token service down"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.load_content(50, 0).await.unwrap_err();
    assert!(matches!(err, Error::Auth { status: 500, ref body } if body == "token service down"));
}

#[tokio::test]
async fn test_load_content_params() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 1).await;

    Mock::given(method("GET"))
        .and(path(CONTENT_ITEMS_ENDPOINT))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "20"))
        .and(query_param("include_content_type", "true"))
        .and(query_param("content_type_ids", "1"))
        .and(query_param("envelope", "true"))
        .and(query_param("include_sub_type_field", "true"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": [content_item(1, "Handboek")], "total": 21})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = client_for(&mock_server).load_content(10, 20).await.unwrap();
    assert_eq!(page["total"], json!(21));
    assert_eq!(page["data"][0]["title"], json!("Handboek"));
}

#[tokio::test]
async fn test_load_content_error_status() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 1).await;

    Mock::given(method("GET"))
        .and(path(CONTENT_ITEMS_ENDPOINT))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).load_content(50, 0).await.unwrap_err();
    assert_eq!(err.status(), Some(502));
}

#[tokio::test]
async fn test_collect_documents_until_empty_page() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 1).await;

    let first_page: Vec<_> = (0..50).map(|i| content_item(i, "doc")).collect();
    for (offset, data) in [
        ("0", json!(first_page)),
        ("50", json!([content_item(50, "laatste")])),
        ("100", json!([])),
    ] {
        Mock::given(method("GET"))
            .and(path(CONTENT_ITEMS_ENDPOINT))
            .and(query_param("limit", "50"))
            .and(query_param("offset", offset))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let documents = client_for(&mock_server).collect_documents(None).await.unwrap();
    assert_eq!(documents.len(), 51);

    let last = &documents[50];
    assert_eq!(last.source_item_id, Some(json!(50)));
    assert_eq!(last.title, Some(json!("laatste")));
    assert_eq!(last.doc_type, Some(json!("Protocol")));
    assert_eq!(last.doc_type_id, Some(json!(3)));
}

#[tokio::test]
async fn test_collect_documents_missing_sub_type_is_null() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 1).await;

    Mock::given(method("GET"))
        .and(path(CONTENT_ITEMS_ENDPOINT))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"source_item_id": 9, "title": "Zonder type"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let documents = client_for(&mock_server)
        .collect_documents(Some(1))
        .await
        .unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].doc_type, None);
    assert_eq!(documents[0].last_modified_date_time, None);
}

#[tokio::test]
async fn test_download_document() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 1).await;

    Mock::given(method("GET"))
        .and(path("/documents/981/download"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x25, 0x50, 0x44, 0x46]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let content = client_for(&mock_server)
        .download_document("981")
        .await
        .unwrap();
    assert_eq!(content.as_ref(), b"%PDF");
}

#[tokio::test]
async fn test_download_document_failure() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 1).await;

    Mock::given(method("GET"))
        .and(path("/documents/404/download"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .download_document("404")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
}

#[tokio::test]
async fn test_search_single_page_with_token() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 1).await;

    Mock::given(method("GET"))
        .and(path(SEARCH_ENDPOINT))
        .and(query_param("searchText", "pensioen"))
        .and(query_param("continuationToken", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = SearchRequest::new("pensioen").continuation_token("p2");
    let page = client_for(&mock_server).search(&request).await.unwrap();
    assert_eq!(page, json!({"items": []}));
}

#[tokio::test]
async fn test_collect_search_results_follows_tokens_and_caps() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 1).await;

    Mock::given(method("GET"))
        .and(path(SEARCH_ENDPOINT))
        .and(query_param("searchText", "pensioen"))
        .and(query_param("portalId", "119"))
        .and(query_param("searchScope", "in_portal"))
        .and(query_param_is_missing("continuationToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"source_item_id": 1, "title": "Pensioen A", "type": "document"},
                {"source_item_id": 2, "title": "Pensioen B", "type": "document"}
            ],
            "nextContinuationToken": "p2"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(SEARCH_ENDPOINT))
        .and(query_param("continuationToken", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"source_item_id": 3, "title": "Pensioen C", "type": "document"},
                {"source_item_id": 4, "title": "Pensioen D", "type": "document"}
            ],
            "continuationToken": "p3"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = client.search_request("pensioen", None);
    let results = client
        .collect_search_results(&request, Some(3), &FieldPaths::search_defaults())
        .await
        .unwrap();

    let ids: Vec<_> = results
        .iter()
        .map(|r| r.source_item_id.clone())
        .collect();
    assert_eq!(ids, vec![Some(json!(1)), Some(json!(2)), Some(json!(3))]);
    assert_eq!(results[0].kind, Some(json!("document")));
}

#[tokio::test]
async fn test_collect_search_results_stops_without_token() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 1).await;

    Mock::given(method("GET"))
        .and(path(SEARCH_ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"source_item_id": 1, "title": "Enige"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let results = client_for(&mock_server)
        .collect_search_results(
            &SearchRequest::new("enige"),
            None,
            &FieldPaths::search_defaults(),
        )
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].doc_type, None);
}
