//! Integration tests using mock HTTP servers
//!
//! Tests the full flow through the public API: settings → clients → page
//! walks → tool results.

use deskbridge::config::{Settings, TopdeskConfig, ZenyaConfig};
use deskbridge::normalize::FieldPaths;
use deskbridge::query::{caller_query, IncidentStatus};
use deskbridge::tools::Toolbox;
use deskbridge::topdesk::{KnowledgeQuery, TopdeskClient};
use deskbridge::zenya::{SearchRequest, ZenyaClient};
use deskbridge::Error;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KNOWLEDGE_ITEMS: &str = "/services/knowledge-base-v1/knowledgeItems";

async fn mount_topdesk_login(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/tas/api/login/operator"))
        .and(header("Authorization", "Basic topdesk-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string("operator-token"))
        .mount(server)
        .await;
}

async fn mount_zenya_token(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/tokens"))
        .and(header("x-api-version", "5"))
        .and(body_json(json!({"api_key": "zenya-key", "username": "agent"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("zenya-token")))
        .expect(expected_calls)
        .mount(server)
        .await;
}

// ============================================================================
// Pagination Scenarios
// ============================================================================

#[tokio::test]
async fn test_partial_content_then_final_page() {
    let mock_server = MockServer::start().await;
    mount_topdesk_login(&mock_server).await;

    Mock::given(method("GET"))
        .and(path(KNOWLEDGE_ITEMS))
        .and(header(
            "Authorization",
            "TOKEN id=\"operator-token\", APIKEY topdesk-key",
        ))
        .and(query_param("start", "0"))
        .and(query_param("page_size", "1000"))
        .respond_with(ResponseTemplate::new(206).set_body_json(json!({
            "item": [{"id": "k1"}, {"id": "k2"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(KNOWLEDGE_ITEMS))
        .and(query_param("start", "1000"))
        .and(query_param("page_size", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "item": [{"id": "k3"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TopdeskClient::connect(&TopdeskConfig::new(mock_server.uri(), "topdesk-key"))
        .await
        .unwrap();
    let items = client
        .load_knowledge_items(&KnowledgeQuery::new())
        .await
        .unwrap();

    assert_eq!(items, vec![json!({"id": "k1"}), json!({"id": "k2"}), json!({"id": "k3"})]);
}

#[tokio::test]
async fn test_continuation_stops_on_page_without_token() {
    let mock_server = MockServer::start().await;
    mount_zenya_token(&mock_server, 1).await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param_is_missing("continuationToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"source_item_id": 1, "title": "Eerste"}],
            "continuationToken": "next"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("continuationToken", "next"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"source_item_id": 2, "title": "Tweede"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client =
        ZenyaClient::new(&ZenyaConfig::new(mock_server.uri(), "zenya-key", "agent")).unwrap();
    let results = client
        .collect_search_results(
            &SearchRequest::new("beleid"),
            None,
            &FieldPaths::search_defaults(),
        )
        .await
        .unwrap();

    let titles: Vec<_> = results.iter().map(|r| r.title.clone()).collect();
    assert_eq!(titles, vec![Some(json!("Eerste")), Some(json!("Tweede"))]);
}

// ============================================================================
// Failure Scenarios
// ============================================================================

#[tokio::test]
async fn test_single_item_404_becomes_sentinel() {
    let mock_server = MockServer::start().await;
    mount_topdesk_login(&mock_server).await;

    Mock::given(method("GET"))
        .and(path(format!("{KNOWLEDGE_ITEMS}/does-not-exist")))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TopdeskClient::connect(&TopdeskConfig::new(mock_server.uri(), "topdesk-key"))
        .await
        .unwrap();
    let toolbox = Toolbox::new(Some(client), None);

    let result = toolbox
        .dispatch(
            "get_knowledge_by_id",
            json!({"identifier": "does-not-exist"}),
        )
        .await;
    let message = result["error"].as_str().unwrap();
    assert!(message.ends_with("not found"));
}

#[tokio::test]
async fn test_topdesk_token_500_aborts_construction() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tas/api/login/operator"))
        .respond_with(ResponseTemplate::new(500).set_body_string("login unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = TopdeskClient::connect(&TopdeskConfig::new(mock_server.uri(), "topdesk-key"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Auth { status: 500, .. }));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_zenya_token_500_fails_first_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tokens"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client =
        ZenyaClient::new(&ZenyaConfig::new(mock_server.uri(), "zenya-key", "agent")).unwrap();
    let err = client.load_content(50, 0).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

// ============================================================================
// Token Lifecycle
// ============================================================================

#[tokio::test]
async fn test_zenya_token_refreshed_after_expiry() {
    let mock_server = MockServer::start().await;
    mount_zenya_token(&mock_server, 2).await;

    Mock::given(method("GET"))
        .and(path("/portals/content_items"))
        .and(header("Authorization", "token zenya-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(2)
        .mount(&mock_server)
        .await;

    let config = ZenyaConfig {
        token_lifetime_secs: 0,
        ..ZenyaConfig::new(mock_server.uri(), "zenya-key", "agent")
    };
    let client = ZenyaClient::new(&config).unwrap();

    client.load_content(50, 0).await.unwrap();
    client.load_content(50, 0).await.unwrap();
}

// ============================================================================
// Settings → Toolbox
// ============================================================================

#[tokio::test]
async fn test_toolbox_from_settings_file() {
    let mock_server = MockServer::start().await;
    mount_topdesk_login(&mock_server).await;
    mount_zenya_token(&mock_server, 1).await;

    let query = caller_query("jan@example.com", IncidentStatus::Closed);
    Mock::given(method("GET"))
        .and(path("/tas/api/incidents"))
        .and(query_param("query", query.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"number": "I 2401 017", "processingStatus": {"name": "Gesloten"}}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/documents/12/download"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hello".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(
        file,
        "topdesk:\n  api_url: {uri}\n  api_key: topdesk-key\nzenya:\n  api_url: {uri}\n  api_key: zenya-key\n  username: agent\n",
        uri = mock_server.uri()
    )
    .unwrap();

    let settings = Settings::from_file(file.path()).unwrap();
    let toolbox = Toolbox::from_settings(&settings).await.unwrap();

    let incidents = toolbox
        .dispatch(
            "list_incidents_by_caller",
            json!({"email": "jan@example.com", "status": "closed"}),
        )
        .await;
    assert_eq!(incidents[0]["number"], json!("I 2401 017"));

    let download = toolbox
        .dispatch("download_document", json!({"document_id": "12"}))
        .await;
    assert_eq!(download["size_bytes"], json!(5));
    assert_eq!(download["content_base64"], json!("aGVsbG8="));
}

#[test]
fn test_caller_query_shape() {
    let open = caller_query("a@b.com", IncidentStatus::Open);
    assert!(open.contains("caller.emailAddress=='a@b.com'"));
    assert!(open.contains("=out=(Afgehandeld,Gesloten)"));
    assert!(open.contains(" and "));

    let closed = caller_query("a@b.com", IncidentStatus::Closed);
    assert!(closed.contains("=in=(Afgehandeld,Gesloten)"));
}
