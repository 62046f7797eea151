mod common;

use assert_json_diff::assert_json_include;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{seed_contact, seed_outlet, test_pipeline};
use masthead::audit::ledger::{RunLedger, RunRecord};
use masthead::server::{router, AppState};
use masthead::store::ContactStore;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn send(app: axum::Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn action(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/actions")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn app() -> axum::Router {
    let (pipeline, _store) = test_pipeline();
    router(AppState::new(pipeline, None))
}

#[tokio::test]
async fn test_health() {
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_json_include!(actual: body, expected: json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_unknown_action() {
    let (status, body) = send(app(), action(json!({ "action": "launch", "tenant_id": "t1" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_include!(
        actual: body,
        expected: json!({ "success": false, "error": "unknown_action" })
    );
}

#[tokio::test]
async fn test_missing_tenant() {
    let (status, body) = send(app(), action(json!({ "action": "verify_contacts", "contact_ids": [] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_include!(
        actual: body,
        expected: json!({ "success": false, "error": "missing_field", "message": "missing field: tenant_id" })
    );
}

#[tokio::test]
async fn test_malformed_json() {
    let req = Request::builder()
        .method("POST")
        .uri("/api/actions")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(app(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_include!(actual: body, expected: json!({ "error": "bad_request" }));
}

#[tokio::test]
async fn test_invalid_outlet_url() {
    let (status, body) = send(
        app(),
        action(json!({ "action": "scrape_outlet", "tenant_id": "t1", "outlet_url": "ftp://outlet.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_include!(actual: body, expected: json!({ "error": "bad_request" }));
}

const STAFF_PAGE: &str = r#"<html><head><title>Staff - Bay Ledger</title></head><body>
  <div class="staff-member"><h3>Nora Quinn</h3><span>Health Reporter</span>
    <a href="mailto:nora@bayledger.com">Email</a></div>
  <div class="staff-member"><h3>Luis Ortega</h3><span>City Editor</span></div>
</body></html>"#;

#[tokio::test]
async fn test_scrape_outlet_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><head><title>Bay Ledger</title></head><body></body></html>",
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/staff"))
        .respond_with(ResponseTemplate::new(200).set_body_string(STAFF_PAGE))
        .mount(&server)
        .await;
    let (pipeline, store) = test_pipeline();
    let app = router(AppState::new(pipeline, None));

    let (status, body) = send(
        app,
        action(json!({ "action": "scrape_outlet", "tenant_id": "t1", "outlet_url": server.uri() })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_json_include!(
        actual: body.clone(),
        expected: json!({
            "outlet_name": "Bay Ledger",
            "scraping_metadata": { "contacts_created": 2, "locator_tier": "known_paths" }
        })
    );
    assert_eq!(body["contacts_found"].as_array().unwrap().len(), 2);
    assert_eq!(store.list_contacts("t1", None).unwrap().len(), 2);
}

#[tokio::test]
async fn test_monitor_updates_stub() {
    let (status, body) = send(app(), action(json!({ "action": "monitor_updates", "tenant_id": "t1" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_json_include!(
        actual: body,
        expected: json!({ "monitoring_enabled": false, "updates_found": 0 })
    );
}

#[tokio::test]
async fn test_verify_and_list_contacts() {
    let dir = tempfile::tempdir().unwrap();
    let ledger_path = dir.path().join("ledger.jsonl");
    let (pipeline, store) = test_pipeline();
    let outlet = seed_outlet(&store, "t1");
    let jane = seed_contact(&store, "t1", &outlet.id, "Jane", "Doe");
    let app = router(AppState::new(
        pipeline,
        Some(RunLedger::open(&ledger_path).unwrap()),
    ));

    let (status, body) = send(
        app.clone(),
        action(json!({ "action": "verify_contacts", "tenant_id": "t1", "contact_ids": [jane] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_json_include!(
        actual: body.clone(),
        expected: json!({ "summary": { "total_requested": 1, "verified_successfully": 1, "failed": 0 } })
    );
    assert_eq!(body["verified_contacts"].as_array().unwrap().len(), 1);

    let req = Request::builder()
        .uri("/api/contacts?tenant_id=t1")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app.clone(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_json_include!(actual: body.clone(), expected: json!({ "success": true, "count": 1 }));
    assert_ne!(body["contacts"][0]["verification_status"], json!("pending"));

    let req = Request::builder()
        .uri("/api/contacts?tenant_id=other")
        .body(Body::empty())
        .unwrap();
    let (_, body) = send(app, req).await;
    assert_eq!(body["count"], json!(0));

    let lines: Vec<RunRecord> = std::fs::read_to_string(&ledger_path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].action, "verify_contacts");
    assert_eq!(lines[0].items_succeeded, 1);
}

#[tokio::test]
async fn test_list_contacts_requires_tenant() {
    let req = Request::builder().uri("/api/contacts").body(Body::empty()).unwrap();
    let (status, body) = send(app(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_include!(actual: body, expected: json!({ "error": "missing_field" }));
}
