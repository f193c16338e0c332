//! Router-level tests: real in-memory database, real token verification,
//! stubbed completion backend.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use jsonwebtoken::{EncodingKey, Header, encode};
use pdh_ai::{AiError, CompletionBackend, CompletionRequest, Suggester};
use pdh_auth::TokenVerifier;
use pdh_config::ServerConfig;
use pdh_db::PdhService;
use pdh_report::{HtmlRenderer, ReportService};
use pdh_server::AppState;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

const SECRET: &str = "test-jwt-secret";

struct StubBackend {
    reply: Result<String, u16>,
    prompts: Mutex<Vec<String>>,
}

impl StubBackend {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: Err(503),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl CompletionBackend for StubBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError> {
        self.prompts.lock().unwrap().push(request.prompt.clone());
        self.reply.clone().map_err(|status| AiError::Provider {
            status,
            message: "model unavailable".into(),
        })
    }
}

fn token_for(user_id: &str, exp_offset_secs: i64) -> String {
    let claims = json!({
        "sub": user_id,
        "email": format!("{user_id}@example.com"),
        "exp": chrono::Utc::now().timestamp() + exp_offset_secs,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

async fn base_state() -> AppState {
    let service = PdhService::new_local(":memory:").await.unwrap();
    AppState::new(
        service,
        TokenVerifier::new(SECRET, 0),
        ReportService::new(HtmlRenderer::builtin().unwrap(), None),
        ServerConfig::default(),
    )
}

async fn test_app() -> Router {
    pdh_server::app(base_state().await)
}

async fn app_with_backend(backend: Arc<StubBackend>) -> Router {
    pdh_server::app(base_state().await.with_suggester(Suggester::new(backend)))
}

struct Reply {
    status: StatusCode,
    headers: header::HeaderMap,
    body: Vec<u8>,
}

impl Reply {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    fn detail(&self) -> String {
        self.json()["detail"].as_str().unwrap_or_default().to_string()
    }
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token_for(user, 3600)));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    Reply {
        status,
        headers,
        body,
    }
}

async fn create_project(app: &Router, user: &str, name: &str) -> String {
    let reply = send(
        app,
        Method::POST,
        "/api/projects",
        Some(user),
        Some(json!({ "name": name, "description": "Payroll for small firms" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    reply.json()["id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Public endpoints and layers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn public_endpoints_need_no_token() {
    let app = test_app().await;

    let root = send(&app, Method::GET, "/", None, None).await;
    assert_eq!(root.status, StatusCode::OK);
    assert_eq!(
        root.json()["message"],
        "Welcome to the Product Discovery Hub API"
    );

    let health = send(&app, Method::GET, "/api/health", None, None).await;
    assert_eq!(health.json()["status"], "ok");

    let cors = send(&app, Method::OPTIONS, "/api/cors-test", None, None).await;
    assert_eq!(cors.status, StatusCode::OK);
    assert_eq!(cors.json()["message"], "CORS is working!");
}

#[rstest]
#[case(Method::GET, "/api/projects")]
#[case(Method::GET, "/api/auth/me")]
#[case(Method::GET, "/api/projects/prj-1/csd_items")]
#[case(Method::GET, "/api/items/csd_item/csd-1")]
#[tokio::test]
async fn protected_routes_require_bearer(#[case] method: Method, #[case] uri: &str) {
    let app = test_app().await;
    let reply = send(&app, method, uri, None, None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.detail(), "Not authenticated");
}

#[tokio::test]
async fn expired_and_foreign_tokens_are_rejected() {
    let app = test_app().await;

    let expired = Request::builder()
        .uri("/api/projects")
        .header(header::AUTHORIZATION, format!("Bearer {}", token_for("u1", -3600)))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(expired).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let forged = encode(
        &Header::default(),
        &json!({ "sub": "u1", "exp": chrono::Utc::now().timestamp() + 3600 }),
        &EncodingKey::from_secret(b"another-secret"),
    )
    .unwrap();
    let request = Request::builder()
        .uri("/api/projects")
        .header(header::AUTHORIZATION, format!("Bearer {forged}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_returns_verified_identity() {
    let app = test_app().await;
    let reply = send(&app, Method::GET, "/api/auth/me", Some("u1"), None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json()["user_id"], "u1");
    assert_eq!(reply.json()["email"], "u1@example.com");
    assert_eq!(reply.json()["role"], "user");
}

#[tokio::test]
async fn login_without_provider_is_server_error() {
    let app = test_app().await;
    let reply = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "a@example.com", "password": "pw" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn preflight_from_localhost_is_allowed() {
    let app = test_app().await;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/projects")
        .header(header::ORIGIN, "http://localhost:4321")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:4321"
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );
}

#[tokio::test]
async fn unknown_origin_gets_no_cors_headers() {
    let app = test_app().await;
    let request = Request::builder()
        .uri("/api/health")
        .header(header::ORIGIN, "https://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        !response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
}

#[tokio::test]
async fn request_id_is_echoed_or_generated() {
    let app = test_app().await;
    let request = Request::builder()
        .uri("/api/health")
        .header("x-request-id", "req-from-client")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-from-client");

    let reply = send(&app, Method::GET, "/api/health", None, None).await;
    let generated = reply.headers["x-request-id"].to_str().unwrap();
    assert!(generated.starts_with("req-"));
    assert_eq!(generated.len(), 20);
}

// ---------------------------------------------------------------------------
// Projects and ownership
// ---------------------------------------------------------------------------

#[tokio::test]
async fn project_lifecycle() {
    let app = test_app().await;
    let id = create_project(&app, "u1", "Discovery").await;

    let list = send(&app, Method::GET, "/api/projects", Some("u1"), None).await;
    assert_eq!(list.json()["projects"].as_array().unwrap().len(), 1);

    let patched = send(
        &app,
        Method::PATCH,
        &format!("/api/projects/{id}"),
        Some("u1"),
        Some(json!({ "name": "Renamed" })),
    )
    .await;
    assert_eq!(patched.status, StatusCode::OK);
    assert_eq!(patched.json()["name"], "Renamed");

    let deleted = send(&app, Method::DELETE, &format!("/api/projects/{id}"), Some("u1"), None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = send(&app, Method::GET, &format!("/api/projects/{id}"), Some("u1"), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.detail(), "Project not found");
}

#[tokio::test]
async fn other_users_cannot_see_or_touch_a_project() {
    let app = test_app().await;
    let id = create_project(&app, "alice", "Private").await;

    let read = send(&app, Method::GET, &format!("/api/projects/{id}"), Some("bob"), None).await;
    assert_eq!(read.status, StatusCode::NOT_FOUND);

    let write = send(
        &app,
        Method::POST,
        &format!("/api/projects/{id}/csd"),
        Some("bob"),
        Some(json!({ "project_id": id, "category": "Doubt", "text": "Sneaky" })),
    )
    .await;
    assert_eq!(write.status, StatusCode::NOT_FOUND);

    let list = send(&app, Method::GET, "/api/projects", Some("bob"), None).await;
    assert_eq!(list.json()["projects"], json!([]));
}

#[tokio::test]
async fn invalid_bodies_are_bad_requests() {
    let app = test_app().await;

    let empty_name = send(
        &app,
        Method::POST,
        "/api/projects",
        Some("u1"),
        Some(json!({ "name": "" })),
    )
    .await;
    assert_eq!(empty_name.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty_name.detail(), "name must not be empty");

    let wrong_shape = send(
        &app,
        Method::POST,
        "/api/projects",
        Some("u1"),
        Some(json!({ "title": "no name field" })),
    )
    .await;
    assert_eq!(wrong_shape.status, StatusCode::BAD_REQUEST);
    assert!(!wrong_shape.detail().is_empty());
}

// ---------------------------------------------------------------------------
// Frameworks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn csd_create_checks_path_and_reorders() {
    let app = test_app().await;
    let pid = create_project(&app, "u1", "Discovery").await;

    let mismatch = send(
        &app,
        Method::POST,
        &format!("/api/projects/{pid}/csd"),
        Some("u1"),
        Some(json!({ "project_id": "prj-other", "category": "Certainty", "text": "x" })),
    )
    .await;
    assert_eq!(mismatch.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        mismatch.detail(),
        "Project ID in path must match project ID in request body"
    );

    let mut ids = Vec::new();
    for text in ["First", "Second"] {
        let reply = send(
            &app,
            Method::POST,
            &format!("/api/projects/{pid}/csd"),
            Some("u1"),
            Some(json!({ "project_id": pid, "category": "Certainty", "text": text })),
        )
        .await;
        assert_eq!(reply.status, StatusCode::CREATED);
        ids.push(reply.json()["id"].as_str().unwrap().to_string());
    }

    let reordered = send(
        &app,
        Method::PUT,
        &format!("/api/projects/{pid}/csd/reorder"),
        Some("u1"),
        Some(json!({ "item_ids": [ids[1], ids[0]], "new_category": "Doubt" })),
    )
    .await;
    assert_eq!(reordered.status, StatusCode::OK);
    let items = reordered.json()["items"].as_array().unwrap().clone();
    assert_eq!(items[0]["text"], "Second");
    assert_eq!(items[0]["category"], "Doubt");
    assert_eq!(items[1]["position"], 1);

    let empty = send(
        &app,
        Method::PUT,
        &format!("/api/projects/{pid}/csd/reorder"),
        Some("u1"),
        Some(json!({ "item_ids": [] })),
    )
    .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.detail(), "No items to reorder");
}

#[tokio::test]
async fn vision_board_is_a_singleton() {
    let app = test_app().await;
    let pid = create_project(&app, "u1", "Discovery").await;
    let uri = format!("/api/projects/{pid}/pvb");

    let missing = send(&app, Method::GET, &uri, Some("u1"), None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let body = json!({ "project_id": pid, "vision": "Payroll in minutes" });
    let created = send(&app, Method::POST, &uri, Some("u1"), Some(body.clone())).await;
    assert_eq!(created.status, StatusCode::CREATED);

    let duplicate = send(&app, Method::POST, &uri, Some("u1"), Some(body)).await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        duplicate.detail(),
        "A Product Vision Board already exists for this project"
    );
}

#[tokio::test]
async fn key_result_body_must_match_objective_path() {
    let app = test_app().await;
    let pid = create_project(&app, "u1", "Discovery").await;
    let objective = send(
        &app,
        Method::POST,
        &format!("/api/projects/{pid}/okr/objectives"),
        Some("u1"),
        Some(json!({ "project_id": pid, "title": "Grow activation" })),
    )
    .await;
    assert_eq!(objective.status, StatusCode::CREATED);
    let oid = objective.json()["id"].as_str().unwrap().to_string();

    let mismatch = send(
        &app,
        Method::POST,
        &format!("/api/projects/{pid}/okr/objectives/{oid}/key-results"),
        Some("u1"),
        Some(json!({
            "objective_id": "obj-other",
            "title": "Activation at 40%",
            "current_value": 10.0,
            "target_value": 40.0
        })),
    )
    .await;
    assert_eq!(mismatch.status, StatusCode::BAD_REQUEST);

    let created = send(
        &app,
        Method::POST,
        &format!("/api/projects/{pid}/okr/objectives/{oid}/key-results"),
        Some("u1"),
        Some(json!({
            "objective_id": oid,
            "title": "Activation at 40%",
            "current_value": 10.0,
            "target_value": 40.0
        })),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let okr = send(&app, Method::GET, &format!("/api/projects/{pid}/okr"), Some("u1"), None).await;
    let objectives = okr.json()["objectives"].as_array().unwrap().clone();
    assert_eq!(objectives.len(), 1);
    assert_eq!(objectives[0]["progress"], 25.0);
}

#[tokio::test]
async fn item_lookups_validate_type_tags() {
    let app = test_app().await;

    let unsupported = send(&app, Method::GET, "/api/items/bmc_item/x", Some("u1"), None).await;
    assert_eq!(unsupported.status, StatusCode::BAD_REQUEST);
    assert_eq!(unsupported.detail(), "Unsupported item type: bmc_item");

    let unknown = send(&app, Method::GET, "/api/items/csd_item/csd-missing", Some("u1"), None).await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let no_link = send(&app, Method::DELETE, "/api/links/lnk-missing", Some("u1"), None).await;
    assert_eq!(no_link.status, StatusCode::NOT_FOUND);
    assert_eq!(
        no_link.detail(),
        "Link not found or you don't have permission to delete it"
    );
}

#[tokio::test]
async fn links_connect_items_in_one_project() {
    let app = test_app().await;
    let pid = create_project(&app, "u1", "Discovery").await;
    let csd = send(
        &app,
        Method::POST,
        &format!("/api/projects/{pid}/csd"),
        Some("u1"),
        Some(json!({ "project_id": pid, "category": "Doubt", "text": "Will firms switch?" })),
    )
    .await;
    let csd_id = csd.json()["id"].as_str().unwrap().to_string();
    let rice = send(
        &app,
        Method::POST,
        &format!("/api/projects/{pid}/rice"),
        Some("u1"),
        Some(json!({
            "project_id": pid,
            "name": "Bank sync",
            "reach_score": 8,
            "impact_score": 7,
            "confidence_score": 6,
            "effort_score": 4
        })),
    )
    .await;
    assert_eq!(rice.status, StatusCode::CREATED);
    assert_eq!(rice.json()["rice_score"], 84.0);
    let rice_id = rice.json()["id"].as_str().unwrap().to_string();

    let link = send(
        &app,
        Method::POST,
        "/api/links",
        Some("u1"),
        Some(json!({
            "project_id": pid,
            "source_item_id": csd_id,
            "source_item_type": "csd_item",
            "target_item_id": rice_id,
            "target_item_type": "rice_item"
        })),
    )
    .await;
    assert_eq!(link.status, StatusCode::CREATED);

    let linked = send(
        &app,
        Method::GET,
        &format!("/api/items/rice_item/{rice_id}/links"),
        Some("u1"),
        None,
    )
    .await;
    let items = linked.json()["items"].as_array().unwrap().clone();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], json!(csd_id));
    assert_eq!(items[0]["content"], "Will firms switch?");
}

#[tokio::test]
async fn report_without_pdf_renderer_is_html_attachment() {
    let app = test_app().await;
    let pid = create_project(&app, "u1", "Discovery").await;

    let reply = send(
        &app,
        Method::POST,
        &format!("/api/projects/{pid}/report"),
        Some("u1"),
        Some(json!({ "frameworks": ["csd", "okr"] })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(
        reply.headers[header::CONTENT_TYPE],
        "text/html; charset=utf-8"
    );
    assert_eq!(
        reply.headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Discovery_Report.html\""
    );
    let html = String::from_utf8(reply.body).unwrap();
    assert!(html.contains("CSD Matrix"));

    let none_selected = send(
        &app,
        Method::POST,
        &format!("/api/projects/{pid}/report"),
        Some("u1"),
        Some(json!({ "frameworks": [] })),
    )
    .await;
    assert_eq!(none_selected.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn report_filename_drops_control_characters() {
    let app = test_app().await;
    let pid = create_project(&app, "u1", "Q3\nPlan").await;

    let reply = send(
        &app,
        Method::POST,
        &format!("/api/projects/{pid}/report"),
        Some("u1"),
        Some(json!({ "frameworks": ["csd"] })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(
        reply.headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Q3_Plan_Report.html\""
    );
}

async fn create_in(app: &Router, uri: &str, body: Value) -> String {
    let reply = send(app, Method::POST, uri, Some("u1"), Some(body)).await;
    assert_eq!(reply.status, StatusCode::CREATED, "POST {uri}");
    reply.json()["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn persona_details_reorder_across_columns() {
    let app = test_app().await;
    let pid = create_project(&app, "u1", "Discovery").await;
    let persona = create_in(
        &app,
        &format!("/api/projects/{pid}/personas"),
        json!({ "project_id": pid, "name": "Ana" }),
    )
    .await;
    let details_uri = format!("/api/personas/{persona}/details");
    let first = create_in(
        &app,
        &details_uri,
        json!({ "persona_id": persona, "category": "Goal", "content": "Close the month fast" }),
    )
    .await;
    let second = create_in(
        &app,
        &details_uri,
        json!({ "persona_id": persona, "category": "Goal", "content": "Fewer spreadsheets" }),
    )
    .await;

    let reorder_uri = format!("/api/personas/{persona}/details/reorder");
    let moved = send(
        &app,
        Method::PUT,
        &reorder_uri,
        Some("u1"),
        Some(json!({ "item_ids": [second, first], "new_category": "Pain Point" })),
    )
    .await;
    assert_eq!(moved.status, StatusCode::OK);
    let details = moved.json()["details"].as_array().unwrap().clone();
    assert_eq!(details[0]["id"], json!(second));
    assert_eq!(details[0]["category"], "Pain Point");
    assert_eq!(details[0]["order_index"], 0);
    assert_eq!(details[1]["id"], json!(first));
    assert_eq!(details[1]["order_index"], 1);

    let same_column = send(
        &app,
        Method::PUT,
        &reorder_uri,
        Some("u1"),
        Some(json!({ "item_ids": [first, second] })),
    )
    .await;
    assert_eq!(same_column.status, StatusCode::OK);
    let details = same_column.json()["details"].as_array().unwrap().clone();
    assert_eq!(details[0]["id"], json!(first));
    assert_eq!(details[0]["category"], "Pain Point");

    let unknown = send(
        &app,
        Method::PUT,
        &reorder_uri,
        Some("u1"),
        Some(json!({ "item_ids": [first, "pdt-missing"] })),
    )
    .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.detail(), "Persona detail not found");
}

#[tokio::test]
async fn invalid_patches_are_rejected_per_framework() {
    let app = test_app().await;
    let pid = create_project(&app, "u1", "Discovery").await;
    let base = format!("/api/projects/{pid}");

    let csd = create_in(
        &app,
        &format!("{base}/csd"),
        json!({ "project_id": pid, "category": "Certainty", "text": "Firms pay monthly" }),
    )
    .await;
    let bmc_item = create_in(
        &app,
        &format!("{base}/bmc-items"),
        json!({ "block": "key_partners", "content": "Accountants" }),
    )
    .await;
    let rice = create_in(
        &app,
        &format!("{base}/rice"),
        json!({
            "project_id": pid,
            "name": "Bank sync",
            "reach_score": 8,
            "impact_score": 7,
            "confidence_score": 6,
            "effort_score": 4
        }),
    )
    .await;
    let roadmap = create_in(
        &app,
        &format!("{base}/roadmap"),
        json!({ "project_id": pid, "name": "Beta", "quarter": "Q1", "year": 2026 }),
    )
    .await;
    let objective = create_in(
        &app,
        &format!("{base}/okr/objectives"),
        json!({ "project_id": pid, "title": "Grow activation" }),
    )
    .await;
    let key_result = create_in(
        &app,
        &format!("{base}/okr/objectives/{objective}/key-results"),
        json!({
            "objective_id": objective,
            "title": "Activation at 40%",
            "current_value": 10.0,
            "target_value": 40.0
        }),
    )
    .await;

    let cases = [
        (format!("{base}/csd/{csd}"), json!({ "text": "" }), "text must not be empty"),
        (
            format!("{base}/bmc-items/{bmc_item}"),
            json!({ "content": "" }),
            "content must not be empty",
        ),
        (
            format!("{base}/rice/{rice}"),
            json!({ "reach_score": i64::MAX }),
            "reach_score must be between 0 and 10",
        ),
        (
            format!("{base}/roadmap/{roadmap}"),
            json!({ "year": 1999 }),
            "year must be between 2000 and 2100",
        ),
        (
            format!("{base}/okr/objectives/{objective}"),
            json!({ "title": "" }),
            "title must not be empty",
        ),
        (
            format!("{base}/okr/key-results/{key_result}"),
            json!({ "target_value": 0 }),
            "target_value must be greater than 0",
        ),
    ];
    for (uri, body, detail) in cases {
        let reply = send(&app, Method::PATCH, &uri, Some("u1"), Some(body)).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST, "PATCH {uri}");
        assert_eq!(reply.detail(), detail);
    }

    let unchanged = send(&app, Method::GET, &format!("{base}/rice/{rice}"), Some("u1"), None).await;
    assert_eq!(unchanged.json()["reach_score"], 8);
    assert_eq!(unchanged.json()["rice_score"], 84.0);
}

#[tokio::test]
async fn upload_rejects_non_images_before_storage() {
    let app = test_app().await;
    let boundary = "pdh-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"cv.pdf\"\r\n\
         Content-Type: application/pdf\r\n\r\n\
         %PDF-1.4\r\n\
         --{boundary}--\r\n"
    );
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/upload/persona-photo")
        .header(header::AUTHORIZATION, format!("Bearer {}", token_for("u1", 3600)))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["detail"], "File must be an image");
}

// ---------------------------------------------------------------------------
// AI
// ---------------------------------------------------------------------------

#[tokio::test]
async fn csd_suggestions_use_existing_items() {
    let backend = StubBackend::replying("- Firms run payroll monthly\n2. Accountants decide\n");
    let app = app_with_backend(backend.clone()).await;
    let pid = create_project(&app, "u1", "Discovery").await;
    send(
        &app,
        Method::POST,
        &format!("/api/projects/{pid}/csd"),
        Some("u1"),
        Some(json!({ "project_id": pid, "category": "Certainty", "text": "Firms hate spreadsheets" })),
    )
    .await;

    let reply = send(
        &app,
        Method::POST,
        "/api/ai/suggest",
        Some("u1"),
        Some(json!({ "project_id": pid, "prompt_type": "csd", "category": "Certainty" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(
        reply.json()["suggestions"],
        json!(["Firms run payroll monthly", "Accountants decide"])
    );
    assert!(backend.last_prompt().contains("Firms hate spreadsheets"));
}

#[tokio::test]
async fn suggestion_input_is_checked_after_project() {
    let app = app_with_backend(StubBackend::replying("- unused")).await;

    let unknown = send(
        &app,
        Method::POST,
        "/api/ai/suggest",
        Some("u1"),
        Some(json!({ "project_id": "prj-missing", "prompt_type": "csd" })),
    )
    .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let pid = create_project(&app, "u1", "Discovery").await;
    let missing_category = send(
        &app,
        Method::POST,
        "/api/ai/suggest",
        Some("u1"),
        Some(json!({ "project_id": pid, "prompt_type": "csd" })),
    )
    .await;
    assert_eq!(missing_category.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        missing_category.detail(),
        "Category is required for CSD suggestions"
    );

    let bad_okr = send(
        &app,
        Method::POST,
        "/api/ai/suggest",
        Some("u1"),
        Some(json!({ "project_id": pid, "prompt_type": "okr", "specific_query": "kpi" })),
    )
    .await;
    assert_eq!(bad_okr.detail(), "Invalid specific_query for OKR prompt");
}

#[tokio::test]
async fn failing_model_is_server_error_except_for_roadmap() {
    let app = app_with_backend(StubBackend::failing()).await;
    let pid = create_project(&app, "u1", "Discovery").await;

    let pvb = send(
        &app,
        Method::POST,
        "/api/ai/suggest",
        Some("u1"),
        Some(json!({ "project_id": pid, "prompt_type": "pvb", "specific_query": "vision" })),
    )
    .await;
    assert_eq!(pvb.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(pvb.detail().starts_with("Failed to generate AI suggestions: "));

    let roadmap = send(
        &app,
        Method::POST,
        "/api/ai/suggest",
        Some("u1"),
        Some(json!({ "project_id": pid, "prompt_type": "roadmap", "specific_query": "Q3" })),
    )
    .await;
    assert_eq!(roadmap.status, StatusCode::OK);
    assert_eq!(
        roadmap.json()["suggestions"][0],
        "Implement core Q3 features for Discovery"
    );
}

#[tokio::test]
async fn generate_rice_parses_fenced_json() {
    let reply_text = "Here you go:\n```json\n[{\"name\": \"Bank sync\", \"description\": \"Import statements\", \"reach_score\": 8, \"impact_score\": 7, \"confidence_score\": 6, \"effort_score\": 4}]\n```";
    let app = app_with_backend(StubBackend::replying(reply_text)).await;
    let pid = create_project(&app, "u1", "Discovery").await;

    let reply = send(
        &app,
        Method::POST,
        &format!("/api/projects/{pid}/generate_rice"),
        Some("u1"),
        None,
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    let suggestions = reply.json()["suggestions"].as_array().unwrap().clone();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0]["id"], "temp_0");
    assert_eq!(suggestions[0]["name"], "Bank sync");
    assert_eq!(suggestions[0]["rice_score"], 84.0);
}

#[tokio::test]
async fn roadmap_board_suggestions_rotate_themes() {
    let app = test_app().await;
    let pid = create_project(&app, "u1", "Discovery").await;

    let reply = send(
        &app,
        Method::POST,
        "/api/ai/roadmap-suggestions",
        Some("u1"),
        Some(json!({ "project_id": pid, "category": "high" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    let suggestions = reply.json()["suggestions"].as_array().unwrap().clone();
    assert_eq!(suggestions.len(), 3);
    assert_eq!(suggestions[0]["id"], "temp_0");
    assert_eq!(
        suggestions[0]["name"],
        "Implement user authentication for Discovery"
    );
    assert_eq!(suggestions[0]["content"], suggestions[0]["name"]);
    assert_eq!(
        suggestions[2]["description"],
        "Mock suggestion with high priority"
    );

    let missing = send(
        &app,
        Method::POST,
        "/api/ai/roadmap-suggestions",
        Some("u1"),
        Some(json!({ "project_id": "prj-missing", "category": "high" })),
    )
    .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let bad_column = send(
        &app,
        Method::POST,
        "/api/ai/roadmap-suggestions",
        Some("u1"),
        Some(json!({ "project_id": pid, "category": "urgent", "view_mode": "timeframe" })),
    )
    .await;
    assert_eq!(bad_column.status, StatusCode::BAD_REQUEST);
}
