use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use dingo_marketing::{
    api::{self, docs::ApiDoc, AppState, RuntimeInfo},
    config::{Environment, Settings},
};
use serde_json::{json, Value};
use tower::ServiceExt;
use utoipa::OpenApi;

fn app(pairs: &[(&str, &str)]) -> Router {
    let env = Environment::from_pairs(pairs.iter().copied());
    let settings = Settings::from_env(&env).unwrap();
    api::router(AppState::new(
        Arc::new(settings),
        RuntimeInfo {
            debug: true,
            reload: true,
        },
    ))
}

async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(path: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/api/v1{path}"))
        .body(Body::empty())
        .unwrap()
}

fn post(path: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(format!("/api/v1{path}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn status_reports_operational() {
    let app = app(&[("OPENAI_MODEL_NAME", "gpt-4o")]);
    let (status, body) = call(app, get("/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "operational");
    assert_eq!(body["ai_model"], "gpt-4o");
    assert_eq!(body["reload"], true);
    assert_eq!(body["scheduler_timezone"], "Asia/Shanghai");
}

#[tokio::test]
async fn repository_reflects_configuration() {
    let (_, body) = call(app(&[]), get("/repository")).await;
    assert_eq!(body["configured"], false);

    let (_, body) = call(
        app(&[("GITHUB_REPOSITORY", "DataEval/dingo"), ("GITHUB_TOKEN", "ghp_x")]),
        get("/repository"),
    )
    .await;
    assert_eq!(body["repository"], "DataEval/dingo");
    assert_eq!(body["configured"], true);
    assert_eq!(body["token_configured"], true);
}

#[tokio::test]
async fn tools_status_counts_configured_integrations() {
    let app = app(&[("SERPER_API_KEY", "serper")]);
    let (status, body) = call(app, get("/tools/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    assert_eq!(body["configured"], 1);
    let web = body["tools"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["name"] == "web_search")
        .unwrap();
    assert_eq!(web["configured"], true);
}

#[tokio::test]
async fn user_analysis_is_accepted() {
    let payload = json!({
        "user_list": ["octocat", "defunkt"],
        "analysis_depth": "basic",
        "language": "zh",
    });
    let (status, body) = call(app(&[]), post("/analyze/users", &payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "accepted");
    assert_eq!(body["kind"], "user_analysis");
    assert!(body["task_id"].as_str().is_some());
    assert!(body["message"].as_str().unwrap().contains("octocat"));
}

#[tokio::test]
async fn empty_user_list_is_unprocessable() {
    let payload = json!({"user_list": ["  "], "language": "en"});
    let (status, body) = call(app(&[]), post("/analyze/users", &payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("user_list"));
}

#[tokio::test]
async fn malformed_bodies_are_rejected() {
    let payload = json!({
        "interaction_types": ["comment"],
        "target_count": "five",
        "engagement_level": "moderate",
    });
    let (status, _) = call(app(&[]), post("/engagement/community", &payload)).await;
    assert!(status.is_client_error());

    let payload = json!({"user_list": ["octocat"], "language": "fr"});
    let (status, _) = call(app(&[]), post("/analyze/users", &payload)).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn zero_target_count_is_unprocessable() {
    let payload = json!({
        "interaction_types": ["comment"],
        "target_count": 0,
        "engagement_level": "moderate",
        "language": "zh",
    });
    let (status, _) = call(app(&[]), post("/engagement/community", &payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn remaining_post_endpoints_accept_demo_payloads() {
    let cases = [
        (
            "/campaigns/content",
            json!({
                "name": "n",
                "target_audience": "a",
                "topics": ["t"],
                "content_types": ["blog"],
                "duration": "2 Weeks",
                "keywords": [],
                "language": "zh",
            }),
        ),
        (
            "/content/generate",
            json!({
                "content_type": "blog",
                "topic": "t",
                "target_audience": "a",
                "tone": "professional",
                "length": "medium",
                "language": "en",
                "keywords": ["k"],
            }),
        ),
        (
            "/campaigns/comprehensive",
            json!({
                "name": "n",
                "objectives": ["o"],
                "target_audience": "a",
                "duration": "1 Month",
                "budget_level": "medium",
                "priority_channels": ["github"],
                "language": "zh",
            }),
        ),
    ];
    for (path, payload) in cases {
        let (status, body) = call(app(&[]), post(path, &payload)).await;
        assert_eq!(status, StatusCode::OK, "{path}");
        assert_eq!(body["status"], "accepted", "{path}");
    }
}

#[tokio::test]
async fn cors_allows_configured_origin_only() {
    let preflight = |origin: &str| {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/v1/status")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap()
    };

    let response = app(&[])
        .oneshot(preflight("http://localhost:3000"))
        .await
        .unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );

    let response = app(&[])
        .oneshot(preflight("https://evil.example"))
        .await
        .unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn docs_page_describes_every_endpoint() {
    let request = Request::builder()
        .uri("/docs")
        .body(Body::empty())
        .unwrap();
    let response = app(&[]).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("/api/v1/analyze/users"));
    assert!(page.contains("/api/v1/campaigns/comprehensive"));
}

#[test]
fn openapi_document_lists_the_v1_surface() {
    let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
    let mut paths: Vec<&str> = doc["paths"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    let mut expected = [
        "/api/v1/status",
        "/api/v1/repository",
        "/api/v1/tools/status",
        "/api/v1/analyze/users",
        "/api/v1/campaigns/content",
        "/api/v1/engagement/community",
        "/api/v1/content/generate",
        "/api/v1/campaigns/comprehensive",
    ];
    paths.sort_unstable();
    expected.sort_unstable();
    assert_eq!(paths, expected);
    assert!(doc["components"]["schemas"]["TaskAccepted"].is_object());
}

#[tokio::test]
async fn frontend_only_paths_are_not_served() {
    for path in [
        "/github/analyze",
        "/community/engage",
        "/marketing/comprehensive",
        "/research/enhanced",
    ] {
        let payload = json!({"username": "octocat"});
        let (status, _) = call(app(&[]), post(path, &payload)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
    }
}
