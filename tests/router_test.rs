//! Router integration tests
//!
//! Middleware, fallbacks and the authentication gate. None of these
//! requests reach the database.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use pretty_assertions::assert_eq;

use common::{json_body, send, test_config, test_router, text_body, DEV_ORIGIN};
use stellar_backend::backend::routes::security::CONTENT_SECURITY_POLICY;
use stellar_backend::backend::server::RunMode;

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let router = test_router(&test_config(RunMode::Development));

    let response = send(router, get("/api/auth/me")).await;

    assert_header!(response, header::CONTENT_SECURITY_POLICY, CONTENT_SECURITY_POLICY);
    assert_header!(response, header::X_CONTENT_TYPE_OPTIONS, "nosniff");
    assert_header!(response, header::X_FRAME_OPTIONS, "SAMEORIGIN");
    assert_header!(response, header::REFERRER_POLICY, "no-referrer");
    assert_header!(response, "cross-origin-opener-policy", "same-origin");
}

#[tokio::test]
async fn test_protected_route_without_session() {
    let router = test_router(&test_config(RunMode::Development));

    let response = send(router, get("/api/auth/me")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Unauthorized - No token provided");
    assert_eq!(body["status"], 401);
}

#[tokio::test]
async fn test_protected_route_with_forged_cookie() {
    let router = test_router(&test_config(RunMode::Development));

    let request = Request::builder()
        .uri("/api/users/friends")
        .header(header::COOKIE, "jwt=not.a.token")
        .body(Body::empty())
        .unwrap();
    let response = send(router, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"], "Unauthorized - Invalid token");
}

#[tokio::test]
async fn test_every_protected_group_requires_a_session() {
    for (method, uri) in [
        (Method::GET, "/api/users"),
        (Method::GET, "/api/users/friend-requests"),
        (Method::GET, "/api/users/outgoing-friend-requests"),
        (Method::POST, "/api/users/friend-request/00000000-0000-0000-0000-000000000001"),
        (Method::PUT, "/api/users/friend-request/00000000-0000-0000-0000-000000000001/accept"),
        (Method::GET, "/api/chat/token"),
    ] {
        let router = test_router(&test_config(RunMode::Development));
        let request = Request::builder()
            .method(method.clone())
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = send(router, request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
    }
}

#[tokio::test]
async fn test_signup_validation_runs_before_database() {
    let router = test_router(&test_config(RunMode::Development));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/signup")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"fullName":"Ada","email":"ada@example.com","password":"123"}"#,
        ))
        .unwrap();
    let response = send(router, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"],
        "Password must be at least 6 characters"
    );
}

#[tokio::test]
async fn test_logout_clears_session_cookie() {
    let router = test_router(&test_config(RunMode::Development));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/logout")
        .header(header::COOKIE, "jwt=anything")
        .body(Body::empty())
        .unwrap();
    let response = send(router, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert_contains!(cookie, "jwt=");
    assert_eq!(json_body(response).await["message"], "Logout successful");
}

#[tokio::test]
async fn test_cors_allows_listed_origin_with_credentials() {
    let router = test_router(&test_config(RunMode::Development));

    let request = Request::builder()
        .uri("/api/auth/me")
        .header(header::ORIGIN, DEV_ORIGIN)
        .body(Body::empty())
        .unwrap();
    let response = send(router, request).await;

    assert_header!(response, header::ACCESS_CONTROL_ALLOW_ORIGIN, DEV_ORIGIN);
    assert_header!(response, header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
}

#[tokio::test]
async fn test_cors_ignores_unlisted_origin() {
    let router = test_router(&test_config(RunMode::Development));

    let request = Request::builder()
        .uri("/api/auth/me")
        .header(header::ORIGIN, "https://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = send(router, request).await;

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn test_cors_preflight() {
    let router = test_router(&test_config(RunMode::Development));

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/auth/login")
        .header(header::ORIGIN, DEV_ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = send(router, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_header!(response, header::ACCESS_CONTROL_ALLOW_ORIGIN, DEV_ORIGIN);
    let methods = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert_contains!(methods, "POST");
}

#[tokio::test]
async fn test_development_unknown_route_is_json_404() {
    let router = test_router(&test_config(RunMode::Development));

    let response = send(router, get("/dashboard")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Route /dashboard not found");
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_production_serves_frontend_with_spa_fallback() {
    let dist = tempfile::tempdir().unwrap();
    std::fs::write(dist.path().join("index.html"), "<html>stellar</html>").unwrap();
    std::fs::create_dir(dist.path().join("assets")).unwrap();
    std::fs::write(dist.path().join("assets/app.js"), "console.log('app')").unwrap();

    let config = test_config(RunMode::Production).with_frontend_dir(dist.path());

    let asset = send(test_router(&config), get("/assets/app.js")).await;
    assert_eq!(asset.status(), StatusCode::OK);
    assert_eq!(text_body(asset).await, "console.log('app')");

    let client_route = send(test_router(&config), get("/chat/some-channel")).await;
    assert_eq!(client_route.status(), StatusCode::OK);
    assert_header!(client_route, header::X_FRAME_OPTIONS, "SAMEORIGIN");
    assert_eq!(text_body(client_route).await, "<html>stellar</html>");

    // API routes still win over the bundle
    let api = send(test_router(&config), get("/api/auth/me")).await;
    assert_eq!(api.status(), StatusCode::UNAUTHORIZED);
}
