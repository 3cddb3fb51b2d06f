//! Route access policy, end to end through the middleware.

use axum::http::StatusCode;
use orderdesk_admin::services::FixedIdentityProvider;
use orderdesk_integration_tests::{TestContext, location};

#[tokio::test]
async fn test_public_routes_open_to_anonymous() {
    let ctx = TestContext::anonymous(vec![]);

    assert_eq!(ctx.get("/").await.status(), StatusCode::OK);
    assert_eq!(ctx.get("/sign-in").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_anonymous_admin_orders_redirects_to_sign_in() {
    let ctx = TestContext::anonymous(vec![]);

    let response = ctx.get("/admin/orders").await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/sign-in"));
}

#[tokio::test]
async fn test_non_admin_redirected_home() {
    let ctx = TestContext::member(vec![]);

    for path in ["/admin", "/admin/orders/abc/delete"] {
        let response = ctx.get(path).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{path}");
        assert_eq!(location(&response), Some("/"), "{path}");
    }
}

#[tokio::test]
async fn test_admin_reaches_dashboard() {
    let ctx = TestContext::admin(vec![]);

    assert_eq!(ctx.get("/admin").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_non_admin_post_is_redirected_before_delete() {
    let ctx = TestContext::member(vec![orderdesk_integration_tests::order(
        "o1",
        (2025, 1, 1),
        None,
    )]);

    let response = ctx.post("/admin/orders/o1/delete").await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(ctx.store.ids().await.len(), 1);
}

#[tokio::test]
async fn test_identity_failure_fails_closed() {
    let ctx = TestContext::new(FixedIdentityProvider::Failing, vec![]);

    let response = ctx.get("/admin").await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/sign-in"));

    // Non-admin paths stay reachable
    assert_eq!(ctx.get("/").await.status(), StatusCode::OK);
    assert_eq!(ctx.get("/health").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_non_public_non_admin_paths_pass_through() {
    let ctx = TestContext::anonymous(vec![]);

    // Not public (exact match only) and not admin: allowed, then no route
    assert_eq!(ctx.get("/sign-in/foo").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(ctx.get("/health").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_static_looking_admin_paths_bypass_gate() {
    let ctx = TestContext::anonymous(vec![]);

    // Contains a dot: not gated, so no redirect, just no such route
    assert_eq!(ctx.get("/admin/report.csv").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_signed_in_sign_in_page_goes_to_dashboard() {
    let ctx = TestContext::admin(vec![]);

    let response = ctx.get("/sign-in").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/admin"));
}

#[tokio::test]
async fn test_security_headers_on_redirects() {
    let ctx = TestContext::anonymous(vec![]);

    let response = ctx.get("/admin").await;

    assert_eq!(response.headers()["x-frame-options"], "DENY");
    assert!(response.headers().contains_key("x-request-id"));
}
