use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common;

#[tokio::test]
async fn test_unavailable_provider_keeps_cookies() {
    let app = common::test_app();

    // The provider answers 503 for this refresh token; the cookies stay
    // untouched and the request is treated as anonymous.
    let (status, body, set_cookies) = common::get_with_cookie(
        &app,
        "/api/me/role",
        "portal_access=expired; portal_refresh=rt-123",
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "Unauthorized");
    assert!(set_cookies.is_empty(), "unexpected cookies: {set_cookies:?}");
}

#[tokio::test]
async fn test_refresh_cookie_alone_is_unauthorized() {
    let app = common::test_app();

    let (status, _, _) =
        common::get_with_cookie(&app, "/api/dashboard/staff", "portal_refresh=rt-456").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
