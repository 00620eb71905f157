use axum::http::StatusCode;
use chrono::Duration;
use pretty_assertions::assert_eq;
use server::auth::jwt::validate_with_secret;

use crate::common;
use crate::stub_provider::{logged_out_tokens, LIVE_REFRESH_TOKEN};

#[tokio::test]
async fn test_sign_out_with_only_refresh_cookie_revokes_fresh_session() {
    let app = common::session_app();
    let cookie = format!("portal_refresh={LIVE_REFRESH_TOKEN}");

    let (status, body, set_cookies) =
        common::request(&app, "POST", "/sign-out", &[("cookie", cookie.as_str())]).await;

    assert_eq!(status, StatusCode::OK);
    let revoked = body["revoked"]
        .as_str()
        .expect("sign-out saw no session token")
        .to_string();
    assert!(validate_with_secret(&revoked, common::TEST_JWT_SECRET).is_ok());
    assert!(
        logged_out_tokens().contains(&revoked),
        "provider logout never received the refreshed token"
    );
    assert!(set_cookies.iter().any(|c| c.starts_with("portal_access=")));
}

#[tokio::test]
async fn test_expired_access_cookie_is_replaced_by_refreshed_token() {
    let app = common::session_app();
    let expired = common::mint(&common::claims(Duration::hours(-2)), common::TEST_JWT_SECRET);
    let cookie = format!("portal_access={expired}; portal_refresh={LIVE_REFRESH_TOKEN}");

    let (status, body, _) = common::request(&app, "GET", "/whoami", &[("cookie", cookie.as_str())]).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["user_id"].is_string());
    let token = body["token"].as_str().expect("no session token");
    assert!(token != expired);
    assert!(validate_with_secret(token, common::TEST_JWT_SECRET).is_ok());
}

#[tokio::test]
async fn test_valid_bearer_wins_over_stale_cookie() {
    let app = common::session_app();
    let claims = common::claims(Duration::hours(1));
    let token = common::mint(&claims, common::TEST_JWT_SECRET);
    let bearer = format!("Bearer {token}");

    let (status, body, set_cookies) = common::request(
        &app,
        "GET",
        "/whoami",
        &[("cookie", "portal_access=stale"), ("authorization", bearer.as_str())],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], claims.sub.to_string());
    assert_eq!(body["token"], token);
    assert!(set_cookies.is_empty());
}

#[tokio::test]
async fn test_anonymous_request_has_no_session_token() {
    let app = common::session_app();

    let (status, body, _) = common::request(&app, "GET", "/whoami", &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["user_id"].is_null());
    assert!(body["token"].is_null());
}
