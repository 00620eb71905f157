use axum::http::StatusCode;
use chrono::Duration;
use pretty_assertions::assert_eq;

use crate::common;

const PROTECTED: &[&str] = &[
    "/api/me/role",
    "/api/dashboard/student",
    "/api/dashboard/staff",
    "/api/dashboard/admin",
];

#[tokio::test]
async fn test_no_credentials_is_unauthorized() {
    let app = common::test_app();

    for uri in PROTECTED {
        let (status, body) = common::get(&app, uri).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["kind"], "Unauthorized", "{uri}");
        assert_eq!(body["message"], "Authentication required", "{uri}");
    }
}

#[tokio::test]
async fn test_garbage_bearer_is_unauthorized() {
    let app = common::test_app();

    for uri in PROTECTED {
        let (status, _) = common::get_with_bearer(&app, uri, "not-a-jwt").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let app = common::test_app();
    let token = common::mint(&common::claims(Duration::hours(-2)), common::TEST_JWT_SECRET);

    let (status, body) = common::get_with_bearer(&app, "/api/me/role", &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "Unauthorized");
}

#[tokio::test]
async fn test_wrong_audience_is_unauthorized() {
    let app = common::test_app();
    let mut claims = common::claims(Duration::hours(1));
    claims.aud = "service_role".to_string();
    let token = common::mint(&claims, common::TEST_JWT_SECRET);

    let (status, _) = common::get_with_bearer(&app, "/api/dashboard/staff", &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_foreign_signature_is_unauthorized() {
    let app = common::test_app();
    let token = common::mint(
        &common::claims(Duration::hours(1)),
        "some-other-secret-that-is-long-enough",
    );

    let (status, _) = common::get_with_bearer(&app, "/api/dashboard/admin", &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bad_access_cookie_is_unauthorized() {
    let app = common::test_app();

    let (status, _, set_cookies) =
        common::get_with_cookie(&app, "/api/dashboard/student", "portal_access=garbage").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(set_cookies.is_empty());
}
