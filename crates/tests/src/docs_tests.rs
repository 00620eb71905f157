use axum::http::StatusCode;
use utoipa::OpenApi;

use crate::common;

#[tokio::test]
async fn test_docs_page_is_public() {
    let app = common::test_app();

    let (status, html) = common::get_text(&app, "/docs").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Student Leave Portal API"));
}

#[test]
fn test_openapi_lists_every_route() {
    let doc = server::openapi::ApiDoc::openapi();
    let paths: Vec<&String> = doc.paths.paths.keys().collect();

    for expected in [
        "/health",
        "/api/me/role",
        "/api/dashboard/student",
        "/api/dashboard/staff",
        "/api/dashboard/admin",
    ] {
        assert!(
            paths.iter().any(|p| p.as_str() == expected),
            "{expected} missing from {paths:?}"
        );
    }
}

#[test]
fn test_openapi_declares_shared_schemas() {
    let doc = server::openapi::ApiDoc::openapi();
    let components = doc.components.expect("components");

    for schema in [
        "AppError",
        "StudentOverview",
        "StaffSnapshot",
        "RoleCount",
        "LeaveCategory",
    ] {
        assert!(components.schemas.contains_key(schema), "{schema} missing");
    }
}
