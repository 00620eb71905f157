use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common;

#[tokio::test]
async fn test_health_reports_degraded_without_database() {
    let app = common::test_app();

    let (status, body) = common::get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert!(body["db"].as_str().unwrap().starts_with("error"));
    assert!(body["version"].is_string());
}
