pub mod dashboard;

use axum::{routing::get, Router};
use crate::db::AppState;

pub use dashboard::*;

/// Build the REST API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/api/me/role", get(dashboard::get_my_role))
        .route("/api/dashboard/student", get(dashboard::get_student_dashboard))
        .route("/api/dashboard/staff", get(dashboard::get_staff_dashboard))
        .route("/api/dashboard/admin", get(dashboard::get_admin_dashboard))
}
