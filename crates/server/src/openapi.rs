use axum::Router;
use shared_types::{
    AppError, AppErrorKind, AttendanceStats, DailyStats, LeaveCategory, LeaveStatus, Role,
    RoleCount, SessionUser, SignInRequest, SignUpRequest, StaffSnapshot, StudentOverview,
    StudentProfile, SystemStats,
};
use sqlx::{Pool, Postgres};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::db::AppState;
use crate::health::{self, HealthResponse};
use crate::rest::{self, RoleResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        rest::get_my_role,
        rest::get_student_dashboard,
        rest::get_staff_dashboard,
        rest::get_admin_dashboard,
    ),
    components(schemas(
        AppError,
        AppErrorKind,
        HealthResponse,
        RoleResponse,
        Role,
        RoleCount,
        SystemStats,
        StudentProfile,
        StudentOverview,
        AttendanceStats,
        StaffSnapshot,
        DailyStats,
        LeaveStatus,
        LeaveCategory,
        SessionUser,
        SignInRequest,
        SignUpRequest,
    )),
    tags(
        (name = "session", description = "Caller identity endpoints"),
        (name = "dashboard", description = "Per-role dashboard data"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "Student Leave Portal API",
        description = "Read-only data behind the student, staff and admin dashboards",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// REST routes, `/health`, and the Scalar docs UI at `/docs`.
pub fn api_router(pool: Pool<Postgres>) -> Router {
    let state = AppState { pool };

    Router::new()
        .merge(rest::api_router())
        .route("/health", axum::routing::get(health::health_check))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}
