use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use shared_types::{AppError, RoleCount, StaffSnapshot, StudentOverview};

use crate::auth::extractors::{AdminAccess, AuthRequired, RoleRequired, StaffAccess};

/// Stored role of the authenticated user.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RoleResponse {
    pub user_id: Uuid,
    /// Raw value from `user_roles`; may be outside the known set.
    pub role: String,
}

/// GET /api/me/role
#[utoipa::path(
    get,
    path = "/api/me/role",
    responses(
        (status = 200, description = "Role of the caller", body = RoleResponse),
        (status = 401, description = "Not signed in", body = AppError),
        (status = 404, description = "No role assigned", body = AppError)
    ),
    tag = "session"
)]
pub async fn get_my_role(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
) -> Result<Json<RoleResponse>, AppError> {
    let role = crate::repo::user_role::find_by_user_id(&pool, claims.sub).await?;
    Ok(Json(RoleResponse {
        user_id: claims.sub,
        role,
    }))
}

/// GET /api/dashboard/student
#[utoipa::path(
    get,
    path = "/api/dashboard/student",
    responses(
        (status = 200, description = "Student profile and attendance history", body = StudentOverview),
        (status = 401, description = "Not signed in", body = AppError),
        (status = 404, description = "No student record for this account", body = AppError)
    ),
    tag = "dashboard"
)]
pub async fn get_student_dashboard(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
) -> Result<Json<StudentOverview>, AppError> {
    crate::dashboard::student_overview(&pool, claims.sub)
        .await
        .map(Json)
}

/// GET /api/dashboard/staff
#[utoipa::path(
    get,
    path = "/api/dashboard/staff",
    responses(
        (status = 200, description = "Today's attendance and pending leave requests", body = StaffSnapshot),
        (status = 401, description = "Not signed in", body = AppError),
        (status = 403, description = "Staff or admin role required", body = AppError)
    ),
    tag = "dashboard"
)]
pub async fn get_staff_dashboard(
    State(pool): State<Pool<Postgres>>,
    _access: RoleRequired<StaffAccess>,
) -> Result<Json<StaffSnapshot>, AppError> {
    crate::dashboard::staff_snapshot_today(&pool).await.map(Json)
}

/// GET /api/dashboard/admin
#[utoipa::path(
    get,
    path = "/api/dashboard/admin",
    responses(
        (status = 200, description = "User counts per role", body = Vec<RoleCount>),
        (status = 401, description = "Not signed in", body = AppError),
        (status = 403, description = "Admin role required", body = AppError)
    ),
    tag = "dashboard"
)]
pub async fn get_admin_dashboard(
    State(pool): State<Pool<Postgres>>,
    _access: RoleRequired<AdminAccess>,
) -> Result<Json<Vec<RoleCount>>, AppError> {
    crate::dashboard::role_counts(&pool).await.map(Json)
}
