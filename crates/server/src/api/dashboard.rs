use dioxus::prelude::*;
use shared_types::{RoleCount, StaffSnapshot, StudentOverview};

#[cfg(feature = "server")]
use crate::db::get_db;

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[cfg(feature = "server")]
use super::guard::require_auth;

/// The raw role value stored for the signed-in user.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_user_role() -> Result<String, ServerFnError> {
    let claims = require_auth()?;
    crate::repo::user_role::find_by_user_id(get_db(), claims.sub)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Profile and attendance history of the signed-in student.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_student_overview() -> Result<StudentOverview, ServerFnError> {
    let claims = require_auth()?;
    crate::dashboard::student_overview(get_db(), claims.sub)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Today's school-wide attendance and pending leave count. Staff or admin only.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_staff_snapshot() -> Result<StaffSnapshot, ServerFnError> {
    use crate::auth::roles;

    let claims = require_auth()?;
    let db = get_db();
    roles::require_role(db, claims.sub, roles::STAFF_ROLES)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    crate::dashboard::staff_snapshot_today(db)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// User counts per stored role. Admin only.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_role_counts() -> Result<Vec<RoleCount>, ServerFnError> {
    use crate::auth::roles;

    let claims = require_auth()?;
    let db = get_db();
    roles::require_role(db, claims.sub, roles::ADMIN_ROLES)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    crate::dashboard::role_counts(db)
        .await
        .map_err(|e| e.into_server_fn_error())
}
