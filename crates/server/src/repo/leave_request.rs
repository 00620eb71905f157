use shared_types::{AppError, LeaveStatus};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

/// Exact number of leave requests in the given state.
pub async fn count_by_status(pool: &Pool<Postgres>, status: LeaveStatus) -> Result<i64, AppError> {
    sqlx::query_scalar("SELECT COUNT(*) FROM leave_requests WHERE status::TEXT = $1")
        .bind(status.as_str())
        .fetch_one(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}
