use shared_types::{AppError, RoleCount};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// The raw role string stored for a user.
///
/// Exactly one row is expected: none is `NotFound`, more than one is an
/// integrity problem in the upstream data and reported as internal.
pub async fn find_by_user_id(pool: &Pool<Postgres>, user_id: Uuid) -> Result<String, AppError> {
    let rows: Vec<String> =
        sqlx::query_scalar("SELECT role::TEXT FROM user_roles WHERE user_id = $1 LIMIT 2")
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;

    single_role(rows)
}

fn single_role(mut rows: Vec<String>) -> Result<String, AppError> {
    match rows.len() {
        0 => Err(AppError::not_found("No role is assigned to this account")),
        1 => Ok(rows.remove(0)),
        _ => Err(AppError::internal("Account has more than one role")),
    }
}

/// Number of users per stored role value.
pub async fn count_by_role(pool: &Pool<Postgres>) -> Result<Vec<RoleCount>, AppError> {
    sqlx::query_as::<_, RoleCount>(
        r#"
        SELECT role::TEXT AS role, COUNT(*) AS count
        FROM user_roles
        GROUP BY role
        ORDER BY role
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}
