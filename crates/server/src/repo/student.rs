use shared_types::{AppError, StudentProfile};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// The student record linked to a user account, if any.
pub async fn find_by_user_id(
    pool: &Pool<Postgres>,
    user_id: Uuid,
) -> Result<Option<StudentProfile>, AppError> {
    sqlx::query_as::<_, StudentProfile>(
        r#"
        SELECT id, user_id, roll_number, class_name, section
        FROM students
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Exact number of enrolled students.
pub async fn count(pool: &Pool<Postgres>) -> Result<i64, AppError> {
    sqlx::query_scalar("SELECT COUNT(*) FROM students")
        .fetch_one(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}
