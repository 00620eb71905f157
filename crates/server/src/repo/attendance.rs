use chrono::NaiveDate;
use shared_types::{AppError, AttendanceStatus};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Every attendance status recorded for one student.
pub async fn statuses_for_student(
    pool: &Pool<Postgres>,
    student_id: Uuid,
) -> Result<Vec<AttendanceStatus>, AppError> {
    let rows: Vec<String> =
        sqlx::query_scalar("SELECT status::TEXT FROM attendance WHERE student_id = $1")
            .bind(student_id)
            .fetch_all(pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows.into_iter().map(AttendanceStatus::from).collect())
}

/// Attendance statuses across all students for a single day.
pub async fn statuses_on_date(
    pool: &Pool<Postgres>,
    date: NaiveDate,
) -> Result<Vec<AttendanceStatus>, AppError> {
    let rows: Vec<String> = sqlx::query_scalar("SELECT status::TEXT FROM attendance WHERE date = $1")
        .bind(date)
        .fetch_all(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows.into_iter().map(AttendanceStatus::from).collect())
}
