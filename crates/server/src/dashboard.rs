//! Raw payloads behind each role dashboard. Derivation into display
//! statistics happens in `shared_types` so client and REST callers agree.

use chrono::{NaiveDate, Utc};
use shared_types::{AppError, LeaveStatus, RoleCount, StaffSnapshot, StudentOverview};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::repo;

/// Profile and full attendance history of the student linked to `user_id`.
#[tracing::instrument(skip(pool))]
pub async fn student_overview(
    pool: &Pool<Postgres>,
    user_id: Uuid,
) -> Result<StudentOverview, AppError> {
    let student = repo::student::find_by_user_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("No student record is linked to this account"))?;
    let attendance = repo::attendance::statuses_for_student(pool, student.id).await?;

    Ok(StudentOverview {
        student,
        attendance,
    })
}

/// School-wide figures for one day.
#[tracing::instrument(skip(pool))]
pub async fn staff_snapshot(
    pool: &Pool<Postgres>,
    date: NaiveDate,
) -> Result<StaffSnapshot, AppError> {
    let (total_students, today, pending_leaves) = tokio::try_join!(
        repo::student::count(pool),
        repo::attendance::statuses_on_date(pool, date),
        repo::leave_request::count_by_status(pool, LeaveStatus::Pending),
    )?;

    Ok(StaffSnapshot {
        date: date.format("%Y-%m-%d").to_string(),
        total_students,
        today,
        pending_leaves,
    })
}

/// Today's snapshot, with "today" taken in UTC.
pub async fn staff_snapshot_today(pool: &Pool<Postgres>) -> Result<StaffSnapshot, AppError> {
    staff_snapshot(pool, Utc::now().date_naive()).await
}

#[tracing::instrument(skip(pool))]
pub async fn role_counts(pool: &Pool<Postgres>) -> Result<Vec<RoleCount>, AppError> {
    repo::user_role::count_by_role(pool).await
}
