use shared_types::{AppError, AppErrorKind, Role, RoleValue};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::repo;

/// Roles allowed to open the staff dashboard.
pub const STAFF_ROLES: &[Role] = &[Role::Staff, Role::Admin];
/// Roles allowed to open the admin dashboard.
pub const ADMIN_ROLES: &[Role] = &[Role::Admin];

/// The portal role stored for a user.
pub async fn role_of(pool: &Pool<Postgres>, user_id: Uuid) -> Result<RoleValue, AppError> {
    let raw = repo::user_role::find_by_user_id(pool, user_id).await?;
    Ok(RoleValue::from_stored(&raw))
}

/// Check a resolved role against an allow-list.
pub fn check_role(role: &RoleValue, allowed: &[Role]) -> Result<Role, AppError> {
    match role.known() {
        Some(r) if allowed.contains(&r) => Ok(r),
        _ => Err(AppError::forbidden(format!(
            "{} role required",
            allowed
                .iter()
                .map(Role::display_name)
                .collect::<Vec<_>>()
                .join(" or ")
        ))),
    }
}

/// Decide access from the outcome of a role lookup.
///
/// A user without a role row is forbidden rather than not-found; other
/// lookup errors pass through unchanged.
pub fn gate(found: Result<RoleValue, AppError>, allowed: &[Role]) -> Result<Role, AppError> {
    match found {
        Ok(role) => check_role(&role, allowed),
        Err(e) if e.kind == AppErrorKind::NotFound => {
            Err(AppError::forbidden("No role is assigned to this account"))
        }
        Err(e) => Err(e),
    }
}

/// Look up the caller's role and require it to be in `allowed`.
pub async fn require_role(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    allowed: &[Role],
) -> Result<Role, AppError> {
    let granted = gate(role_of(pool, user_id).await, allowed);
    if let Err(e) = &granted {
        if e.kind == AppErrorKind::Forbidden {
            tracing::warn!(%user_id, reason = %e.message, "role check failed");
        }
    }
    granted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_and_admin_pass_staff_check() {
        assert_eq!(
            check_role(&RoleValue::Known(Role::Staff), STAFF_ROLES).unwrap(),
            Role::Staff
        );
        assert_eq!(
            check_role(&RoleValue::Known(Role::Admin), STAFF_ROLES).unwrap(),
            Role::Admin
        );
    }

    #[test]
    fn student_fails_staff_check() {
        let err = check_role(&RoleValue::Known(Role::Student), STAFF_ROLES).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Forbidden);
        assert_eq!(err.message, "Staff or Admin role required");
    }

    #[test]
    fn unrecognized_role_is_forbidden() {
        let role = RoleValue::Unrecognized("principal".to_string());
        assert!(check_role(&role, ADMIN_ROLES).is_err());
    }

    #[test]
    fn missing_role_row_is_forbidden_not_missing() {
        let err = gate(Err(AppError::not_found("No role found")), STAFF_ROLES).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Forbidden);
        assert_eq!(err.message, "No role is assigned to this account");
    }

    #[test]
    fn unrecognized_stored_role_is_forbidden() {
        let err = gate(
            Ok(RoleValue::Unrecognized("principal".to_string())),
            STAFF_ROLES,
        )
        .unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Forbidden);
    }

    #[test]
    fn database_errors_pass_through() {
        let err = gate(Err(AppError::database("Database is unavailable")), ADMIN_ROLES).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::DatabaseError);
        assert_eq!(err.message, "Database is unavailable");
    }

    #[test]
    fn allowed_role_is_granted() {
        assert_eq!(
            gate(Ok(RoleValue::Known(Role::Admin)), ADMIN_ROLES).unwrap(),
            Role::Admin
        );
    }
}
