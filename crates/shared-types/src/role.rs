use serde::{Deserialize, Serialize};

/// Portal role stored in `user_roles.role`. Selects which dashboard a user sees.
///
/// - `Student`: own attendance and leave requests.
/// - `Parent`: children's attendance (linked accounts).
/// - `Staff`: daily attendance and leave approvals.
/// - `Admin`: system-wide user and policy management.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Parent,
    Staff,
    Admin,
}

/// All roles in display order.
pub const ALL_ROLES: &[Role] = &[Role::Student, Role::Parent, Role::Staff, Role::Admin];

impl Role {
    /// Parse a stored role value. Case-insensitive, surrounding whitespace ignored.
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim();
        ALL_ROLES
            .iter()
            .copied()
            .find(|role| role.as_str().eq_ignore_ascii_case(wanted))
    }

    /// Lowercase value as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Parent => "parent",
            Role::Staff => "staff",
            Role::Admin => "admin",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Parent => "Parent",
            Role::Staff => "Staff",
            Role::Admin => "Admin",
        }
    }
}

/// A role row as read from the backend. Values outside the four known
/// roles are kept verbatim so the UI can tell "unknown role" apart from
/// "no role could be loaded".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleValue {
    Known(Role),
    Unrecognized(String),
}

impl RoleValue {
    pub fn from_stored(raw: &str) -> Self {
        match Role::parse(raw) {
            Some(role) => RoleValue::Known(role),
            None => RoleValue::Unrecognized(raw.to_string()),
        }
    }

    pub fn known(&self) -> Option<Role> {
        match self {
            RoleValue::Known(role) => Some(*role),
            RoleValue::Unrecognized(_) => None,
        }
    }
}

/// Number of `user_roles` rows carrying a given raw role value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct RoleCount {
    pub role: String,
    pub count: i64,
}

/// System-wide user counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SystemStats {
    pub total_users: i64,
    pub students: i64,
    pub staff: i64,
    pub parents: i64,
}

impl SystemStats {
    /// Fold per-role counts into dashboard totals. Every row counts towards
    /// `total_users`, including admins and unrecognized values.
    pub fn from_role_counts(counts: &[RoleCount]) -> Self {
        counts.iter().fold(Self::default(), |mut acc, rc| {
            let n = rc.count.max(0);
            acc.total_users += n;
            match Role::parse(&rc.role) {
                Some(Role::Student) => acc.students += n,
                Some(Role::Staff) => acc.staff += n,
                Some(Role::Parent) => acc.parents += n,
                Some(Role::Admin) | None => {}
            }
            acc
        })
    }
}
