use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum attendance percentage before a student is flagged.
/// A student at exactly this value is not flagged.
pub const ATTENDANCE_THRESHOLD: u8 = 75;

/// Status of a single `attendance` row.
///
/// Only `Present` and `Excused` count as attended. Values the portal does
/// not know about are preserved in `Other` and count as not attended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Excused,
    Late,
    Other(String),
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Excused => "excused",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Other(s) => s,
        }
    }

    pub fn counts_as_present(&self) -> bool {
        matches!(self, AttendanceStatus::Present | AttendanceStatus::Excused)
    }
}

impl From<String> for AttendanceStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "present" => AttendanceStatus::Present,
            "absent" => AttendanceStatus::Absent,
            "excused" => AttendanceStatus::Excused,
            "late" => AttendanceStatus::Late,
            _ => AttendanceStatus::Other(s),
        }
    }
}

impl From<AttendanceStatus> for String {
    fn from(status: AttendanceStatus) -> Self {
        match status {
            AttendanceStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

/// Count of rows whose status counts as attended.
pub fn count_present(statuses: &[AttendanceStatus]) -> i64 {
    statuses.iter().filter(|s| s.counts_as_present()).count() as i64
}

/// Rounded attendance percentage; 100 when nothing has been recorded.
///
/// Rounds half up, so 1 of 8 days is 13%.
pub fn attendance_percentage(present: i64, total: i64) -> u8 {
    if total <= 0 {
        return 100;
    }
    let present = present.clamp(0, total);
    ((present * 200 + total) / (total * 2)) as u8
}

/// A student's lifetime attendance summary. `Default` is all zeros, the
/// state a dashboard falls back to when its fetch fails.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AttendanceStats {
    pub total: i64,
    pub present: i64,
    pub absent: i64,
    pub percentage: u8,
}

impl AttendanceStats {
    pub fn from_statuses(statuses: &[AttendanceStatus]) -> Self {
        let total = statuses.len() as i64;
        let present = count_present(statuses);
        Self {
            total,
            present,
            absent: total - present,
            percentage: attendance_percentage(present, total),
        }
    }

    pub fn below_threshold(&self) -> bool {
        self.percentage < ATTENDANCE_THRESHOLD
    }
}

/// A row of the `students` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct StudentProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub roll_number: String,
    pub class_name: String,
    pub section: Option<String>,
}

impl StudentProfile {
    /// Header caption, e.g. `Roll: 12 | Class: 10 - B`.
    pub fn caption(&self) -> String {
        match self.section.as_deref().filter(|s| !s.is_empty()) {
            Some(section) => format!(
                "Roll: {} | Class: {} - {}",
                self.roll_number, self.class_name, section
            ),
            None => format!("Roll: {} | Class: {}", self.roll_number, self.class_name),
        }
    }
}

/// Raw payload behind the student dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StudentOverview {
    pub student: StudentProfile,
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<String>))]
    pub attendance: Vec<AttendanceStatus>,
}

/// Derived student dashboard state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StudentDashboardStats {
    pub student: Option<StudentProfile>,
    pub attendance: AttendanceStats,
}

impl StudentDashboardStats {
    pub fn from_overview(overview: &StudentOverview) -> Self {
        Self {
            student: Some(overview.student.clone()),
            attendance: AttendanceStats::from_statuses(&overview.attendance),
        }
    }
}

/// Raw payload behind the staff dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StaffSnapshot {
    /// ISO date (UTC) the attendance rows were taken for.
    pub date: String,
    pub total_students: i64,
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<String>))]
    pub today: Vec<AttendanceStatus>,
    pub pending_leaves: i64,
}

/// Today's figures for the staff dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DailyStats {
    pub total_students: i64,
    pub present: i64,
    pub absent: i64,
    pub pending_leaves: i64,
}

impl DailyStats {
    pub fn from_snapshot(snapshot: &StaffSnapshot) -> Self {
        let present = count_present(&snapshot.today);
        Self {
            total_students: snapshot.total_students.max(0),
            present,
            absent: snapshot.today.len() as i64 - present,
            pending_leaves: snapshot.pending_leaves.max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use AttendanceStatus::*;

    #[test]
    fn three_of_four_is_exactly_threshold() {
        let stats = AttendanceStats::from_statuses(&[Present, Present, Absent, Excused]);
        assert_eq!(
            stats,
            AttendanceStats {
                total: 4,
                present: 3,
                absent: 1,
                percentage: 75,
            }
        );
        assert!(!stats.below_threshold());
    }

    #[test]
    fn no_records_is_full_attendance() {
        let stats = AttendanceStats::from_statuses(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.absent, 0);
        assert_eq!(stats.percentage, 100);
        assert!(!stats.below_threshold());
        assert_ne!(AttendanceStats::default(), stats);
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(attendance_percentage(1, 8), 13);
        assert_eq!(attendance_percentage(2, 3), 67);
        assert_eq!(attendance_percentage(1, 3), 33);
        assert_eq!(attendance_percentage(0, 5), 0);
        assert_eq!(attendance_percentage(5, 5), 100);
    }

    #[test]
    fn exact_halves_round_up() {
        // 57.5 exactly; a float quotient would land just below and round down
        assert_eq!(attendance_percentage(23, 40), 58);
        assert_eq!(attendance_percentage(3, 8), 38);
    }

    #[test]
    fn percentage_clamps_bad_input() {
        assert_eq!(attendance_percentage(9, 5), 100);
        assert_eq!(attendance_percentage(-1, 5), 0);
        assert_eq!(attendance_percentage(3, -2), 100);
    }

    #[test]
    fn late_and_unknown_count_as_absent() {
        let stats = AttendanceStats::from_statuses(&[
            Present,
            Late,
            Other("holiday".to_string()),
        ]);
        assert_eq!(stats.present, 1);
        assert_eq!(stats.absent, 2);
        assert_eq!(stats.percentage, 33);
        assert!(stats.below_threshold());
    }

    #[test]
    fn absent_never_negative() {
        for n in 0..6 {
            let rows: Vec<AttendanceStatus> = (0..n)
                .map(|i| if i % 2 == 0 { Present } else { Excused })
                .collect();
            let stats = AttendanceStats::from_statuses(&rows);
            assert_eq!(stats.absent, 0);
            assert_eq!(stats.present + stats.absent, stats.total);
        }
    }

    #[test]
    fn status_serde_preserves_unknown_values() {
        let parsed: Vec<AttendanceStatus> =
            serde_json::from_str(r#"["present","excused","field_trip"]"#).unwrap();
        assert_eq!(parsed, vec![Present, Excused, Other("field_trip".to_string())]);
        let json = serde_json::to_string(&parsed).unwrap();
        assert_eq!(json, r#"["present","excused","field_trip"]"#);
    }

    #[test]
    fn daily_stats_from_snapshot() {
        let snapshot = StaffSnapshot {
            date: "2026-10-18".to_string(),
            total_students: 30,
            today: vec![Present, Absent, Excused, Absent],
            pending_leaves: 4,
        };
        assert_eq!(
            DailyStats::from_snapshot(&snapshot),
            DailyStats {
                total_students: 30,
                present: 2,
                absent: 2,
                pending_leaves: 4,
            }
        );
    }

    #[test]
    fn student_caption_with_and_without_section() {
        let mut profile = StudentProfile {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            roll_number: "42".to_string(),
            class_name: "10".to_string(),
            section: Some("B".to_string()),
        };
        assert_eq!(profile.caption(), "Roll: 42 | Class: 10 - B");
        profile.section = None;
        assert_eq!(profile.caption(), "Roll: 42 | Class: 10");
        profile.section = Some(String::new());
        assert_eq!(profile.caption(), "Roll: 42 | Class: 10");
    }

    #[test]
    fn student_dashboard_stats_from_overview() {
        let overview = StudentOverview {
            student: StudentProfile {
                id: Uuid::nil(),
                user_id: Uuid::nil(),
                roll_number: "7".to_string(),
                class_name: "9".to_string(),
                section: None,
            },
            attendance: vec![Present, Absent],
        };
        let stats = StudentDashboardStats::from_overview(&overview);
        assert_eq!(stats.attendance.percentage, 50);
        assert_eq!(stats.student.unwrap().roll_number, "7");
    }
}
