use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdCalendar, LdClipboardList, LdInfo, LdPercent, LdTrendingDown,
};
use dioxus_free_icons::Icon;
use shared_types::{AttendanceStats, StudentDashboardStats, ATTENDANCE_THRESHOLD};
use shared_ui::{
    ActionCard, Card, CardContent, CardDescription, CardHeader, CardTitle, StatCard, StatVariant,
};

use super::{DashboardShell, StatGridSkeleton};
use crate::hooks::use_dashboard_data;

/// Success at or above the threshold, Warning below it.
pub(crate) fn percentage_variant(stats: &AttendanceStats) -> StatVariant {
    if stats.below_threshold() {
        StatVariant::Warning
    } else {
        StatVariant::Success
    }
}

pub(crate) fn absent_variant(stats: &AttendanceStats) -> StatVariant {
    StatVariant::attention_if(stats.absent)
}

#[component]
pub fn StudentDashboard() -> Element {
    let data = use_dashboard_data(
        server::api::get_student_overview,
        StudentDashboardStats::from_overview,
    );
    let attendance = data.stats.attendance;
    let caption = data.stats.student.as_ref().map(|s| s.caption());

    rsx! {
        DashboardShell { title: "Student Dashboard", subtitle: caption,
            if data.loading {
                StatGridSkeleton {}
            } else {
                div { class: "dashboard-stats",
                    StatCard {
                        title: "Attendance Percentage",
                        value: format!("{}%", attendance.percentage),
                        icon: rsx! { Icon::<LdPercent> { icon: LdPercent, width: 20, height: 20 } },
                        variant: percentage_variant(&attendance),
                    }
                    StatCard {
                        title: "Total Days",
                        value: attendance.total.to_string(),
                        icon: rsx! { Icon::<LdCalendar> { icon: LdCalendar, width: 20, height: 20 } },
                    }
                    StatCard {
                        title: "Present Days",
                        value: attendance.present.to_string(),
                        icon: rsx! { Icon::<LdClipboardList> { icon: LdClipboardList, width: 20, height: 20 } },
                        variant: StatVariant::Success,
                    }
                    StatCard {
                        title: "Absent Days",
                        value: attendance.absent.to_string(),
                        icon: rsx! { Icon::<LdTrendingDown> { icon: LdTrendingDown, width: 20, height: 20 } },
                        variant: absent_variant(&attendance),
                    }
                }
            }

            div { class: "dashboard-actions dashboard-actions-two",
                ActionCard {
                    title: "Request Leave",
                    description: "Submit a leave request for approval",
                    button_label: "Submit Leave Request",
                }
                Card { class: "action-card",
                    CardHeader {
                        CardTitle { "Recent Attendance" }
                        CardDescription { "Your attendance history for the past week" }
                    }
                    CardContent {
                        p { class: "dashboard-placeholder", "Attendance records will appear here" }
                    }
                }
            }

            if !data.loading && attendance.below_threshold() {
                AttendanceAlert {}
            }
        }
    }
}

#[component]
fn AttendanceAlert() -> Element {
    rsx! {
        Card { class: "attendance-alert",
            CardHeader {
                CardTitle {
                    Icon::<LdInfo> { icon: LdInfo, width: 20, height: 20 }
                    "Attendance Alert"
                }
                CardDescription {
                    "Your attendance is below the required threshold of {ATTENDANCE_THRESHOLD}%"
                }
            }
            CardContent {
                p {
                    "Please ensure regular attendance to maintain the minimum requirement. Contact your class teacher if you have any concerns."
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::AttendanceStatus::*;

    #[test]
    fn exactly_threshold_is_success() {
        let stats = AttendanceStats::from_statuses(&[Present, Present, Absent, Excused]);
        assert_eq!(percentage_variant(&stats), StatVariant::Success);
        assert_eq!(absent_variant(&stats), StatVariant::Warning);
        assert!(!stats.below_threshold());
    }

    #[test]
    fn below_threshold_is_warning() {
        let stats = AttendanceStats::from_statuses(&[Present, Absent, Absent]);
        assert_eq!(stats.percentage, 33);
        assert_eq!(percentage_variant(&stats), StatVariant::Warning);
    }

    #[test]
    fn no_records_is_success_with_no_absences() {
        let stats = AttendanceStats::from_statuses(&[]);
        assert_eq!(percentage_variant(&stats), StatVariant::Success);
        assert_eq!(absent_variant(&stats), StatVariant::Default);
    }

    #[test]
    fn failed_fetch_fallback_raises_alert() {
        let stats = StudentDashboardStats::default().attendance;
        assert_eq!(stats.percentage, 0);
        assert_eq!(percentage_variant(&stats), StatVariant::Warning);
        assert!(stats.below_threshold());
    }
}
