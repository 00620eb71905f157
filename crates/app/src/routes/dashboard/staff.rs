use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdCalendar, LdCheck, LdClipboardList, LdX};
use dioxus_free_icons::Icon;
use shared_types::DailyStats;
use shared_ui::{ActionCard, ButtonVariant, StatCard, StatVariant};

use super::{DashboardShell, StatGridSkeleton};
use crate::hooks::use_dashboard_data;

#[component]
pub fn StaffDashboard() -> Element {
    let data = use_dashboard_data(server::api::get_staff_snapshot, DailyStats::from_snapshot);
    let stats = data.stats;

    rsx! {
        DashboardShell { title: "Staff Dashboard",
            if data.loading {
                StatGridSkeleton {}
            } else {
                div { class: "dashboard-stats",
                    StatCard {
                        title: "Total Students",
                        value: stats.total_students.to_string(),
                        icon: rsx! { Icon::<LdClipboardList> { icon: LdClipboardList, width: 20, height: 20 } },
                    }
                    StatCard {
                        title: "Present Today",
                        value: stats.present.to_string(),
                        icon: rsx! { Icon::<LdCheck> { icon: LdCheck, width: 20, height: 20 } },
                        variant: StatVariant::Success,
                    }
                    StatCard {
                        title: "Absent Today",
                        value: stats.absent.to_string(),
                        icon: rsx! { Icon::<LdX> { icon: LdX, width: 20, height: 20 } },
                        variant: StatVariant::attention_if(stats.absent),
                    }
                    StatCard {
                        title: "Pending Approvals",
                        value: stats.pending_leaves.to_string(),
                        icon: rsx! { Icon::<LdCalendar> { icon: LdCalendar, width: 20, height: 20 } },
                        variant: StatVariant::attention_if(stats.pending_leaves),
                    }
                }
            }

            div { class: "dashboard-actions dashboard-actions-two",
                ActionCard {
                    title: "Mark Attendance",
                    description: "Record daily attendance for students",
                    button_label: "Open Attendance Sheet",
                }
                ActionCard {
                    title: "Leave Approvals",
                    description: "Review and approve pending leave requests",
                    button_label: "View Pending Requests",
                    variant: ButtonVariant::Secondary,
                }
            }
        }
    }
}
