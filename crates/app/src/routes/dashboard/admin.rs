use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdCalendar, LdShield, LdTrendingUp, LdUsers};
use dioxus_free_icons::Icon;
use shared_types::{RoleCount, SystemStats};
use shared_ui::{ActionCard, ButtonVariant, StatCard, StatVariant};

use super::{DashboardShell, StatGridSkeleton};
use crate::hooks::use_dashboard_data;

#[allow(clippy::ptr_arg)]
fn system_stats(counts: &Vec<RoleCount>) -> SystemStats {
    SystemStats::from_role_counts(counts)
}

#[component]
pub fn AdminDashboard() -> Element {
    let data = use_dashboard_data(server::api::get_role_counts, system_stats);
    let stats = data.stats;

    rsx! {
        DashboardShell {
            title: "Admin Dashboard",
            icon: rsx! { Icon::<LdShield> { icon: LdShield, width: 24, height: 24 } },
            if data.loading {
                StatGridSkeleton {}
            } else {
                div { class: "dashboard-stats",
                    StatCard {
                        title: "Total Users",
                        value: stats.total_users.to_string(),
                        icon: rsx! { Icon::<LdUsers> { icon: LdUsers, width: 20, height: 20 } },
                    }
                    StatCard {
                        title: "Students",
                        value: stats.students.to_string(),
                        icon: rsx! { Icon::<LdTrendingUp> { icon: LdTrendingUp, width: 20, height: 20 } },
                        variant: StatVariant::Success,
                    }
                    StatCard {
                        title: "Staff Members",
                        value: stats.staff.to_string(),
                        icon: rsx! { Icon::<LdShield> { icon: LdShield, width: 20, height: 20 } },
                    }
                    StatCard {
                        title: "Parents",
                        value: stats.parents.to_string(),
                        icon: rsx! { Icon::<LdCalendar> { icon: LdCalendar, width: 20, height: 20 } },
                    }
                }
            }

            div { class: "dashboard-actions dashboard-actions-three",
                ActionCard {
                    title: "User Management",
                    description: "Manage users, roles, and permissions",
                    button_label: "Manage Users",
                }
                ActionCard {
                    title: "System Settings",
                    description: "Configure leave limits and policies",
                    button_label: "System Settings",
                    variant: ButtonVariant::Secondary,
                }
                ActionCard {
                    title: "Reports",
                    description: "Generate attendance and leave reports",
                    button_label: "Generate Reports",
                    variant: ButtonVariant::Outline,
                }
            }
        }
    }
}
