use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdUsers;
use dioxus_free_icons::Icon;
use shared_ui::{Card, CardContent, CardDescription, CardHeader, CardTitle};

use super::DashboardShell;

/// Parents have no linked data yet; a single placeholder card.
#[component]
pub fn ParentDashboard() -> Element {
    rsx! {
        DashboardShell { title: "Parent Dashboard",
            Card { class: "parent-children",
                CardHeader {
                    CardTitle {
                        Icon::<LdUsers> { icon: LdUsers, width: 20, height: 20 }
                        "Your Children"
                    }
                    CardDescription { "Monitor attendance and leave requests for your children" }
                }
                CardContent {
                    p { class: "dashboard-placeholder",
                        "Link your children's accounts to view their attendance records here"
                    }
                }
            }
        }
    }
}
