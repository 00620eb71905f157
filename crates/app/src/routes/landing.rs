use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdBell, LdCalendar, LdCheck, LdGraduationCap, LdShield, LdUsers,
};
use dioxus_free_icons::Icon;
use shared_ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle,
};

use crate::routes::Route;

/// Public landing page: hero, feature overview, role overview and a call to action.
#[component]
pub fn Landing() -> Element {
    let go_to_auth = move |_: MouseEvent| {
        navigator().push(Route::Auth {});
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./landing.css") }

        div { class: "landing",
            section { class: "landing-hero",
                div { class: "landing-hero-inner",
                    div { class: "landing-hero-badge",
                        Icon::<LdGraduationCap> { icon: LdGraduationCap, width: 32, height: 32 }
                    }
                    h1 { class: "landing-hero-title", "Student Leave Management System" }
                    p { class: "landing-hero-subtitle",
                        "Streamline attendance tracking, manage leave requests, and keep everyone informed"
                    }
                    div { class: "landing-hero-actions",
                        Button {
                            size: ButtonSize::Large,
                            class: "landing-hero-primary",
                            onclick: go_to_auth,
                            "Get Started"
                        }
                        Button {
                            size: ButtonSize::Large,
                            variant: ButtonVariant::Outline,
                            class: "landing-hero-outline",
                            onclick: go_to_auth,
                            "Sign In"
                        }
                    }
                }
            }

            section { class: "landing-section",
                div { class: "landing-section-heading",
                    h2 { "Everything You Need" }
                    p { "A comprehensive solution for managing student attendance and leave requests" }
                }
                div { class: "landing-features",
                    FeatureCard {
                        accent: "primary",
                        icon: rsx! { Icon::<LdCalendar> { icon: LdCalendar, width: 40, height: 40 } },
                        title: "Attendance Tracking",
                        description: "Real-time attendance monitoring with automated percentage calculations",
                        points: ["Daily attendance marking", "Historical records", "Auto percentage calculation"],
                    }
                    FeatureCard {
                        accent: "accent",
                        icon: rsx! { Icon::<LdShield> { icon: LdShield, width: 40, height: 40 } },
                        title: "Leave Management",
                        description: "Prioritized leave categories with smart approval workflows",
                        points: ["Medical, Personal, Casual leaves", "Auto-approval within limits", "Staff review system"],
                    }
                    FeatureCard {
                        accent: "warning",
                        icon: rsx! { Icon::<LdBell> { icon: LdBell, width: 40, height: 40 } },
                        title: "Smart Notifications",
                        description: "Keep students and parents informed with automated alerts",
                        points: ["Low attendance alerts", "Parent notifications", "Leave status updates"],
                    }
                }
            }

            section { class: "landing-section landing-roles-section",
                div { class: "landing-section-heading",
                    h2 { "Built for Everyone" }
                    p { "Role-based dashboards tailored to each user's needs" }
                }
                div { class: "landing-roles",
                    RoleCard {
                        accent: "primary",
                        icon: rsx! { Icon::<LdGraduationCap> { icon: LdGraduationCap, width: 24, height: 24 } },
                        title: "Students",
                        description: "View attendance, request leaves, track percentage",
                    }
                    RoleCard {
                        accent: "accent",
                        icon: rsx! { Icon::<LdUsers> { icon: LdUsers, width: 24, height: 24 } },
                        title: "Parents",
                        description: "Monitor children's attendance and receive alerts",
                    }
                    RoleCard {
                        accent: "warning",
                        icon: rsx! { Icon::<LdCheck> { icon: LdCheck, width: 24, height: 24 } },
                        title: "Staff",
                        description: "Mark attendance, approve leaves, view reports",
                    }
                    RoleCard {
                        accent: "destructive",
                        icon: rsx! { Icon::<LdShield> { icon: LdShield, width: 24, height: 24 } },
                        title: "Admins",
                        description: "Manage system, configure policies, generate reports",
                    }
                }
            }

            section { class: "landing-cta",
                h2 { "Ready to Get Started?" }
                p { "Join hundreds of institutions streamlining their attendance management" }
                Button {
                    size: ButtonSize::Large,
                    class: "landing-hero-primary",
                    onclick: go_to_auth,
                    "Create Your Account"
                }
            }

            footer { class: "landing-footer",
                p { "© 2025 Student Leave Management System. All rights reserved." }
            }
        }
    }
}

#[component]
fn FeatureCard(
    accent: &'static str,
    icon: Element,
    title: &'static str,
    description: &'static str,
    points: [&'static str; 3],
) -> Element {
    rsx! {
        Card { class: "landing-feature landing-accent-{accent}",
            CardHeader {
                div { class: "landing-feature-icon", {icon} }
                CardTitle { "{title}" }
                CardDescription { "{description}" }
            }
            CardContent {
                ul { class: "landing-feature-points",
                    for point in points {
                        li {
                            Icon::<LdCheck> { icon: LdCheck, width: 16, height: 16 }
                            span { "{point}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn RoleCard(
    accent: &'static str,
    icon: Element,
    title: &'static str,
    description: &'static str,
) -> Element {
    rsx! {
        Card { class: "landing-role",
            CardHeader {
                div { class: "landing-role-icon landing-accent-{accent}", {icon} }
                CardTitle { "{title}" }
                CardDescription { "{description}" }
            }
        }
    }
}
