pub mod admin;
pub mod parent;
pub mod staff;
pub mod student;

use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdLogOut;
use dioxus_free_icons::Icon;
use shared_types::{Role, RoleValue};
use shared_ui::{
    Button, ButtonVariant, Card, CardContent, PageActions, PageHeader, PageSubtitle, PageTitle,
    Skeleton,
};

use crate::hooks::{use_user_role, RoleState};
use crate::routes::Route;
use crate::session::use_session;

/// What the `/dashboard` route shows for a given session and role state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardView {
    Loading,
    RedirectToAuth,
    /// The role lookup failed; render nothing and stay put.
    Nothing,
    Student,
    Parent,
    Staff,
    Admin,
    InvalidRole,
}

pub fn dispatch(session_loading: bool, has_user: bool, role: &RoleState) -> DashboardView {
    if session_loading || role.loading {
        return DashboardView::Loading;
    }
    if !has_user {
        return DashboardView::RedirectToAuth;
    }
    match &role.role {
        None => DashboardView::Nothing,
        Some(RoleValue::Known(known)) => match known {
            Role::Student => DashboardView::Student,
            Role::Parent => DashboardView::Parent,
            Role::Staff => DashboardView::Staff,
            Role::Admin => DashboardView::Admin,
        },
        Some(RoleValue::Unrecognized(_)) => DashboardView::InvalidRole,
    }
}

/// Role-adaptive dashboard: renders the view for the signed-in user's role.
#[component]
pub fn Dashboard() -> Element {
    let session = use_session();
    let role = use_user_role();
    let has_user = session.current_user.read().is_some();
    let view = dispatch(*session.loading.read(), has_user, &role);

    if view == DashboardView::RedirectToAuth {
        navigator().replace(Route::Auth {});
    }

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./dashboard.css") }

        match view {
            DashboardView::Loading => rsx! {
                div { class: "page-loading",
                    div { class: "spinner" }
                }
            },
            DashboardView::RedirectToAuth | DashboardView::Nothing => rsx! {},
            DashboardView::Student => rsx! { student::StudentDashboard {} },
            DashboardView::Parent => rsx! { parent::ParentDashboard {} },
            DashboardView::Staff => rsx! { staff::StaffDashboard {} },
            DashboardView::Admin => rsx! { admin::AdminDashboard {} },
            DashboardView::InvalidRole => rsx! {
                div { class: "page-loading",
                    p { class: "dashboard-invalid-role",
                        "Invalid role. Please contact administrator."
                    }
                }
            },
        }
    }
}

/// Header with title and sign-out, above the dashboard body.
#[component]
fn DashboardShell(
    title: String,
    #[props(default)] subtitle: Option<String>,
    #[props(default)] icon: Option<Element>,
    children: Element,
) -> Element {
    let session = use_session();
    let greeting = session
        .current_user
        .read()
        .as_ref()
        .map(|user| format!("Signed in as {}", user.display_name()));

    rsx! {
        div { class: "dashboard",
            PageHeader {
                div {
                    PageTitle {
                        if let Some(icon) = icon {
                            span { class: "dashboard-title-icon", {icon} }
                        }
                        "{title}"
                    }
                    if let Some(subtitle) = subtitle {
                        PageSubtitle { "{subtitle}" }
                    }
                }
                PageActions {
                    if let Some(greeting) = greeting {
                        span { class: "dashboard-greeting", "{greeting}" }
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| {
                            spawn(session.sign_out());
                        },
                        Icon::<LdLogOut> { icon: LdLogOut, width: 16, height: 16 }
                        "Sign Out"
                    }
                }
            }
            main { class: "dashboard-body", {children} }
        }
    }
}

/// Four-up grid of stat card placeholders.
#[component]
fn StatGridSkeleton() -> Element {
    rsx! {
        div { class: "dashboard-stats",
            for _ in 0..4 {
                Card {
                    CardContent {
                        Skeleton { height: "5rem" }
                    }
                }
            }
        }
    }
}
