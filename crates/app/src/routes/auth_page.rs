use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdGraduationCap;
use dioxus_free_icons::Icon;
use shared_types::{AppError, FeatureFlags, SignUpOutcome};
use shared_ui::{Button, Card, CardContent, CardDescription, CardHeader, CardTitle, Input};
use std::collections::HashMap;

use crate::routes::Route;
use crate::session::use_session;

#[derive(Debug, Clone, Copy, PartialEq)]
enum AuthTab {
    SignIn,
    SignUp,
}

/// Sign-in and sign-up page. Signed-in visitors are sent to the dashboard.
#[component]
pub fn Auth() -> Element {
    let session = use_session();
    let flags: FeatureFlags = use_context();
    let mut tab = use_signal(|| AuthTab::SignIn);

    if session.current_user.read().is_some() {
        navigator().push(Route::Dashboard {});
    }

    // Registration can be switched off while the page is open
    let active = if flags.registration {
        tab()
    } else {
        AuthTab::SignIn
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./auth_page.css") }

        div { class: "auth-page",
            Card { class: "auth-card",
                CardHeader { class: "auth-card-header",
                    div { class: "auth-logo",
                        Icon::<LdGraduationCap> { icon: LdGraduationCap, width: 24, height: 24 }
                    }
                    CardTitle { "Student Leave Management" }
                    CardDescription {
                        if active == AuthTab::SignIn {
                            "Sign in to access your dashboard"
                        } else {
                            "Create an account to get started"
                        }
                    }
                }
                CardContent {
                    if flags.registration {
                        div { class: "auth-tabs", role: "tablist",
                            button {
                                r#type: "button",
                                role: "tab",
                                class: if active == AuthTab::SignIn { "auth-tab auth-tab-active" } else { "auth-tab" },
                                onclick: move |_| tab.set(AuthTab::SignIn),
                                "Sign In"
                            }
                            button {
                                r#type: "button",
                                role: "tab",
                                class: if active == AuthTab::SignUp { "auth-tab auth-tab-active" } else { "auth-tab" },
                                onclick: move |_| tab.set(AuthTab::SignUp),
                                "Sign Up"
                            }
                        }
                    }
                    match active {
                        AuthTab::SignIn => rsx! { SignInForm {} },
                        AuthTab::SignUp => rsx! { SignUpForm {} },
                    }
                }
            }
        }
    }
}

#[component]
fn SignInForm() -> Element {
    let mut session = use_session();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        loading.set(true);
        error_msg.set(None);
        field_errors.set(HashMap::new());

        match server::api::sign_in(email(), password()).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "signed in");
                session.set_user(user);
                navigator().push(Route::Dashboard {});
            }
            Err(e) => {
                let err_str = e.to_string();
                let fe = AppError::parse_field_errors(&err_str);
                if fe.is_empty() {
                    error_msg.set(Some(AppError::friendly_message(&err_str)));
                } else {
                    field_errors.set(fe);
                }
            }
        }
        loading.set(false);
    };

    rsx! {
        form { class: "auth-form", onsubmit: handle_submit,
            if let Some(err) = error_msg() {
                div { class: "auth-error", "{err}" }
            }
            Input {
                id: "signin-email",
                label: "Email",
                input_type: "email",
                placeholder: "you@school.edu",
                value: email(),
                on_input: move |e: FormEvent| email.set(e.value()),
                error: field_errors.read().get("email").cloned(),
            }
            Input {
                id: "signin-password",
                label: "Password",
                input_type: "password",
                value: password(),
                on_input: move |e: FormEvent| password.set(e.value()),
                error: field_errors.read().get("password").cloned(),
            }
            Button {
                submit: true,
                full_width: true,
                disabled: loading(),
                if loading() { "Signing in..." } else { "Sign In" }
            }
        }
    }
}

#[component]
fn SignUpForm() -> Element {
    let mut session = use_session();
    let mut full_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut pending_email = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        loading.set(true);
        error_msg.set(None);
        field_errors.set(HashMap::new());

        match server::api::sign_up(full_name(), email(), password()).await {
            Ok(SignUpOutcome::SignedIn(user)) => {
                tracing::info!(user_id = %user.id, "account created");
                session.set_user(user);
                navigator().push(Route::Dashboard {});
            }
            Ok(SignUpOutcome::ConfirmationSent { email }) => {
                pending_email.set(Some(email));
            }
            Err(e) => {
                let err_str = e.to_string();
                let fe = AppError::parse_field_errors(&err_str);
                if fe.is_empty() {
                    error_msg.set(Some(AppError::friendly_message(&err_str)));
                } else {
                    field_errors.set(fe);
                }
            }
        }
        loading.set(false);
    };

    if let Some(address) = pending_email() {
        return rsx! {
            div { class: "auth-success",
                "Check {address} for a confirmation link, then sign in."
            }
        };
    }

    rsx! {
        form { class: "auth-form", onsubmit: handle_submit,
            if let Some(err) = error_msg() {
                div { class: "auth-error", "{err}" }
            }
            Input {
                id: "signup-name",
                label: "Full Name",
                placeholder: "Asha Kumar",
                value: full_name(),
                on_input: move |e: FormEvent| full_name.set(e.value()),
                error: field_errors.read().get("full_name").cloned(),
            }
            Input {
                id: "signup-email",
                label: "Email",
                input_type: "email",
                placeholder: "you@school.edu",
                value: email(),
                on_input: move |e: FormEvent| email.set(e.value()),
                error: field_errors.read().get("email").cloned(),
            }
            Input {
                id: "signup-password",
                label: "Password",
                input_type: "password",
                placeholder: "At least 6 characters",
                value: password(),
                on_input: move |e: FormEvent| password.set(e.value()),
                error: field_errors.read().get("password").cloned(),
            }
            Button {
                submit: true,
                full_width: true,
                disabled: loading(),
                if loading() { "Creating account..." } else { "Create Account" }
            }
        }
    }
}
