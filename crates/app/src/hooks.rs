use std::future::Future;

use dioxus::prelude::*;
use shared_types::{AppError, RoleValue};
use shared_ui::{use_toast, ToastOptions};
use uuid::Uuid;

use crate::session::use_session;

/// Role of the signed-in user as seen by the dashboard dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleState {
    /// `None` when nobody is signed in or the lookup failed.
    pub role: Option<RoleValue>,
    pub loading: bool,
}

/// Result of one role lookup, keyed by the user it was issued for.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleLookup {
    pub user_id: Uuid,
    pub role: Option<RoleValue>,
}

/// Combine the current user id with the latest finished lookup.
/// A lookup issued for a different user counts as still pending.
pub fn resolve_role(current: Option<Uuid>, lookup: Option<&RoleLookup>) -> RoleState {
    match (current, lookup) {
        (None, _) => RoleState {
            role: None,
            loading: false,
        },
        (Some(id), Some(done)) if done.user_id == id => RoleState {
            role: done.role.clone(),
            loading: false,
        },
        (Some(_), _) => RoleState {
            role: None,
            loading: true,
        },
    }
}

/// Turn a finished `get_user_role` call into a lookup result, logging the
/// failure and unrecognized-role cases once per lookup.
pub fn finish_lookup(user_id: Uuid, fetched: Result<String, ServerFnError>) -> RoleLookup {
    let role = match fetched {
        Ok(raw) => {
            let role = RoleValue::from_stored(&raw);
            if let RoleValue::Unrecognized(value) = &role {
                tracing::warn!(%user_id, role = %value, "user has an unrecognized role");
            }
            Some(role)
        }
        Err(e) => {
            tracing::error!(%user_id, error = %e, "role lookup failed");
            None
        }
    };
    RoleLookup { user_id, role }
}

/// Look up the signed-in user's role. Re-runs whenever the user id changes.
pub fn use_user_role() -> RoleState {
    let session = use_session();
    let user_id = use_memo(move || session.user_id());

    let lookup = use_resource(move || {
        let id = user_id();
        async move {
            let id = id?;
            Some(finish_lookup(id, server::api::get_user_role().await))
        }
    });

    let finished = lookup.read().clone().flatten();
    resolve_role(user_id(), finished.as_ref())
}

/// Derived dashboard statistics plus a loading flag for skeletons.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData<S> {
    pub stats: S,
    pub loading: bool,
}

/// Fetch a dashboard payload on mount and derive its statistics.
///
/// On failure the error is logged and toasted, and the view keeps
/// `S::default()`. The fetch is owned by the calling scope, so a late
/// response never reaches an unmounted view.
pub fn use_dashboard_data<R, S, F, Fut>(fetch: F, derive: fn(&R) -> S) -> DashboardData<S>
where
    R: 'static,
    S: Default + Clone + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<R, ServerFnError>> + 'static,
{
    let toast = use_toast();

    let resource = use_resource(move || {
        let request = fetch();
        async move {
            match request.await {
                Ok(raw) => derive(&raw),
                Err(e) => {
                    let message = e.to_string();
                    tracing::error!(error = %message, "dashboard fetch failed");
                    toast.error(AppError::friendly_message(&message), ToastOptions::new());
                    S::default()
                }
            }
        }
    });

    let current = resource.read().clone();
    DashboardData {
        loading: current.is_none(),
        stats: current.unwrap_or_default(),
    }
}
