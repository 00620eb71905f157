use dioxus::prelude::*;
use shared_types::SessionUser;
use uuid::Uuid;

/// Signed-in user, restored from the auth cookies on startup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionState {
    pub current_user: Signal<Option<SessionUser>>,
    /// True until the initial session restore has finished.
    pub loading: Signal<bool>,
}

impl SessionState {
    /// Provide the session context and start restoring the session.
    /// Call once from the root component; the restore task is cancelled
    /// when the root scope drops.
    pub fn init() -> Self {
        let state = use_context_provider(|| Self {
            current_user: Signal::new(None),
            loading: Signal::new(true),
        });

        let task = use_hook(move || {
            let mut current_user = state.current_user;
            let mut loading = state.loading;
            spawn(async move {
                match server::api::get_session().await {
                    Ok(user) => current_user.set(user),
                    Err(e) => tracing::warn!(error = %e, "session restore failed"),
                }
                loading.set(false);
            })
        });
        use_drop(move || task.cancel());

        state
    }

    pub fn set_user(&mut self, user: SessionUser) {
        self.current_user.set(Some(user));
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.current_user.read().as_ref().map(|u| u.id)
    }

    /// Revoke the session server-side, then forget the local user.
    /// The local state is cleared even when the revoke call fails.
    pub async fn sign_out(mut self) {
        if let Err(e) = server::api::sign_out().await {
            tracing::warn!(error = %e, "sign-out request failed");
        }
        self.current_user.set(None);
    }
}

/// Hook to access the session context.
pub fn use_session() -> SessionState {
    use_context::<SessionState>()
}
