use dioxus::prelude::*;
use shared_types::{FeatureFlags, SessionUser, SignUpOutcome};

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};

#[cfg(feature = "server")]
use super::guard;

/// Current feature flags. No auth required; flags are not sensitive.
#[server]
pub async fn get_feature_flags() -> Result<FeatureFlags, ServerFnError> {
    Ok(crate::config::feature_flags().clone())
}

/// The signed-in user, or `None` when the request carries no valid session.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_session() -> Result<Option<SessionUser>, ServerFnError> {
    Ok(guard::current_claims().map(|claims| claims.session_user()))
}

/// Sign in with email and password. Sets HTTP-only auth cookies on success.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn sign_in(email: String, password: String) -> Result<SessionUser, ServerFnError> {
    use crate::auth::{cookies, provider::ProviderClient};
    use shared_types::SignInRequest;

    let req = SignInRequest {
        email: email.trim().to_string(),
        password,
    };
    req.validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    let client = ProviderClient::shared().map_err(|e| e.into_server_fn_error())?;
    let session = client
        .sign_in_with_password(&req.email, &req.password)
        .await
        .map_err(|e| {
            tracing::warn!(email = %req.email, error = %e, "sign-in failed");
            e.into_server_fn_error()
        })?;

    cookies::schedule_auth_cookies(cookies::TokenPair::from(&session));
    let user = session.user.into_session_user();
    tracing::info!(user_id = %user.id, "signed in");
    Ok(user)
}

/// Create an account. Returns a live session, or a pending-confirmation
/// outcome when the provider requires the email to be verified first.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn sign_up(
    full_name: String,
    email: String,
    password: String,
) -> Result<SignUpOutcome, ServerFnError> {
    use crate::auth::{
        cookies,
        provider::{ProviderClient, SignUpResponse},
    };
    use shared_types::{AppError, SignUpRequest};

    if !crate::config::feature_flags().registration {
        return Err(AppError::forbidden("Registration is currently closed").into_server_fn_error());
    }

    let req = SignUpRequest {
        full_name: full_name.trim().to_string(),
        email: email.trim().to_string(),
        password,
    };
    req.validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    let client = ProviderClient::shared().map_err(|e| e.into_server_fn_error())?;
    let response = client
        .sign_up(&req.email, &req.password, &req.full_name)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    Ok(match response {
        SignUpResponse::Session(session) => {
            cookies::schedule_auth_cookies(cookies::TokenPair::from(&session));
            let user = session.user.into_session_user();
            tracing::info!(user_id = %user.id, "account created and signed in");
            SignUpOutcome::SignedIn(user)
        }
        SignUpResponse::PendingConfirmation(user) => {
            tracing::info!(user_id = %user.id, "account created, awaiting email confirmation");
            SignUpOutcome::ConfirmationSent {
                email: user.email.unwrap_or(req.email),
            }
        }
    })
}

/// End the provider session and clear auth cookies.
///
/// Cookies are cleared even when the provider call fails, so the browser
/// never keeps a session the user asked to end.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn sign_out() -> Result<(), ServerFnError> {
    use crate::auth::{cookies, provider};

    provider::revoke_session(guard::current_access_token().as_deref()).await;

    cookies::schedule_clear_cookies();
    Ok(())
}
