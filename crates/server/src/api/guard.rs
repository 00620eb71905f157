// Server-only auth helpers shared by the server functions in `api/*`.

use dioxus::prelude::*;
use shared_types::AppError;

use crate::auth::{cookies, jwt};
use crate::error_convert::AppErrorExt;

/// Claims for the current request, if any.
/// Checks middleware-injected Claims first, falls back to cookie parsing.
pub(crate) fn current_claims() -> Option<jwt::Claims> {
    let ctx = dioxus::fullstack::FullstackContext::current()?;
    let parts = ctx.parts_mut();

    if let Some(claims) = parts.extensions.get::<jwt::Claims>() {
        return Some(claims.clone());
    }

    cookies::access_token_candidates(&parts.headers)
        .iter()
        .find_map(|token| jwt::validate_access_token(token).ok())
}

/// The caller's validated identity, or an "Authentication required" error.
pub(crate) fn require_auth() -> Result<jwt::Claims, ServerFnError> {
    current_claims()
        .ok_or_else(|| AppError::unauthorized("Authentication required").into_server_fn_error())
}

/// Access token the current request is authenticated with. After a
/// transparent refresh this is the fresh token, not the expired cookie.
pub(crate) fn current_access_token() -> Option<String> {
    let ctx = dioxus::fullstack::FullstackContext::current()?;
    let parts = ctx.parts_mut();
    if let Some(cookies::SessionToken(token)) = parts.extensions.get::<cookies::SessionToken>() {
        return Some(token.clone());
    }
    cookies::access_token_candidates(&parts.headers)
        .into_iter()
        .find(|token| jwt::validate_access_token(token).is_ok())
}
