use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use shared_types::AppErrorKind;

use super::cookies::{self, CookieSlot, PendingCookieAction, SessionToken, TokenPair};
use super::jwt::validate_access_token;
use super::provider::ProviderClient;

/// What the refresh step decided to do with the response cookies.
enum RefreshOutcome {
    Refreshed(TokenPair),
    /// The provider rejected the refresh token; drop the dead cookies.
    Revoked,
    Skipped,
}

/// Permissive auth middleware that handles authentication and cookie management.
///
/// On each request:
/// 1. Validates the access token from the cookie, then the Bearer header
/// 2. If none validates, exchanges the refresh cookie with the identity provider
/// 3. Inserts `Claims` and the effective `SessionToken` for the handler
/// 4. Inserts a `CookieSlot` so server functions can schedule cookie changes
/// 5. After the handler runs, applies any pending cookie actions to the response
///
/// Does NOT reject unauthenticated requests; downstream handlers decide authorization.
pub async fn auth_middleware(mut req: Request, next: Next) -> Response {
    let headers = req.headers().clone();

    let mut needs_refresh = true;
    for token in cookies::access_token_candidates(&headers) {
        match validate_access_token(&token) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                req.extensions_mut().insert(SessionToken(token));
                needs_refresh = false;
                break;
            }
            Err(e) => tracing::debug!(error = %e, "access token rejected"),
        }
    }

    let refresh = match cookies::extract_refresh_token(&headers) {
        Some(refresh_token) if needs_refresh => {
            try_transparent_refresh(&refresh_token, &mut req).await
        }
        _ => RefreshOutcome::Skipped,
    };

    let cookie_slot = CookieSlot::default();
    req.extensions_mut().insert(cookie_slot.clone());

    let mut response = next.run(req).await;

    match refresh {
        RefreshOutcome::Refreshed(tokens) => {
            cookies::set_auth_cookies(response.headers_mut(), &tokens)
        }
        RefreshOutcome::Revoked => cookies::clear_auth_cookies(response.headers_mut()),
        RefreshOutcome::Skipped => {}
    }

    // Applied last so a sign-in or sign-out wins over a refresh in the same request
    match cookie_slot.take() {
        Some(PendingCookieAction::Set(tokens)) => {
            cookies::set_auth_cookies(response.headers_mut(), &tokens)
        }
        Some(PendingCookieAction::Clear) => cookies::clear_auth_cookies(response.headers_mut()),
        None => {}
    }

    response
}

/// Exchange the refresh token for a new session. On success the new
/// claims and access token are inserted into the request before the
/// handler runs.
async fn try_transparent_refresh(refresh_token: &str, req: &mut Request) -> RefreshOutcome {
    let client = match ProviderClient::shared() {
        Ok(client) => client,
        Err(_) => return RefreshOutcome::Skipped,
    };

    match client.refresh(refresh_token).await {
        Ok(session) => match validate_access_token(&session.access_token) {
            Ok(claims) => {
                tracing::info!(user_id = %claims.sub, "session refreshed");
                req.extensions_mut().insert(claims);
                req.extensions_mut()
                    .insert(SessionToken(session.access_token.clone()));
                RefreshOutcome::Refreshed(TokenPair::from(&session))
            }
            Err(e) => {
                tracing::error!(error = %e, "provider issued an access token that does not validate");
                RefreshOutcome::Skipped
            }
        },
        Err(e) if e.kind == AppErrorKind::Unauthorized => RefreshOutcome::Revoked,
        Err(e) => {
            tracing::warn!(error = %e, "session refresh failed");
            RefreshOutcome::Skipped
        }
    }
}
