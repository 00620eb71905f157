use axum::http::{header, HeaderMap, HeaderValue};
use cookie::{Cookie, SameSite};
use std::sync::{Arc, Mutex};

use super::provider::ProviderSession;

pub const ACCESS_COOKIE: &str = "portal_access";
pub const REFRESH_COOKIE: &str = "portal_refresh";

fn cookie_secure() -> bool {
    std::env::var("COOKIE_SECURE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
}

fn cookie_domain() -> Option<String> {
    std::env::var("COOKIE_DOMAIN")
        .ok()
        .filter(|d| !d.is_empty())
}

/// Tokens to persist after a sign-in or refresh.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Seconds until the access token expires.
    pub expires_in: i64,
}

impl From<&ProviderSession> for TokenPair {
    fn from(session: &ProviderSession) -> Self {
        Self {
            access_token: session.access_token.clone(),
            refresh_token: session.refresh_token.clone(),
            expires_in: session.expires_in,
        }
    }
}

fn auth_cookie(name: &'static str, value: &str, max_age_secs: i64) -> Option<HeaderValue> {
    let mut cookie = Cookie::build((name, value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::seconds(max_age_secs.max(0)))
        .secure(cookie_secure());

    if let Some(domain) = cookie_domain() {
        cookie = cookie.domain(domain);
    }

    HeaderValue::from_str(&cookie.build().to_string()).ok()
}

/// Set-Cookie header for the access token, living as long as the token.
pub fn build_access_cookie(token: &str, max_age_secs: i64) -> Option<HeaderValue> {
    auth_cookie(ACCESS_COOKIE, token, max_age_secs)
}

/// Set-Cookie header for the refresh token.
pub fn build_refresh_cookie(token: &str, max_age_days: i64) -> Option<HeaderValue> {
    auth_cookie(REFRESH_COOKIE, token, max_age_days.saturating_mul(86_400))
}

/// Set-Cookie headers that expire both auth cookies.
pub fn build_clear_cookies() -> Vec<HeaderValue> {
    [ACCESS_COOKIE, REFRESH_COOKIE]
        .into_iter()
        .filter_map(|name| auth_cookie(name, "", 0))
        .collect()
}

/// Access tokens presented with a request, in the order they are tried:
/// the auth cookie first, then the `Authorization: Bearer` header.
///
/// Both are returned so a stale cookie left in a browser does not mask a
/// valid Bearer token sent by an API client on the same origin.
pub fn access_token_candidates(headers: &HeaderMap) -> Vec<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    let mut candidates: Vec<String> = extract_cookie(headers, ACCESS_COOKIE).into_iter().collect();
    if let Some(token) = bearer {
        if !candidates.contains(&token) {
            candidates.push(token);
        }
    }
    candidates
}

/// The access token a session-bound request was authenticated with.
///
/// Inserted into request extensions by the auth middleware: the token that
/// validated, or the fresh one after a transparent refresh.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionToken(pub String);

pub fn extract_refresh_token(headers: &HeaderMap) -> Option<String> {
    extract_cookie(headers, REFRESH_COOKIE)
}

fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .filter_map(|piece| Cookie::parse(piece.trim().to_string()).ok())
        .find(|c| c.name() == name && !c.value().is_empty())
        .map(|c| c.value().to_string())
}

pub fn set_auth_cookies(headers: &mut HeaderMap, tokens: &TokenPair) {
    let refresh_days = crate::config::refresh_cookie_days();
    let built = [
        build_access_cookie(&tokens.access_token, tokens.expires_in),
        build_refresh_cookie(&tokens.refresh_token, refresh_days),
    ];
    for value in built.into_iter().flatten() {
        headers.append(header::SET_COOKIE, value);
    }
}

pub fn clear_auth_cookies(headers: &mut HeaderMap) {
    for value in build_clear_cookies() {
        headers.append(header::SET_COOKIE, value);
    }
}

/// Cookie change requested by a server function, applied by the auth middleware.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingCookieAction {
    Set(TokenPair),
    Clear,
}

/// Shared slot for server functions to communicate cookie actions to the middleware.
#[derive(Clone, Debug, Default)]
pub struct CookieSlot(pub Arc<Mutex<Option<PendingCookieAction>>>);

impl CookieSlot {
    pub fn put(&self, action: PendingCookieAction) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(action);
        }
    }

    pub fn take(&self) -> Option<PendingCookieAction> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }
}

fn schedule(action: PendingCookieAction) {
    if let Some(ctx) = dioxus::fullstack::FullstackContext::current() {
        let parts = ctx.parts_mut();
        if let Some(slot) = parts.extensions.get::<CookieSlot>() {
            slot.put(action);
        }
    }
}

/// Ask the middleware to set auth cookies on the current response.
pub fn schedule_auth_cookies(tokens: TokenPair) {
    schedule(PendingCookieAction::Set(tokens));
}

/// Ask the middleware to clear auth cookies on the current response.
pub fn schedule_clear_cookies() {
    schedule(PendingCookieAction::Clear);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn access_token_read_from_cookie() {
        let headers = headers_with_cookie("theme=dark; portal_access=abc.def.ghi; other=1");
        assert_eq!(access_token_candidates(&headers), vec!["abc.def.ghi".to_string()]);
    }

    #[test]
    fn bearer_header_is_tried_after_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok"));
        assert_eq!(access_token_candidates(&headers), vec!["tok".to_string()]);

        headers.insert(header::COOKIE, HeaderValue::from_static("portal_access=cookie-tok"));
        assert_eq!(
            access_token_candidates(&headers),
            vec!["cookie-tok".to_string(), "tok".to_string()]
        );
    }

    #[test]
    fn same_token_in_cookie_and_header_is_tried_once() {
        let mut headers = headers_with_cookie("portal_access=tok");
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok"));
        assert_eq!(access_token_candidates(&headers), vec!["tok".to_string()]);
    }

    #[test]
    fn no_credentials_yields_no_candidates() {
        assert!(access_token_candidates(&HeaderMap::new()).is_empty());
    }

    #[test]
    fn empty_cookie_value_is_ignored() {
        let headers = headers_with_cookie("portal_refresh=");
        assert_eq!(extract_refresh_token(&headers), None);
    }

    #[test]
    fn auth_cookies_are_http_only() {
        let tokens = TokenPair {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires_in: 3600,
        };
        let mut headers = HeaderMap::new();
        set_auth_cookies(&mut headers, &tokens);
        let cookies: Vec<&str> = headers
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(cookies.len(), 2);
        assert!(cookies[0].starts_with("portal_access=a"));
        assert!(cookies[0].contains("Max-Age=3600"));
        assert!(cookies[1].starts_with("portal_refresh=r"));
        assert!(cookies.iter().all(|c| c.contains("HttpOnly")));
    }

    #[test]
    fn clearing_expires_both_cookies() {
        let mut headers = HeaderMap::new();
        clear_auth_cookies(&mut headers);
        let cookies: Vec<&str> = headers
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(cookies.len(), 2);
        assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
    }

    #[test]
    fn huge_refresh_lifetime_does_not_overflow() {
        let value = build_refresh_cookie("r", i64::MAX).unwrap();
        assert!(value.to_str().unwrap().starts_with("portal_refresh=r"));
    }

    #[test]
    fn cookie_slot_is_taken_once() {
        let slot = CookieSlot::default();
        slot.put(PendingCookieAction::Clear);
        assert_eq!(slot.take(), Some(PendingCookieAction::Clear));
        assert_eq!(slot.take(), None);
    }
}
