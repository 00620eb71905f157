//! Client for the hosted identity provider's auth API.
//!
//! Every call carries the project's `apikey` header. Sessions come back as
//! an access/refresh token pair that the caller stores in cookies.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use shared_types::{AppError, SessionUser};
use std::sync::OnceLock;
use uuid::Uuid;

use super::jwt::UserMetadata;
use crate::config::{self, AuthSettings};

/// Access token lifetime assumed when the provider omits `expires_in`.
const DEFAULT_EXPIRES_IN: i64 = 3600;

static CLIENT: OnceLock<ProviderClient> = OnceLock::new();

/// A user object as returned by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl ProviderUser {
    pub fn into_session_user(self) -> SessionUser {
        SessionUser {
            id: self.id,
            email: self.email.unwrap_or_default(),
            full_name: self.user_metadata.full_name,
        }
    }
}

/// Token pair plus the user it was issued to.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSession {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
    pub user: ProviderUser,
}

fn default_expires_in() -> i64 {
    DEFAULT_EXPIRES_IN
}

/// Sign-up either opens a session straight away or, when the project
/// requires email confirmation, returns only the pending user.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(ProviderSession),
    PendingConfirmation(ProviderUser),
}

/// Error bodies differ between endpoints and provider versions.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
            .filter(|m| !m.trim().is_empty())
    }
}

/// Which kind of endpoint failed; decides how client errors are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Password and refresh grants: a 4xx means the credentials are bad.
    Token,
    SignUp,
    Logout,
}

/// Map a non-success provider response to an `AppError`.
pub fn map_provider_error(endpoint: Endpoint, status: StatusCode, body: &str) -> AppError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message);

    if status == StatusCode::TOO_MANY_REQUESTS {
        return AppError::upstream("Too many attempts. Please wait a moment and try again.");
    }
    if !status.is_client_error() {
        return AppError::upstream("The sign-in service is unavailable. Please try again.");
    }

    match endpoint {
        Endpoint::Token => AppError::unauthorized(match detail {
            Some(d) if d.to_lowercase().contains("email not confirmed") => {
                "Please confirm your email before signing in.".to_string()
            }
            _ => "Invalid email or password".to_string(),
        }),
        Endpoint::SignUp => {
            let message = detail.unwrap_or_else(|| "Could not create the account".to_string());
            let lower = message.to_lowercase();
            if lower.contains("already registered") || lower.contains("already exists") {
                AppError::conflict("An account with this email already exists")
            } else {
                AppError::bad_request(message)
            }
        }
        Endpoint::Logout => AppError::unauthorized("Session already ended"),
    }
}

pub struct ProviderClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl ProviderClient {
    pub fn new(settings: &AuthSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: settings.url.clone(),
            anon_key: settings.anon_key.clone(),
        }
    }

    /// Process-wide client built from the environment on first use.
    pub fn shared() -> Result<&'static ProviderClient, AppError> {
        if let Some(client) = CLIENT.get() {
            return Ok(client);
        }
        let settings = config::auth_settings()?;
        Ok(CLIENT.get_or_init(|| ProviderClient::new(settings)))
    }

    async fn send(
        &self,
        endpoint: Endpoint,
        path: &str,
        body: serde_json::Value,
        bearer: Option<&str>,
    ) -> Result<reqwest::Response, AppError> {
        let mut request = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .header("apikey", &self.anon_key)
            .json(&body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, path, "identity provider unreachable");
            AppError::upstream("The sign-in service is unavailable. Please try again.")
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), path, body = %text, "identity provider rejected request");
        Err(map_provider_error(endpoint, status, &text))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, AppError> {
        self.send(endpoint, path, body, None)
            .await?
            .json::<T>()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, path, "unexpected identity provider response");
                AppError::upstream("Unexpected response from the sign-in service")
            })
    }

    #[tracing::instrument(skip(self, password))]
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, AppError> {
        self.send_json(
            Endpoint::Token,
            "/token?grant_type=password",
            json!({ "email": email, "password": password }),
        )
        .await
    }

    #[tracing::instrument(skip_all)]
    pub async fn refresh(&self, refresh_token: &str) -> Result<ProviderSession, AppError> {
        self.send_json(
            Endpoint::Token,
            "/token?grant_type=refresh_token",
            json!({ "refresh_token": refresh_token }),
        )
        .await
    }

    #[tracing::instrument(skip(self, password))]
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<SignUpResponse, AppError> {
        self.send_json(
            Endpoint::SignUp,
            "/signup",
            json!({
                "email": email,
                "password": password,
                "data": { "full_name": full_name },
            }),
        )
        .await
    }

    /// Revoke the session the access token belongs to.
    #[tracing::instrument(skip_all)]
    pub async fn logout(&self, access_token: &str) -> Result<(), AppError> {
        self.send(Endpoint::Logout, "/logout", json!({}), Some(access_token))
            .await
            .map(|_| ())
    }
}

/// Revoke the provider session behind `access_token`, if there is one.
/// Failures are logged only; the caller clears local state regardless.
pub async fn revoke_session(access_token: Option<&str>) {
    let Some(token) = access_token else {
        tracing::debug!("no session token to revoke");
        return;
    };
    match ProviderClient::shared() {
        Ok(client) => {
            if let Err(e) = client.logout(token).await {
                tracing::warn!(error = %e, "provider logout failed");
            }
        }
        Err(e) => tracing::warn!(error = %e, "provider logout skipped"),
    }
}
