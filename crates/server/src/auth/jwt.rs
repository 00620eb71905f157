use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use shared_types::SessionUser;
use uuid::Uuid;

/// Audience the identity provider stamps on tokens for signed-in users.
pub const AUTHENTICATED_AUDIENCE: &str = "authenticated";

/// Profile fields the provider copies into the token at sign-up.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Claims carried by a provider-issued access token.
///
/// `role` here is the provider's database role (`authenticated`), not the
/// portal role; that lives in `user_roles`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: Uuid,
    #[serde(default)]
    pub email: String,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
    pub aud: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl Claims {
    pub fn session_user(&self) -> SessionUser {
        SessionUser {
            id: self.sub,
            email: self.email.clone(),
            full_name: self.user_metadata.full_name.clone(),
        }
    }
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[AUTHENTICATED_AUDIENCE]);
    validation.set_required_spec_claims(&["exp", "sub", "aud"]);
    validation
}

/// Validate an access token against an explicit secret.
pub fn validate_with_secret(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation(),
    )?;
    Ok(data.claims)
}

/// Validate an access token with the configured provider secret.
/// Fails closed when authentication is not configured.
pub fn validate_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let settings = crate::config::auth_settings()
        .map_err(|_| jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::InvalidKeyFormat))?;
    validate_with_secret(token, &settings.jwt_secret)
}
