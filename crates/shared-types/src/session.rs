use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The signed-in user as exposed to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl SessionUser {
    /// Name to greet the user with, falling back to the local part of the email.
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref().filter(|n| !n.trim().is_empty()) {
            Some(name) => name,
            None => self.email.split('@').next().unwrap_or(&self.email),
        }
    }
}

/// Email/password sign-in request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct SignInRequest {
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Password is required"))
    )]
    pub password: String,
}

/// New account request forwarded to the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct SignUpRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Full name is required"))
    )]
    pub full_name: String,
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 6, message = "Password must be at least 6 characters"))
    )]
    pub password: String,
}

/// Result of a sign-up: either signed straight in, or waiting on email confirmation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum SignUpOutcome {
    SignedIn(SessionUser),
    ConfirmationSent { email: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(full_name: Option<&str>) -> SessionUser {
        SessionUser {
            id: Uuid::nil(),
            email: "asha.k@school.edu".to_string(),
            full_name: full_name.map(str::to_string),
        }
    }

    #[test]
    fn display_name_prefers_full_name() {
        assert_eq!(user(Some("Asha K")).display_name(), "Asha K");
    }

    #[test]
    fn display_name_falls_back_to_email_local_part() {
        assert_eq!(user(None).display_name(), "asha.k");
        assert_eq!(user(Some("  ")).display_name(), "asha.k");
    }

    #[test]
    fn session_user_omits_missing_name() {
        let json = serde_json::to_string(&user(None)).unwrap();
        assert!(!json.contains("full_name"));
    }
}
