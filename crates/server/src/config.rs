use shared_types::{AppConfig, AppError, FeatureFlags};
use std::sync::OnceLock;

static FLAGS: OnceLock<FeatureFlags> = OnceLock::new();
static AUTH: OnceLock<Option<AuthSettings>> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

const DEFAULT_REFRESH_COOKIE_DAYS: i64 = 7;
/// Browsers cap cookie lifetimes at 400 days.
const MAX_REFRESH_COOKIE_DAYS: i64 = 400;

/// Read `config.toml`, parse feature flags, and store them in the global
/// `OnceLock`. Only the first call has any effect.
///
/// A missing or unparseable file leaves every flag off.
pub fn load_feature_flags() {
    FLAGS.get_or_init(|| read_flags(CONFIG_PATH));
}

fn read_flags(path: &str) -> FeatureFlags {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_flags(&contents),
        Err(e) => {
            tracing::warn!(path, error = %e, "config file not readable, all feature flags off");
            FeatureFlags::default()
        }
    }
}

fn parse_flags(contents: &str) -> FeatureFlags {
    match toml::from_str::<AppConfig>(contents) {
        Ok(config) => {
            tracing::info!(flags = ?config.features, "feature flags loaded");
            config.features
        }
        Err(e) => {
            tracing::warn!(error = %e, "config file malformed, all feature flags off");
            FeatureFlags::default()
        }
    }
}

/// Loaded feature flags, or all-off defaults before `load_feature_flags()` ran.
pub fn feature_flags() -> &'static FeatureFlags {
    static DEFAULT: FeatureFlags = FeatureFlags {
        telemetry: false,
        registration: false,
    };
    FLAGS.get().unwrap_or(&DEFAULT)
}

/// Connection details for the hosted identity provider.
#[derive(Clone)]
pub struct AuthSettings {
    /// Base URL of the provider's auth API, without a trailing slash.
    pub url: String,
    /// Public project key sent as the `apikey` header.
    pub anon_key: String,
    /// HS256 secret the provider signs access tokens with.
    pub jwt_secret: String,
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl AuthSettings {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let required = |key: &str| {
            get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| format!("{key} must be set"))
        };
        Ok(Self {
            url: required("AUTH_URL")?.trim_end_matches('/').to_string(),
            anon_key: required("AUTH_ANON_KEY")?,
            jwt_secret: required("AUTH_JWT_SECRET")?,
        })
    }
}

/// Identity provider settings, read from the environment on first use.
pub fn auth_settings() -> Result<&'static AuthSettings, AppError> {
    AUTH.get_or_init(|| {
        let _ = dotenvy::dotenv();
        match AuthSettings::from_env() {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::error!(error = %e, "identity provider is not configured");
                None
            }
        }
    })
    .as_ref()
    .ok_or_else(|| AppError::internal("Authentication is not configured"))
}

/// Lifetime of the refresh cookie (`AUTH_REFRESH_COOKIE_DAYS`, default 7, at most 400).
pub fn refresh_cookie_days() -> i64 {
    parse_refresh_cookie_days(std::env::var("AUTH_REFRESH_COOKIE_DAYS").ok().as_deref())
}

fn parse_refresh_cookie_days(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|d| *d > 0)
        .map(|d| d.min(MAX_REFRESH_COOKIE_DAYS))
        .unwrap_or(DEFAULT_REFRESH_COOKIE_DAYS)
}
