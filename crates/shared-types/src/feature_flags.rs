use serde::{Deserialize, Serialize};

/// Feature flags controlling optional behaviour.
///
/// Loaded from `config.toml` at server startup and exposed to clients
/// through a server function. Every field defaults to `false`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    /// Export traces and logs over OTLP.
    #[serde(default)]
    pub telemetry: bool,
    /// Show the sign-up form on the auth page.
    #[serde(default)]
    pub registration: bool,
}

/// Top-level structure of `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_disables_everything() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.features, FeatureFlags::default());
        assert!(!config.features.telemetry);
        assert!(!config.features.registration);
    }

    #[test]
    fn partial_toml_keeps_missing_flags_off() {
        let config: AppConfig = toml::from_str(
            r#"
            [features]
            registration = true
            "#,
        )
        .unwrap();
        assert!(config.features.registration);
        assert!(!config.features.telemetry);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config: AppConfig = toml::from_str(
            r#"
            [features]
            telemetry = true
            dark_mode = true
            "#,
        )
        .unwrap();
        assert!(config.features.telemetry);
    }

    #[test]
    fn json_without_fields_defaults() {
        let flags: FeatureFlags = serde_json::from_str("{}").unwrap();
        assert_eq!(flags, FeatureFlags::default());
    }
}
