//! Deployment settings for the Axum integration.
//!
//! Sources, later ones winning: built-in defaults, an optional
//! `oauth_bridge.{json,...}` file in the working directory, then
//! `OAUTH_BRIDGE__*` environment variables (a `.env` file is loaded first).

use config::{
    Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, builder::DefaultState,
};
use oauth_bridge_core::{BodyFormat, DEFAULT_REDIRECT_STATUS, RFC6749_URL, StatusClass};
use serde::Deserialize;
use thiserror::Error;

pub const SETTINGS_FILE: &str = "oauth_bridge";
pub const ENV_PREFIX: &str = "OAUTH_BRIDGE";
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BridgeSettings {
    /// Status used for redirects built from a `RedirectPayload`
    pub redirect_status: u16,
    /// Base URL for `#fragment` error URIs
    pub error_uri_base: String,
    pub body_format: BodyFormat,
    /// Upper bound when buffering form bodies
    pub max_body_bytes: usize,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Config(#[from] ConfigError),

    #[error("redirect_status must be a 3xx status code, got {0}")]
    InvalidRedirectStatus(u16),

    #[error("error_uri_base must not be empty")]
    EmptyErrorUriBase,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            redirect_status: DEFAULT_REDIRECT_STATUS,
            error_uri_base: RFC6749_URL.to_string(),
            body_format: BodyFormat::Json,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl BridgeSettings {
    /// Load settings from the settings file and the environment.
    pub fn load() -> Result<Self, SettingsError> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!(error = %e, "No .env file loaded");
        }

        let config = defaults()?
            .add_source(File::with_name(SETTINGS_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::from_config(config)
    }

    /// Load settings from a JSON document layered over the defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let config = defaults()?
            .add_source(File::from_str(json, FileFormat::Json))
            .build()?;

        Self::from_config(config)
    }

    fn from_config(config: Config) -> Result<Self, SettingsError> {
        let settings: BridgeSettings = config.try_deserialize()?;
        settings.validate()?;

        tracing::info!(
            redirect_status = settings.redirect_status,
            error_uri_base = %settings.error_uri_base,
            body_format = ?settings.body_format,
            "Loaded OAuth2 bridge settings"
        );
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if StatusClass::of(self.redirect_status) != StatusClass::Redirection {
            return Err(SettingsError::InvalidRedirectStatus(self.redirect_status));
        }
        if self.error_uri_base.is_empty() {
            return Err(SettingsError::EmptyErrorUriBase);
        }
        Ok(())
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = BridgeSettings::default();

    Config::builder()
        .set_default("redirect_status", i64::from(defaults.redirect_status))?
        .set_default("error_uri_base", defaults.error_uri_base)?
        .set_default("body_format", "json")?
        .set_default("max_body_bytes", defaults.max_body_bytes as i64)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    // Tests that touch the process environment hold this lock.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_empty_document_gives_defaults() {
        let settings = BridgeSettings::from_json("{}").unwrap();
        assert_eq!(settings, BridgeSettings::default());
    }

    #[test]
    fn test_overrides() {
        let settings = BridgeSettings::from_json(
            r#"{"redirect_status": 303, "body_format": "xml", "max_body_bytes": 2048}"#,
        )
        .unwrap();

        assert_eq!(settings.redirect_status, 303);
        assert_eq!(settings.body_format, BodyFormat::Xml);
        assert_eq!(settings.max_body_bytes, 2048);
        assert_eq!(settings.error_uri_base, RFC6749_URL);
    }

    #[test]
    fn test_rejects_non_redirect_status() {
        let result = BridgeSettings::from_json(r#"{"redirect_status": 200}"#);
        assert!(matches!(
            result,
            Err(SettingsError::InvalidRedirectStatus(200))
        ));
    }

    #[test]
    fn test_rejects_empty_error_uri_base() {
        let result = BridgeSettings::from_json(r#"{"error_uri_base": ""}"#);
        assert!(matches!(result, Err(SettingsError::EmptyErrorUriBase)));
    }

    #[test]
    fn test_rejects_unknown_body_format() {
        let result = BridgeSettings::from_json(r#"{"body_format": "yaml"}"#);
        assert!(matches!(result, Err(SettingsError::Config(_))));
    }

    #[test]
    fn test_load_reads_prefixed_environment() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        // SAFETY: every test that mutates the environment holds ENV_LOCK.
        unsafe {
            std::env::set_var("OAUTH_BRIDGE__REDIRECT_STATUS", "303");
            std::env::set_var("OAUTH_BRIDGE__MAX_BODY_BYTES", "4096");
        }
        let result = BridgeSettings::load();
        unsafe {
            std::env::remove_var("OAUTH_BRIDGE__REDIRECT_STATUS");
            std::env::remove_var("OAUTH_BRIDGE__MAX_BODY_BYTES");
        }

        let settings = result.unwrap();
        assert_eq!(settings.redirect_status, 303);
        assert_eq!(settings.max_body_bytes, 4096);
        assert_eq!(settings.error_uri_base, RFC6749_URL);
    }

    #[test]
    fn test_load_validates_environment_values() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        // SAFETY: every test that mutates the environment holds ENV_LOCK.
        unsafe { std::env::set_var("OAUTH_BRIDGE__REDIRECT_STATUS", "200") };
        let result = BridgeSettings::load();
        unsafe { std::env::remove_var("OAUTH_BRIDGE__REDIRECT_STATUS") };

        assert!(matches!(
            result,
            Err(SettingsError::InvalidRedirectStatus(200))
        ));
    }
}
