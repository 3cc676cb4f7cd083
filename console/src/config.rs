//! Console configuration loaded via OrthoConfig.
//!
//! Settings come from `ADMIN_CONSOLE_*` environment variables and config
//! files. [`ConsoleSettings::resolve`] validates them into a
//! [`ConsoleConfig`] the binary wires adapters from.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::{Locale, UnknownLocale, UserId, UserRole, Viewer};

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Raw configuration values.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ADMIN_CONSOLE")]
pub struct ConsoleSettings {
    /// Base URL of the hosted backend, e.g. `https://project.example.com`.
    pub gateway_url: Option<String>,
    /// Project API key sent with every request.
    pub api_key: Option<String>,
    /// Operator session token; the API key is used when absent.
    pub access_token: Option<String>,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Id of the signed-in operator.
    pub viewer_id: Option<String>,
    /// Role of the signed-in operator (`user`, `moderator`, `admin`).
    pub viewer_role: Option<String>,
    /// Console language (`ru` or `en`).
    pub locale: Option<String>,
}

/// Validation failures for [`ConsoleSettings`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("gateway_url is required")]
    MissingGatewayUrl,
    #[error("gateway_url is invalid: {reason}")]
    InvalidGatewayUrl { reason: String },
    #[error("api_key is required")]
    MissingApiKey,
    #[error("request_timeout_secs must be at least 1")]
    ZeroTimeout,
    #[error("viewer is invalid: {reason}")]
    InvalidViewer { reason: String },
    #[error(transparent)]
    Locale(#[from] UnknownLocale),
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    pub gateway_url: Url,
    pub api_key: String,
    pub access_token: Option<String>,
    pub request_timeout: Duration,
    /// Signed-in operator; `None` when no identity is configured.
    pub viewer: Option<Viewer>,
    pub locale: Locale,
}

impl ConsoleSettings {
    /// Return the configured timeout, falling back to the default.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Validate the raw settings.
    pub fn resolve(&self) -> Result<ConsoleConfig, ConfigError> {
        let gateway_url = non_blank(self.gateway_url.as_deref())
            .ok_or(ConfigError::MissingGatewayUrl)
            .and_then(|raw| {
                Url::parse(raw).map_err(|err| ConfigError::InvalidGatewayUrl {
                    reason: err.to_string(),
                })
            })?;
        let api_key = non_blank(self.api_key.as_deref())
            .ok_or(ConfigError::MissingApiKey)?
            .to_owned();
        let request_timeout = self.request_timeout();
        if request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        let locale = match non_blank(self.locale.as_deref()) {
            Some(raw) => raw.parse::<Locale>()?,
            None => Locale::default(),
        };

        Ok(ConsoleConfig {
            gateway_url,
            api_key,
            access_token: non_blank(self.access_token.as_deref()).map(str::to_owned),
            request_timeout,
            viewer: self.viewer()?,
            locale,
        })
    }

    fn viewer(&self) -> Result<Option<Viewer>, ConfigError> {
        let id = non_blank(self.viewer_id.as_deref());
        let role = non_blank(self.viewer_role.as_deref());
        let (id, role) = match (id, role) {
            (None, None) => return Ok(None),
            (Some(id), Some(role)) => (id, role),
            _ => {
                return Err(ConfigError::InvalidViewer {
                    reason: "viewer_id and viewer_role must be set together".to_owned(),
                });
            }
        };
        let invalid = |err: crate::domain::UserValidationError| ConfigError::InvalidViewer {
            reason: err.to_string(),
        };
        let id = UserId::new(id).map_err(invalid)?;
        let role: UserRole = role.parse().map_err(invalid)?;
        Ok(Some(Viewer::new(id, role)))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    //! Unit tests for console configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "ADMIN_CONSOLE_GATEWAY_URL",
        "ADMIN_CONSOLE_API_KEY",
        "ADMIN_CONSOLE_ACCESS_TOKEN",
        "ADMIN_CONSOLE_REQUEST_TIMEOUT_SECS",
        "ADMIN_CONSOLE_VIEWER_ID",
        "ADMIN_CONSOLE_VIEWER_ROLE",
        "ADMIN_CONSOLE_LOCALE",
    ];

    fn load_from_empty_args() -> ConsoleSettings {
        ConsoleSettings::load_from_iter([OsString::from("admin-console")])
            .expect("config should load")
    }

    fn env(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    #[rstest]
    fn missing_values_fall_back_to_defaults() {
        let _guard = lock_env(env(&[]));

        let settings = load_from_empty_args();
        assert!(settings.gateway_url.is_none());
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.resolve(), Err(ConfigError::MissingGatewayUrl));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(env(&[
            ("ADMIN_CONSOLE_GATEWAY_URL", "https://project.example.com"),
            ("ADMIN_CONSOLE_API_KEY", "anon-key"),
            ("ADMIN_CONSOLE_REQUEST_TIMEOUT_SECS", "5"),
            ("ADMIN_CONSOLE_VIEWER_ID", "3fa85f64-5717-4562-b3fc-2c963f66afa6"),
            ("ADMIN_CONSOLE_VIEWER_ROLE", "admin"),
            ("ADMIN_CONSOLE_LOCALE", "en"),
        ]));

        let config = load_from_empty_args().resolve().expect("valid config");
        assert_eq!(config.gateway_url.as_str(), "https://project.example.com/");
        assert_eq!(config.api_key, "anon-key");
        assert_eq!(config.access_token, None);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.locale, Locale::En);
        let viewer = config.viewer.expect("viewer configured");
        assert_eq!(viewer.role(), UserRole::Admin);
    }

    fn settings() -> ConsoleSettings {
        ConsoleSettings {
            gateway_url: Some("https://project.example.com".to_owned()),
            api_key: Some("anon-key".to_owned()),
            access_token: None,
            request_timeout_secs: None,
            viewer_id: None,
            viewer_role: None,
            locale: None,
        }
    }

    #[rstest]
    #[case::blank_key(ConsoleSettings { api_key: Some("  ".to_owned()), ..settings() }, "api_key is required")]
    #[case::bad_url(ConsoleSettings { gateway_url: Some("not a url".to_owned()), ..settings() }, "gateway_url is invalid")]
    #[case::zero_timeout(ConsoleSettings { request_timeout_secs: Some(0), ..settings() }, "request_timeout_secs")]
    #[case::half_viewer(ConsoleSettings { viewer_role: Some("admin".to_owned()), ..settings() }, "set together")]
    #[case::bad_role(ConsoleSettings {
        viewer_id: Some("3fa85f64-5717-4562-b3fc-2c963f66afa6".to_owned()),
        viewer_role: Some("owner".to_owned()),
        ..settings()
    }, "unknown role")]
    #[case::bad_locale(ConsoleSettings { locale: Some("de".to_owned()), ..settings() }, "unsupported locale")]
    fn invalid_settings_are_reported(#[case] settings: ConsoleSettings, #[case] fragment: &str) {
        let err = settings.resolve().expect_err("settings should be rejected");
        assert!(
            err.to_string().contains(fragment),
            "'{err}' should mention '{fragment}'"
        );
    }

    #[rstest]
    fn defaults_apply_without_viewer_or_locale() {
        let config = settings().resolve().expect("valid config");
        assert_eq!(config.viewer, None);
        assert_eq!(config.locale, Locale::Ru);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}
