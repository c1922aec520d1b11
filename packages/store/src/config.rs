//! # Client configuration — `wastewise.toml`
//!
//! Defines the TOML document the web client is built with (filename:
//! [`WasteWiseConfig::filename`] = `"wastewise.toml"`). It tells the client
//! where the backend lives, how requests authenticate, and a few tunables of
//! the dashboard and the connectivity probe.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000/api"
//! auth_mode = "bearer"              # or "session" (cookie + CSRF)
//!
//! [dashboard]
//! weekly_goal_kg = 20.0
//!
//! [connectivity]
//! probe_interval_secs = 30          # 0 disables the periodic probe
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`WasteWiseConfig`] | Top-level config. Builder helpers, TOML (de)serialisation, canonical filename. |
//! | [`ApiConfig`] | Backend base URL and [`AuthMode`]. |
//! | [`DashboardConfig`] | Weekly waste target used for the goal progress bar. |
//! | [`ConnectivityConfig`] | Interval of the background reachability probe. |
//!
//! Every section defaults, so a missing or empty file is the default
//! configuration.

use serde::{Deserialize, Serialize};

/// Default backend location, the Django dev server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Top-level configuration stored in `wastewise.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WasteWiseConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub connectivity: ConnectivityConfig,
}

/// How requests authenticate against the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// `Authorization: Bearer` with a refreshable access token.
    #[default]
    Bearer,
    /// Browser cookie session with a CSRF header on unsafe methods.
    Session,
}

/// Backend connection settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub auth_mode: AuthMode,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth_mode: AuthMode::default(),
        }
    }
}

/// Dashboard settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Weekly waste target in kilograms.
    #[serde(default = "default_weekly_goal")]
    pub weekly_goal_kg: f64,
}

fn default_weekly_goal() -> f64 {
    20.0
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            weekly_goal_kg: default_weekly_goal(),
        }
    }
}

/// Connectivity probe settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectivityConfig {
    /// Probe interval in seconds. 0 disables the periodic probe.
    #[serde(default = "default_probe_interval")]
    pub probe_interval_secs: u32,
}

fn default_probe_interval() -> u32 {
    30
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            probe_interval_secs: default_probe_interval(),
        }
    }
}

impl WasteWiseConfig {
    /// Builder method to point the client at another backend.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// Builder method to pick the auth strategy.
    pub fn with_auth_mode(mut self, mode: AuthMode) -> Self {
        self.api.auth_mode = mode;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "wastewise.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = WasteWiseConfig::from_toml("").unwrap();
        assert_eq!(config, WasteWiseConfig::default());
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.auth_mode, AuthMode::Bearer);
        assert_eq!(config.dashboard.weekly_goal_kg, 20.0);
        assert_eq!(config.connectivity.probe_interval_secs, 30);
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config = WasteWiseConfig::from_toml(
            r#"
            [api]
            auth_mode = "session"

            [dashboard]
            weekly_goal_kg = 12.5
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.auth_mode, AuthMode::Session);
        assert_eq!(config.dashboard.weekly_goal_kg, 12.5);
        assert_eq!(config.connectivity.probe_interval_secs, 30);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = WasteWiseConfig::default()
            .with_base_url("https://wastewise.example/api")
            .with_auth_mode(AuthMode::Session);
        let text = config.to_toml().unwrap();
        assert!(text.contains("auth_mode = \"session\""));
        assert_eq!(WasteWiseConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_unknown_auth_mode_is_rejected() {
        assert!(WasteWiseConfig::from_toml("[api]\nauth_mode = \"oauth\"").is_err());
    }
}
