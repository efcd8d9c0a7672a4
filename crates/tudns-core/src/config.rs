//! Configuration types for tudns
//!
//! The JSON field names follow the Traefik plugin configuration this daemon
//! replaces (`updateInterval`, `traefikApiUrl`, `insecureSkipVerifyTLS`), so
//! an existing plugin block can be pasted into the config file.

use crate::duration::parse_interval;
use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncConfig {
    /// Managed devices, in declaration order
    #[serde(default)]
    pub devices: Vec<DeviceConfig>,

    /// Interval between passes (e.g., "5m", "1h30m")
    #[serde(default = "default_update_interval")]
    pub update_interval: String,

    /// Base URL of the Traefik API
    #[serde(default = "default_traefik_api_url", rename = "traefikApiUrl")]
    pub traefik_api_url: String,

    /// Skip TLS verification for every device and the Traefik API
    #[serde(default, rename = "insecureSkipVerifyTLS")]
    pub insecure_skip_verify_tls: bool,

    /// Middleware name that opts a router into DNS management
    #[serde(default = "default_marker")]
    pub marker: String,
}

impl SyncConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            update_interval: default_update_interval(),
            traefik_api_url: default_traefik_api_url(),
            insecure_skip_verify_tls: false,
            marker: default_marker(),
        }
    }

    /// Add a device
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.devices.push(device);
        self
    }

    /// Set the update interval
    pub fn with_update_interval(mut self, interval: impl Into<String>) -> Self {
        self.update_interval = interval.into();
        self
    }

    /// Parse the update interval
    pub fn interval(&self) -> Result<Duration> {
        parse_interval(&self.update_interval)
    }

    /// Validate the configuration
    ///
    /// Everything that would otherwise fail at runtime is rejected here:
    /// bad interval, empty or non-compiling patterns, empty hosts and URLs.
    pub fn validate(&self) -> Result<()> {
        self.interval()?;

        if self.traefik_api_url.trim().is_empty() {
            return Err(Error::config("Traefik API URL cannot be empty"));
        }
        if self.marker.is_empty() {
            return Err(Error::config("Marker cannot be empty"));
        }

        for (index, device) in self.devices.iter().enumerate() {
            device.validate(index)?;
        }

        Ok(())
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// How a device session is authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// `X-Csrf-Token` header plus session cookie (UniFi OS)
    #[default]
    Csrf,
    /// `Authorization: Bearer` token from the login body
    Bearer,
}

/// One managed device
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceConfig {
    /// Host or base URL; `https://` is assumed when no scheme is given
    pub host: String,

    /// Login user
    pub username: String,

    /// Login password
    /// ⚠️ NEVER log this value
    pub password: String,

    /// Regex tested against hostnames (unanchored)
    pub pattern: String,

    /// Skip TLS verification for this device only
    #[serde(default, rename = "insecureSkipVerifyTLS")]
    pub insecure_skip_verify_tls: bool,

    /// Session authentication style
    #[serde(default)]
    pub auth_mode: AuthMode,
}

impl DeviceConfig {
    /// Create a new device configuration
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
            pattern: pattern.into(),
            insecure_skip_verify_tls: false,
            auth_mode: AuthMode::default(),
        }
    }

    /// Select the authentication mode
    pub fn with_auth_mode(mut self, auth_mode: AuthMode) -> Self {
        self.auth_mode = auth_mode;
        self
    }

    /// Skip TLS verification for this device
    pub fn with_insecure_tls(mut self, insecure: bool) -> Self {
        self.insecure_skip_verify_tls = insecure;
        self
    }

    /// Compile the device pattern
    ///
    /// # Parameters
    ///
    /// - `index`: Ordinal device id, used in the error
    pub fn compile_pattern(&self, index: usize) -> Result<Regex> {
        if self.pattern.is_empty() {
            return Err(Error::invalid_pattern(index, "device is missing a pattern"));
        }
        Regex::new(&self.pattern).map_err(|e| Error::invalid_pattern(index, e.to_string()))
    }

    /// Validate the device configuration
    pub fn validate(&self, index: usize) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::config(format!("device {} is missing a host", index)));
        }
        self.compile_pattern(index)?;
        Ok(())
    }
}

// Custom Debug implementation that hides the password
impl std::fmt::Debug for DeviceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .field("pattern", &self.pattern)
            .field("insecure_skip_verify_tls", &self.insecure_skip_verify_tls)
            .field("auth_mode", &self.auth_mode)
            .finish()
    }
}

fn default_update_interval() -> String {
    "5m".to_string()
}

fn default_traefik_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_marker() -> String {
    "traefikunifidns".to_string()
}
