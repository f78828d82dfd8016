//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub guest: Option<GuestConfig>,
}

/// Server configuration for the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Browser origin allowed to send credentialed requests
    #[serde(default)]
    pub cors_origin: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: None,
        }
    }
}

/// Where the service is running. Production turns on the `Secure` cookie attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    #[default]
    Development,
    Production,
}

impl DeploymentMode {
    pub fn is_production(self) -> bool {
        self == DeploymentMode::Production
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentMode::Development => write!(f, "development"),
            DeploymentMode::Production => write!(f, "production"),
        }
    }
}

/// Session authentication settings
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub environment: DeploymentMode,

    /// Secret used to sign session tokens
    #[serde(default)]
    pub jwt_secret: String,

    /// Secret used to sign the session cookie itself. Must differ from `jwt_secret`.
    #[serde(default)]
    pub cookie_secret: String,

    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Token lifetime, e.g. "1h" or "7d"
    #[serde(default = "default_token_ttl")]
    pub token_ttl: String,

    /// Cookie lifetime in days, independent of `token_ttl`
    #[serde(default = "default_cookie_days")]
    pub cookie_days: i64,
}

fn default_cookie_name() -> String {
    "auth_token".to_string()
}

fn default_token_ttl() -> String {
    "7d".to_string()
}

fn default_cookie_days() -> i64 {
    7
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            environment: DeploymentMode::default(),
            jwt_secret: String::new(),
            cookie_secret: String::new(),
            cookie_name: default_cookie_name(),
            token_ttl: default_token_ttl(),
            cookie_days: default_cookie_days(),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("environment", &self.environment)
            .field("jwt_secret", &"[REDACTED]")
            .field("cookie_secret", &"[REDACTED]")
            .field("cookie_name", &self.cookie_name)
            .field("token_ttl", &self.token_ttl)
            .field("cookie_days", &self.cookie_days)
            .finish()
    }
}

/// Shared demo identity handed out by the guest login endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestConfig {
    pub id: String,
    pub email: String,
}
