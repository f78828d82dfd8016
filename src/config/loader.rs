//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;

pub const CONFIG_FILENAME: &str = "sessiongate.toml";

/// Load configuration from sessiongate.toml
pub fn load_config() -> Result<Config> {
    let config_path = find_config_file()?;
    load_config_from_path(&config_path)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound)?;
    parse_config(&content)
}

/// Parse configuration text, expanding environment references first
pub fn parse_config(content: &str) -> Result<Config> {
    let content = interpolate_env_vars(content);
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Write the default configuration file into `dir`
pub fn write_default_config(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILENAME);
    if path.exists() {
        return Err(Error::Config(format!("{} already exists", path.display())));
    }
    fs::write(&path, default_config_content())?;
    Ok(path)
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Result<PathBuf> {
    let mut current = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(Error::ConfigNotFound);
        }
    }
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // Compile-time constant pattern; a failure here is a bug in the codebase
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# Sessiongate Configuration

[server]
host = "0.0.0.0"
port = 5000
# cors_origin = "http://localhost:3000"

[auth]
environment = "${APP_ENV:-development}"  # or "production" for Secure cookies
jwt_secret = "${JWT_SECRET}"
cookie_secret = "${COOKIE_SECRET}"
cookie_name = "auth_token"
token_ttl = "7d"
cookie_days = 7

# [guest]
# id = "guest"
# email = "guest@example.com"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeploymentMode;

    #[test]
    fn test_interpolate_with_default() {
        temp_env::with_var_unset("SESSIONGATE_TEST_UNSET", || {
            let out = interpolate_env_vars("value = \"${SESSIONGATE_TEST_UNSET:-fallback}\"");
            assert_eq!(out, "value = \"fallback\"");
        });
    }

    #[test]
    fn test_interpolate_from_env() {
        temp_env::with_var("SESSIONGATE_TEST_SET", Some("from-env"), || {
            let out = interpolate_env_vars("value = \"${SESSIONGATE_TEST_SET:-fallback}\"");
            assert_eq!(out, "value = \"from-env\"");
        });
    }

    #[test]
    fn test_default_config_parses() {
        temp_env::with_vars(
            [
                ("APP_ENV", Some("production")),
                ("JWT_SECRET", Some("token-secret")),
                ("COOKIE_SECRET", Some("cookie-secret")),
            ],
            || {
                let config = parse_config(default_config_content()).unwrap();
                assert_eq!(config.auth.environment, DeploymentMode::Production);
                assert_eq!(config.auth.jwt_secret, "token-secret");
                assert_eq!(config.auth.cookie_secret, "cookie-secret");
                assert!(config.guest.is_none());
            },
        );
    }

    #[test]
    fn test_write_default_config_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_default_config(dir.path()).unwrap();
        assert!(path.exists());
        assert!(write_default_config(dir.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_from_path(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(Error::ConfigNotFound)));
    }
}
