//! Process-wide authentication state, built once at startup

use crate::auth::cookie::CookieManager;
use crate::auth::jwt::{parse_ttl, Signer};
use crate::config::AuthConfig;
use crate::error::{Error, Result};
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use chrono::{Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha512};
use std::sync::Arc;

/// Browsers cap cookie lifetimes at 400 days
pub const MAX_COOKIE_DAYS: i64 = 400;

/// Signer, cookie manager and cookie-signing key shared by every request.
#[derive(Clone)]
pub struct AuthState {
    cookies: Arc<CookieManager>,
    key: Key,
    token_ttl: Duration,
}

impl AuthState {
    /// Validate the auth settings and build the shared state.
    ///
    /// Missing secrets, identical token and cookie secrets, or an unparsable
    /// lifetime all fail here so the process never starts half-configured.
    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        let jwt_secret = SecretString::from(config.jwt_secret.clone());
        let cookie_secret = SecretString::from(config.cookie_secret.clone());

        let signer = Signer::new(&jwt_secret)?;
        let key = derive_cookie_key(&cookie_secret)?;

        if jwt_secret.expose_secret() == cookie_secret.expose_secret() {
            return Err(Error::Config(
                "cookie_secret must differ from jwt_secret".to_string(),
            ));
        }

        if config.cookie_name.trim().is_empty() {
            return Err(Error::Config("cookie_name must not be empty".to_string()));
        }

        if config.cookie_days <= 0 || config.cookie_days > MAX_COOKIE_DAYS {
            return Err(Error::Config(format!(
                "cookie_days must be between 1 and {}",
                MAX_COOKIE_DAYS
            )));
        }
        let cookie_lifetime = Duration::days(config.cookie_days);

        let token_ttl = parse_ttl(&config.token_ttl)?;

        let cookies = CookieManager::new(
            signer,
            config.cookie_name.clone(),
            config.environment,
            cookie_lifetime,
        );
        cookies.cookie_expiry(Utc::now())?;

        tracing::info!(
            environment = %config.environment,
            cookie = %config.cookie_name,
            token_ttl = %config.token_ttl,
            cookie_days = config.cookie_days,
            "session authentication configured"
        );

        Ok(Self {
            cookies: Arc::new(cookies),
            key,
            token_ttl,
        })
    }

    pub fn cookies(&self) -> &CookieManager {
        &self.cookies
    }

    pub fn signer(&self) -> &Signer {
        self.cookies.signer()
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Lifetime given to newly issued tokens
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }
}

impl FromRef<AuthState> for Key {
    fn from_ref(state: &AuthState) -> Self {
        state.key.clone()
    }
}

/// Expand the cookie secret into the 64-byte key the signed jar requires
pub fn derive_cookie_key(secret: &SecretString) -> Result<Key> {
    let secret = secret.expose_secret();
    if secret.trim().is_empty() {
        return Err(Error::Config("cookie signing secret is not set".to_string()));
    }

    let digest = Sha512::digest(secret.as_bytes());
    Ok(Key::from(digest.as_slice()))
}
