//! Session cookie lifecycle

use crate::auth::jwt::Signer;
use crate::auth::models::IdentityClaim;
use crate::config::DeploymentMode;
use crate::error::{Error, Result};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use chrono::{DateTime, Duration, Utc};
use time::OffsetDateTime;

/// Installs and clears the signed session cookie on outgoing responses.
///
/// The cookie lifetime is separate from the token lifetime, so a cookie may
/// still be stored after the token inside it has expired.
#[derive(Debug, Clone)]
pub struct CookieManager {
    signer: Signer,
    name: String,
    mode: DeploymentMode,
    lifetime: Duration,
}

impl CookieManager {
    pub fn new(
        signer: Signer,
        name: impl Into<String>,
        mode: DeploymentMode,
        lifetime: Duration,
    ) -> Self {
        Self {
            signer,
            name: name.into(),
            mode,
            lifetime,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    /// Attribute set shared by set and clear; a clear with different attributes leaves the old cookie behind.
    fn base_cookie(&self, value: String) -> Cookie<'static> {
        Cookie::build((self.name.clone(), value))
            .path("/")
            .same_site(SameSite::None)
            .http_only(true)
            .secure(self.mode.is_production())
            .build()
    }

    /// Cookie used to clear a previously issued session
    pub fn removal_cookie(&self) -> Cookie<'static> {
        self.base_cookie(String::new())
    }

    /// Absolute cookie expiry for a cookie issued at `now`
    pub fn cookie_expiry(&self, now: DateTime<Utc>) -> Result<OffsetDateTime> {
        now.checked_add_signed(self.lifetime)
            .and_then(|expires| OffsetDateTime::from_unix_timestamp(expires.timestamp()).ok())
            .ok_or_else(|| Error::Config("Cookie expiry is out of range".to_string()))
    }

    /// Session cookie carrying `token`, expiring `lifetime` after `now`
    pub fn session_cookie(&self, token: String, now: DateTime<Utc>) -> Result<Cookie<'static>> {
        let expires = self.cookie_expiry(now)?;

        let mut cookie = self.base_cookie(token);
        cookie.set_expires(expires);
        Ok(cookie)
    }

    /// Replace any existing session cookie with a fresh one for `identity`
    pub fn attach_session(
        &self,
        jar: SignedCookieJar,
        identity: &IdentityClaim,
        ttl: Duration,
    ) -> Result<SignedCookieJar> {
        self.attach_session_at(jar, identity, ttl, Utc::now())
    }

    pub fn attach_session_at(
        &self,
        jar: SignedCookieJar,
        identity: &IdentityClaim,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<SignedCookieJar> {
        let jar = jar.remove(self.removal_cookie());
        let token = self
            .signer
            .issue_at(&identity.subject_id, &identity.email, ttl, now)?;
        let cookie = self.session_cookie(token, now)?;

        tracing::debug!(subject = %identity.subject_id, "session cookie issued");
        Ok(jar.add(cookie))
    }

    /// Remove the session cookie
    pub fn clear_session(&self, jar: SignedCookieJar) -> SignedCookieJar {
        jar.remove(self.removal_cookie())
    }
}
