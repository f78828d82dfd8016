//! Session verification gate and identity extractors

use crate::auth::models::{IdentityClaim, RequestIdentity};
use crate::auth::state::AuthState;
use crate::error::{Error, Result};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::SignedCookieJar;

/// Resolve the identity carried by a request's session cookie.
///
/// The jar only yields cookies whose transport signature checked out, so a
/// cookie with a forged outer signature looks the same as no cookie at all.
/// A missing or blank cookie is `Anonymous`; a present but invalid token is an error.
pub fn resolve_identity(auth: &AuthState, jar: &SignedCookieJar) -> Result<RequestIdentity> {
    let cookie = match jar.get(auth.cookies().name()) {
        Some(cookie) if !cookie.value().trim().is_empty() => cookie,
        _ => return Ok(RequestIdentity::Anonymous),
    };

    match auth.signer().verify(cookie.value()) {
        Ok(claim) => Ok(RequestIdentity::Authenticated(claim)),
        Err(Error::InvalidToken(cause)) => {
            tracing::warn!(%cause, "rejected session token");
            Err(Error::InvalidToken(cause))
        }
        Err(e) => Err(e),
    }
}

/// Middleware that verifies the session cookie and records the request identity.
///
/// Invalid or expired tokens end the request with 401 before any handler runs.
pub async fn verify_session(
    State(auth): State<AuthState>,
    jar: SignedCookieJar,
    mut req: Request,
    next: Next,
) -> std::result::Result<Response, Error> {
    let identity = resolve_identity(&auth, &jar)?;
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for RequestIdentity
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestIdentity>()
            .cloned()
            .ok_or(Error::MissingIdentityContext)
    }
}

/// Extractor for handlers that refuse anonymous callers
#[derive(Debug, Clone)]
pub struct Authenticated(pub IdentityClaim);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        match RequestIdentity::from_request_parts(parts, state).await? {
            RequestIdentity::Authenticated(claim) => Ok(Authenticated(claim)),
            RequestIdentity::Anonymous => Err(Error::Unauthenticated),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use axum_extra::extract::cookie::Cookie;
    use chrono::{Duration, Utc};

    fn auth_state() -> AuthState {
        AuthState::from_config(&AuthConfig {
            jwt_secret: "gate-token-secret".to_string(),
            cookie_secret: "gate-cookie-secret".to_string(),
            ..AuthConfig::default()
        })
        .unwrap()
    }

    fn jar_with(auth: &AuthState, value: &str) -> SignedCookieJar {
        SignedCookieJar::new(auth.key().clone())
            .add(Cookie::new(auth.cookies().name().to_string(), value.to_string()))
    }

    #[test]
    fn test_no_cookie_is_anonymous() {
        let auth = auth_state();
        let jar = SignedCookieJar::new(auth.key().clone());
        assert_eq!(
            resolve_identity(&auth, &jar).unwrap(),
            RequestIdentity::Anonymous
        );
    }

    #[test]
    fn test_blank_cookie_is_anonymous() {
        let auth = auth_state();
        for value in ["", "   ", "\t"] {
            let jar = jar_with(&auth, value);
            assert_eq!(
                resolve_identity(&auth, &jar).unwrap(),
                RequestIdentity::Anonymous
            );
        }
    }

    #[test]
    fn test_valid_token_is_authenticated() {
        let auth = auth_state();
        let token = auth
            .signer()
            .issue("u1", "a@x.com", Duration::hours(1))
            .unwrap();
        let jar = jar_with(&auth, &token);

        assert_eq!(
            resolve_identity(&auth, &jar).unwrap(),
            RequestIdentity::Authenticated(IdentityClaim::new("u1", "a@x.com"))
        );
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let auth = auth_state();
        let jar = jar_with(&auth, "garbage");
        assert!(matches!(
            resolve_identity(&auth, &jar),
            Err(Error::InvalidToken(_))
        ));
    }

    #[test]
    fn test_expired_token_is_rejected_not_anonymous() {
        let auth = auth_state();
        let token = auth
            .signer()
            .issue_at(
                "u1",
                "a@x.com",
                Duration::seconds(1),
                Utc::now() - Duration::seconds(2),
            )
            .unwrap();
        let jar = jar_with(&auth, &token);

        assert!(matches!(
            resolve_identity(&auth, &jar),
            Err(Error::InvalidToken(crate::auth::TokenFailure::Expired))
        ));
    }
}
