//! Session token signing and verification

use crate::auth::models::IdentityClaim;
use crate::error::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest lifetime accepted for a session token
pub const MAX_TOKEN_TTL_DAYS: i64 = 365;

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject identifier
    pub id: String,
    pub email: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

impl Claims {
    pub fn identity(&self) -> IdentityClaim {
        IdentityClaim::new(self.id.clone(), self.email.clone())
    }
}

/// Why a presented token was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenFailure {
    Expired,
    BadSignature,
    Malformed(String),
}

impl fmt::Display for TokenFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenFailure::Expired => write!(f, "token expired"),
            TokenFailure::BadSignature => write!(f, "signature mismatch"),
            TokenFailure::Malformed(reason) => write!(f, "malformed token: {}", reason),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenFailure {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenFailure::Expired,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenFailure::BadSignature,
            _ => TokenFailure::Malformed(err.to_string()),
        }
    }
}

/// Issues and verifies HS256 session tokens with a process-wide secret.
#[derive(Clone)]
pub struct Signer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl Signer {
    /// Build a signer. An empty secret is a configuration error, caught at startup.
    pub fn new(secret: &SecretString) -> Result<Self> {
        let secret = secret.expose_secret();
        if secret.trim().is_empty() {
            return Err(Error::Config("token signing secret is not set".to_string()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Issue a token for `subject_id`/`email` expiring `ttl` from now
    pub fn issue(&self, subject_id: &str, email: &str, ttl: Duration) -> Result<String> {
        self.issue_at(subject_id, email, ttl, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(
        &self,
        subject_id: &str,
        email: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let expires = now
            .checked_add_signed(ttl)
            .ok_or_else(|| Error::Config(format!("Token lifetime {} is out of range", ttl)))?;

        let claims = Claims {
            id: subject_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| Error::Other(format!("Failed to create token: {}", e)))
    }

    /// Validate signature and expiry, returning the full claim set
    pub fn decode_claims(&self, token: &str) -> std::result::Result<Claims, TokenFailure> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenFailure::from)
    }

    /// Validate a token and return the identity it carries
    pub fn verify(&self, token: &str) -> Result<IdentityClaim> {
        self.decode_claims(token)
            .map(|claims| claims.identity())
            .map_err(Error::InvalidToken)
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}

/// Parse a lifetime such as "30s", "15m", "1h", "7d", "2w" or a bare number of seconds.
pub fn parse_ttl(input: &str) -> Result<Duration> {
    let input = input.trim();
    let split = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (digits, unit) = input.split_at(split);

    let amount: i64 = digits
        .parse()
        .map_err(|_| Error::Config(format!("Invalid token lifetime '{}'", input)))?;

    let multiplier = match unit.trim() {
        "" | "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        "w" => 7 * 24 * 60 * 60,
        other => {
            return Err(Error::Config(format!(
                "Unknown unit '{}' in token lifetime '{}'",
                other, input
            )))
        }
    };

    if amount == 0 {
        return Err(Error::Config("Token lifetime must be positive".to_string()));
    }

    amount
        .checked_mul(multiplier)
        .and_then(Duration::try_seconds)
        .filter(|ttl| *ttl <= Duration::days(MAX_TOKEN_TTL_DAYS))
        .ok_or_else(|| {
            Error::Config(format!(
                "Token lifetime '{}' exceeds {} days",
                input, MAX_TOKEN_TTL_DAYS
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer(secret: &str) -> Signer {
        Signer::new(&SecretString::from(secret.to_string())).expect("Failed to build signer")
    }

    #[test]
    fn test_issue_and_verify() {
        let signer = signer("test-secret");
        let token = signer
            .issue("u1", "a@x.com", Duration::hours(1))
            .expect("Failed to create token");
        let identity = signer.verify(&token).expect("Failed to validate token");

        assert_eq!(identity, IdentityClaim::new("u1", "a@x.com"));
    }

    #[test]
    fn test_claims_carry_expiry() {
        let signer = signer("test-secret");
        let now = Utc::now();
        let token = signer
            .issue_at("u1", "a@x.com", Duration::minutes(15), now)
            .unwrap();
        let claims = signer.decode_claims(&token).unwrap();

        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, now.timestamp() + 15 * 60);
    }

    #[test]
    fn test_expiry_boundary_has_no_leeway() {
        let signer = signer("test-secret");
        let now = Utc::now();

        // exp one second after now: accepted
        let fresh = signer
            .issue_at("u1", "a@x.com", Duration::seconds(2), now - Duration::seconds(1))
            .unwrap();
        assert!(signer.verify(&fresh).is_ok());

        // exp one second before now: rejected
        let stale = signer
            .issue_at("u1", "a@x.com", Duration::seconds(1), now - Duration::seconds(2))
            .unwrap();
        assert_eq!(signer.decode_claims(&stale), Err(TokenFailure::Expired));
    }

    #[test]
    fn test_issue_with_unrepresentable_expiry_fails() {
        let result = signer("test-secret").issue("u1", "a@x.com", Duration::weeks(100_000_000));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_expired_token() {
        let signer = signer("test-secret");
        let issued = Utc::now() - Duration::seconds(2);
        let token = signer
            .issue_at("u1", "a@x.com", Duration::seconds(1), issued)
            .unwrap();

        assert_eq!(signer.decode_claims(&token), Err(TokenFailure::Expired));
    }

    #[test]
    fn test_secret_mismatch() {
        let token = signer("secret-a")
            .issue("u1", "a@x.com", Duration::hours(1))
            .unwrap();

        assert_eq!(
            signer("secret-b").decode_claims(&token),
            Err(TokenFailure::BadSignature)
        );
    }

    #[test]
    fn test_malformed_token() {
        let result = signer("test-secret").decode_claims("not-a-jwt-token");
        assert!(matches!(result, Err(TokenFailure::Malformed(_))));
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            Signer::new(&SecretString::from("   ".to_string())),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_debug_hides_keys() {
        let debug = format!("{:?}", signer("visible-secret"));
        assert!(!debug.contains("visible-secret"));
    }

    #[test]
    fn test_parse_ttl() {
        assert_eq!(parse_ttl("1s").unwrap(), Duration::seconds(1));
        assert_eq!(parse_ttl("15m").unwrap(), Duration::minutes(15));
        assert_eq!(parse_ttl("1h").unwrap(), Duration::hours(1));
        assert_eq!(parse_ttl("7d").unwrap(), Duration::days(7));
        assert_eq!(parse_ttl("2w").unwrap(), Duration::weeks(2));
        assert_eq!(parse_ttl("3600").unwrap(), Duration::hours(1));
    }

    #[test]
    fn test_parse_ttl_rejects_garbage() {
        assert!(parse_ttl("").is_err());
        assert!(parse_ttl("0s").is_err());
        assert!(parse_ttl("5y").is_err());
        assert!(parse_ttl("h").is_err());
        assert!(parse_ttl("-1h").is_err());
    }

    #[test]
    fn test_parse_ttl_caps_lifetime() {
        assert_eq!(parse_ttl("365d").unwrap(), Duration::days(365));
        assert!(parse_ttl("366d").is_err());
        assert!(parse_ttl("100000000w").is_err());
    }
}
