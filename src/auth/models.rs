//! Authentication models

use serde::{Deserialize, Serialize};

/// Who is making a request. Immutable once issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaim {
    /// Opaque subject identifier
    pub subject_id: String,
    pub email: String,
}

impl IdentityClaim {
    pub fn new(subject_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            email: email.into(),
        }
    }
}

/// Identity context attached to every request that passed the verification gate.
///
/// A request with no session cookie is `Anonymous`; handlers decide explicitly
/// whether that is acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestIdentity {
    Authenticated(IdentityClaim),
    Anonymous,
}

impl RequestIdentity {
    pub fn claim(&self) -> Option<&IdentityClaim> {
        match self {
            RequestIdentity::Authenticated(claim) => Some(claim),
            RequestIdentity::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, RequestIdentity::Authenticated(_))
    }
}

/// Session description returned to clients
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionInfo {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<&RequestIdentity> for SessionInfo {
    fn from(identity: &RequestIdentity) -> Self {
        let claim = identity.claim();
        Self {
            authenticated: identity.is_authenticated(),
            id: claim.map(|c| c.subject_id.clone()),
            email: claim.map(|c| c.email.clone()),
        }
    }
}
