//! Session authentication: token signing, cookie lifecycle and the request gate

pub mod cookie;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod state;

pub use cookie::CookieManager;
pub use jwt::{parse_ttl, Claims, Signer, TokenFailure};
pub use middleware::{resolve_identity, verify_session, Authenticated};
pub use models::{IdentityClaim, RequestIdentity, SessionInfo};
pub use state::{derive_cookie_key, AuthState};
