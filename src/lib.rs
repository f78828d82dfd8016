//! Sessiongate - signed session cookies for axum services
//!
//! Issues signed, time-bound identity tokens, carries them in a signed
//! cookie, and verifies them on every request through a middleware gate.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;

pub use auth::{AuthState, IdentityClaim, RequestIdentity};
pub use config::Config;
pub use error::Error;
