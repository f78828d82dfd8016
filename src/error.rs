//! Error types for Sessiongate

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::TokenFailure;

/// Body returned for every authentication rejection.
pub const SESSION_EXPIRED: &str = "Session expired";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid token: {0}")]
    InvalidToken(TokenFailure),

    #[error("Request is not authenticated")]
    Unauthenticated,

    #[error("Guest login is not enabled")]
    GuestLoginDisabled,

    #[error("Identity context missing from request")]
    MissingIdentityContext,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Config file not found. Run 'sessiongate init' first.")]
    ConfigNotFound,

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::InvalidToken(_) | Error::Unauthenticated => StatusCode::UNAUTHORIZED,
            Error::GuestLoginDisabled => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::UNAUTHORIZED {
            SESSION_EXPIRED.to_string()
        } else {
            if status.is_server_error() {
                tracing::error!(error = %self, "request failed");
            }
            self.to_string()
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
