//! API route handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::cookie::SignedCookieJar;
use serde_json::json;

use super::server::AppState;
use crate::auth::{Authenticated, IdentityClaim, RequestIdentity, SessionInfo};
use crate::error::{Error, Result};

// Health check

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

// Session routes

/// Start a session as the configured guest identity
pub async fn guest_login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Json<SessionInfo>)> {
    let guest = state.guest.as_ref().ok_or(Error::GuestLoginDisabled)?;
    let identity = IdentityClaim::new(guest.id.clone(), guest.email.clone());

    let jar = state
        .auth
        .cookies()
        .attach_session(jar, &identity, state.auth.token_ttl())?;

    tracing::info!(subject = %identity.subject_id, "guest session started");

    let info = SessionInfo::from(&RequestIdentity::Authenticated(identity));
    Ok((jar, Json(info)))
}

pub async fn logout(State(state): State<AppState>, jar: SignedCookieJar) -> impl IntoResponse {
    (StatusCode::NO_CONTENT, state.auth.cookies().clear_session(jar))
}

/// Describe the caller, anonymous or not
pub async fn session(identity: RequestIdentity) -> Json<SessionInfo> {
    Json(SessionInfo::from(&identity))
}

pub async fn me(Authenticated(claim): Authenticated) -> impl IntoResponse {
    Json(json!({ "id": claim.subject_id, "email": claim.email }))
}
