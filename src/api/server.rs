//! HTTP API server

use axum::{
    extract::FromRef,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::Key;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{verify_session, AuthState};
use crate::config::{Config, GuestConfig};
use crate::error::{Error, Result};

use super::routes;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub guest: Option<GuestConfig>,
}

impl AppState {
    /// Build state from configuration, failing fast on bad auth settings
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            auth: AuthState::from_config(&config.auth)?,
            guest: config.guest.clone(),
        })
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.auth.key().clone()
    }
}

/// Run the HTTP API server
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let state = AppState::from_config(&config)?;
    let app = create_router(state, config.server.cors_origin.as_deref())?;

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: AppState, cors_origin: Option<&str>) -> Result<Router> {
    let gated = Router::new()
        .route("/api/session", get(routes::session))
        .route("/api/me", get(routes::me))
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            verify_session,
        ));

    let router = Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/session/guest", post(routes::guest_login))
        .route("/api/session/logout", post(routes::logout))
        .merge(gated)
        .layer(TraceLayer::new_for_http());

    let router = match cors_origin {
        Some(origin) => router.layer(cors_layer(origin)?),
        None => router,
    };

    Ok(router.with_state(state))
}

/// Credentialed CORS for a single browser origin
fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let origin = HeaderValue::from_str(origin)
        .map_err(|e| Error::Config(format!("Invalid cors_origin '{}': {}", origin, e)))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]))
}
