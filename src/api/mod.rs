//! HTTP API

pub mod routes;
pub mod server;

pub use server::{create_router, run_server, AppState};
