//! CLI command implementations

use anyhow::Result;
use std::path::Path;

use crate::auth::{parse_ttl, AuthState};
use crate::cli::{error, info, print_claims, success};
use crate::config::{self, Config};

/// Initialize a new sessiongate.toml configuration file
pub async fn init() -> Result<()> {
    let path = config::write_default_config(Path::new("."))?;

    success(&format!("Created {}", path.display()));
    info("Set JWT_SECRET and COOKIE_SECRET to two different values, then run 'sessiongate serve'");

    Ok(())
}

/// Start the HTTP API server
pub async fn serve(
    config_path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info(&format!(
        "Starting server at http://{}:{} ({})",
        host, port, config.auth.environment
    ));

    crate::api::run_server(config, &host, port).await?;
    Ok(())
}

/// Issue a token and print it
pub async fn issue(
    config_path: Option<&Path>,
    id: &str,
    email: &str,
    ttl: Option<String>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let auth = AuthState::from_config(&config.auth)?;

    let ttl = match ttl {
        Some(ttl) => parse_ttl(&ttl)?,
        None => auth.token_ttl(),
    };

    let token = auth.signer().issue(id, email, ttl)?;
    println!("{}", token);
    Ok(())
}

/// Verify a token and print its claims
pub async fn verify(config_path: Option<&Path>, token: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let auth = AuthState::from_config(&config.auth)?;

    match auth.signer().decode_claims(token.trim()) {
        Ok(claims) => {
            success("Token is valid");
            print_claims(&claims);
            Ok(())
        }
        Err(cause) => {
            error(&format!("Token rejected: {}", cause));
            anyhow::bail!("invalid token")
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => config::load_config_from_path(path)?,
        None => config::load_config()?,
    };
    Ok(config)
}
