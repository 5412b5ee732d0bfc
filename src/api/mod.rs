//! Companion auth API.
//!
//! A small axum service that lets users prove ownership of their chat
//! account: the bot DMs them a one-time code, the code is exchanged for a
//! signed session token carried in an HTTP-only cookie, and two profile
//! endpoints answer "who am I" and "which servers do we share".

/// One-time verification code store
pub mod codes;
/// HTTP error responses
pub mod error;
/// Authenticated-user extractor
pub mod extract;
/// Route handlers
pub mod handlers;
/// Shared HTTP server state
pub mod state;
/// Session token signing and verification
pub mod token;

use crate::errors::Result;
use axum::{
    Router,
    routing::{get, post},
};
use state::ApiState;
use tracing::info;

/// Builds the versioned API router.
#[must_use]
pub fn router(state: ApiState) -> Router {
    let v1 = Router::new()
        .route("/generate-code", post(handlers::generate_code))
        .route("/verify-code", post(handlers::verify_code))
        .route("/auth/verify", get(handlers::auth_verify))
        .route("/auth/logout", post(handlers::logout))
        .route("/me/info", get(handlers::me_info))
        .route("/me/servers", get(handlers::me_servers));

    Router::new().nest("/api/v1", v1).with_state(state)
}

/// Binds and runs the auth API until the process exits.
pub async fn serve(bind_addr: &str, state: ApiState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Auth API listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
