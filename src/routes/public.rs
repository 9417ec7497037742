use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Endpoints reachable by any caller, anonymous or logged in. They are never gated and
/// never depend on note ownership. Identity is still resolved where a page shows who is
/// signed in.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Monitoring and load balancer check.
        .route("/health", get(|| async { "ok" }))
        // GET /
        .route("/", get(handlers::home))
        // GET /login/?next=...
        // Where anonymous callers of note routes are sent. Echoes the validated return path.
        .route("/login/", get(handlers::login))
        // GET /logout/
        // Expires the session cookie.
        .route("/logout/", get(handlers::logout))
        // GET /signup/
        .route("/signup/", get(handlers::signup))
}
