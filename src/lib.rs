use axum::{
    Router,
    extract::FromRef,
    http::HeaderName,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod models;
pub mod redirect;
pub mod repository;

// Module for routing segregation (Public, gated Notes) and the route registry.
pub mod routes;
use routes::{notes, public, registry::RouteRegistry};

// --- Public Re-exports ---

pub use auth::Identity;
pub use config::AppConfig;
pub use error::{GateError, RepositoryError};
pub use gate::{AccessDecision, NoteLookup, evaluate};
pub use repository::{InMemoryRepository, PostgresRepository, RepositoryState};
pub use routes::registry::{RouteKind, RouteSpec};

/// ApiDoc
///
/// Auto-generated OpenAPI document, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::home, handlers::login, handlers::logout, handlers::signup,
        handlers::list_notes, handlers::add_note, handlers::note_success,
        handlers::note_detail, handlers::edit_note, handlers::delete_note
    ),
    components(
        schemas(
            models::Principal, models::Note, models::Page, models::LoginPage,
            models::NoteForm, models::DeleteConfirmation,
        )
    ),
    tags(
        (name = "notes", description = "Per-user notes")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, thread-safe container of shared services and configuration, cloned into
/// every request.
#[derive(Clone)]
pub struct AppState {
    /// Note and user store.
    pub repo: RepositoryState,
    /// Route name → kind table, built once at startup.
    pub registry: Arc<RouteRegistry>,
    /// The loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// These let handlers and extractors pull single components out of the shared AppState.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the routing structure, applies the global middleware and registers the
/// application state.
///
/// # Errors
/// Returns a `GateError` when a note route is not described by the registry. This is a
/// configuration error and the caller must not start serving.
pub fn create_router(state: AppState) -> Result<Router, GateError> {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public Routes: never gated.
        .merge(public::public_routes())
        // Note Routes: each one carries its own access gate layer.
        .merge(notes::note_routes(&state)?)
        .with_state(state);

    // 3. Observability and Correlation Layers
    let router = base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID Generation: a unique UUID for every incoming request.
                .layer(SetRequestIdLayer::new(
                    x_request_id.clone(),
                    MakeRequestUuid,
                ))
                // 3b. Request Tracing: one span per request, carrying the request ID.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Request ID Propagation: echo x-request-id back to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS Layer
        .layer(cors);

    Ok(router)
}

/// trace_span_logger
///
/// Builds the per-request span with the HTTP method, URI and `x-request-id`, so every
/// log line of a request (including the gate's decision) is correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
