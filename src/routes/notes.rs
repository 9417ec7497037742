use crate::{
    AppConfig, AppState,
    auth::Identity,
    error::GateError,
    gate::{NoteLookup, evaluate},
    handlers,
    models::Note,
    repository::RepositoryState,
    routes::registry::RouteKind,
};
use axum::{
    Router,
    extract::{FromRef, FromRequestParts, OriginalUri, Path, Request, State},
    http::{StatusCode, request::Parts},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{MethodRouter, get},
};

/// Note Router Module
///
/// Defines the note routes. Every one of them sits behind `access_gate`, so a handler only
/// ever runs for an authenticated caller and, on owned routes, only for the note's owner.
/// The gate hands the handler what it resolved through request extensions: the caller's
/// `Principal` always, and the target `Note` on owned routes.
///
/// Route paths and kinds come from the `RouteRegistry` in the application state. A handler
/// registered under a name the registry does not know aborts router assembly.
pub fn note_routes(state: &AppState) -> Result<Router<AppState>, GateError> {
    let pages: [(&str, MethodRouter<AppState>); 6] = [
        // GET /notes/  Notes owned by the caller.
        ("list", get(handlers::list_notes)),
        // GET /add/  Empty note form.
        ("add", get(handlers::add_note)),
        // GET /done/  Shown after a successful add, edit or delete.
        ("success", get(handlers::note_success)),
        // GET /notes/{slug}/
        ("detail", get(handlers::note_detail)),
        // GET /edit/{slug}/  Form prefilled with the note.
        ("edit", get(handlers::edit_note)),
        // GET /delete/{slug}/  Delete confirmation.
        ("delete", get(handlers::delete_note)),
    ];

    let mut router = Router::new();
    for (name, page) in pages {
        let spec = state.registry.spec(name)?;
        let context = GateContext {
            repo: state.repo.clone(),
            config: state.config.clone(),
            route: spec.name,
            kind: spec.kind,
        };
        router = router.route(
            spec.path,
            page.route_layer(middleware::from_fn_with_state(context, access_gate)),
        );
    }
    Ok(router)
}

/// GateContext
///
/// Per-route state of the gate middleware: the shared services plus the route's
/// registered name and kind.
#[derive(Clone)]
pub struct GateContext {
    pub repo: RepositoryState,
    pub config: AppConfig,
    pub route: &'static str,
    pub kind: RouteKind,
}

impl FromRef<GateContext> for RepositoryState {
    fn from_ref(context: &GateContext) -> RepositoryState {
        context.repo.clone()
    }
}

impl FromRef<GateContext> for AppConfig {
    fn from_ref(context: &GateContext) -> AppConfig {
        context.config.clone()
    }
}

/// access_gate
///
/// Enforces the access decision for one note route.
///
/// The note is only looked up for authenticated callers on owned routes: anonymous callers
/// are redirected before the store is consulted, so their response never depends on
/// whether the slug exists. A store failure is answered with 500 and is not a decision.
pub async fn access_gate(
    State(context): State<GateContext>,
    OriginalUri(uri): OriginalUri,
    identity: Identity,
    request: Request,
    next: Next,
) -> Response {
    let current_path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_owned())
        .unwrap_or_else(|| uri.path().to_owned());

    let (mut parts, body) = request.into_parts();

    let note = if context.kind == RouteKind::Owned && !identity.is_anonymous() {
        match resolve_note(&mut parts, &context).await {
            Ok(note) => note,
            Err(status) => return status.into_response(),
        }
    } else {
        None
    };

    let lookup = match context.kind {
        RouteKind::Ownerless => NoteLookup::NotApplicable,
        RouteKind::Owned => NoteLookup::from(note.as_ref()),
    };

    let decision = evaluate(&identity, context.kind, lookup, &current_path);
    tracing::debug!(
        route = context.route,
        path = %current_path,
        principal = ?identity.principal_id(),
        decision = ?decision,
        "access decision"
    );

    if let Some(denial) = decision.into_denial(&context.config.login_path) {
        return denial;
    }

    let mut request = Request::from_parts(parts, body);
    if let Identity::Authenticated(principal) = identity {
        request.extensions_mut().insert(principal);
    }
    if let Some(note) = note {
        request.extensions_mut().insert::<Note>(note);
    }
    next.run(request).await
}

/// Reads the slug path parameter and resolves it in the store.
async fn resolve_note(parts: &mut Parts, context: &GateContext) -> Result<Option<Note>, StatusCode> {
    let slug = match Path::<String>::from_request_parts(parts, context).await {
        Ok(Path(slug)) => slug,
        Err(e) => {
            tracing::warn!(route = context.route, "slug parameter unreadable: {}", e);
            return Ok(None);
        }
    };

    context.repo.find_note_by_slug(&slug).await.map_err(|e| {
        tracing::error!(route = context.route, %slug, "note lookup failed: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
