//! The access decision for note routes.
//!
//! `evaluate` is a pure function of the caller, the route kind, the note lookup and the
//! requested path. It holds no state, so it may run concurrently for any number of
//! requests and always returns the same decision for the same inputs.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    auth::Identity,
    models::Note,
    redirect::login_redirect_url,
    routes::registry::RouteKind,
};

/// Outcome of resolving the slug of the requested route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteLookup<'a> {
    /// Ownerless route: there is no slug to resolve.
    NotApplicable,
    Found(&'a Note),
    /// No note has the requested slug.
    Missing,
}

impl<'a> From<Option<&'a Note>> for NoteLookup<'a> {
    fn from(note: Option<&'a Note>) -> Self {
        match note {
            Some(note) => NoteLookup::Found(note),
            None => NoteLookup::Missing,
        }
    }
}

/// AccessDecision
///
/// What the router must do with the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AccessDecision {
    /// Hand the request to the page handler (200).
    Allow,
    /// Send the caller to the login page; `next` is the exact requested path.
    RedirectToLogin { next: String },
    /// Answer 404. Used both for missing notes and for notes owned by someone else.
    NotFound,
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }

    /// Status code the decision maps to when it ends the request.
    pub fn status(&self) -> StatusCode {
        match self {
            AccessDecision::Allow => StatusCode::OK,
            AccessDecision::RedirectToLogin { .. } => StatusCode::FOUND,
            AccessDecision::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Turns a non-allow decision into its response. `Allow` has no response of its own;
    /// the caller runs the handler instead, so it maps to `None`.
    pub fn into_denial(self, login_path: &str) -> Option<Response> {
        match self {
            AccessDecision::Allow => None,
            AccessDecision::RedirectToLogin { next } => Some(
                (
                    StatusCode::FOUND,
                    [(header::LOCATION, login_redirect_url(login_path, &next))],
                )
                    .into_response(),
            ),
            AccessDecision::NotFound => Some(StatusCode::NOT_FOUND.into_response()),
        }
    }
}

/// Decides whether `identity` may reach a route of `kind`.
///
/// Order matters:
/// 1. Anonymous callers are always redirected to login, whether or not the note exists.
/// 2. Any authenticated caller may reach an ownerless route.
/// 3. An owned route whose slug resolves to nothing is not found.
/// 4. An owned route is allowed only to the note's owner; everyone else gets not found,
///    never a forbidden, so other users' notes are indistinguishable from missing ones.
pub fn evaluate(
    identity: &Identity,
    kind: RouteKind,
    lookup: NoteLookup<'_>,
    current_path: &str,
) -> AccessDecision {
    let principal = match identity {
        Identity::Anonymous => {
            return AccessDecision::RedirectToLogin {
                next: current_path.to_string(),
            };
        }
        Identity::Authenticated(principal) => principal,
    };

    match (kind, lookup) {
        (RouteKind::Ownerless, _) => AccessDecision::Allow,
        (RouteKind::Owned, NoteLookup::Found(note)) if note.author_id == principal.id => {
            AccessDecision::Allow
        }
        (RouteKind::Owned, _) => AccessDecision::NotFound,
    }
}
