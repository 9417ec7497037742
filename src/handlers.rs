use crate::{
    AppState,
    auth::{Identity, SESSION_COOKIE},
    models::{DeleteConfirmation, LoginPage, Note, NoteForm, Page, Principal},
    redirect::safe_next,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;

/// LoginQuery
///
/// Query parameters of the login page. `next` arrives already form-decoded.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct LoginQuery {
    /// Path to return to after authentication.
    pub next: Option<String>,
}

fn page(name: &str, identity: &Identity) -> Page {
    Page {
        page: name.to_string(),
        username: identity.principal().map(|p| p.username.clone()),
    }
}

// --- Public Handlers ---

/// home
///
/// [Public Route] Landing page.
#[utoipa::path(get, path = "/", responses((status = 200, description = "Home", body = Page)))]
pub async fn home(identity: Identity) -> Json<Page> {
    Json(page("home", &identity))
}

/// login
///
/// [Public Route] Login page. Anonymous callers of note routes land here with `next`
/// set to the page they asked for. Only site-relative targets are echoed back.
#[utoipa::path(
    get,
    path = "/login/",
    params(LoginQuery),
    responses((status = 200, description = "Login page", body = LoginPage))
)]
pub async fn login(Query(query): Query<LoginQuery>) -> Json<LoginPage> {
    let next = query.next.as_deref().and_then(safe_next).map(str::to_owned);
    if query.next.is_some() && next.is_none() {
        tracing::warn!(next = ?query.next, "discarding off-site login return path");
    }
    Json(LoginPage {
        page: "login".to_string(),
        next,
    })
}

/// logout
///
/// [Public Route] Ends the browser session by expiring the session cookie.
#[utoipa::path(get, path = "/logout/", responses((status = 200, description = "Logged out", body = Page)))]
pub async fn logout() -> impl IntoResponse {
    let expired = format!("{SESSION_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax");
    (
        [(header::SET_COOKIE, expired)],
        Json(Page {
            page: "logout".to_string(),
            username: None,
        }),
    )
}

/// signup
///
/// [Public Route] Signup page. Account creation itself is handled by the identity service.
#[utoipa::path(get, path = "/signup/", responses((status = 200, description = "Signup page", body = Page)))]
pub async fn signup(identity: Identity) -> Json<Page> {
    Json(page("signup", &identity))
}

// --- Gated Note Handlers ---
// The access gate has already authenticated the caller and, on owned routes, checked
// that the caller owns the note. The resolved values arrive as extensions.

/// list_notes
///
/// [Ownerless Route] Notes owned by the caller, newest first.
#[utoipa::path(
    get,
    path = "/notes/",
    responses(
        (status = 200, description = "My notes", body = [Note]),
        (status = 302, description = "Redirect to login")
    )
)]
pub async fn list_notes(
    Extension(principal): Extension<Principal>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Note>>, StatusCode> {
    match state.repo.list_notes(principal.id).await {
        Ok(notes) => Ok(Json(notes)),
        Err(e) => {
            tracing::error!("list_notes failed: {:?}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// add_note
///
/// [Ownerless Route] Empty form for a new note.
#[utoipa::path(
    get,
    path = "/add/",
    responses(
        (status = 200, description = "Note form", body = NoteForm),
        (status = 302, description = "Redirect to login")
    )
)]
pub async fn add_note() -> Json<NoteForm> {
    Json(NoteForm::default())
}

/// note_success
///
/// [Ownerless Route] Confirmation page after a note was saved or deleted.
#[utoipa::path(
    get,
    path = "/done/",
    responses(
        (status = 200, description = "Success", body = Page),
        (status = 302, description = "Redirect to login")
    )
)]
pub async fn note_success(Extension(principal): Extension<Principal>) -> Json<Page> {
    Json(Page {
        page: "success".to_string(),
        username: Some(principal.username),
    })
}

/// note_detail
///
/// [Owned Route] A single note.
#[utoipa::path(
    get,
    path = "/notes/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 200, description = "Found", body = Note),
        (status = 302, description = "Redirect to login"),
        (status = 404, description = "Not found or not yours")
    )
)]
pub async fn note_detail(Extension(note): Extension<Note>) -> Json<Note> {
    Json(note)
}

/// edit_note
///
/// [Owned Route] Edit form prefilled with the note.
#[utoipa::path(
    get,
    path = "/edit/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 200, description = "Edit form", body = NoteForm),
        (status = 302, description = "Redirect to login"),
        (status = 404, description = "Not found or not yours")
    )
)]
pub async fn edit_note(Extension(note): Extension<Note>) -> Json<NoteForm> {
    Json(NoteForm {
        title: note.title,
        text: note.text,
        slug: note.slug,
    })
}

/// delete_note
///
/// [Owned Route] Asks the owner to confirm deletion.
#[utoipa::path(
    get,
    path = "/delete/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 200, description = "Delete confirmation", body = DeleteConfirmation),
        (status = 302, description = "Redirect to login"),
        (status = 404, description = "Not found or not yours")
    )
)]
pub async fn delete_note(Extension(note): Extension<Note>) -> Json<DeleteConfirmation> {
    Json(DeleteConfirmation {
        slug: note.slug,
        title: note.title,
    })
}
