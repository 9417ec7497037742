use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Core Application Schemas (Mapped to Database) ---

/// Principal
///
/// An authenticated identity capable of owning notes, stored in the `users` table.
/// Created at signup and never mutated by this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Principal {
    pub id: Uuid,
    // Display name.
    pub username: String,
}

/// Note
///
/// A single note from the `notes` table. Every note has exactly one owner and is
/// addressed in URLs by its slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Note {
    pub id: Uuid,
    // Unique, URL-safe and stable. Generated elsewhere.
    pub slug: String,
    pub title: String,
    pub text: String,
    // FK to users.id (Owner).
    pub author_id: Uuid,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

// --- Page Payloads (Output Schemas) ---
// Rendering is handled by the client; each page handler returns the data its page needs.

/// Page
///
/// Minimal payload for pages that carry no data of their own (home, signup, logout, success).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Page {
    pub page: String,
    // Username of the caller, if authenticated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// LoginPage
///
/// Output of the login page. `next` is the validated return path the client should
/// navigate to once authentication succeeds.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LoginPage {
    pub page: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// NoteForm
///
/// Prefilled form for the add and edit pages. For `add` every field is empty.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct NoteForm {
    pub title: String,
    pub text: String,
    pub slug: String,
}

/// DeleteConfirmation
///
/// Output of the delete page: the note the owner is about to remove.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct DeleteConfirmation {
    pub slug: String,
    pub title: String,
}
