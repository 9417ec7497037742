use crate::error::RepositoryError;
use crate::models::{Note, Principal};
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Repository Trait
///
/// The read contract the access gate and page handlers need from the note store.
/// Writing notes and users belongs to other services; the gate only ever resolves.
///
/// **Send + Sync + async_trait** are required to share the trait object
/// (`Arc<dyn Repository>`) across Axum's asynchronous task boundaries.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Resolves a principal by id. `Ok(None)` means the user does not exist (anymore).
    async fn get_user(&self, id: Uuid) -> Result<Option<Principal>, RepositoryError>;

    /// Resolves a note by its slug. A note deleted concurrently simply yields `Ok(None)`.
    async fn find_note_by_slug(&self, slug: &str) -> Result<Option<Note>, RepositoryError>;

    /// Lists the notes owned by `author_id`, newest first.
    async fn list_notes(&self, author_id: Uuid) -> Result<Vec<Note>, RepositoryError>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// `Repository` backed by PostgreSQL (`users` and `notes` tables, see `migrations/`).
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<Principal>, RepositoryError> {
        sqlx::query_as::<_, Principal>("SELECT id, username FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("get_user error: {:?}", e);
                RepositoryError::from(e)
            })
    }

    async fn find_note_by_slug(&self, slug: &str) -> Result<Option<Note>, RepositoryError> {
        sqlx::query_as::<_, Note>(
            r#"SELECT id, slug, title, text, author_id, created_at
               FROM notes
               WHERE slug = $1"#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("find_note_by_slug error: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn list_notes(&self, author_id: Uuid) -> Result<Vec<Note>, RepositoryError> {
        sqlx::query_as::<_, Note>(
            r#"SELECT id, slug, title, text, author_id, created_at
               FROM notes
               WHERE author_id = $1
               ORDER BY created_at DESC"#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("list_notes error: {:?}", e);
            RepositoryError::from(e)
        })
    }
}

/// InMemoryRepository
///
/// Process-local store used by tests and by local runs without `DATABASE_URL`.
/// Enforces the same invariants as the database schema: one note per slug.
#[derive(Default)]
pub struct InMemoryRepository {
    users: RwLock<HashMap<Uuid, Principal>>,
    notes: RwLock<HashMap<String, Note>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_user(&self, principal: Principal) -> Result<(), RepositoryError> {
        let mut users = self.users.write().map_err(|_| RepositoryError::Poisoned)?;
        users.insert(principal.id, principal);
        Ok(())
    }

    /// Stores a note. Fails if another note already uses the slug.
    pub fn insert_note(&self, note: Note) -> Result<(), RepositoryError> {
        let mut notes = self.notes.write().map_err(|_| RepositoryError::Poisoned)?;
        if notes.contains_key(&note.slug) {
            return Err(RepositoryError::DuplicateSlug(note.slug));
        }
        notes.insert(note.slug.clone(), note);
        Ok(())
    }

    /// Removes a note by slug, returning whether it existed.
    pub fn remove_note(&self, slug: &str) -> Result<bool, RepositoryError> {
        let mut notes = self.notes.write().map_err(|_| RepositoryError::Poisoned)?;
        Ok(notes.remove(slug).is_some())
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<Principal>, RepositoryError> {
        let users = self.users.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(users.get(&id).cloned())
    }

    async fn find_note_by_slug(&self, slug: &str) -> Result<Option<Note>, RepositoryError> {
        let notes = self.notes.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(notes.get(slug).cloned())
    }

    async fn list_notes(&self, author_id: Uuid) -> Result<Vec<Note>, RepositoryError> {
        let notes = self.notes.read().map_err(|_| RepositoryError::Poisoned)?;
        let mut owned: Vec<Note> = notes
            .values()
            .filter(|note| note.author_id == author_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }
}
