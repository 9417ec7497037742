use thiserror::Error;

/// Configuration errors raised while assembling the route table.
///
/// None of these can happen per request: they surface while the router is built, and
/// `main` refuses to start the server when one occurs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("route {0:?} is not present in the route registry")]
    UnknownRoute(String),

    #[error("route {0:?} is registered more than once")]
    DuplicateRoute(String),

    #[error("route {name:?} at {path:?} does not match its kind (owned routes need a {{slug}} segment, ownerless routes must not have one)")]
    SlugMismatch { name: String, path: String },
}

/// Failures of the note/user store.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("a note with slug {0:?} already exists")]
    DuplicateSlug(String),

    #[error("store lock poisoned")]
    Poisoned,
}
