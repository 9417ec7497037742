//! Router Module Index
//!
//! Splits the routing into the public pages and the gated note pages, so access control
//! is applied per module and a note route cannot be mounted without its gate.

/// Route name → kind table used to mount and gate the note routes.
pub mod registry;

/// Routes accessible to everyone (home, auth pages, health).
pub mod public;

/// Note routes, each wrapped by the access gate middleware.
pub mod notes;
