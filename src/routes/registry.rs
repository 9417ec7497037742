use std::collections::HashMap;

use serde::Serialize;

use crate::error::GateError;

/// Path parameter carrying the note slug on owned routes.
pub const SLUG_PARAM: &str = "{slug}";

/// RouteKind
///
/// Whether a gated route's decision depends on a specific note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RouteKind {
    /// No note context: list, add, success.
    Ownerless,
    /// Parameterized by a slug; only the note's owner may reach it.
    Owned,
}

/// RouteSpec
///
/// One entry of the route table: a stable name, the axum path and its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteSpec {
    pub name: &'static str,
    pub path: &'static str,
    pub kind: RouteKind,
}

impl RouteSpec {
    /// Checks that the path shape agrees with the kind.
    fn check_slug(&self) -> Result<(), GateError> {
        let has_slug = self.path.contains(SLUG_PARAM);
        let wants_slug = self.kind == RouteKind::Owned;
        if has_slug == wants_slug {
            Ok(())
        } else {
            Err(GateError::SlugMismatch {
                name: self.name.to_string(),
                path: self.path.to_string(),
            })
        }
    }
}

/// The note routes served by the application.
pub const NOTE_ROUTES: [RouteSpec; 6] = [
    RouteSpec { name: "list", path: "/notes/", kind: RouteKind::Ownerless },
    RouteSpec { name: "add", path: "/add/", kind: RouteKind::Ownerless },
    RouteSpec { name: "success", path: "/done/", kind: RouteKind::Ownerless },
    RouteSpec { name: "detail", path: "/notes/{slug}/", kind: RouteKind::Owned },
    RouteSpec { name: "edit", path: "/edit/{slug}/", kind: RouteKind::Owned },
    RouteSpec { name: "delete", path: "/delete/{slug}/", kind: RouteKind::Owned },
];

/// RouteRegistry
///
/// Immutable name → kind table. Built once at startup and shared through `AppState`;
/// classification is a pure lookup.
#[derive(Debug, Clone)]
pub struct RouteRegistry {
    routes: HashMap<&'static str, RouteSpec>,
}

impl RouteRegistry {
    /// Builds a registry, rejecting duplicate names and slug/kind mismatches.
    pub fn new<I>(specs: I) -> Result<Self, GateError>
    where
        I: IntoIterator<Item = RouteSpec>,
    {
        let mut routes = HashMap::new();
        for spec in specs {
            spec.check_slug()?;
            if routes.insert(spec.name, spec).is_some() {
                return Err(GateError::DuplicateRoute(spec.name.to_string()));
            }
        }
        Ok(Self { routes })
    }

    /// The registry for the note routes in `NOTE_ROUTES`.
    pub fn notes() -> Result<Self, GateError> {
        Self::new(NOTE_ROUTES)
    }

    /// Returns the kind of a registered route.
    pub fn classify(&self, name: &str) -> Result<RouteKind, GateError> {
        self.spec(name).map(|spec| spec.kind)
    }

    pub fn spec(&self, name: &str) -> Result<RouteSpec, GateError> {
        self.routes
            .get(name)
            .copied()
            .ok_or_else(|| GateError::UnknownRoute(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
