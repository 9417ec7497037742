use notes_portal::{
    GateError,
    routes::registry::{NOTE_ROUTES, RouteKind, RouteRegistry, RouteSpec},
};

#[test]
fn test_note_registry_classifies_every_route() {
    let registry = RouteRegistry::notes().unwrap();

    assert_eq!(registry.len(), 6);
    for name in ["add", "list", "success"] {
        assert_eq!(registry.classify(name), Ok(RouteKind::Ownerless), "{name}");
    }
    for name in ["edit", "delete", "detail"] {
        assert_eq!(registry.classify(name), Ok(RouteKind::Owned), "{name}");
    }
}

#[test]
fn test_unknown_route_is_a_configuration_error() {
    let registry = RouteRegistry::notes().unwrap();

    // Public pages are deliberately outside the gated registry.
    for name in ["home", "login", "archive"] {
        assert_eq!(
            registry.classify(name),
            Err(GateError::UnknownRoute(name.to_string()))
        );
    }
}

#[test]
fn test_duplicate_route_is_rejected() {
    let specs = [
        RouteSpec { name: "list", path: "/notes/", kind: RouteKind::Ownerless },
        RouteSpec { name: "list", path: "/all/", kind: RouteKind::Ownerless },
    ];

    let err = RouteRegistry::new(specs).unwrap_err();
    assert_eq!(err, GateError::DuplicateRoute("list".to_string()));
}

#[test]
fn test_owned_route_without_slug_is_rejected() {
    let specs = [RouteSpec { name: "detail", path: "/notes/", kind: RouteKind::Owned }];

    let err = RouteRegistry::new(specs).unwrap_err();
    assert!(matches!(err, GateError::SlugMismatch { ref name, .. } if name == "detail"));
}

#[test]
fn test_ownerless_route_with_slug_is_rejected() {
    let specs = [RouteSpec { name: "list", path: "/notes/{slug}/", kind: RouteKind::Ownerless }];

    assert!(matches!(
        RouteRegistry::new(specs),
        Err(GateError::SlugMismatch { .. })
    ));
}

#[test]
fn test_spec_returns_registered_path() {
    let registry = RouteRegistry::notes().unwrap();

    let detail = registry.spec("detail").unwrap();
    assert_eq!(detail.path, "/notes/{slug}/");
    assert_eq!(detail, NOTE_ROUTES[3]);
}

#[test]
fn test_empty_registry() {
    let registry = RouteRegistry::new(Vec::<RouteSpec>::new()).unwrap();
    assert!(registry.is_empty());
    assert!(registry.classify("list").is_err());
}
