use notes_portal::redirect::{encode_next, login_redirect_url, next_from_query, safe_next};

#[test]
fn test_login_redirect_keeps_slashes_literal() {
    assert_eq!(
        login_redirect_url("/login/", "/notes/note-1/"),
        "/login/?next=/notes/note-1/"
    );
}

#[test]
fn test_login_redirect_encodes_query_characters() {
    let url = login_redirect_url("/login/", "/notes/?page=2&sort=new");
    assert_eq!(url, "/login/?next=/notes/%3Fpage%3D2%26sort%3Dnew");
}

#[test]
fn test_next_round_trip_is_stable() {
    let paths = [
        "/notes/note-1/",
        "/edit/заметка/",
        "/notes/?page=2&sort=new",
        "/notes/a b+c%2F/",
    ];

    for path in paths {
        let encoded = encode_next(path);
        let query = format!("next={encoded}");
        let decoded = next_from_query(&query).unwrap();

        assert_eq!(decoded, path);
        assert_eq!(encode_next(&decoded), encoded);
    }
}

#[test]
fn test_next_from_query_ignores_other_parameters() {
    assert_eq!(
        next_from_query("lang=en&next=/notes/&next=/other/"),
        Some("/notes/".to_string())
    );
    assert_eq!(next_from_query("lang=en"), None);
}

#[test]
fn test_safe_next_accepts_site_paths() {
    assert_eq!(safe_next("/notes/note-1/"), Some("/notes/note-1/"));
    assert_eq!(safe_next("/"), Some("/"));
}

#[test]
fn test_safe_next_rejects_off_site_targets() {
    for target in [
        "https://evil.example/",
        "//evil.example/",
        "/\\evil.example/",
        "notes/",
        "",
        "/notes/\r\nSet-Cookie:x",
    ] {
        assert_eq!(safe_next(target), None, "{target:?}");
    }
}
