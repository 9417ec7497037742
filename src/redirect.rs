//! Login redirect targets.
//!
//! Anonymous callers are sent to `<login_path>?next=<original path>`. The `next` value is
//! form-urlencoded with `/` kept literal, so `/notes/note-1/` reads back unchanged in the
//! address bar and the encoded form is stable under repeated decode/encode.

use url::form_urlencoded;

/// Query parameter holding the return path.
pub const NEXT_PARAM: &str = "next";

/// Encodes a return path for use as the `next` query value.
pub fn encode_next(next: &str) -> String {
    form_urlencoded::byte_serialize(next.as_bytes())
        .collect::<String>()
        .replace("%2F", "/")
}

/// Builds the login redirect URL for `next`.
pub fn login_redirect_url(login_path: &str, next: &str) -> String {
    format!("{}?{}={}", login_path, NEXT_PARAM, encode_next(next))
}

/// Extracts and decodes `next` from a raw query string. The first occurrence wins.
pub fn next_from_query(query: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == NEXT_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// Accepts `next` only when it is a path on this site.
///
/// Absolute URLs, protocol-relative targets (`//host`) and backslash tricks (`/\host`)
/// are refused, so the login round trip cannot be turned into an open redirect.
pub fn safe_next(next: &str) -> Option<&str> {
    let mut chars = next.chars();
    if chars.next() != Some('/') {
        return None;
    }
    if matches!(chars.next(), Some('/') | Some('\\')) {
        return None;
    }
    if next.chars().any(char::is_control) {
        return None;
    }
    Some(next)
}
