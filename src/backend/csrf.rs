//! Cookie lookup and CSRF token resolution.

/// Name of the cookie Django stores its anti-forgery token in.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Read a named value out of a `Cookie` header string (`a=1; b=2`).
/// The value is percent-decoded.
pub fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .map(|raw| {
            urlencoding::decode(raw)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| raw.to_string())
        })
}

/// The token from the cookie, else the explicitly configured one.
pub fn resolve_csrf_token(cookie_header: Option<&str>, fallback: Option<&str>) -> Option<String> {
    cookie_header
        .and_then(|header| get_cookie(header, CSRF_COOKIE))
        .filter(|token| !token.is_empty())
        .or_else(|| fallback.filter(|t| !t.is_empty()).map(str::to_string))
}
