// ABOUTME: Session cookie parsing and construction helpers
// ABOUTME: Reads the browser Cookie header and builds Set-Cookie values
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

use axum::http::HeaderMap;

use crate::constants::SESSION_COOKIE;

/// Extract a named cookie value from the request headers
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookie_header = headers.get("cookie")?.to_str().ok()?;

    cookie_header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key == name {
            Some(value.to_string())
        } else {
            None
        }
    })
}

/// Build the session `Set-Cookie` value
///
/// HttpOnly keeps the token away from page scripts; `Secure` is added in
/// production where the portal is served over HTTPS.
#[must_use]
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age_secs}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build the `Set-Cookie` value that clears the session
#[must_use]
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_cookie_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "cookie",
            HeaderValue::from_static("theme=dark; reach_session=tok123; other=x"),
        );

        assert_eq!(
            get_cookie_value(&headers, SESSION_COOKIE).as_deref(),
            Some("tok123")
        );
        assert_eq!(get_cookie_value(&headers, "theme").as_deref(), Some("dark"));
        assert!(get_cookie_value(&headers, "missing").is_none());
    }

    #[test]
    fn test_cookie_parsing_without_header() {
        let headers = HeaderMap::new();
        assert!(get_cookie_value(&headers, SESSION_COOKIE).is_none());
    }

    #[test]
    fn test_session_cookie_shape() {
        let cookie = session_cookie("tok", 3600, true);
        assert!(cookie.starts_with("reach_session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(cookie.ends_with("Secure"));

        let cleared = clear_session_cookie(false);
        assert!(cleared.contains("Max-Age=0"));
        assert!(!cleared.contains("Secure"));
    }
}
