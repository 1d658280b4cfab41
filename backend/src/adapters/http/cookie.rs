//! Session cookie helpers.
//!
//! The session token travels either as a bearer token or in the `token`
//! cookie set on login and registration.

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;

pub const SESSION_COOKIE: &str = "token";

/// `Set-Cookie` value carrying a fresh session token.
pub fn session_cookie(token: &str, max_age: chrono::Duration, secure: bool) -> String {
    format!(
        "{}={}; Max-Age={}; Path=/; HttpOnly; {}",
        SESSION_COOKIE,
        token,
        max_age.num_seconds().max(0),
        same_site(secure)
    )
}

/// `Set-Cookie` value that expires the session cookie immediately.
pub fn cleared_session_cookie(secure: bool) -> String {
    format!(
        "{}=; Max-Age=0; Path=/; HttpOnly; {}",
        SESSION_COOKIE,
        same_site(secure)
    )
}

fn same_site(secure: bool) -> &'static str {
    // cross-site cookies require Secure
    if secure {
        "SameSite=None; Secure"
    } else {
        "SameSite=Lax"
    }
}

/// Bearer token first, then the session cookie.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(axum::http::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn bearer_header_wins_over_cookie() {
        let h = headers(&[
            (AUTHORIZATION, "Bearer from-header"),
            (COOKIE, "token=from-cookie"),
        ]);
        assert_eq!(session_token(&h).as_deref(), Some("from-header"));
    }

    #[test]
    fn token_cookie_is_found_among_others() {
        let h = headers(&[(COOKIE, "theme=dark; token=abc.def.ghi; lang=en")]);
        assert_eq!(session_token(&h).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn empty_cookie_and_other_schemes_are_ignored() {
        let h = headers(&[(AUTHORIZATION, "Basic dXNlcjpwYXNz"), (COOKIE, "token=")]);
        assert_eq!(session_token(&h), None);
    }

    #[test]
    fn secure_cookie_is_cross_site() {
        let c = session_cookie("t", chrono::Duration::days(15), true);
        assert!(c.starts_with("token=t; Max-Age=1296000;"));
        assert!(c.ends_with("SameSite=None; Secure"));

        let cleared = cleared_session_cookie(false);
        assert!(cleared.contains("Max-Age=0"));
        assert!(cleared.ends_with("SameSite=Lax"));
    }
}
