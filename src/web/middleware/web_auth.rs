//! Cookie-based authentication middleware for the admin panel.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    http::header::COOKIE,
    middleware::Next,
    response::{Redirect, Response},
};

use crate::state::AppState;

/// Extracts the `uuid` session cookie from the request headers.
///
/// Handles multiple cookies in the `Cookie` header by splitting on
/// semicolons and ignoring everything but the `uuid` pair.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get(COOKIE)
        .and_then(|cookie_header| cookie_header.to_str().ok())
        .and_then(|cookie_str| {
            cookie_str.split(';').find_map(|cookie| {
                let mut parts = cookie.trim().splitn(2, '=');
                match (parts.next(), parts.next()) {
                    (Some("uuid"), Some(value)) => Some(value.to_string()),
                    _ => None,
                }
            })
        })
}

/// Authenticates panel requests using the `uuid` session cookie.
///
/// The cookie value must be a session id issued by the login endpoint.
/// On a missing or unknown session the browser is redirected back to
/// the login page instead of getting a `401`; panel pages are only ever
/// opened by humans.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, Redirect> {
    let login_url = st.panel_url("");

    match session_cookie(req.headers()) {
        Some(session_id) => match st.auth_service.verify(&session_id).await {
            Ok(true) => Ok(next.run(req).await),
            _ => Err(Redirect::to(&login_url)),
        },
        None => Err(Redirect::to(&login_url)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_session_cookie_single() {
        assert_eq!(
            session_cookie(&headers("uuid=abc-123")),
            Some("abc-123".to_string())
        );
    }

    #[test]
    fn test_session_cookie_among_others() {
        assert_eq!(
            session_cookie(&headers("theme=dark; uuid=abc-123; lang=en")),
            Some("abc-123".to_string())
        );
    }

    #[test]
    fn test_session_cookie_missing() {
        assert_eq!(session_cookie(&headers("theme=dark")), None);
        assert_eq!(session_cookie(&HeaderMap::new()), None);
    }
}
