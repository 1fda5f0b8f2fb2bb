use axum::{
    extract::Request,
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderValue,
    },
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Name of the guest session cookie.
pub const SESSION_COOKIE: &str = "erp_session";

/// Per-request guest session identity, keyed off the session cookie.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionId(pub String);

/// Session middleware
///
/// Reuses the `erp_session` cookie when present, otherwise assigns a fresh
/// UUID and sets the cookie on the response. The id keys the guest quota
/// counter; authenticated requests carry one too but never consume from it.
pub async fn session_middleware(mut request: Request, next: Next) -> Response {
    let existing = cookie_value(&request, SESSION_COOKIE);
    let is_new = existing.is_none();
    let session_id = existing.unwrap_or_else(|| Uuid::new_v4().to_string());

    request.extensions_mut().insert(SessionId(session_id.clone()));

    let mut response = next.run(request).await;

    if is_new {
        let cookie = format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax");
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }

    response
}

/// Find a cookie by name across all Cookie headers.
fn cookie_value(request: &Request, name: &str) -> Option<String> {
    request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|header| header.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then(|| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with_cookie(cookie: &str) -> Request {
        axum::http::Request::builder()
            .header("cookie", cookie)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn reads_session_cookie() {
        let request = request_with_cookie("erp_session=abc-123");
        assert_eq!(
            cookie_value(&request, SESSION_COOKIE),
            Some("abc-123".to_string())
        );
    }

    #[test]
    fn finds_cookie_among_others() {
        let request = request_with_cookie("theme=dark; erp_session=abc-123; lang=ms");
        assert_eq!(
            cookie_value(&request, SESSION_COOKIE),
            Some("abc-123".to_string())
        );
    }

    #[test]
    fn missing_cookie_returns_none() {
        let request = request_with_cookie("theme=dark");
        assert_eq!(cookie_value(&request, SESSION_COOKIE), None);

        let no_header = axum::http::Request::builder().body(Body::empty()).unwrap();
        assert_eq!(cookie_value(&no_header, SESSION_COOKIE), None);
    }
}
