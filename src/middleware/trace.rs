//! TraceLayer span maker that keeps credentials out of request logs.
//!
//! The OAuth callback carries the authorization `code`, and the front-end
//! redirect carries the access `token`; both are redacted.

use axum::http::{Request, Uri};
use tower_http::trace::MakeSpan;
use tracing::Span;

/// Query parameter names whose values are replaced in logs.
const SENSITIVE_PARAMS: &[&str] = &["token", "access_token", "code", "client_secret"];

#[derive(Clone, Debug)]
pub struct SanitizedMakeSpan;

impl<B> MakeSpan<B> for SanitizedMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "http",
            method = %request.method(),
            uri = %sanitize_uri(request.uri()),
            version = ?request.version(),
        )
    }
}

/// `/api/auth/callback?code=4/0Ab&state=s` becomes
/// `/api/auth/callback?code=[REDACTED]&state=s`
fn sanitize_uri(uri: &Uri) -> String {
    let Some(query) = uri.query() else {
        return uri.path().to_string();
    };

    let pairs: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if is_sensitive(key) => format!("{key}=[REDACTED]"),
            _ => pair.to_string(),
        })
        .collect();

    format!("{}?{}", uri.path(), pairs.join("&"))
}

fn is_sensitive(key: &str) -> bool {
    SENSITIVE_PARAMS
        .iter()
        .any(|s| key.eq_ignore_ascii_case(s))
}
