use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

use super::domain::User;

/// Session lookup delegated to the external auth provider. Handlers resolve
/// the bearer token on every request and treat absence as unauthenticated.
pub trait SessionStore: Send + Sync {
    fn resolve(&self, token: &str) -> Option<User>;
}

/// Extract the bearer token from an `Authorization` header, if present.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
