//! `Authorization: <scheme> <token>` header parsing.

use http::HeaderMap;
use http::header::AUTHORIZATION;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BearerError {
    #[error("missing authorization header")]
    Missing,
    #[error("invalid token")]
    Malformed,
}

/// Split a header value into `<scheme> <token>` and return the token.
///
/// The value must contain exactly two whitespace-separated parts. The scheme
/// is not checked beyond being non-empty.
pub fn parse_authorization(value: &str) -> Result<&str, BearerError> {
    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_scheme), Some(token), None) => Ok(token),
        _ => Err(BearerError::Malformed),
    }
}

/// Read the token from the request's `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers.get(AUTHORIZATION).ok_or(BearerError::Missing)?;
    let value = value.to_str().map_err(|_| BearerError::Malformed)?;
    if value.trim().is_empty() {
        return Err(BearerError::Missing);
    }
    parse_authorization(value)
}

/// Format a token as a `Bearer` header value.
pub fn bearer_value(token: &str) -> String {
    format!("Bearer {token}")
}
