//! Authenticated HTTP client construction.
//!
//! The workflow service authenticates every call with a bearer token
//! issued at login. The token is attached as a default header on the
//! [`reqwest::Client`], so [`WorkflowsApi`](crate::api::WorkflowsApi)
//! itself never handles credentials -- pass the built client to
//! [`WorkflowsApi::with_client`](crate::api::WorkflowsApi::with_client).

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

/// HTTP request timeout for a single API call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from building an authenticated client.
#[derive(Debug, thiserror::Error)]
pub enum AuthClientError {
    /// The token contains bytes that cannot appear in a header value.
    #[error("Invalid bearer token: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Build a [`reqwest::Client`] that sends `Authorization: Bearer <token>`
/// on every request.
///
/// The header is marked sensitive so the token is not echoed by debug
/// output.
pub fn authenticated_client(token: &str) -> Result<reqwest::Client, AuthClientError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);

    Ok(reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .default_headers(headers)
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_client_for_plain_token() {
        assert!(authenticated_client("abc.def.ghi").is_ok());
    }

    #[test]
    fn rejects_token_with_control_characters() {
        let err = authenticated_client("bad\ntoken").unwrap_err();
        assert!(matches!(err, AuthClientError::InvalidToken(_)));
        assert!(err.to_string().contains("Invalid bearer token"));
    }
}
