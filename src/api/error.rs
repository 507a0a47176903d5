//! Error taxonomy for the clip API.
//!
//! HTTP status codes are mapped onto stable variants at this boundary so
//! callers branch on error kinds, never on raw status codes.

/// Failure kinds reported by the transport client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The credential was missing or rejected (401/403).
    #[error("Not authorized")]
    Unauthorized,
    /// The addressed resource does not exist (404).
    #[error("Not found")]
    NotFound,
    /// The server rejected the request as malformed (400).
    #[error("Invalid request: {0}")]
    BadRequest(String),
    /// The server failed to process the request (5xx).
    #[error("Server error: {0}")]
    Server(String),
    /// The request never completed (DNS, connect, timeout).
    #[error("Network error: {0}")]
    Transport(String),
    /// The response body could not be understood.
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// True for credential rejections, the recoverable delete-flow case.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Best user-facing message carried by this error, if the server sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::BadRequest(message) | Self::Server(message) if !message.is_empty() => {
                Some(message)
            }
            _ => None,
        }
    }
}

/// Map an HTTP status and response body onto the taxonomy.
pub(crate) fn map_status(code: u16, body: String) -> ApiError {
    let message = extract_message(&body);
    match code {
        400 => ApiError::BadRequest(message),
        401 | 403 => ApiError::Unauthorized,
        404 => ApiError::NotFound,
        500..=599 => ApiError::Server(message),
        _ => ApiError::Transport(format!("HTTP {code}: {message}")),
    }
}

/// Pull a human message out of a JSON error body, falling back to the raw text.
fn extract_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.starts_with('{')
        && let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed)
    {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str())
                && !text.is_empty()
            {
                return text.to_string();
            }
        }
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_codes_map_to_unauthorized() {
        assert!(map_status(401, String::new()).is_auth_failure());
        assert!(map_status(403, String::new()).is_auth_failure());
        assert!(!map_status(404, String::new()).is_auth_failure());
    }

    #[test]
    fn server_errors_carry_json_message() {
        let err = map_status(500, r#"{"message":"disk full"}"#.into());
        assert_eq!(err.server_message(), Some("disk full"));
    }

    #[test]
    fn bad_request_falls_back_to_raw_body() {
        let err = map_status(400, "not json".into());
        match err {
            ApiError::BadRequest(message) => assert_eq!(message, "not json"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_codes_become_transport_errors() {
        let err = map_status(302, String::new());
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
