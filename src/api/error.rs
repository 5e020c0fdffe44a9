//! API Errors
//!
//! Failure categories of a single user action. None of them is retried.

use thiserror::Error;

/// Longest raw-body excerpt shown for a parse failure
pub const SNIPPET_LIMIT: usize = 120;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request was cancelled")]
    Aborted,

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Unexpected response from server: {snippet}")]
    Parse { snippet: String },

    #[error("{0}")]
    Validation(String),

    #[error("Browser error: {0}")]
    Browser(String),
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Aborted requests are dropped without telling the user
    pub fn is_silent(&self) -> bool {
        matches!(self, ApiError::Aborted)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Http { status: 401, .. })
    }

    /// Build the error for a non-2xx response from its raw body
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_message(body)
            .unwrap_or_else(|| format!("Request failed (status {})", status));
        ApiError::Http { status, message }
    }

    /// Build the error for a body that could not be decoded
    pub fn parse_failure(body: &str) -> Self {
        ApiError::Parse { snippet: truncate(body, SNIPPET_LIMIT) }
    }
}

/// `message` or `error` field of a JSON error body
pub fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error", "msg"]
        .iter()
        .filter_map(|key| value.get(*key))
        .find_map(|v| match v {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            serde_json::Value::Object(inner) => inner
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
            _ => None,
        })
}

/// Truncate on a char boundary, appending an ellipsis when cut
pub fn truncate(text: &str, limit: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit).collect();
    format!("{}…", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_json_body() {
        let err = ApiError::from_status(400, r#"{"message":"Title is required"}"#);
        assert_eq!(err, ApiError::Http { status: 400, message: "Title is required".to_string() });
        assert_eq!(err.to_string(), "Title is required");
    }

    #[test]
    fn test_error_field_and_nested_error() {
        assert_eq!(extract_message(r#"{"error":"Forbidden"}"#).as_deref(), Some("Forbidden"));
        assert_eq!(extract_message(r#"{"error":{"message":"Token expired"}}"#).as_deref(), Some("Token expired"));
    }

    #[test]
    fn test_generic_fallback() {
        let err = ApiError::from_status(502, "<html>Bad gateway</html>");
        assert_eq!(err.to_string(), "Request failed (status 502)");

        let err = ApiError::from_status(500, r#"{"message":"   "}"#);
        assert_eq!(err.to_string(), "Request failed (status 500)");
    }

    #[test]
    fn test_parse_failure_truncates() {
        let body = "x".repeat(300);
        match ApiError::parse_failure(&body) {
            ApiError::Parse { snippet } => {
                assert_eq!(snippet.chars().count(), SNIPPET_LIMIT + 1);
                assert!(snippet.ends_with('…'));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("ééééé", 2), "éé…");
    }

    #[test]
    fn test_silent_and_unauthorized() {
        assert!(ApiError::Aborted.is_silent());
        assert!(!ApiError::Network("offline".into()).is_silent());
        assert!(ApiError::from_status(401, "").is_unauthorized());
    }
}
