//! # Error taxonomy for backend calls
//!
//! Every gateway operation returns `Result<_, ApiError>`. The variants follow
//! how the views react to a failure:
//!
//! | Variant | Cause | View reaction |
//! |---------|-------|---------------|
//! | [`ApiError::Network`] | no response at all | "cannot connect" message, connectivity goes `disconnected` |
//! | [`ApiError::Unauthorized`] | 401 | refresh-then-logout path in the gateway, then the message |
//! | [`ApiError::Forbidden`] | 403 | message |
//! | [`ApiError::Validation`] | 400 or client-side checks | field messages joined into one line |
//! | [`ApiError::Server`] | any other status | generic retry message |
//! | [`ApiError::Decode`] | body does not match the expected shape | generic retry message |

use serde_json::Value;

/// Failure of a backend call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("cannot reach the server: {0}")]
    Network(String),
    #[error("not authenticated: {0}")]
    Unauthorized(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("{0}")]
    Validation(String),
    #[error("server responded with {status}: {message}")]
    Server { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}

const NETWORK_MESSAGE: &str =
    "Cannot connect to server. Please make sure the WasteWise backend is running.";
const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";

impl ApiError {
    /// Classify a non-success HTTP response.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            400 => ApiError::Validation(
                validation_message(body).unwrap_or_else(|| "Invalid request".to_string()),
            ),
            401 => ApiError::Unauthorized(
                error_field(body).unwrap_or_else(|| "Authentication required".to_string()),
            ),
            403 => ApiError::Forbidden(error_field(body).unwrap_or_else(|| {
                "You do not have permission to perform this action".to_string()
            })),
            _ => ApiError::Server {
                status,
                message: error_field(body).unwrap_or_else(|| body.trim().to_string()),
            },
        }
    }

    /// Text rendered inline by the views.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => NETWORK_MESSAGE.to_string(),
            ApiError::Unauthorized(msg) | ApiError::Forbidden(msg) | ApiError::Validation(msg) => {
                msg.clone()
            }
            ApiError::Server { .. } | ApiError::Decode(_) => GENERIC_MESSAGE.to_string(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// `{"error": "..."}` or `{"detail": "..."}`, the two single-message shapes
/// the backend uses.
fn error_field(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error", "detail"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Flatten a 400 body into one display line.
///
/// Field errors (`{"quantity": ["A valid number is required."]}`) become
/// `"quantity: A valid number is required."`, several fields are joined with
/// `"; "`. `non_field_errors` are listed without a prefix.
fn validation_message(body: &str) -> Option<String> {
    if let Some(msg) = error_field(body) {
        return Some(msg);
    }
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => {
            let text = body.trim();
            return (!text.is_empty()).then(|| text.to_string());
        }
    };

    let messages = match &value {
        Value::Object(fields) => fields
            .iter()
            .filter_map(|(field, v)| {
                let text = flatten_messages(v)?;
                if field == "non_field_errors" {
                    Some(text)
                } else {
                    Some(format!("{field}: {text}"))
                }
            })
            .collect::<Vec<_>>(),
        other => flatten_messages(other).into_iter().collect(),
    };

    (!messages.is_empty()).then(|| messages.join("; "))
}

fn flatten_messages(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(flatten_messages).collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(ApiError::from_status(400, "{}"), ApiError::Validation(_)));
        assert!(ApiError::from_status(401, "").is_unauthorized());
        assert!(matches!(ApiError::from_status(403, ""), ApiError::Forbidden(_)));
        assert!(matches!(
            ApiError::from_status(500, "boom"),
            ApiError::Server { status: 500, .. }
        ));
    }

    #[test]
    fn test_error_key_used_verbatim() {
        let err = ApiError::from_status(401, r#"{"error": "Invalid credentials"}"#);
        assert_eq!(err.user_message(), "Invalid credentials");

        let err = ApiError::from_status(403, r#"{"detail": "Not allowed here"}"#);
        assert_eq!(err.user_message(), "Not allowed here");
    }

    #[test]
    fn test_field_errors_aggregate_into_one_line() {
        let body = r#"{"username": ["A user with that username already exists."], "password": ["This field may not be blank.", "Too short."]}"#;
        let msg = ApiError::from_status(400, body).user_message();
        assert!(msg.contains("username: A user with that username already exists."));
        assert!(msg.contains("password: This field may not be blank. Too short."));
        assert_eq!(msg.matches("; ").count(), 1);
    }

    #[test]
    fn test_non_field_errors_have_no_prefix() {
        let body = r#"{"non_field_errors": ["Unable to log in."]}"#;
        assert_eq!(ApiError::from_status(400, body).user_message(), "Unable to log in.");
    }

    #[test]
    fn test_plain_text_bad_request() {
        assert_eq!(
            ApiError::from_status(400, "  bad input ").user_message(),
            "bad input"
        );
        assert_eq!(ApiError::from_status(400, "").user_message(), "Invalid request");
    }

    #[test]
    fn test_generic_messages_hide_details() {
        let err = ApiError::from_status(502, "<html>gateway</html>");
        assert_eq!(err.user_message(), GENERIC_MESSAGE);
        assert_eq!(
            ApiError::Network("dns".into()).user_message(),
            NETWORK_MESSAGE
        );
        assert!(ApiError::Network("x".into()).is_network());
    }
}
