//! Request gateway errors.

use std::fmt;

use crate::traits::HttpError;

/// Failure of a single gateway call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response.
    Transport(HttpError),

    /// The API answered with a non-2xx status. `message` is the body's
    /// `message` field, else its `error` field, when either is present.
    Server { status: u16, message: Option<String> },

    /// A 2xx body did not match the expected shape.
    Decode { message: String },
}

impl ApiError {
    /// The server-provided message, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// The server's message when present, else `fallback`.
    pub fn message_or(&self, fallback: &str) -> String {
        self.server_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(HttpError::InvalidUrl(_)) => false,
            ApiError::Transport(_) => true,
            ApiError::Server { status, .. } => *status >= 500 || *status == 429 || *status == 408,
            ApiError::Decode { .. } => false,
        }
    }

    pub fn user_message(&self) -> String {
        if let Some(message) = self.server_message() {
            return message.to_string();
        }
        match self {
            ApiError::Transport(HttpError::Timeout(_)) => {
                "The server took too long to respond. Please try again.".to_string()
            }
            ApiError::Transport(_) => {
                "Unable to reach the server. Please check your connection.".to_string()
            }
            ApiError::Server { status, .. } => match *status {
                400 => "The request was invalid. Please try again.".to_string(),
                401 => "Authentication required. Please log in again.".to_string(),
                403 => "Access denied. You don't have permission for this action.".to_string(),
                404 => "The requested resource was not found.".to_string(),
                500..=599 => {
                    "The server is experiencing issues. Please try again later.".to_string()
                }
                _ => format!("The server returned an error (HTTP {}).", status),
            },
            ApiError::Decode { .. } => {
                "Received an unexpected response from the server.".to_string()
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Transport(HttpError::Timeout(_)) => "E_NET_TIMEOUT",
            ApiError::Transport(HttpError::ConnectionFailed(_)) => "E_NET_CONN",
            ApiError::Transport(_) => "E_NET_OTHER",
            ApiError::Server { status: 401, .. } => "E_API_UNAUTHORIZED",
            ApiError::Server { status: 403, .. } => "E_API_FORBIDDEN",
            ApiError::Server { status, .. } if *status >= 500 => "E_API_SERVER",
            ApiError::Server { .. } => "E_API_REJECTED",
            ApiError::Decode { .. } => "E_API_DECODE",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "{}", e),
            ApiError::Server {
                status,
                message: Some(message),
            } => write!(f, "Server error ({}): {}", status, message),
            ApiError::Server {
                status,
                message: None,
            } => write!(f, "Server error ({})", status),
            ApiError::Decode { message } => write!(f, "Invalid response format: {}", message),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        ApiError::Transport(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_or_prefers_server_message() {
        let err = ApiError::Server {
            status: 409,
            message: Some("Mentor already assigned".to_string()),
        };
        assert_eq!(err.message_or("Assignment failed. Try again."), "Mentor already assigned");
        assert_eq!(err.user_message(), "Mentor already assigned");

        let err = ApiError::Server {
            status: 409,
            message: None,
        };
        assert_eq!(err.message_or("Assignment failed. Try again."), "Assignment failed. Try again.");
    }

    #[test]
    fn test_transport_errors_use_fallback() {
        let err = ApiError::Transport(HttpError::ConnectionFailed("refused".to_string()));
        assert_eq!(err.message_or("Login failed"), "Login failed");
        assert!(err.is_retryable());
        assert_eq!(err.error_code(), "E_NET_CONN");
    }

    #[test]
    fn test_retryable_statuses() {
        let server = |status| ApiError::Server {
            status,
            message: None,
        };
        assert!(server(500).is_retryable());
        assert!(server(503).is_retryable());
        assert!(server(429).is_retryable());
        assert!(!server(400).is_retryable());
        assert!(!server(401).is_retryable());
        assert!(!ApiError::Decode {
            message: "x".to_string()
        }
        .is_retryable());
    }

    #[test]
    fn test_display() {
        let err = ApiError::Server {
            status: 500,
            message: Some("boom".to_string()),
        };
        assert_eq!(err.to_string(), "Server error (500): boom");
        assert_eq!(
            ApiError::Server {
                status: 404,
                message: None
            }
            .to_string(),
            "Server error (404)"
        );
    }
}
