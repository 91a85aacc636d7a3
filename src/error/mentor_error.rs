//! Unified error type for mentorlink.

use std::fmt;

use super::api::ApiError;
use super::category::ErrorCategory;
use super::validation::ValidationError;
use super::workflow::WorkflowError;
use crate::traits::StorageError;

/// Unified error type.
///
/// Every workflow returns this so callers get one place to ask for a
/// category, a user-facing message and whether a retry could help.
#[derive(Debug)]
pub enum MentorError {
    /// The request gateway failed.
    Api(ApiError),

    /// Client-side form validation rejected the input before any call.
    Validation(ValidationError),

    /// A workflow rule refused the action, or a multi-step action failed midway.
    Workflow(WorkflowError),

    /// Local persistence failed.
    Storage(StorageError),

    /// Configuration is missing or invalid.
    Config(String),
}

impl MentorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MentorError::Api(ApiError::Transport(_)) => ErrorCategory::Network,
            MentorError::Api(ApiError::Server { status: 401, .. }) => ErrorCategory::Auth,
            MentorError::Api(ApiError::Server { status, .. }) if *status >= 500 => {
                ErrorCategory::Server
            }
            MentorError::Api(ApiError::Server { .. }) => ErrorCategory::User,
            MentorError::Api(ApiError::Decode { .. }) => ErrorCategory::Server,
            MentorError::Validation(_) => ErrorCategory::User,
            MentorError::Workflow(WorkflowError::NotAuthenticated)
            | MentorError::Workflow(WorkflowError::AdminNotLoggedIn) => ErrorCategory::Auth,
            MentorError::Workflow(WorkflowError::ClearFailed(source))
            | MentorError::Workflow(WorkflowError::PartialSave { source, .. }) => {
                MentorError::Api(source.clone()).category()
            }
            MentorError::Workflow(_) => ErrorCategory::User,
            MentorError::Storage(_) => ErrorCategory::System,
            MentorError::Config(_) => ErrorCategory::Configuration,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            MentorError::Api(err) => err.is_retryable(),
            MentorError::Workflow(WorkflowError::ClearFailed(source))
            | MentorError::Workflow(WorkflowError::PartialSave { source, .. }) => {
                source.is_retryable()
            }
            _ => false,
        }
    }

    /// Message suitable for a transient notification.
    pub fn user_message(&self) -> String {
        match self {
            MentorError::Api(err) => err.user_message(),
            MentorError::Validation(err) => err.to_string(),
            MentorError::Workflow(err) => err.to_string(),
            MentorError::Storage(_) => {
                "Could not save local session data. Please check file permissions.".to_string()
            }
            MentorError::Config(msg) => format!("Configuration error: {}", msg),
        }
    }

    /// The server's message when this wraps a gateway error that carries one,
    /// else `fallback`.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            MentorError::Api(err) => err.message_or(fallback),
            _ => fallback.to_string(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            MentorError::Api(err) => err.error_code(),
            MentorError::Validation(_) => "E_VALIDATION",
            MentorError::Workflow(WorkflowError::PartialSave { .. }) => "E_PARTIAL_SAVE",
            MentorError::Workflow(_) => "E_WORKFLOW",
            MentorError::Storage(_) => "E_STORAGE",
            MentorError::Config(_) => "E_CONFIG",
        }
    }

    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }

    /// A stale or missing token; the user should log in again.
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            MentorError::Api(ApiError::Server { status: 401, .. })
                | MentorError::Workflow(WorkflowError::NotAuthenticated)
        )
    }

    /// True when the action was refused before any network call was made.
    pub fn is_local_rejection(&self) -> bool {
        match self {
            MentorError::Validation(_) => true,
            MentorError::Workflow(err) => !matches!(
                err,
                WorkflowError::ClearFailed(_) | WorkflowError::PartialSave { .. }
            ),
            _ => false,
        }
    }
}

impl fmt::Display for MentorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MentorError::Api(err) => write!(f, "{}", err),
            MentorError::Validation(err) => write!(f, "{}", err),
            MentorError::Workflow(err) => write!(f, "{}", err),
            MentorError::Storage(err) => write!(f, "{}", err),
            MentorError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for MentorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MentorError::Api(err) => Some(err),
            MentorError::Validation(err) => Some(err),
            MentorError::Workflow(err) => Some(err),
            MentorError::Storage(err) => Some(err),
            MentorError::Config(_) => None,
        }
    }
}

impl From<ApiError> for MentorError {
    fn from(err: ApiError) -> Self {
        MentorError::Api(err)
    }
}

impl From<ValidationError> for MentorError {
    fn from(err: ValidationError) -> Self {
        MentorError::Validation(err)
    }
}

impl From<WorkflowError> for MentorError {
    fn from(err: WorkflowError) -> Self {
        MentorError::Workflow(err)
    }
}

impl From<StorageError> for MentorError {
    fn from(err: StorageError) -> Self {
        MentorError::Storage(err)
    }
}
