//! Transient user-facing messages.
//!
//! Every workflow action ends in one [`Notice`]: a success line, or an error
//! line carrying the server's message when it sent one and a fixed fallback
//! otherwise. Notices are also written to the tracing log at a matching level.

use std::fmt;

use crate::error::{ApiError, MentorError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        let notice = Self {
            level,
            message: message.into(),
        };
        notice.trace();
        notice
    }

    /// Success notice preferring the server's `message` field.
    pub fn success_or(server_message: Option<String>, fallback: &str) -> Self {
        Self::success(server_message.unwrap_or_else(|| fallback.to_string()))
    }

    /// Error notice from a gateway failure.
    pub fn from_api_error(err: &ApiError, fallback: &str) -> Self {
        Self::error(err.message_or(fallback))
    }

    /// Error notice from any failure.
    ///
    /// Locally rejected actions show their own message; remote failures show
    /// the server's message or `fallback`.
    pub fn from_error(err: &MentorError, fallback: &str) -> Self {
        if err.is_local_rejection() {
            Self::error(err.user_message())
        } else {
            Self::error(err.message_or(fallback))
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }

    fn trace(&self) {
        match self.level {
            NoticeLevel::Success => tracing::info!(notice = %self.message, "success"),
            NoticeLevel::Info => tracing::debug!(notice = %self.message, "info"),
            NoticeLevel::Error => tracing::warn!(notice = %self.message, "error"),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
