//! Upcoming session listings for each role.
//!
//! Every refresh is a fresh fetch; nothing is cached between calls.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{Role, Session};

pub use crate::models::schedule::format_calendar_date as format_date;

pub const LOAD_FAILED: &str = "Failed to load sessions";
pub const ADMIN_LOAD_FAILED: &str = "Error fetching session data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionScope {
    Mentee,
    Mentor,
    Admin,
}

impl From<Role> for SessionScope {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => SessionScope::Admin,
            Role::Mentor => SessionScope::Mentor,
            Role::Mentee => SessionScope::Mentee,
        }
    }
}

#[derive(Debug)]
pub struct SessionListing {
    scope: SessionScope,
    sessions: Vec<Session>,
    loading: bool,
}

impl SessionListing {
    pub fn new(scope: SessionScope) -> Self {
        Self {
            scope,
            sessions: Vec::new(),
            loading: false,
        }
    }

    pub fn scope(&self) -> SessionScope {
        self.scope
    }

    pub async fn refresh(&mut self, api: &ApiClient) -> Result<usize, ApiError> {
        self.loading = true;
        let result = match self.scope {
            SessionScope::Mentee => api.mentee_sessions().await,
            SessionScope::Mentor => api.mentor_sessions().await,
            SessionScope::Admin => api.admin_sessions().await,
        };
        self.loading = false;
        self.sessions = result?;
        tracing::debug!(scope = ?self.scope, count = self.sessions.len(), "Sessions refreshed");
        Ok(self.sessions.len())
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn fallback_message(&self) -> &'static str {
        match self.scope {
            SessionScope::Admin => ADMIN_LOAD_FAILED,
            _ => LOAD_FAILED,
        }
    }
}

/// GET /admin/total-sessions
pub async fn admin_total_sessions(api: &ApiClient) -> Result<u64, ApiError> {
    api.total_sessions().await
}
