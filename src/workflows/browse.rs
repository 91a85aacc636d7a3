//! Mentee-side mentor search and mentorship requests.
//!
//! A mentee may hold at most one request per mentor. Once any status is
//! known for a mentor the request action is disabled and shows that status;
//! it moves from pending to accepted or rejected only through a refetch.

use std::collections::HashMap;

use crate::api::ApiClient;
use crate::error::{ApiError, MentorResult, WorkflowError};
use crate::models::{MentorProfile, RequestStatus};
use crate::notifications::Notice;

pub const SEARCH_FAILED: &str = "Error fetching mentors";
pub const REQUEST_FAILED: &str = "Failed to send request";
pub const REQUEST_SENT: &str = "Mentorship request sent!";

/// What the request control next to a mentor offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAction {
    Request,
    Disabled(RequestStatus),
}

impl RequestAction {
    pub fn label(&self) -> &'static str {
        match self {
            RequestAction::Request => "Request Mentorship",
            RequestAction::Disabled(RequestStatus::Pending) => "Request Pending",
            RequestAction::Disabled(RequestStatus::Accepted) => "Request Accepted",
            RequestAction::Disabled(RequestStatus::Rejected) => "Request Rejected",
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, RequestAction::Request)
    }
}

#[derive(Debug, Default)]
pub struct MentorBrowser {
    pub skill: String,
    pub industry: String,
    mentors: Vec<MentorProfile>,
    /// mentor id -> status of this mentee's request
    statuses: HashMap<String, RequestStatus>,
    loading: bool,
}

impl MentorBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filters(skill: impl Into<String>, industry: impl Into<String>) -> Self {
        Self {
            skill: skill.into(),
            industry: industry.into(),
            ..Self::default()
        }
    }

    /// Fetch mentors for the current filters, then request statuses.
    ///
    /// A failed status lookup is logged and the previous statuses are kept;
    /// it does not fail the search.
    pub async fn search(&mut self, api: &ApiClient) -> Result<usize, ApiError> {
        self.loading = true;
        let result = api.list_mentors(&self.skill, &self.industry).await;
        self.loading = false;
        self.mentors = result?;

        if let Err(e) = self.refresh_statuses(api).await {
            tracing::warn!("Could not fetch request statuses: {}", e);
        }
        Ok(self.mentors.len())
    }

    /// GET /mentorship/requests/sent
    pub async fn refresh_statuses(&mut self, api: &ApiClient) -> Result<(), ApiError> {
        let sent = api.sent_requests().await?;
        self.statuses = sent.into_iter().map(|r| (r.mentor_id, r.status)).collect();
        Ok(())
    }

    pub fn mentors(&self) -> &[MentorProfile] {
        &self.mentors
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn status_for(&self, mentor_id: &str) -> Option<RequestStatus> {
        self.statuses.get(mentor_id).copied()
    }

    pub fn action_for(&self, mentor_id: &str) -> RequestAction {
        match self.status_for(mentor_id) {
            Some(status) => RequestAction::Disabled(status),
            None => RequestAction::Request,
        }
    }

    /// POST /mentorship/request, unless a request to this mentor already exists.
    pub async fn request(&mut self, api: &ApiClient, mentor_id: &str) -> MentorResult<Notice> {
        if let Some(status) = self.status_for(mentor_id) {
            return Err(WorkflowError::AlreadyRequested(status).into());
        }
        let message = api.request_mentorship(mentor_id).await?;
        self.statuses
            .insert(mentor_id.to_string(), RequestStatus::Pending);
        tracing::info!(%mentor_id, "Mentorship request sent");
        Ok(Notice::success_or(message, REQUEST_SENT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use serde_json::json;
    use std::sync::Arc;

    const MENTORS: &str = "http://h/api/mentorship/mentors";
    const SENT: &str = "http://h/api/mentorship/requests/sent";
    const REQUEST: &str = "http://h/api/mentorship/request";

    fn api(mock: &MockHttpClient) -> ApiClient {
        ApiClient::with_base_url(Arc::new(mock.clone()), "http://h/api").with_auth("t")
    }

    fn mentors_json() -> serde_json::Value {
        json!([
            {"id": "m1", "username": "grace", "email": "g@x.io", "skills": ["cobol"]},
            {"id": "m2", "username": "linus", "email": "l@x.io", "skills": "c, git"}
        ])
    }

    #[tokio::test]
    async fn test_search_applies_statuses() {
        let mock = MockHttpClient::new();
        mock.set_response("GET", MENTORS, MockResponse::json(200, mentors_json()));
        mock.set_response(
            "GET",
            SENT,
            MockResponse::json(200, json!([{"mentorId": "m2", "status": "accepted"}])),
        );

        let mut browser = MentorBrowser::new();
        assert_eq!(browser.search(&api(&mock)).await.unwrap(), 2);
        assert_eq!(browser.mentors()[1].skills, vec!["c", "git"]);
        assert_eq!(browser.action_for("m1"), RequestAction::Request);
        assert_eq!(
            browser.action_for("m2"),
            RequestAction::Disabled(RequestStatus::Accepted)
        );
        assert!(!browser.action_for("m2").is_enabled());
    }

    #[tokio::test]
    async fn test_search_survives_status_failure() {
        let mock = MockHttpClient::new();
        mock.set_response("GET", MENTORS, MockResponse::json(200, mentors_json()));
        mock.set_response("GET", SENT, MockResponse::json(404, json!({})));

        let mut browser = MentorBrowser::with_filters("rust", "");
        assert_eq!(browser.search(&api(&mock)).await.unwrap(), 2);
        assert_eq!(mock.get_requests()[0].url, format!("{}?skill=rust", MENTORS));
    }

    #[tokio::test]
    async fn test_request_then_disabled_without_network_call() {
        let mock = MockHttpClient::new();
        mock.set_response("POST", REQUEST, MockResponse::json(201, json!({})));

        let mut browser = MentorBrowser::new();
        let notice = browser.request(&api(&mock), "m1").await.unwrap();
        assert_eq!(notice.message, REQUEST_SENT);
        assert_eq!(
            browser.action_for("m1"),
            RequestAction::Disabled(RequestStatus::Pending)
        );
        assert_eq!(browser.action_for("m1").label(), "Request Pending");

        let err = browser.request(&api(&mock), "m1").await.unwrap_err();
        assert!(err.is_local_rejection());
        assert_eq!(mock.requests_for("POST").len(), 1);
    }

    #[tokio::test]
    async fn test_refetch_moves_pending_to_terminal() {
        let mock = MockHttpClient::new();
        mock.set_response("POST", REQUEST, MockResponse::json(201, json!({})));
        mock.set_response(
            "GET",
            SENT,
            MockResponse::json(200, json!([{"mentorId": "m1", "status": "rejected"}])),
        );

        let mut browser = MentorBrowser::new();
        browser.request(&api(&mock), "m1").await.unwrap();
        browser.refresh_statuses(&api(&mock)).await.unwrap();
        assert_eq!(browser.status_for("m1"), Some(RequestStatus::Rejected));
    }

    #[tokio::test]
    async fn test_request_failure_uses_error_field() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "POST",
            REQUEST,
            MockResponse::json(400, json!({"error": "You already have a mentor"})),
        );

        let mut browser = MentorBrowser::new();
        let err = browser.request(&api(&mock), "m1").await.unwrap_err();
        assert_eq!(
            Notice::from_error(&err, REQUEST_FAILED).message,
            "You already have a mentor"
        );
        assert!(browser.status_for("m1").is_none());
    }
}
