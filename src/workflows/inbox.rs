//! Mentor-side inbox of incoming mentorship requests.

use std::collections::HashSet;

use crate::api::ApiClient;
use crate::error::{ApiError, MentorResult, WorkflowError};
use crate::models::{Decision, MentorshipRequest, RequestStatus};
use crate::notifications::Notice;

pub const LOAD_FAILED: &str = "Failed to load mentorship requests";
pub const RESPOND_FAILED: &str = "Failed to respond";

/// A response that has been started for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseTicket {
    pub request_id: String,
    pub decision: Decision,
}

#[derive(Debug, Default)]
pub struct RequestInbox {
    mentor_role_id: Option<String>,
    requests: Vec<MentorshipRequest>,
    /// Rows with a response in flight; only their controls are disabled.
    responding: HashSet<String>,
    loading: bool,
}

impl RequestInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// GET /mentorship/incoming/:mentorId for the mentor's role id.
    pub async fn load(&mut self, api: &ApiClient, mentor_role_id: &str) -> Result<usize, ApiError> {
        self.mentor_role_id = Some(mentor_role_id.to_string());
        self.reload(api).await
    }

    async fn reload(&mut self, api: &ApiClient) -> Result<usize, ApiError> {
        let Some(role_id) = self.mentor_role_id.clone() else {
            return Ok(0);
        };
        self.loading = true;
        let result = api.incoming_requests(&role_id).await;
        self.loading = false;
        self.requests = result?;
        Ok(self.requests.len())
    }

    pub fn requests(&self) -> &[MentorshipRequest] {
        &self.requests
    }

    pub fn pending(&self) -> impl Iterator<Item = &MentorshipRequest> {
        self.requests
            .iter()
            .filter(|r| r.status == RequestStatus::Pending)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_responding(&self, request_id: &str) -> bool {
        self.responding.contains(request_id)
    }

    /// Whether the accept/reject controls for a row are usable.
    pub fn can_respond(&self, request_id: &str) -> bool {
        self.find(request_id)
            .is_some_and(|r| r.status == RequestStatus::Pending)
            && !self.is_responding(request_id)
    }

    fn find(&self, request_id: &str) -> Option<&MentorshipRequest> {
        self.requests.iter().find(|r| r.id == request_id)
    }

    /// Mark a pending row as responding.
    pub fn begin_response(
        &mut self,
        request_id: &str,
        decision: Decision,
    ) -> Result<ResponseTicket, WorkflowError> {
        let request = self
            .find(request_id)
            .ok_or_else(|| WorkflowError::UnknownRequest(request_id.to_string()))?;
        if request.status != RequestStatus::Pending {
            return Err(WorkflowError::NotPending {
                id: request_id.to_string(),
                status: request.status,
            });
        }
        if !self.responding.insert(request_id.to_string()) {
            return Err(WorkflowError::AlreadyResponding(request_id.to_string()));
        }
        Ok(ResponseTicket {
            request_id: request_id.to_string(),
            decision,
        })
    }

    /// Clear the row's responding mark and turn the outcome into a notice.
    ///
    /// On success the row takes the decided status, so it is no longer
    /// actionable even if the following refetch fails.
    pub fn finish_response(
        &mut self,
        ticket: &ResponseTicket,
        outcome: Result<Option<String>, ApiError>,
    ) -> MentorResult<Notice> {
        self.responding.remove(&ticket.request_id);
        outcome?;
        let status = ticket.decision.status();
        if let Some(row) = self.requests.iter_mut().find(|r| r.id == ticket.request_id) {
            row.status = status;
        }
        tracing::info!(request_id = %ticket.request_id, %status, "Responded to request");
        Ok(Notice::success(format!("Request {}", status)))
    }

    /// Accept or reject a pending request, then refetch the list.
    ///
    /// A failed refetch keeps the locally updated rows.
    pub async fn respond(
        &mut self,
        api: &ApiClient,
        request_id: &str,
        decision: Decision,
    ) -> MentorResult<Notice> {
        let ticket = self.begin_response(request_id, decision)?;
        let outcome = api
            .respond_to_request(&ticket.request_id, decision.status())
            .await;
        let notice = self.finish_response(&ticket, outcome)?;

        if let Err(e) = self.reload(api).await {
            tracing::warn!("Could not refresh requests after responding: {}", e);
        }
        Ok(notice)
    }
}
