//! Mentor view of the mentees assigned to them.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::AssignedMentee;

pub const LOAD_FAILED: &str = "Error fetching assigned mentees data";

#[derive(Debug, Default)]
pub struct MenteeRoster {
    mentees: Vec<AssignedMentee>,
    loading: bool,
}

impl MenteeRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// GET /mentorship/assigned-mentees; the server picks the mentor from
    /// the token.
    pub async fn refresh(&mut self, api: &ApiClient) -> Result<usize, ApiError> {
        self.loading = true;
        let result = api.assigned_mentees().await;
        self.loading = false;
        self.mentees = result?;
        tracing::debug!(count = self.mentees.len(), "Assigned mentees refreshed");
        Ok(self.mentees.len())
    }

    pub fn mentees(&self) -> &[AssignedMentee] {
        &self.mentees
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use serde_json::json;
    use std::sync::Arc;

    const ASSIGNED: &str = "http://h/api/mentorship/assigned-mentees";

    fn api(mock: &MockHttpClient) -> ApiClient {
        ApiClient::with_base_url(Arc::new(mock.clone()), "http://h/api").with_auth("t")
    }

    #[tokio::test]
    async fn test_refresh_lists_assigned_mentees() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "GET",
            ASSIGNED,
            MockResponse::json(
                200,
                json!([
                    {"id": 7, "username": "ada", "email": "ada@x.io", "industry": "Fintech"},
                    {"id": "8", "username": "bob", "email": "bob@x.io", "experience": "2 years"}
                ]),
            ),
        );

        let mut roster = MenteeRoster::new();
        assert_eq!(roster.refresh(&api(&mock)).await.unwrap(), 2);
        assert_eq!(roster.mentees()[0].id, "7");
        assert_eq!(roster.mentees()[0].industry.as_deref(), Some("Fintech"));
        assert_eq!(roster.mentees()[1].experience.as_deref(), Some("2 years"));
        assert!(!roster.is_loading());

        let request = &mock.get_requests()[0];
        assert_eq!(request.headers.get("Authorization").map(String::as_str), Some("Bearer t"));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_rows() {
        let mock = MockHttpClient::new();
        mock.push_response(
            "GET",
            ASSIGNED,
            MockResponse::json(200, json!([{"id": 7, "username": "ada", "email": "ada@x.io"}])),
        );
        mock.set_response("GET", ASSIGNED, MockResponse::json(500, json!({})));

        let mut roster = MenteeRoster::new();
        roster.refresh(&api(&mock)).await.unwrap();
        let err = roster.refresh(&api(&mock)).await.unwrap_err();

        assert_eq!(err.message_or(LOAD_FAILED), LOAD_FAILED);
        assert_eq!(roster.mentees().len(), 1);
    }
}
