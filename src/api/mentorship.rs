//! Mentorship endpoints used by mentees and mentors.

use serde::Serialize;

use super::client::ApiClient;
use crate::error::ApiError;
use crate::models::{
    AssignedMentee, AvailabilitySlot, MentorProfile, MentorshipRequest, RequestStatus, RoleInfo,
    SentRequest, Session, TimeOfDay,
};

/// Body of POST /mentorship/book-session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRequest {
    #[serde(rename = "mentorId")]
    pub mentor_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

/// Query string for the mentor search; empty filters are left out.
pub fn mentor_query(skill: &str, industry: &str) -> String {
    let params: Vec<String> = [("skill", skill.trim()), ("industry", industry.trim())]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect();
    if params.is_empty() {
        String::new()
    } else {
        format!("?{}", params.join("&"))
    }
}

impl ApiClient {
    /// GET /mentorship/mentors
    pub async fn list_mentors(&self, skill: &str, industry: &str) -> Result<Vec<MentorProfile>, ApiError> {
        self.get_list(&format!("/mentorship/mentors{}", mentor_query(skill, industry)))
            .await
    }

    /// POST /mentorship/request
    pub async fn request_mentorship(&self, mentor_id: &str) -> Result<Option<String>, ApiError> {
        self.post_for_message("/mentorship/request", &serde_json::json!({ "mentorId": mentor_id }))
            .await
    }

    /// GET /mentorship/requests/sent
    ///
    /// Status of every request the signed-in mentee has sent.
    pub async fn sent_requests(&self) -> Result<Vec<SentRequest>, ApiError> {
        self.get_list("/mentorship/requests/sent").await
    }

    /// GET /mentorship/incoming/:mentorId
    pub async fn incoming_requests(&self, mentor_role_id: &str) -> Result<Vec<MentorshipRequest>, ApiError> {
        self.get_list(&format!(
            "/mentorship/incoming/{}",
            urlencoding::encode(mentor_role_id)
        ))
        .await
    }

    /// POST /mentorship/requests/respond/:id
    pub async fn respond_to_request(
        &self,
        request_id: &str,
        status: RequestStatus,
    ) -> Result<Option<String>, ApiError> {
        self.post_for_message(
            &format!("/mentorship/requests/respond/{}", urlencoding::encode(request_id)),
            &serde_json::json!({ "status": status }),
        )
        .await
    }

    /// GET /mentorship/availability/mentor
    pub async fn mentor_availability(&self) -> Result<Vec<AvailabilitySlot>, ApiError> {
        self.get_list("/mentorship/availability/mentor").await
    }

    /// DELETE /mentorship/availability
    pub async fn clear_availability(&self) -> Result<Option<String>, ApiError> {
        self.delete_for_message("/mentorship/availability").await
    }

    /// POST /mentorship/availability
    pub async fn add_availability(&self, slot: &AvailabilitySlot) -> Result<Option<String>, ApiError> {
        self.post_for_message("/mentorship/availability", slot).await
    }

    /// GET /mentorship/sessions/mentee
    pub async fn mentee_sessions(&self) -> Result<Vec<Session>, ApiError> {
        self.get_list("/mentorship/sessions/mentee").await
    }

    /// Upcoming sessions for the signed-in mentor.
    ///
    /// The server resolves the caller from the token, so mentors read the
    /// same path as mentees: GET /mentorship/sessions/mentee
    pub async fn mentor_sessions(&self) -> Result<Vec<Session>, ApiError> {
        self.get_list("/mentorship/sessions/mentee").await
    }

    /// POST /mentorship/book-session
    pub async fn book_session(&self, booking: &BookingRequest) -> Result<Option<String>, ApiError> {
        self.post_for_message("/mentorship/book-session", booking).await
    }

    /// GET /mentorship/assigned-mentees
    pub async fn assigned_mentees(&self) -> Result<Vec<AssignedMentee>, ApiError> {
        self.get_list("/mentorship/assigned-mentees").await
    }

    /// GET /mentorship/mentor/info/:roleId
    pub async fn mentor_info(&self, role_id: &str) -> Result<RoleInfo, ApiError> {
        self.get(&format!("/mentorship/mentor/info/{}", urlencoding::encode(role_id)))
            .await
    }

    /// GET /mentorship/mentee/info/:roleId
    pub async fn mentee_info(&self, role_id: &str) -> Result<RoleInfo, ApiError> {
        self.get(&format!("/mentorship/mentee/info/{}", urlencoding::encode(role_id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::models::Weekday;
    use serde_json::json;
    use std::sync::Arc;

    fn api(mock: &MockHttpClient) -> ApiClient {
        ApiClient::with_base_url(Arc::new(mock.clone()), "http://h/api").with_auth("t")
    }

    #[test]
    fn test_mentor_query() {
        assert_eq!(mentor_query("", ""), "");
        assert_eq!(mentor_query("rust", ""), "?skill=rust");
        assert_eq!(mentor_query("", "fin tech"), "?industry=fin%20tech");
        assert_eq!(mentor_query(" go ", "ai"), "?skill=go&industry=ai");
    }

    #[tokio::test]
    async fn test_list_mentors_url() {
        let mock = MockHttpClient::new();
        mock.set_response("GET", "http://h/api/mentorship/mentors", MockResponse::json(200, json!([])));

        api(&mock).list_mentors("", "").await.unwrap();
        api(&mock).list_mentors("c++", "").await.unwrap();

        let urls: Vec<String> = mock.get_requests().into_iter().map(|r| r.url).collect();
        assert_eq!(urls[0], "http://h/api/mentorship/mentors");
        assert_eq!(urls[1], "http://h/api/mentorship/mentors?skill=c%2B%2B");
    }

    #[tokio::test]
    async fn test_respond_body() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, json!({})));

        api(&mock)
            .respond_to_request("17", RequestStatus::Rejected)
            .await
            .unwrap();
        let request = &mock.get_requests()[0];
        assert_eq!(request.url, "http://h/api/mentorship/requests/respond/17");
        assert_eq!(request.json().unwrap(), json!({"status": "rejected"}));
    }

    #[tokio::test]
    async fn test_add_availability_wire_format() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(201, json!({})));

        let slot = AvailabilitySlot {
            day_of_week: Weekday::Tuesday,
            start_time: TimeOfDay::new(9, 0).unwrap(),
            end_time: TimeOfDay::new(11, 30).unwrap(),
        };
        api(&mock).add_availability(&slot).await.unwrap();
        assert_eq!(
            mock.get_requests()[0].json().unwrap(),
            json!({"day_of_week": "Tuesday", "start_time": "09:00", "end_time": "11:30"})
        );
    }

    #[tokio::test]
    async fn test_mentor_sessions_shares_mentee_path() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, json!([])));

        api(&mock).mentor_sessions().await.unwrap();
        assert_eq!(mock.get_requests()[0].url, "http://h/api/mentorship/sessions/mentee");
    }

    #[tokio::test]
    async fn test_book_session_body() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(201, json!({"message": "Session booked"})));

        let booking = BookingRequest {
            mentor_id: "m9".to_string(),
            date: "2025-03-01".to_string(),
            start_time: TimeOfDay::new(9, 0).unwrap(),
            end_time: TimeOfDay::new(10, 0).unwrap(),
        };
        let message = api(&mock).book_session(&booking).await.unwrap();
        assert_eq!(message.as_deref(), Some("Session booked"));
        assert_eq!(
            mock.get_requests()[0].json().unwrap(),
            json!({"mentorId": "m9", "date": "2025-03-01", "start_time": "09:00", "end_time": "10:00"})
        );
    }
}
