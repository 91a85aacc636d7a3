//! Admin endpoints: user directory, assignments and session statistics.

use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use crate::error::ApiError;
use crate::models::{DirectoryUser, MentorshipMatch, Role, RoleInfo, Session};

/// Body of POST /admin/add-user and PUT /admin/users/:id/role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPayload {
    pub username: String,
    pub email: String,
    /// Empty on edit means "leave unchanged".
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Assignment<'a> {
    mentor_id: &'a str,
    mentee_id: &'a str,
    admin_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct SessionsEnvelope {
    #[serde(default)]
    sessions: Option<Vec<Session>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TotalSessions {
    total_sessions: u64,
}

impl ApiClient {
    /// GET /admin/users
    pub async fn list_users(&self) -> Result<Vec<DirectoryUser>, ApiError> {
        self.get_list("/admin/users").await
    }

    /// GET /admin/user/:id
    pub async fn get_user(&self, id: &str) -> Result<DirectoryUser, ApiError> {
        self.get(&format!("/admin/user/{}", urlencoding::encode(id))).await
    }

    /// POST /admin/add-user
    pub async fn add_user(&self, user: &UserPayload) -> Result<Option<String>, ApiError> {
        self.post_for_message("/admin/add-user", user).await
    }

    /// PUT /admin/users/:id/role
    pub async fn update_user(&self, id: &str, user: &UserPayload) -> Result<Option<String>, ApiError> {
        self.put_for_message(&format!("/admin/users/{}/role", urlencoding::encode(id)), user)
            .await
    }

    /// POST /admin/assign-mentor
    pub async fn assign_mentor(
        &self,
        mentor_id: &str,
        mentee_id: &str,
        admin_id: &str,
    ) -> Result<Option<String>, ApiError> {
        let body = Assignment {
            mentor_id,
            mentee_id,
            admin_id,
        };
        self.post_for_message("/admin/assign-mentor", &body).await
    }

    /// GET /admin/mentorship-match
    pub async fn list_matches(&self) -> Result<Vec<MentorshipMatch>, ApiError> {
        self.get_list("/admin/mentorship-match").await
    }

    /// GET /admin/sessions
    ///
    /// The sessions arrive wrapped as `{"sessions": [...]}`; a missing or
    /// null field is an empty list.
    pub async fn admin_sessions(&self) -> Result<Vec<Session>, ApiError> {
        let envelope: SessionsEnvelope = self.get("/admin/sessions").await?;
        Ok(envelope.sessions.unwrap_or_default())
    }

    /// GET /admin/total-sessions
    pub async fn total_sessions(&self) -> Result<u64, ApiError> {
        let totals: TotalSessions = self.get("/admin/total-sessions").await?;
        Ok(totals.total_sessions)
    }

    /// GET /admin/info/:roleId
    pub async fn admin_info(&self, role_id: &str) -> Result<RoleInfo, ApiError> {
        self.get(&format!("/admin/info/{}", urlencoding::encode(role_id))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use serde_json::json;
    use std::sync::Arc;

    const BASE: &str = "http://h/api";

    fn api(mock: &MockHttpClient) -> ApiClient {
        ApiClient::with_base_url(Arc::new(mock.clone()), BASE).with_auth("t")
    }

    #[tokio::test]
    async fn test_admin_sessions_envelope() {
        let mock = MockHttpClient::new();
        mock.push_response(
            "GET",
            "http://h/api/admin/sessions",
            MockResponse::json(
                200,
                json!({"sessions": [{"id": 1, "date": "2025-03-01", "start_time": "09:00",
                    "end_time": "10:00", "mentorUsername": "m", "menteeUsername": "e"}]}),
            ),
        );
        mock.push_response("GET", "http://h/api/admin/sessions", MockResponse::json(200, json!({})));

        let sessions = api(&mock).admin_sessions().await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].mentor_username.as_deref(), Some("m"));

        assert!(api(&mock).admin_sessions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_total_sessions() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, json!({"totalSessions": 12})));
        assert_eq!(api(&mock).total_sessions().await.unwrap(), 12);
    }

    #[tokio::test]
    async fn test_assign_mentor_body() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, json!({"message": "Mentor assigned"})));

        let message = api(&mock).assign_mentor("m1", "e1", "a1").await.unwrap();
        assert_eq!(message.as_deref(), Some("Mentor assigned"));

        let request = &mock.get_requests()[0];
        assert_eq!(request.url, "http://h/api/admin/assign-mentor");
        assert_eq!(
            request.json().unwrap(),
            json!({"mentorId": "m1", "menteeId": "e1", "adminId": "a1"})
        );
    }

    #[tokio::test]
    async fn test_update_user_uses_put_and_role_path() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, json!({})));

        let payload = UserPayload {
            username: "grace".to_string(),
            email: "g@x.io".to_string(),
            password: String::new(),
            role: Role::Mentor,
        };
        api(&mock).update_user("42", &payload).await.unwrap();

        let request = &mock.requests_for("PUT")[0];
        assert_eq!(request.url, "http://h/api/admin/users/42/role");
        assert_eq!(request.json().unwrap()["role"], "mentor");
    }
}
