//! Account endpoints: login, registration and password reset.

use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Role, User};

/// Response from POST /auth/login.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub username: &'a str,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordReset<'a> {
    token: &'a str,
    new_password: &'a str,
}

impl ApiClient {
    /// POST /auth/login
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.post("/auth/login", &Credentials { email, password }).await
    }

    /// POST /auth/register
    pub async fn register(&self, registration: &Registration<'_>) -> Result<Option<String>, ApiError> {
        self.post_for_message("/auth/register", registration).await
    }

    /// POST /auth/forgot-password
    pub async fn forgot_password(&self, email: &str) -> Result<Option<String>, ApiError> {
        self.post_for_message("/auth/forgot-password", &serde_json::json!({ "email": email }))
            .await
    }

    /// POST /auth/reset-password
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<Option<String>, ApiError> {
        self.post_for_message("/auth/reset-password", &PasswordReset { token, new_password })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_login_decodes_user_and_token() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "POST",
            "http://h/api/auth/login",
            MockResponse::json(
                200,
                json!({
                    "token": "jwt",
                    "user": {"id": 1, "username": "ada", "email": "a@x.io", "role": "admin", "roleId": 4}
                }),
            ),
        );
        let api = ApiClient::with_base_url(Arc::new(mock.clone()), "http://h/api");

        let login = api.login("a@x.io", "secret").await.unwrap();
        assert_eq!(login.token, "jwt");
        assert_eq!(login.user.role, Role::Admin);
        assert_eq!(login.user.role_id, "4");

        let body = mock.get_requests()[0].json().unwrap();
        assert_eq!(body, json!({"email": "a@x.io", "password": "secret"}));
    }

    #[tokio::test]
    async fn test_reset_password_body_is_camel_case() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, json!({})));
        let api = ApiClient::with_base_url(Arc::new(mock.clone()), "http://h/api");

        api.reset_password("reset-tok", "newsecret").await.unwrap();
        let body = mock.get_requests()[0].json().unwrap();
        assert_eq!(body, json!({"token": "reset-tok", "newPassword": "newsecret"}));
    }

    #[tokio::test]
    async fn test_register_sends_lowercase_role() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(201, json!({"message": "Registered"})));
        let api = ApiClient::with_base_url(Arc::new(mock.clone()), "http://h/api");

        let message = api
            .register(&Registration {
                email: "m@x.io",
                password: "secret1",
                username: "mentor1",
                role: Role::Mentor,
            })
            .await
            .unwrap();
        assert_eq!(message.as_deref(), Some("Registered"));
        assert_eq!(mock.get_requests()[0].json().unwrap()["role"], "mentor");
    }
}
