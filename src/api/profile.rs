//! Profile completion endpoint.

use serde::Serialize;

use super::client::ApiClient;
use crate::error::ApiError;

/// Body of PUT /profile/setup.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub username: String,
    pub short_bio: String,
    pub goals: String,
    pub skills: Vec<String>,
    pub industry: String,
    pub experience: String,
    pub availability: String,
}

impl ApiClient {
    /// PUT /profile/setup
    pub async fn setup_profile(&self, profile: &ProfileUpdate) -> Result<Option<String>, ApiError> {
        self.put_for_message("/profile/setup", profile).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_setup_profile_payload() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, json!({})));
        let api = ApiClient::with_base_url(Arc::new(mock.clone()), "http://h/api").with_auth("t");

        let profile = ProfileUpdate {
            username: "ada".to_string(),
            short_bio: "Compiler person".to_string(),
            skills: vec!["rust".to_string(), "llvm".to_string()],
            ..Default::default()
        };
        api.setup_profile(&profile).await.unwrap();

        let request = &mock.requests_for("PUT")[0];
        assert_eq!(request.url, "http://h/api/profile/setup");
        let body = request.json().unwrap();
        assert_eq!(body["shortBio"], "Compiler person");
        assert_eq!(body["skills"], json!(["rust", "llvm"]));
    }
}
