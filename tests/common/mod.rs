//! Shared fixtures for integration tests.
//!
//! # Example
//!
//! ```ignore
//! let server = MockServer::start().await;
//! let mut ctx = signed_in(&server, mentor_user()).await;
//! ```

#![allow(dead_code)]

use std::sync::Arc;

use mentorlink::adapters::{MemoryStore, ReqwestHttpClient};
use mentorlink::api::ApiClient;
use mentorlink::startup::Context;
use serde_json::{json, Value};
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-token-12345";

pub fn admin_user() -> Value {
    json!({"id": "a1", "username": "root", "email": "root@example.com",
           "role": "admin", "roleId": "ad-1"})
}

pub fn mentor_user() -> Value {
    json!({"id": "u2", "username": "grace", "email": "grace@example.com",
           "role": "mentor", "roleId": "mr-1", "skills": ["rust", "sql"]})
}

pub fn mentee_user() -> Value {
    json!({"id": "u3", "username": "ada", "email": "ada@example.com",
           "role": "mentee", "roleId": "me-1", "mentorId": "mr-1", "skills": "compilers"})
}

/// API root on the mock server, the way the real deployment mounts it.
pub fn api_root(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

pub fn api_client(server: &MockServer) -> ApiClient {
    ApiClient::with_base_url(Arc::new(ReqwestHttpClient::new()), &api_root(server))
}

pub fn authed_client(server: &MockServer) -> ApiClient {
    api_client(server).with_auth(TEST_TOKEN)
}

/// A context whose stored session already holds `user` and the test token.
pub async fn signed_in(server: &MockServer, user: Value) -> Context<MemoryStore> {
    let store = MemoryStore::with_entry("token", TEST_TOKEN);
    store.insert("user", &user.to_string());
    Context::new(Arc::new(ReqwestHttpClient::new()), &api_root(server), store).await
}

pub async fn signed_out(server: &MockServer) -> Context<MemoryStore> {
    Context::new(
        Arc::new(ReqwestHttpClient::new()),
        &api_root(server),
        MemoryStore::new(),
    )
    .await
}

/// Run a command and capture what it printed.
pub async fn run_captured(
    command: mentorlink::cli::CliCommand,
    ctx: &mut Context<MemoryStore>,
) -> (Result<(), mentorlink::cli::CommandFailure>, String) {
    let mut buf = Vec::new();
    let result = mentorlink::cli::run(command, ctx, &mut buf).await;
    (result, String::from_utf8(buf).unwrap())
}
