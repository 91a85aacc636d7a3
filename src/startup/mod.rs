//! Process startup: configuration, logging and dependency wiring.
//!
//! - [`config`] - [`ClientConfig`] defaults and `MENTORLINK_*` overrides
//! - [`logging`] - tracing subscriber
//!
//! [`Context::from_config`] builds the real HTTP client and file store;
//! tests build a [`Context`] from mocks with [`Context::new`].

pub mod config;
pub mod logging;

pub use config::ClientConfig;
pub use logging::init_tracing;

use std::sync::Arc;

use crate::adapters::{FileStore, ReqwestHttpClient};
use crate::api::ApiClient;
use crate::auth::SessionStore;
use crate::error::MentorError;
use crate::traits::{HttpClient, KeyValueStore};

/// Everything a command needs: the API gateway and the restored session.
pub struct Context<S> {
    pub api: ApiClient,
    pub session: SessionStore<S>,
}

impl<S: KeyValueStore> Context<S> {
    /// Restore the session from `store` and attach its token to the client.
    pub async fn new(http: Arc<dyn HttpClient>, base_url: &str, store: S) -> Self {
        let session = SessionStore::restore(store).await;
        let mut api = ApiClient::with_base_url(http, base_url);
        api.set_auth_token(session.token().map(str::to_string));
        Self { api, session }
    }
}

impl Context<FileStore> {
    pub async fn from_config(config: &ClientConfig) -> Result<Self, MentorError> {
        let http = Arc::new(ReqwestHttpClient::with_timeout(config.timeout()));
        let store = FileStore::at(config.session_path()?);
        tracing::debug!(base_url = %config.base_url, path = %store.path().display(), "Starting");
        Ok(Self::new(http, &config.base_url, store).await)
    }
}
