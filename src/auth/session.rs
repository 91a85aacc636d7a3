//! The signed-in user and bearer token, persisted through a [`KeyValueStore`].
//!
//! Two keys are owned here: `user` holds the serialized [`User`] and `token`
//! holds the raw bearer token. A stored user that does not look like a user
//! is discarded on restore rather than trusted.

use serde_json::Value;

use crate::error::WorkflowError;
use crate::models::{Role, User};
use crate::traits::{KeyValueStore, StorageError};

pub const USER_KEY: &str = "user";
pub const TOKEN_KEY: &str = "token";

const REQUIRED_FIELDS: [&str; 5] = ["id", "username", "email", "role", "roleId"];

/// Why a stored user record was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreRejection {
    NotJson(String),
    NotAnObject,
    MissingField(&'static str),
    UnknownRole(String),
    Malformed(String),
}

impl std::fmt::Display for RestoreRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RestoreRejection::NotJson(e) => write!(f, "stored user is not valid JSON: {}", e),
            RestoreRejection::NotAnObject => write!(f, "stored user is not a JSON object"),
            RestoreRejection::MissingField(field) => {
                write!(f, "stored user is missing '{}'", field)
            }
            RestoreRejection::UnknownRole(role) => write!(f, "stored user has unknown role '{}'", role),
            RestoreRejection::Malformed(e) => write!(f, "stored user is malformed: {}", e),
        }
    }
}

/// Check the shape of a stored user record and decode it.
pub fn parse_stored_user(raw: &str) -> Result<User, RestoreRejection> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| RestoreRejection::NotJson(e.to_string()))?;
    let object = value.as_object().ok_or(RestoreRejection::NotAnObject)?;

    if let Some(missing) = REQUIRED_FIELDS
        .iter()
        .find(|field| !object.contains_key(**field))
    {
        return Err(RestoreRejection::MissingField(*missing));
    }

    let role = object.get("role").and_then(Value::as_str).unwrap_or_default();
    if Role::parse(role).is_none() {
        return Err(RestoreRejection::UnknownRole(role.to_string()));
    }

    serde_json::from_value(value).map_err(|e| RestoreRejection::Malformed(e.to_string()))
}

/// Session holder.
///
/// Starts unauthenticated, or from whatever [`SessionStore::restore`] finds.
#[derive(Debug)]
pub struct SessionStore<S> {
    store: S,
    user: Option<User>,
    token: Option<String>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// An unauthenticated session over `store`. Nothing is read.
    pub fn new(store: S) -> Self {
        Self {
            store,
            user: None,
            token: None,
        }
    }

    /// Load the persisted session.
    ///
    /// An invalid stored user is removed and the session starts
    /// unauthenticated. Storage failures are logged, never returned.
    pub async fn restore(store: S) -> Self {
        let mut session = Self::new(store);

        match session.store.get(USER_KEY).await {
            Ok(Some(raw)) => match parse_stored_user(&raw) {
                Ok(user) => {
                    tracing::debug!(user_id = %user.id, role = %user.role, "Restored session");
                    session.user = Some(user);
                }
                Err(rejection) => {
                    tracing::warn!("Discarding stored user: {}", rejection);
                    if let Err(e) = session.store.remove(USER_KEY).await {
                        tracing::warn!("Failed to remove invalid stored user: {}", e);
                    }
                }
            },
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to read stored user: {}", e),
        }

        match session.store.get(TOKEN_KEY).await {
            Ok(token) => session.token = token.filter(|t| !t.is_empty()),
            Err(e) => tracing::warn!("Failed to read stored token: {}", e),
        }

        session
    }

    /// Record a successful login and persist it.
    pub async fn login(&mut self, user: User, token: String) -> Result<(), StorageError> {
        let serialized =
            serde_json::to_string(&user).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set(USER_KEY, &serialized).await?;
        if let Err(e) = self.store.set(TOKEN_KEY, &token).await {
            if let Err(cleanup) = self.store.remove(USER_KEY).await {
                tracing::warn!("Failed to remove user after token write failed: {}", cleanup);
            }
            return Err(e);
        }
        tracing::info!(user_id = %user.id, role = %user.role, "Logged in");
        self.user = Some(user);
        self.token = Some(token);
        Ok(())
    }

    /// Replace the user after a profile edit.
    ///
    /// Identity fields (`id`, `email`, `role`, `roleId`, `mentorId`) always
    /// come from the current record; the rest comes from `updated`.
    pub async fn update_user(&mut self, updated: User) -> Result<&User, UpdateUserError> {
        let current = self.user.as_ref().ok_or(UpdateUserError::NotAuthenticated)?;
        let merged = User {
            id: current.id.clone(),
            email: current.email.clone(),
            role: current.role,
            role_id: current.role_id.clone(),
            mentor_id: current.mentor_id.clone(),
            ..updated
        };
        let serialized = serde_json::to_string(&merged)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set(USER_KEY, &serialized).await?;
        Ok(&*self.user.insert(merged))
    }

    /// Forget the user and token, in memory and in storage.
    pub async fn logout(&mut self) -> Result<(), StorageError> {
        self.user = None;
        self.token = None;
        self.store.remove(USER_KEY).await?;
        self.store.remove(TOKEN_KEY).await?;
        tracing::info!("Logged out");
        Ok(())
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn require_user(&self) -> Result<&User, WorkflowError> {
        self.user.as_ref().ok_or(WorkflowError::NotAuthenticated)
    }

    /// The current user, provided they hold `role`.
    pub fn require_role(&self, role: Role) -> Result<&User, WorkflowError> {
        let user = self.require_user()?;
        if user.role != role {
            return Err(WorkflowError::WrongRole {
                expected: role,
                actual: user.role,
            });
        }
        Ok(user)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Failure of [`SessionStore::update_user`].
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateUserError {
    NotAuthenticated,
    Storage(StorageError),
}

impl std::fmt::Display for UpdateUserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateUserError::NotAuthenticated => write!(f, "User is not authenticated"),
            UpdateUserError::Storage(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for UpdateUserError {}

impl From<StorageError> for UpdateUserError {
    fn from(e: StorageError) -> Self {
        UpdateUserError::Storage(e)
    }
}

impl From<UpdateUserError> for crate::error::MentorError {
    fn from(e: UpdateUserError) -> Self {
        match e {
            UpdateUserError::NotAuthenticated => WorkflowError::NotAuthenticated.into(),
            UpdateUserError::Storage(e) => e.into(),
        }
    }
}
