//! Sign-in, registration, password reset and admin user management.

use crate::api::{ApiClient, Registration, UserPayload};
use crate::auth::SessionStore;
use crate::error::{ApiError, MentorResult, ValidationError};
use crate::models::{Destination, Role, RoleInfo, User};
use crate::notifications::Notice;
use crate::traits::KeyValueStore;
use crate::validation;

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTER_FAILED: &str = "Registration failed";
pub const REGISTER_SUCCEEDED: &str = "Registration successful. Please log in.";
pub const FORGOT_FAILED: &str = "Could not send reset link.";
pub const FORGOT_SUCCEEDED: &str = "Password reset link sent to your email.";
pub const RESET_FAILED: &str = "Reset failed.";
pub const RESET_SUCCEEDED: &str = "Password reset successfully. Please log in.";
pub const CREATE_FAILED: &str = "Error creating user";
pub const CREATE_SUCCEEDED: &str = "User created successfully";
pub const UPDATE_FAILED: &str = "Error updating user";
pub const UPDATE_SUCCEEDED: &str = "User updated successfully";
pub const INFO_FAILED: &str = "Error fetching dashboard data";

/// POST /auth/login, persist the session and attach the token to `api`.
pub async fn login<S: KeyValueStore>(
    api: &mut ApiClient,
    session: &mut SessionStore<S>,
    email: &str,
    password: &str,
) -> MentorResult<Destination> {
    let email = validation::require("Email", email)?;
    validation::require("Password", password)?;

    let response = api.login(email, password).await?;
    session.login(response.user, response.token).await?;
    api.set_auth_token(session.token().map(str::to_string));

    let user = session.require_user()?;
    let destination = user.destination();
    tracing::debug!(user_id = %user.id, path = destination.path(), "Routing after login");
    Ok(destination)
}

/// Clear the stored session and drop the token from `api`.
pub async fn logout<S: KeyValueStore>(
    api: &mut ApiClient,
    session: &mut SessionStore<S>,
) -> MentorResult<()> {
    session.logout().await?;
    api.set_auth_token(None);
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<Registration<'_>, ValidationError> {
        let username = validation::require("Username", &self.username)?;
        let email = validation::require("Email", &self.email)?;
        validation::require("Password", &self.password)?;
        validation::require("Role", &self.role)?;
        validation::username(username)?;
        validation::email(email)?;
        validation::password(&self.password)?;
        let role = validation::role(&self.role)?;

        Ok(Registration {
            email,
            password: &self.password,
            username,
            role,
        })
    }

    /// POST /auth/register. The user still has to log in afterwards.
    pub async fn submit(&self, api: &ApiClient) -> MentorResult<Notice> {
        let registration = self.validate()?;
        let message = api.register(&registration).await?;
        tracing::info!(role = %registration.role, "Registered account");
        Ok(Notice::success_or(message, REGISTER_SUCCEEDED))
    }
}

/// POST /auth/forgot-password
pub async fn forgot_password(api: &ApiClient, email: &str) -> MentorResult<Notice> {
    let email = validation::require("Email", email)?;
    validation::email(email)?;
    let message = api.forgot_password(email).await?;
    Ok(Notice::success_or(message, FORGOT_SUCCEEDED))
}

/// POST /auth/reset-password with the token from the emailed link.
pub async fn reset_password(api: &ApiClient, token: &str, new_password: &str) -> MentorResult<Notice> {
    let token = validation::require("Reset token", token)?;
    validation::password(new_password)?;
    let message = api.reset_password(token, new_password).await?;
    Ok(Notice::success_or(message, RESET_SUCCEEDED))
}

/// Whether a [`UserForm`] creates a user or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFormMode {
    Add,
    Edit(String),
}

/// Admin form for adding or editing a directory user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserForm {
    pub mode: UserFormMode,
    pub username: String,
    pub email: String,
    /// Required on add; empty on edit keeps the current password.
    pub password: String,
    pub role: Role,
}

impl UserForm {
    pub fn add() -> Self {
        Self {
            mode: UserFormMode::Add,
            username: String::new(),
            email: String::new(),
            password: String::new(),
            role: Role::Mentee,
        }
    }

    /// GET /admin/user/:id and prefill an edit form.
    pub async fn edit(api: &ApiClient, id: &str) -> Result<Self, ApiError> {
        let user = api.get_user(id).await?;
        Ok(Self {
            mode: UserFormMode::Edit(user.id.clone()),
            role: user.role().unwrap_or(Role::Mentee),
            username: user.username,
            email: user.email,
            password: String::new(),
        })
    }

    pub fn fallback_message(&self) -> &'static str {
        match self.mode {
            UserFormMode::Add => CREATE_FAILED,
            UserFormMode::Edit(_) => UPDATE_FAILED,
        }
    }

    pub fn validate(&self) -> Result<UserPayload, ValidationError> {
        validation::username(&self.username)?;
        validation::email(self.email.trim())?;
        match self.mode {
            UserFormMode::Add => validation::password(&self.password)?,
            UserFormMode::Edit(_) => validation::optional_password(&self.password)?,
        }
        Ok(UserPayload {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: self.role,
        })
    }

    /// POST /admin/add-user or PUT /admin/users/:id/role.
    pub async fn submit(&self, api: &ApiClient) -> MentorResult<Notice> {
        let payload = self.validate()?;
        let notice = match &self.mode {
            UserFormMode::Add => {
                let message = api.add_user(&payload).await?;
                Notice::success_or(message, CREATE_SUCCEEDED)
            }
            UserFormMode::Edit(id) => {
                let message = api.update_user(id, &payload).await?;
                Notice::success_or(message, UPDATE_SUCCEEDED)
            }
        };
        tracing::info!(mode = ?self.mode, role = %payload.role, "Saved user");
        Ok(notice)
    }
}

/// Header data for the signed-in user's dashboard.
pub async fn dashboard_info(api: &ApiClient, user: &User) -> Result<RoleInfo, ApiError> {
    match user.role {
        Role::Admin => api.admin_info(&user.role_id).await,
        Role::Mentor => api.mentor_info(&user.role_id).await,
        Role::Mentee => api.mentee_info(&user.role_id).await,
    }
}
