//! Profile completion for mentors and mentees.

use crate::api::{ApiClient, ProfileUpdate};
use crate::auth::SessionStore;
use crate::error::{MentorResult, WorkflowError};
use crate::models::de::split_skills;
use crate::models::{Destination, User};
use crate::notifications::Notice;
use crate::traits::KeyValueStore;

pub const UPDATE_FAILED: &str = "Failed to update profile";
pub const UPDATE_SUCCEEDED: &str = "Profile updated successfully";

/// Editable profile fields. `username` and `email` are shown read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub username: String,
    pub email: String,
    pub short_bio: String,
    pub goals: String,
    /// Comma-separated, as typed.
    pub skills: String,
    pub industry: String,
    pub experience: String,
    pub availability: String,
}

impl ProfileForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            short_bio: user.short_bio.clone().unwrap_or_default(),
            goals: user.goals.clone().unwrap_or_default(),
            skills: user.skills_line(),
            industry: user.industry.clone().unwrap_or_default(),
            experience: user.experience.clone().unwrap_or_default(),
            availability: user.availability.clone().unwrap_or_default(),
        }
    }

    pub fn payload(&self) -> ProfileUpdate {
        ProfileUpdate {
            username: self.username.clone(),
            short_bio: self.short_bio.clone(),
            goals: self.goals.clone(),
            skills: split_skills(&self.skills),
            industry: self.industry.clone(),
            experience: self.experience.clone(),
            availability: self.availability.clone(),
        }
    }

    /// PUT /profile/setup, then store the edited user in the session.
    ///
    /// Returns the dashboard the user should land on next.
    pub async fn submit<S: KeyValueStore>(
        &self,
        api: &ApiClient,
        session: &mut SessionStore<S>,
    ) -> MentorResult<(Notice, Destination)> {
        let current = session
            .current_user()
            .cloned()
            .ok_or(WorkflowError::NotAuthenticated)?;
        let payload = self.payload();
        api.setup_profile(&payload).await?;

        let edited = User {
            username: payload.username,
            short_bio: Some(payload.short_bio),
            goals: Some(payload.goals),
            skills: Some(payload.skills),
            industry: Some(payload.industry),
            experience: Some(payload.experience),
            availability: Some(payload.availability),
            ..current
        };
        let user = session.update_user(edited).await?;
        tracing::info!(user_id = %user.id, "Profile updated");
        Ok((Notice::success(UPDATE_SUCCEEDED), Destination::Dashboard(user.role)))
    }
}
