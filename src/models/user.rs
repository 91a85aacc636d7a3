//! User accounts and roles.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::de;

/// The three roles that drive authorization and dashboard selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Mentor,
    Mentee,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Mentor, Role::Mentee];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Mentor => "mentor",
            Role::Mentee => "mentee",
        }
    }

    /// Parse a role name exactly as the API spells it.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.as_str() == s)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a signed-in user lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Dashboard(Role),
    /// Mentors and mentees without skills must complete their profile first.
    ProfileSetup,
}

impl Destination {
    pub fn path(&self) -> &'static str {
        match self {
            Destination::Dashboard(Role::Admin) => "/dashboard/admin",
            Destination::Dashboard(Role::Mentor) => "/dashboard/mentor",
            Destination::Dashboard(Role::Mentee) => "/dashboard/mentee",
            Destination::ProfileSetup => "/update-profile",
        }
    }
}

/// The authenticated user as returned by `/auth/login` and persisted locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(deserialize_with = "de::id")]
    pub role_id: String,
    #[serde(default, deserialize_with = "de::opt_id", skip_serializing_if = "Option::is_none")]
    pub mentor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<String>,
    #[serde(default, deserialize_with = "de::opt_skills", skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
}

impl User {
    /// Mentors and mentees must list at least one skill before using a dashboard.
    pub fn needs_profile_completion(&self) -> bool {
        matches!(self.role, Role::Mentor | Role::Mentee)
            && self.skills.as_ref().map_or(true, |s| s.is_empty())
    }

    pub fn destination(&self) -> Destination {
        if self.needs_profile_completion() {
            Destination::ProfileSetup
        } else {
            Destination::Dashboard(self.role)
        }
    }

    /// Skills joined for display and for editing as a single field.
    pub fn skills_line(&self) -> String {
        self.skills
            .as_deref()
            .map(|s| s.join(", "))
            .unwrap_or_default()
    }
}

/// An entry of the admin user directory (`GET /admin/users`).
///
/// The role is kept as a raw string: rows with an unknown role are listed
/// but belong to neither the mentor nor the mentee partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryUser {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

impl DirectoryUser {
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(Role::parse)
    }

    pub fn is_mentor(&self) -> bool {
        self.role() == Some(Role::Mentor)
    }

    pub fn is_mentee(&self) -> bool {
        self.role() == Some(Role::Mentee)
    }
}

/// Role dashboard header data (`/admin/info/:id`, `/mentorship/{mentor,mentee}/info/:id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleInfo {
    #[serde(default, deserialize_with = "de::opt_id")]
    pub user_id: Option<String>,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// A mentor as listed by the mentee-side browse endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorProfile {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub mentor_id: Option<String>,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub short_bio: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default, deserialize_with = "de::skills")]
    pub skills: Vec<String>,
}

/// A mentee assigned to the calling mentor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedMentee {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
}
