//! Mentorship requests and admin-created matches.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::de;

/// Lifecycle of a mentorship request.
///
/// `pending` is the only state a mentor can act on; the other two are final
/// from the client's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mentor's answer to a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    pub fn status(&self) -> RequestStatus {
        match self {
            Decision::Accept => RequestStatus::Accepted,
            Decision::Reject => RequestStatus::Rejected,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "accept" | "accepted" => Some(Decision::Accept),
            "reject" | "rejected" => Some(Decision::Reject),
            _ => None,
        }
    }
}

/// An incoming request as seen in the mentor's inbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorshipRequest {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub mentee_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub mentor_id: Option<String>,
    #[serde(default)]
    pub mentee_name: Option<String>,
    #[serde(default)]
    pub mentee_email: Option<String>,
    #[serde(default)]
    pub goals: Option<String>,
    pub status: RequestStatus,
}

/// A request the calling mentee has already sent, keyed by mentor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentRequest {
    #[serde(deserialize_with = "de::id")]
    pub mentor_id: String,
    pub status: RequestStatus,
}

/// An admin-created mentor/mentee pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentorshipMatch {
    #[serde(rename = "menteeId", default, deserialize_with = "de::opt_id")]
    pub mentee_id: Option<String>,
    #[serde(rename = "mentorId", default, deserialize_with = "de::opt_id")]
    pub mentor_id: Option<String>,
    #[serde(default)]
    pub mentee_username: String,
    #[serde(default)]
    pub mentee_email: String,
    #[serde(default)]
    pub mentor_username: String,
    #[serde(default)]
    pub mentor_email: String,
}

impl MentorshipMatch {
    /// Rows missing either side are dropped from listings.
    pub fn is_complete(&self) -> bool {
        let present = |id: &Option<String>| id.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.mentee_id) && present(&self.mentor_id)
    }
}
