//! Admin mentor assignment.
//!
//! The board lists every user, splits them into mentors and mentees on the
//! client, and assigns a mentor to a mentee. The selection is applied
//! optimistically, rolled back if the call fails, and replaced by the
//! server's match list once the call returns.

use std::collections::{HashMap, HashSet};

use crate::api::ApiClient;
use crate::error::{ApiError, MentorResult, WorkflowError};
use crate::models::{DirectoryUser, MentorshipMatch};
use crate::notifications::Notice;

pub const SELECT_MENTOR: &str = "Select Mentor";
pub const LOAD_FAILED: &str = "Error loading users or mentors";
pub const ASSIGN_FAILED: &str = "Assignment failed. Try again.";
pub const ASSIGN_SUCCEEDED: &str = "Mentor assigned successfully";
pub const MATCHES_FAILED: &str = "Error fetching mentorship matches";

/// One entry of the mentor picker shown next to a mentee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentorOption {
    /// `None` for the placeholder.
    pub mentor_id: Option<String>,
    pub label: String,
}

impl MentorOption {
    fn placeholder() -> Self {
        Self {
            mentor_id: None,
            label: SELECT_MENTOR.to_string(),
        }
    }
}

/// An assignment that has been applied locally and is waiting on the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignTicket {
    pub mentee_id: String,
    pub mentor_id: String,
    pub admin_id: String,
    previous: Option<String>,
}

#[derive(Debug, Default)]
pub struct AssignmentBoard {
    users: Vec<DirectoryUser>,
    /// menteeId -> mentorId
    assignments: HashMap<String, String>,
    matches: Vec<MentorshipMatch>,
    in_flight: HashSet<String>,
    loading: bool,
}

impl AssignmentBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Board over an already fetched user list.
    pub fn with_users(users: Vec<DirectoryUser>) -> Self {
        Self {
            users,
            ..Self::default()
        }
    }

    /// GET /admin/users. On failure the previous list is kept.
    pub async fn load(&mut self, api: &ApiClient) -> Result<usize, ApiError> {
        self.loading = true;
        let result = api.list_users().await;
        self.loading = false;
        let users = result?;
        tracing::debug!(count = users.len(), "Loaded user directory");
        self.users = users;
        Ok(self.users.len())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn users(&self) -> &[DirectoryUser] {
        &self.users
    }

    pub fn mentors(&self) -> Vec<&DirectoryUser> {
        self.users.iter().filter(|u| u.is_mentor()).collect()
    }

    pub fn mentees(&self) -> Vec<&DirectoryUser> {
        self.users.iter().filter(|u| u.is_mentee()).collect()
    }

    /// Picker entries for a mentee: the placeholder, then every mentor.
    pub fn options(&self) -> Vec<MentorOption> {
        std::iter::once(MentorOption::placeholder())
            .chain(self.mentors().into_iter().map(|m| MentorOption {
                mentor_id: Some(m.id.clone()),
                label: format!("{} ({})", m.username, m.email),
            }))
            .collect()
    }

    /// The mentor currently shown as selected for `mentee_id`.
    pub fn selected_for(&self, mentee_id: &str) -> Option<&str> {
        self.assignments.get(mentee_id).map(String::as_str)
    }

    pub fn is_assigning(&self, mentee_id: &str) -> bool {
        self.in_flight.contains(mentee_id)
    }

    /// Complete matches from the last refresh.
    pub fn matches(&self) -> &[MentorshipMatch] {
        &self.matches
    }

    /// Check and apply an assignment locally.
    ///
    /// Fails without touching state when no admin is signed in, either id is
    /// not in its partition, or this mentee already has an assignment in flight.
    pub fn begin_assign(
        &mut self,
        admin_id: Option<&str>,
        mentee_id: &str,
        mentor_id: &str,
    ) -> Result<AssignTicket, WorkflowError> {
        let admin_id = admin_id
            .filter(|id| !id.is_empty())
            .ok_or(WorkflowError::AdminNotLoggedIn)?;
        if !self.mentees().iter().any(|u| u.id == mentee_id) {
            return Err(WorkflowError::UnknownMentee(mentee_id.to_string()));
        }
        if !self.mentors().iter().any(|u| u.id == mentor_id) {
            return Err(WorkflowError::UnknownMentor(mentor_id.to_string()));
        }
        if !self.in_flight.insert(mentee_id.to_string()) {
            return Err(WorkflowError::AssignInFlight(mentee_id.to_string()));
        }

        let previous = self
            .assignments
            .insert(mentee_id.to_string(), mentor_id.to_string());

        Ok(AssignTicket {
            mentee_id: mentee_id.to_string(),
            mentor_id: mentor_id.to_string(),
            admin_id: admin_id.to_string(),
            previous,
        })
    }

    /// Settle an assignment with the server's answer. A failure restores the
    /// selection that was there before [`begin_assign`](Self::begin_assign).
    pub fn finish_assign(
        &mut self,
        ticket: AssignTicket,
        outcome: Result<Option<String>, ApiError>,
    ) -> MentorResult<Notice> {
        self.in_flight.remove(&ticket.mentee_id);
        match outcome {
            Ok(message) => {
                tracing::info!(
                    mentee_id = %ticket.mentee_id,
                    mentor_id = %ticket.mentor_id,
                    "Mentor assigned"
                );
                Ok(Notice::success_or(message, ASSIGN_SUCCEEDED))
            }
            Err(err) => {
                match ticket.previous {
                    Some(previous) => {
                        self.assignments.insert(ticket.mentee_id, previous);
                    }
                    None => {
                        self.assignments.remove(&ticket.mentee_id);
                    }
                }
                Err(err.into())
            }
        }
    }

    /// Assign, then refetch the match list as the source of truth.
    ///
    /// A failed refetch leaves the optimistic selection in place.
    pub async fn assign(
        &mut self,
        api: &ApiClient,
        admin_id: Option<&str>,
        mentee_id: &str,
        mentor_id: &str,
    ) -> MentorResult<Notice> {
        let ticket = self.begin_assign(admin_id, mentee_id, mentor_id)?;
        let outcome = api
            .assign_mentor(&ticket.mentor_id, &ticket.mentee_id, &ticket.admin_id)
            .await;
        let notice = self.finish_assign(ticket, outcome)?;

        if let Err(e) = self.refresh_matches(api).await {
            tracing::warn!("Could not refresh matches after assignment: {}", e);
        }
        Ok(notice)
    }

    /// GET /admin/mentorship-match and rebuild the selection map from it.
    ///
    /// Rows missing either id are dropped. Mentees with an assignment in
    /// flight keep their optimistic selection.
    pub async fn refresh_matches(&mut self, api: &ApiClient) -> Result<usize, ApiError> {
        let matches: Vec<MentorshipMatch> = api
            .list_matches()
            .await?
            .into_iter()
            .filter(MentorshipMatch::is_complete)
            .collect();

        let mut assignments: HashMap<String, String> = matches
            .iter()
            .filter_map(|m| Some((m.mentee_id.clone()?, m.mentor_id.clone()?)))
            .collect();
        for mentee_id in &self.in_flight {
            if let Some(mentor_id) = self.assignments.get(mentee_id) {
                assignments.insert(mentee_id.clone(), mentor_id.clone());
            }
        }

        self.assignments = assignments;
        self.matches = matches;
        Ok(self.matches.len())
    }
}
