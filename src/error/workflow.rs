//! Workflow rule violations and multi-step failures.

use thiserror::Error;

use super::api::ApiError;
use crate::models::{RequestStatus, Role, Weekday};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkflowError {
    #[error("You are not logged in.")]
    NotAuthenticated,

    #[error("This action requires the {expected} role (signed in as {actual}).")]
    WrongRole { expected: Role, actual: Role },

    #[error("Admin not logged in.")]
    AdminNotLoggedIn,

    #[error("No mentee with id {0}.")]
    UnknownMentee(String),

    #[error("No mentor with id {0}.")]
    UnknownMentor(String),

    #[error("An assignment for mentee {0} is already in progress.")]
    AssignInFlight(String),

    #[error("You already have a {0} request with this mentor.")]
    AlreadyRequested(RequestStatus),

    #[error("No request with id {0}.")]
    UnknownRequest(String),

    #[error("Request {id} is already {status}.")]
    NotPending { id: String, status: RequestStatus },

    #[error("Request {0} is already being answered.")]
    AlreadyResponding(String),

    #[error("{0} is already in your availability.")]
    DuplicateDay(Weekday),

    #[error("{0} is not in your availability.")]
    DayNotListed(Weekday),

    /// The delete step failed; the previous availability is untouched.
    #[error("Could not clear existing availability: {0}")]
    ClearFailed(#[source] ApiError),

    /// The delete step succeeded but re-creating stopped at `failed_day`.
    /// Days in `saved` are persisted, `failed_day` and `remaining` are not.
    #[error(
        "Availability saved only partially: {} day(s) saved, failed on {failed_day}: {source}",
        saved.len()
    )]
    PartialSave {
        saved: Vec<Weekday>,
        failed_day: Weekday,
        remaining: Vec<Weekday>,
        source: ApiError,
    },
}
