//! Mentee session booking form.

use crate::api::{ApiClient, BookingRequest};
use crate::error::{MentorResult, ValidationError};
use crate::notifications::Notice;
use crate::validation;

pub const BOOK_FAILED: &str = "Failed to book session. Try again.";
pub const BOOK_SUCCEEDED: &str = "Session booked!";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub mentor_id: String,
    pub date: String,
    pub start: String,
    pub end: String,
}

impl BookingForm {
    pub fn new(mentor_id: impl Into<String>) -> Self {
        Self {
            mentor_id: mentor_id.into(),
            ..Self::default()
        }
    }

    pub fn with_slot(mut self, date: &str, start: &str, end: &str) -> Self {
        self.date = date.to_string();
        self.start = start.to_string();
        self.end = end.to_string();
        self
    }

    /// Build the request body, or say what is wrong with the form.
    pub fn validate(&self) -> Result<BookingRequest, ValidationError> {
        let mentor_id = validation::require("Mentor", &self.mentor_id)?;
        validation::require("Date", &self.date)?;
        let date = validation::date(&self.date)?;
        validation::require("Start time", &self.start)?;
        validation::require("End time", &self.end)?;
        let (start_time, end_time) = validation::time_range(&self.start, &self.end)?;

        Ok(BookingRequest {
            mentor_id: mentor_id.to_string(),
            date: date.format("%Y-%m-%d").to_string(),
            start_time,
            end_time,
        })
    }

    /// Validate, then POST /mentorship/book-session. The form clears on success.
    pub async fn submit(&mut self, api: &ApiClient) -> MentorResult<Notice> {
        let booking = self.validate()?;
        let message = api.book_session(&booking).await?;

        tracing::info!(mentor_id = %booking.mentor_id, date = %booking.date, "Session booked");
        self.date.clear();
        self.start.clear();
        self.end.clear();
        Ok(Notice::success_or(message, BOOK_SUCCEEDED))
    }
}
