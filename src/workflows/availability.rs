//! Mentor weekly availability editor.
//!
//! At most one row per weekday. Saving replaces the whole set: one DELETE,
//! then one POST per row that has both times, in row order. The sequence is
//! not atomic. If a POST fails the earlier days stay saved and the error
//! says exactly which days were and were not persisted.

use crate::api::ApiClient;
use crate::error::{ApiError, MentorResult, ValidationError, WorkflowError};
use crate::models::{AvailabilitySlot, TimeOfDay, Weekday};
use crate::notifications::Notice;
use crate::validation;

pub const LOAD_FAILED: &str = "Error fetching mentor data";
pub const SAVE_FAILED: &str = "Error saving mentor availability";
pub const SAVE_SUCCEEDED: &str = "Availability saved successfully!";

/// One weekday in the editor. Times are optional until filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRow {
    pub day: Weekday,
    pub start: Option<TimeOfDay>,
    pub end: Option<TimeOfDay>,
}

impl DayRow {
    pub fn empty(day: Weekday) -> Self {
        Self {
            day,
            start: None,
            end: None,
        }
    }

    /// The slot to persist, if both times are set.
    pub fn slot(&self) -> Option<AvailabilitySlot> {
        Some(AvailabilitySlot {
            day_of_week: self.day,
            start_time: self.start?,
            end_time: self.end?,
        })
    }

    fn is_inverted(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start >= end)
    }
}

impl From<AvailabilitySlot> for DayRow {
    fn from(slot: AvailabilitySlot) -> Self {
        Self {
            day: slot.day_of_week,
            start: Some(slot.start_time),
            end: Some(slot.end_time),
        }
    }
}

#[derive(Debug, Default)]
pub struct AvailabilityEditor {
    rows: Vec<DayRow>,
    saving: bool,
}

impl AvailabilityEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<DayRow>) -> Self {
        Self {
            rows,
            saving: false,
        }
    }

    /// GET /mentorship/availability/mentor, sorted Monday to Sunday.
    ///
    /// Duplicate days from the server collapse to the first one.
    pub async fn load(&mut self, api: &ApiClient) -> Result<usize, ApiError> {
        let mut slots = api.mentor_availability().await?;
        slots.sort_by_key(|s| s.day_of_week);
        slots.dedup_by_key(|s| s.day_of_week);
        self.rows = slots.into_iter().map(DayRow::from).collect();
        Ok(self.rows.len())
    }

    pub fn rows(&self) -> &[DayRow] {
        &self.rows
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Weekdays without a row, in week order.
    pub fn remaining_days(&self) -> Vec<Weekday> {
        Weekday::ALL
            .iter()
            .copied()
            .filter(|day| !self.has_day(*day))
            .collect()
    }

    pub fn has_day(&self, day: Weekday) -> bool {
        self.rows.iter().any(|r| r.day == day)
    }

    pub fn add_day(&mut self, day: Weekday) -> Result<(), WorkflowError> {
        if self.has_day(day) {
            return Err(WorkflowError::DuplicateDay(day));
        }
        self.rows.push(DayRow::empty(day));
        Ok(())
    }

    pub fn remove_day(&mut self, day: Weekday) -> Result<(), WorkflowError> {
        let before = self.rows.len();
        self.rows.retain(|r| r.day != day);
        if self.rows.len() == before {
            return Err(WorkflowError::DayNotListed(day));
        }
        Ok(())
    }

    /// Set the start time from form text; empty clears it.
    pub fn set_start(&mut self, day: Weekday, value: &str) -> MentorResult<()> {
        let time = parse_optional(value)?;
        self.row_mut(day)?.start = time;
        Ok(())
    }

    /// Set the end time from form text; empty clears it.
    pub fn set_end(&mut self, day: Weekday, value: &str) -> MentorResult<()> {
        let time = parse_optional(value)?;
        self.row_mut(day)?.end = time;
        Ok(())
    }

    /// Add the day if needed and set both times.
    pub fn set_day(&mut self, day: Weekday, start: &str, end: &str) -> MentorResult<()> {
        let start = parse_optional(start)?;
        let end = parse_optional(end)?;
        if !self.has_day(day) {
            self.rows.push(DayRow::empty(day));
        }
        let row = self.row_mut(day)?;
        row.start = start;
        row.end = end;
        Ok(())
    }

    fn row_mut(&mut self, day: Weekday) -> Result<&mut DayRow, WorkflowError> {
        self.rows
            .iter_mut()
            .find(|r| r.day == day)
            .ok_or(WorkflowError::DayNotListed(day))
    }

    /// Reject the first row whose start is not before its end.
    /// Rows missing a time are not checked; they are skipped on save.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.rows.iter().find(|r| r.is_inverted()) {
            Some(row) => Err(ValidationError::SlotTimeOrder(row.day)),
            None => Ok(()),
        }
    }

    /// Rows that will be sent on save, in order.
    pub fn complete_slots(&self) -> Vec<AvailabilitySlot> {
        self.rows.iter().filter_map(DayRow::slot).collect()
    }

    /// Validate, clear the stored set, then re-create it one day at a time.
    ///
    /// On success the editor reloads from the server.
    pub async fn save(&mut self, api: &ApiClient) -> MentorResult<Notice> {
        self.validate()?;
        self.saving = true;
        let result = self.replace_remote(api).await;
        self.saving = false;
        result?;

        tracing::info!(days = self.complete_slots().len(), "Availability saved");
        if let Err(e) = self.load(api).await {
            tracing::warn!("Could not reload availability after save: {}", e);
        }
        Ok(Notice::success(SAVE_SUCCEEDED))
    }

    async fn replace_remote(&self, api: &ApiClient) -> Result<(), WorkflowError> {
        let slots = self.complete_slots();

        api.clear_availability()
            .await
            .map_err(WorkflowError::ClearFailed)?;

        for (index, slot) in slots.iter().enumerate() {
            if let Err(source) = api.add_availability(slot).await {
                let saved: Vec<Weekday> = slots[..index].iter().map(|s| s.day_of_week).collect();
                let remaining: Vec<Weekday> =
                    slots[index + 1..].iter().map(|s| s.day_of_week).collect();
                tracing::warn!(
                    failed_day = %slot.day_of_week,
                    saved = saved.len(),
                    not_saved = remaining.len() + 1,
                    "Availability save stopped partway"
                );
                return Err(WorkflowError::PartialSave {
                    saved,
                    failed_day: slot.day_of_week,
                    remaining,
                    source,
                });
            }
        }
        Ok(())
    }
}

fn parse_optional(value: &str) -> Result<Option<TimeOfDay>, ValidationError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    validation::time(value).map(Some)
}

/// Notice for a failed save.
///
/// A partial save names the days that did and did not make it.
pub fn save_failure_notice(err: &crate::error::MentorError) -> Notice {
    use crate::error::MentorError;

    match err {
        MentorError::Workflow(WorkflowError::PartialSave {
            saved,
            failed_day,
            remaining,
            source,
        }) => {
            let not_saved: Vec<&str> = std::iter::once(failed_day)
                .chain(remaining.iter())
                .map(Weekday::as_str)
                .collect();
            let saved: Vec<&str> = saved.iter().map(Weekday::as_str).collect();
            Notice::error(format!(
                "{} Saved: {}. Not saved: {}.",
                source.message_or(SAVE_FAILED),
                if saved.is_empty() { "none".to_string() } else { saved.join(", ") },
                not_saved.join(", ")
            ))
        }
        other => Notice::from_error(other, SAVE_FAILED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::error::MentorError;
    use serde_json::json;
    use std::sync::Arc;

    const AVAILABILITY: &str = "http://h/api/mentorship/availability";
    const MENTOR_AVAILABILITY: &str = "http://h/api/mentorship/availability/mentor";

    fn api(mock: &MockHttpClient) -> ApiClient {
        ApiClient::with_base_url(Arc::new(mock.clone()), "http://h/api").with_auth("t")
    }

    fn five_days() -> AvailabilityEditor {
        let mut editor = AvailabilityEditor::new();
        for day in &Weekday::ALL[..5] {
            editor.set_day(*day, "09:00", "17:00").unwrap();
        }
        editor
    }

    #[tokio::test]
    async fn test_load_sorts_by_weekday() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "GET",
            MENTOR_AVAILABILITY,
            MockResponse::json(
                200,
                json!([
                    {"day_of_week": "Friday", "start_time": "10:00", "end_time": "12:00"},
                    {"day_of_week": "Monday", "start_time": "09:00:00", "end_time": "11:00:00"}
                ]),
            ),
        );

        let mut editor = AvailabilityEditor::new();
        editor.load(&api(&mock)).await.unwrap();
        let days: Vec<Weekday> = editor.rows().iter().map(|r| r.day).collect();
        assert_eq!(days, vec![Weekday::Monday, Weekday::Friday]);
        assert_eq!(editor.rows()[0].start.unwrap().to_string(), "09:00");
        assert_eq!(editor.remaining_days().len(), 5);
    }

    #[test]
    fn test_add_and_remove_days() {
        let mut editor = AvailabilityEditor::new();
        editor.add_day(Weekday::Wednesday).unwrap();
        assert_eq!(
            editor.add_day(Weekday::Wednesday).unwrap_err(),
            WorkflowError::DuplicateDay(Weekday::Wednesday)
        );
        assert!(!editor.remaining_days().contains(&Weekday::Wednesday));

        editor.remove_day(Weekday::Wednesday).unwrap();
        assert_eq!(
            editor.remove_day(Weekday::Wednesday).unwrap_err(),
            WorkflowError::DayNotListed(Weekday::Wednesday)
        );
        assert_eq!(editor.remaining_days(), Weekday::ALL.to_vec());
    }

    #[test]
    fn test_set_times() {
        let mut editor = AvailabilityEditor::new();
        assert!(editor.set_start(Weekday::Monday, "09:00").is_err());

        editor.add_day(Weekday::Monday).unwrap();
        editor.set_start(Weekday::Monday, "09:00").unwrap();
        assert!(editor.complete_slots().is_empty());

        editor.set_end(Weekday::Monday, "10:00").unwrap();
        assert_eq!(editor.complete_slots().len(), 1);

        let err = editor.set_end(Weekday::Monday, "25:00").unwrap_err();
        assert!(matches!(err, MentorError::Validation(ValidationError::InvalidTime(_))));
        editor.set_end(Weekday::Monday, "").unwrap();
        assert!(editor.complete_slots().is_empty());
    }

    #[tokio::test]
    async fn test_inverted_range_rejected_before_any_call() {
        let mock = MockHttpClient::new();
        let mut editor = five_days();
        editor.set_day(Weekday::Thursday, "15:00", "14:00").unwrap();

        let err = editor.save(&api(&mock)).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid time range on Thursday: Start must be earlier than end."
        );
        assert!(mock.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_incomplete_rows_are_skipped() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, json!([])));

        let mut editor = AvailabilityEditor::new();
        editor.set_day(Weekday::Monday, "09:00", "10:00").unwrap();
        editor.set_day(Weekday::Tuesday, "09:00", "").unwrap();
        editor.save(&api(&mock)).await.unwrap();

        assert_eq!(mock.requests_for("DELETE").len(), 1);
        assert_eq!(mock.requests_for("POST").len(), 1);
    }

    #[tokio::test]
    async fn test_save_deletes_then_posts_in_order() {
        let mock = MockHttpClient::new();
        mock.set_response("DELETE", AVAILABILITY, MockResponse::json(200, json!({})));
        mock.set_response("POST", AVAILABILITY, MockResponse::json(201, json!({})));
        mock.set_response("GET", MENTOR_AVAILABILITY, MockResponse::json(200, json!([])));

        let mut editor = five_days();
        let notice = editor.save(&api(&mock)).await.unwrap();
        assert_eq!(notice.message, SAVE_SUCCEEDED);

        let requests = mock.get_requests();
        assert_eq!(requests[0].method, "DELETE");
        let posted: Vec<String> = mock
            .requests_for("POST")
            .iter()
            .map(|r| r.json().unwrap()["day_of_week"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(posted, vec!["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]);
        assert!(!editor.is_saving());
    }

    #[tokio::test]
    async fn test_clear_failure_leaves_everything() {
        let mock = MockHttpClient::new();
        mock.set_response("DELETE", AVAILABILITY, MockResponse::json(500, json!({})));

        let mut editor = five_days();
        let err = editor.save(&api(&mock)).await.unwrap_err();
        assert!(matches!(err, MentorError::Workflow(WorkflowError::ClearFailed(_))));
        assert!(mock.requests_for("POST").is_empty());
        assert_eq!(save_failure_notice(&err).message, SAVE_FAILED);
    }

    #[tokio::test]
    async fn test_partial_save_reports_days() {
        let mock = MockHttpClient::new();
        mock.set_response("DELETE", AVAILABILITY, MockResponse::json(200, json!({})));
        mock.set_response("POST", AVAILABILITY, MockResponse::json(201, json!({})));
        mock.push_response("POST", AVAILABILITY, MockResponse::json(201, json!({})));
        mock.push_response("POST", AVAILABILITY, MockResponse::json(201, json!({})));
        mock.push_response(
            "POST",
            AVAILABILITY,
            MockResponse::json(500, json!({"message": "Database unavailable"})),
        );

        let mut editor = five_days();
        let err = editor.save(&api(&mock)).await.unwrap_err();
        match &err {
            MentorError::Workflow(WorkflowError::PartialSave {
                saved,
                failed_day,
                remaining,
                ..
            }) => {
                assert_eq!(saved, &vec![Weekday::Monday, Weekday::Tuesday]);
                assert_eq!(*failed_day, Weekday::Wednesday);
                assert_eq!(remaining, &vec![Weekday::Thursday, Weekday::Friday]);
            }
            other => panic!("expected partial save, got {:?}", other),
        }
        assert_eq!(mock.requests_for("POST").len(), 3);
        assert_eq!(
            save_failure_notice(&err).message,
            "Database unavailable Saved: Monday, Tuesday. Not saved: Wednesday, Thursday, Friday."
        );
        // Local rows are untouched so the user can retry.
        assert_eq!(editor.complete_slots().len(), 5);
    }
}
