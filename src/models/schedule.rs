//! Weekly availability slots and booked sessions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::de;
use super::time::{TimeOfDay, Weekday};

/// One weekly window a mentor can be booked in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub day_of_week: Weekday,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl AvailabilitySlot {
    pub fn is_ordered(&self) -> bool {
        self.start_time < self.end_time
    }
}

/// Calendar day of an API date; accepts a bare date or an ISO timestamp.
pub fn calendar_date(raw: &str) -> Option<NaiveDate> {
    let head = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Long-form date, e.g. `Saturday, March 1, 2025`. Falls back to the raw value.
pub fn format_calendar_date(raw: &str) -> String {
    match calendar_date(raw) {
        Some(date) => date.format("%A, %B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// A booked session.
///
/// Mentor and mentee listings carry the counterpart's `username`/`email`;
/// the admin listing carries both sides' usernames instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "mentorUsername")]
    pub mentor_username: Option<String>,
    #[serde(default, rename = "menteeUsername")]
    pub mentee_username: Option<String>,
}

impl Session {
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        calendar_date(&self.date)
    }

    pub fn display_date(&self) -> String {
        format_calendar_date(&self.date)
    }

    /// Who the session is with, as seen from the caller's role.
    pub fn counterpart(&self) -> String {
        match (&self.username, &self.email) {
            (Some(name), Some(email)) => format!("{} ({})", name, email),
            (Some(name), None) => name.clone(),
            (None, Some(email)) => email.clone(),
            (None, None) => match (&self.mentor_username, &self.mentee_username) {
                (Some(mentor), Some(mentee)) => format!("{} with {}", mentor, mentee),
                (Some(one), None) | (None, Some(one)) => one.clone(),
                (None, None) => "unknown".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_serde_round_trip_shape() {
        let slot: AvailabilitySlot = serde_json::from_str(
            r#"{"day_of_week": "Tuesday", "start_time": "09:00:00", "end_time": "11:30"}"#,
        )
        .unwrap();
        assert_eq!(slot.day_of_week, Weekday::Tuesday);
        assert!(slot.is_ordered());

        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(json["start_time"], "09:00");
        assert_eq!(json["day_of_week"], "Tuesday");
    }

    #[test]
    fn test_session_display_date() {
        let session: Session = serde_json::from_str(
            r#"{"id": 1, "date": "2025-03-01T00:00:00.000Z", "start_time": "09:00", "end_time": "10:00",
                "username": "grace", "email": "g@x.io"}"#,
        )
        .unwrap();
        assert_eq!(session.display_date(), "Saturday, March 1, 2025");
        assert_eq!(session.counterpart(), "grace (g@x.io)");
    }

    #[test]
    fn test_session_unparsable_date_falls_back() {
        let session: Session = serde_json::from_str(
            r#"{"id": "s", "date": "soon", "start_time": "09:00", "end_time": "10:00"}"#,
        )
        .unwrap();
        assert!(session.calendar_date().is_none());
        assert_eq!(session.display_date(), "soon");
        assert_eq!(session.counterpart(), "unknown");
    }

    #[test]
    fn test_admin_session_counterpart() {
        let session: Session = serde_json::from_str(
            r#"{"id": 2, "date": "2025-01-06", "start_time": "09:00", "end_time": "10:00",
                "mentorUsername": "grace", "menteeUsername": "ada"}"#,
        )
        .unwrap();
        assert_eq!(session.counterpart(), "grace with ada");
    }
}
