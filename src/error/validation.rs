//! Client-side form validation failures.
//!
//! The `Display` text of each variant is exactly what the user is shown.

use thiserror::Error;

use crate::models::Weekday;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Username must be at least 3 characters long")]
    UsernameTooShort,

    #[error("Please enter a valid email")]
    InvalidEmail,

    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,

    #[error("Please select a role (admin, mentor or mentee)")]
    InvalidRole,

    #[error("Invalid time '{0}': expected HH:MM")]
    InvalidTime(String),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Start time must be earlier than end time.")]
    TimeOrder,

    #[error("Invalid time range on {0}: Start must be earlier than end.")]
    SlotTimeOrder(Weekday),

    #[error("Unknown day '{0}': expected a weekday name such as Monday")]
    UnknownDay(String),
}
