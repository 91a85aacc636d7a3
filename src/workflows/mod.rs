//! Role workflows built on top of [`ApiClient`](crate::api::ApiClient).
//!
//! Each workflow owns the view state for one screen: what is loaded, which
//! rows are busy, and which actions are currently allowed. Failures come
//! back as errors; callers turn them into a [`Notice`](crate::notifications::Notice)
//! with the module's fallback text.
//!
//! | Module | Role | Screen |
//! |--------|------|--------|
//! | [`accounts`] | any | login, registration, password reset, admin user forms |
//! | [`assignment`] | admin | mentor assignment board |
//! | [`browse`] | mentee | mentor search and requests |
//! | [`inbox`] | mentor | incoming requests |
//! | [`mentees`] | mentor | assigned mentees |
//! | [`availability`] | mentor | weekly availability editor |
//! | [`sessions`] | any | upcoming sessions |
//! | [`booking`] | mentee | session booking |
//! | [`profile`] | mentor, mentee | profile completion |

pub mod accounts;
pub mod assignment;
pub mod availability;
pub mod booking;
pub mod browse;
pub mod inbox;
pub mod mentees;
pub mod profile;
pub mod sessions;

pub use accounts::{RegisterForm, UserForm, UserFormMode};
pub use assignment::{AssignTicket, AssignmentBoard, MentorOption};
pub use availability::{save_failure_notice, AvailabilityEditor, DayRow};
pub use booking::BookingForm;
pub use browse::{MentorBrowser, RequestAction};
pub use inbox::{RequestInbox, ResponseTicket};
pub use mentees::MenteeRoster;
pub use profile::ProfileForm;
pub use sessions::{SessionListing, SessionScope};
