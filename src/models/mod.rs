//! Data models for the mentorship API.
//!
//! All resources are owned by the remote API; these types only mirror its
//! JSON. Unknown fields are ignored and identifiers are normalized to
//! strings.

pub mod de;
pub mod request;
pub mod schedule;
pub mod time;
pub mod user;

pub use request::{Decision, MentorshipMatch, MentorshipRequest, RequestStatus, SentRequest};
pub use schedule::{AvailabilitySlot, Session};
pub use time::{TimeOfDay, Weekday};
pub use user::{AssignedMentee, Destination, DirectoryUser, MentorProfile, Role, RoleInfo, User};
