//! Typed client for the mentorship REST API.
//!
//! [`ApiClient`] is defined in [`client`]; the endpoint methods are spread
//! over one module per area of the API.

pub mod admin;
pub mod auth;
pub mod client;
pub mod mentorship;
pub mod profile;

pub use admin::UserPayload;
pub use auth::{LoginResponse, Registration};
pub use client::{error_message, ApiClient, MessageResponse, DEFAULT_BASE_URL};
pub use mentorship::{mentor_query, BookingRequest};
pub use profile::ProfileUpdate;
