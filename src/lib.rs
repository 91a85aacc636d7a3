//! mentorlink - a client for the mentorlink mentorship platform.
//!
//! Admins assign mentors to mentees, mentees browse mentors and book
//! sessions, mentors answer requests and publish weekly availability. All
//! state lives on the remote API; this crate holds the session, talks to the
//! API and keeps the per-screen workflow state.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod api;
pub mod auth;
pub mod cli;
pub mod cli_output;
pub mod error;
pub mod models;
pub mod notifications;
pub mod startup;
pub mod traits;
pub mod validation;
pub mod workflows;
