//! Authentication state for mentorlink.
//!
//! - [`SessionStore`]: the signed-in user and bearer token, restored from
//!   and persisted to a key-value store

pub mod session;

pub use session::{parse_stored_user, RestoreRejection, SessionStore, UpdateUserError, TOKEN_KEY, USER_KEY};
