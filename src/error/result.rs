//! Result type alias for mentorlink operations.

use super::mentor_error::MentorError;

/// Type alias for Results using [`MentorError`].
pub type MentorResult<T> = Result<T, MentorError>;
