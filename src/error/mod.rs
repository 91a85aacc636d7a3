//! Unified error handling.
//!
//! - **Error Categories**: high-level classification for handling decisions
//! - **Domain errors**: gateway ([`ApiError`]), form validation
//!   ([`ValidationError`]) and workflow rules ([`WorkflowError`])
//! - **Unified Error Type**: [`MentorError`] consolidates all of them
//! - **Result Type Alias**: [`MentorResult<T>`]
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout | Yes |
//! | Auth | Missing or rejected token | No |
//! | Server | 5xx, malformed body | Yes |
//! | User | Input rejected locally or by the API | No |
//! | System | Local storage | No |
//! | Configuration | Environment settings | No |

mod api;
mod category;
mod mentor_error;
mod result;
mod validation;
mod workflow;

pub use api::ApiError;
pub use category::ErrorCategory;
pub use mentor_error::MentorError;
pub use result::MentorResult;
pub use validation::ValidationError;
pub use workflow::WorkflowError;
