//! Test doubles for the trait abstractions.
//!
//! - [`MockHttpClient`] - scripted HTTP responses with request recording
//! - [`MemoryStore`] - in-memory key-value storage

pub mod http;
pub mod store;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use store::MemoryStore;
