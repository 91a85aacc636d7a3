//! CLI output utilities: headers, aligned fields, tables and notices.

mod boxes;

pub use boxes::*;
