//! Command-line interface.
//!
//! - [`args`] - argument parsing into [`CliCommand`]
//! - [`commands`] - dispatch to the workflows
//! - [`version`] - version string
//!
//! # Usage
//!
//! ```ignore
//! use mentorlink::cli::{parse_args, run};
//!
//! let command = parse_args(std::env::args());
//! let mut ctx = Context::from_config(&config).await?;
//! if let Err(failure) = run(command, &mut ctx, &mut std::io::stdout()).await {
//!     eprintln!("{}", failure);
//!     std::process::exit(failure.exit_code());
//! }
//! ```

pub mod args;
pub mod commands;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use commands::{run, CommandFailure};
pub use version::VERSION;
