//! Command-line interface for mapview.
//!
//! - [`cli`] - argument definitions
//! - `commands` - `encode`, `decode`, `demo` and `serve`
//! - [`error`] - CLI error type and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status messages on stderr
//! - `server` - static file server for report directories

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod server;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
