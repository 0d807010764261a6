//! CLI error handling.
//!
//! Library errors convert into [`CliError`] with `?`; `main` turns the result
//! into a `miette` report so library diagnostics keep their codes and help.

use std::path::PathBuf;

use miette::Report;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Errors from the visualizer library
    #[error(transparent)]
    Mapview(#[from] mapview::Error),

    /// Token encoding or decoding failed
    #[error(transparent)]
    Codec(#[from] mapview_codec::CodecError),

    /// A plugin hook failed while running the pipeline
    #[error("Pipeline error: {0:#}")]
    Pipeline(#[from] anyhow::Error),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Report server errors
    #[error("Server error: {0}")]
    Server(String),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Append a hint to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            match err {
                CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                    CliError::FileNotFound(path.as_ref().to_path_buf())
                }
                other => other,
            }
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}\n\nHint: {}", err, hint))
        })
    }
}

/// Convert a CLI error into a miette report.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Mapview(e) => Report::new(e),
        CliError::Codec(e) => Report::new(e),
        CliError::Pipeline(e) => match e.downcast::<mapview::Error>() {
            Ok(inner) => Report::new(inner),
            Err(e) => miette::miette!("{:#}", e),
        },
        other => miette::miette!("{}", other),
    }
}
