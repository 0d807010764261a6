//! # mapview
//!
//! Records what every file looks like after the last transform of a build
//! pipeline and writes a static HTML report that opens each result in
//! <https://evanw.github.io/source-map-visualization>.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use mapview::{Pipeline, SourceMapVisualizer, TransformOptions, VisualizerOptions};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let options = VisualizerOptions::load(None)?;
//! let mut pipeline = Pipeline::new([
//!     Arc::new(SourceMapVisualizer::with_options(options)) as mapview::SharedPlugin,
//! ]);
//!
//! pipeline.configure().await?;
//! pipeline
//!     .transform_request("src/main.ts", "export const x = 1;", TransformOptions::default())
//!     .await?;
//! pipeline.close().await?;
//! # Ok(()) }
//! ```
//!
//! ## Modules
//!
//! - [`pipeline`] - the host contract (plugin trait, plugin list, hook chain)
//! - [`ordering`] - moves the visualizer behind every other plugin
//! - [`capture`] - append-only store of captured transform results
//! - [`report`] - HTML report rendering and output
//! - [`viewer`] - state model of the report's client-side viewer
//! - [`config`] - option loading

pub mod capture;
pub mod config;
pub mod ordering;
pub mod pipeline;
pub mod plugin;
pub mod report;
pub mod viewer;

use std::path::PathBuf;

pub use capture::{CaptureResult, CaptureStore};
pub use config::VisualizerOptions;
pub use mapview_codec::{CodecError, DecodedFrame, MalformedToken, VISUALIZER_URL};
pub use ordering::{force_last, is_last};
pub use pipeline::{
    HookResult, Pipeline, Plugin, PluginList, PluginPhase, SharedPlugin, TransformContext,
    TransformOptions, TransformOutput,
};
pub use plugin::{PLUGIN_NAME, SourceMapVisualizer};
pub use report::{ReportWriter, render};

/// Error types for mapview operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Encoding a capture failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The visualizer could not find itself in the host plugin list.
    #[error("plugin '{name}' is not registered in the pipeline")]
    PluginNotFound { name: String },

    /// The host plugin list holds more than one plugin with the visualizer's name.
    #[error("plugin '{name}' is registered {count} times")]
    DuplicatePlugin { name: String, count: usize },

    /// The report template failed to render.
    #[error("failed to render report: {0}")]
    Render(#[from] minijinja::Error),

    /// A report asset is missing from the embedded asset folder.
    #[error("missing report asset: {0}")]
    MissingAsset(String),

    /// The output directory could not be prepared.
    #[error("failed to prepare output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the report or one of its assets failed.
    #[error("failed to write report {}: {source}", .path.display())]
    ReportWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Options are well-formed but unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Options could not be extracted from their sources.
    #[error("failed to load configuration: {0}")]
    Config(#[from] Box<figment::Error>),
}

/// Result type alias for mapview operations.
pub type Result<T> = std::result::Result<T, Error>;

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::Codec(_) => "CODEC_ERROR",
            Error::PluginNotFound { .. } => "PLUGIN_NOT_FOUND",
            Error::DuplicatePlugin { .. } => "DUPLICATE_PLUGIN",
            Error::Render(_) => "RENDER_ERROR",
            Error::MissingAsset(_) => "MISSING_ASSET",
            Error::OutputDir { .. } => "OUTPUT_DIR",
            Error::ReportWriteFailure { .. } => "REPORT_WRITE_FAILURE",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::Config(_) => "CONFIG_ERROR",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::PluginNotFound { name } => Some(Box::new(format!(
                "Register the plugin returned by SourceMapVisualizer::new() and do not rename it.\n\
                 Without '{}' at the end of the plugin list the report would miss later transforms.",
                name
            ))),
            Error::DuplicatePlugin { name, .. } => Some(Box::new(format!(
                "Register '{}' only once per pipeline.",
                name
            ))),
            Error::ReportWriteFailure { .. } | Error::OutputDir { .. } => Some(Box::new(
                "Check disk space and permissions of the output directory.",
            )),
            Error::InvalidConfig(msg) => Some(Box::new(format!(
                "Check mapview.toml and MAPVIEW_* environment variables.\nError: {}",
                msg
            ))),
            Error::Config(_) => Some(Box::new(
                "Check mapview.toml syntax and field types.",
            )),
            _ => None,
        }
    }
}
