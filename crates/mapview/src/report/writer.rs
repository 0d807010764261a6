//! Report output.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use super::static_assets;
use crate::{Error, Result};

/// Writes the report and its assets into an output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportWriter {
    out_dir: PathBuf,
    filename: String,
}

impl ReportWriter {
    pub fn new(out_dir: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            out_dir: out_dir.into(),
            filename: filename.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// `<out_dir>/<filename>`
    pub fn report_path(&self) -> PathBuf {
        self.out_dir.join(&self.filename)
    }

    /// Remove whatever a previous session left in the output directory and
    /// recreate it empty.
    pub async fn prepare(&self) -> Result<()> {
        match fs::remove_dir_all(&self.out_dir).await {
            Ok(()) => debug!(path = %self.out_dir.display(), "removed previous output"),
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(source) => {
                return Err(Error::OutputDir {
                    path: self.out_dir.clone(),
                    source,
                });
            }
        }

        fs::create_dir_all(&self.out_dir)
            .await
            .map_err(|source| Error::OutputDir {
                path: self.out_dir.clone(),
                source,
            })
    }

    /// Write `html` as the report plus the viewer assets next to it.
    ///
    /// Returns the report path.
    pub async fn write(&self, html: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.out_dir)
            .await
            .map_err(|source| Error::ReportWriteFailure {
                path: self.out_dir.clone(),
                source,
            })?;

        let report = self.report_path();
        write_file(&report, html.as_bytes()).await?;

        for (name, contents) in static_assets()? {
            write_file(&self.out_dir.join(name), &contents).await?;
        }

        debug!(path = %report.display(), bytes = html.len(), "report written");
        Ok(report)
    }
}

async fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents)
        .await
        .map_err(|source| Error::ReportWriteFailure {
            path: path.to_path_buf(),
            source,
        })
}
