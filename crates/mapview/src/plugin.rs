//! The visualizer plugin.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::capture::CaptureStore;
use crate::config::VisualizerOptions;
use crate::ordering::force_last;
use crate::pipeline::{
    HookResult, Plugin, PluginList, PluginPhase, TransformContext, TransformOptions,
    TransformOutput,
};
use crate::report::{ReportWriter, render};
use crate::Error;

/// Name the plugin registers under.
pub const PLUGIN_NAME: &str = "source-map-visualizer";

type FormatName = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Records the final output of every transform and writes the report when
/// the session ends.
///
/// The plugin declares [`PluginPhase::Post`] and moves itself to the very end
/// of the plugin list in `config_resolved`, so what it captures is what the
/// pipeline serves.
#[derive(Clone)]
pub struct SourceMapVisualizer {
    options: VisualizerOptions,
    root: PathBuf,
    format_name: Option<FormatName>,
    store: CaptureStore,
}

impl SourceMapVisualizer {
    /// Plugin with default options, rooted at the current directory.
    pub fn new() -> Self {
        Self::with_options(VisualizerOptions::default())
    }

    pub fn with_options(options: VisualizerOptions) -> Self {
        Self {
            options,
            root: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            format_name: None,
            store: CaptureStore::new(),
        }
    }

    /// Project root: relative output directories resolve against it and the
    /// default display name strips it from module ids.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Replace the display name formatter.
    pub fn with_format_name<F>(mut self, format_name: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.format_name = Some(Arc::new(format_name));
        self
    }

    pub fn options(&self) -> &VisualizerOptions {
        &self.options
    }

    /// Handle to the captures of this plugin.
    pub fn store(&self) -> &CaptureStore {
        &self.store
    }

    pub fn report_path(&self) -> PathBuf {
        self.writer().report_path()
    }

    fn writer(&self) -> ReportWriter {
        let out_dir = if self.options.out_dir.is_absolute() {
            self.options.out_dir.clone()
        } else {
            self.root.join(&self.options.out_dir)
        };
        ReportWriter::new(out_dir, self.options.filename.clone())
    }

    fn display_name(&self, id: &str) -> String {
        match &self.format_name {
            Some(format_name) => format_name(id),
            None => strip_root(id, &self.root),
        }
    }
}

impl Default for SourceMapVisualizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SourceMapVisualizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceMapVisualizer")
            .field("options", &self.options)
            .field("root", &self.root)
            .field("format_name", &self.format_name.as_ref().map(|_| "<fn>"))
            .field("captures", &self.store.len())
            .finish()
    }
}

/// Remove the first occurrence of `root` from `id`.
fn strip_root(id: &str, root: &Path) -> String {
    let root = root.to_string_lossy();
    if root.is_empty() {
        return id.to_string();
    }
    id.replacen(root.as_ref(), "", 1)
}

#[async_trait]
impl Plugin for SourceMapVisualizer {
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(PLUGIN_NAME)
    }

    fn phase(&self) -> PluginPhase {
        PluginPhase::Post
    }

    async fn config(&self) -> HookResult<()> {
        self.options.validate()?;
        self.writer().prepare().await?;
        Ok(())
    }

    async fn config_resolved(&self, plugins: &mut PluginList) -> HookResult<()> {
        if let Err(err) = force_last(plugins, PLUGIN_NAME) {
            error!(plugin = PLUGIN_NAME, error = %err, "failed to force itself as last plugin");
            return Err(err.into());
        }
        Ok(())
    }

    async fn transform(
        &self,
        ctx: &dyn TransformContext,
        code: &str,
        id: &str,
        options: TransformOptions,
    ) -> HookResult<Option<TransformOutput>> {
        let map = ctx.combined_sourcemap();
        let filename = self.display_name(id);

        self.store
            .record(filename, code, &map, options.ssr)
            .map_err(Error::from)?;

        Ok(None)
    }

    async fn build_end(&self) -> HookResult<()> {
        let html = render(&self.store.snapshot())?;

        let path = match self.writer().write(&html).await {
            Ok(path) => path,
            Err(err) => {
                error!(error = %err, "failed to write source map report");
                return Err(err.into());
            }
        };

        if !self.options.silent {
            info!("Report written to {}", path.display());
        }
        Ok(())
    }
}
