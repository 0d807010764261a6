//! Demo command implementation.
//!
//! Runs every file of a directory through the reference pipeline with a
//! line-mapping transform in front of the visualizer, then writes the report.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use mapview::{
    HookResult, Pipeline, Plugin, SharedPlugin, SourceMapVisualizer, TransformContext,
    TransformOptions, TransformOutput, VisualizerOptions,
};
use serde_json::json;
use tokio::fs;

use crate::cli::DemoArgs;
use crate::error::{Result, ResultExt};
use crate::ui;

/// Execute the demo command.
///
/// # Errors
///
/// Fails when the directory cannot be read, the options are invalid, or a
/// pipeline hook fails.
pub async fn execute(args: DemoArgs) -> Result<()> {
    let options = resolve_options(&args)?;
    let files = collect_files(&args.dir).await?;

    if files.is_empty() {
        ui::warning(&format!("No files found in {}", args.dir.display()));
    }

    let report = run(files, options, std::env::current_dir()?).await?;
    ui::success(&format!("Report written to {}", report.display()));
    Ok(())
}

fn resolve_options(args: &DemoArgs) -> Result<VisualizerOptions> {
    let mut options = VisualizerOptions::load(args.config.as_deref())?;

    if let Some(out_dir) = &args.out_dir {
        options = options.with_out_dir(out_dir);
    }
    if let Some(filename) = &args.filename {
        options = options.with_filename(filename);
    }

    options.validate()?;
    Ok(options)
}

/// Regular files directly inside `dir`, sorted by path.
async fn collect_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir).await.with_path(dir)?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}

/// Drive one pipeline session over `files` and return the report path.
///
/// Files alternate between SSR (even index) and web transforms.
pub async fn run(files: Vec<PathBuf>, options: VisualizerOptions, root: PathBuf) -> Result<PathBuf> {
    let visualizer = SourceMapVisualizer::with_options(options).with_root(root);
    let report = visualizer.report_path();

    let mut pipeline = Pipeline::new([
        Arc::new(visualizer) as SharedPlugin,
        Arc::new(LineMap) as SharedPlugin,
    ]);
    pipeline.configure().await?;

    for (index, path) in files.iter().enumerate() {
        let code = match fs::read_to_string(path).await {
            Ok(code) => code,
            Err(err) if err.kind() == std::io::ErrorKind::InvalidData => {
                ui::warning(&format!("Skipping {} (not UTF-8)", path.display()));
                continue;
            }
            Err(err) => return Err(err).with_path(path),
        };

        let id = path.to_string_lossy();
        let options = TransformOptions {
            ssr: index % 2 == 0,
        };
        pipeline.transform_request(&id, code, options).await?;
    }

    pipeline.close().await?;
    Ok(report)
}

/// Leaves the code as is and maps every generated line to the same source
/// line.
#[derive(Debug)]
struct LineMap;

#[async_trait]
impl Plugin for LineMap {
    fn name(&self) -> Cow<'static, str> {
        "line-map".into()
    }

    async fn transform(
        &self,
        _ctx: &dyn TransformContext,
        code: &str,
        id: &str,
        _options: TransformOptions,
    ) -> HookResult<Option<TransformOutput>> {
        let map = json!({
            "version": 3,
            "sources": [id],
            "sourcesContent": [code],
            "names": [],
            "mappings": line_mappings(code),
        });
        Ok(Some(TransformOutput::new(code, Some(map))))
    }
}

/// VLQ mappings with one segment per line: column 0 of line N maps to
/// column 0 of source line N.
fn line_mappings(code: &str) -> String {
    if code.is_empty() {
        return String::new();
    }

    let lines = code.split('\n').count();
    let mut mappings = String::from("AAAA");
    for _ in 1..lines {
        mappings.push_str(";AACA");
    }
    mappings
}
