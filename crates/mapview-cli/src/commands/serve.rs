//! Serve command implementation.

use crate::cli::ServeArgs;
use crate::error::{CliError, Result};
use crate::{server, ui};

/// Execute the serve command.
///
/// Runs until interrupted with Ctrl-C.
pub async fn execute(args: ServeArgs) -> Result<()> {
    if !args.dir.is_dir() {
        return Err(CliError::FileNotFound(args.dir));
    }

    if !args.dir.join(&args.filename).is_file() {
        ui::warning(&format!(
            "{} has no {}; run a pipeline with the visualizer first",
            args.dir.display(),
            args.filename
        ));
    }

    server::serve(args.dir, args.filename, args.port).await
}
