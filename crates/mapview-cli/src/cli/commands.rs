use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Available mapview subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a file and its source map into a visualizer token
    ///
    /// Prints the token, or the full visualizer link with --link.
    Encode(EncodeArgs),

    /// Decode a visualizer token
    ///
    /// Prints the code followed by the pretty-printed source map.
    Decode(DecodeArgs),

    /// Run every file of a directory through a demo pipeline and write a report
    ///
    /// Files alternate between SSR and web transforms.
    Demo(DemoArgs),

    /// Serve a report directory over HTTP
    Serve(ServeArgs),
}

/// Arguments for the encode command
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// File with the transformed code
    #[arg(value_name = "CODE_FILE")]
    pub code: PathBuf,

    /// Source map (JSON) of the code; the token carries `null` without it
    #[arg(short, long, value_name = "MAP_FILE")]
    pub map: Option<PathBuf>,

    /// Print the full visualizer link instead of the bare token
    #[arg(long)]
    pub link: bool,
}

/// Arguments for the decode command
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Token, a visualizer link, or `-` to read from stdin
    #[arg(value_name = "TOKEN")]
    pub token: String,

    /// Print a JSON object with `code` and `map` fields
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the demo command
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Directory with the files to transform
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Output directory (overrides mapview.toml and MAPVIEW_OUT_DIR)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Report file name (overrides mapview.toml and MAPVIEW_FILENAME)
    #[arg(short, long)]
    pub filename: Option<String>,

    /// Options file to use instead of ./mapview.toml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Report directory
    #[arg(value_name = "DIR", default_value = ".source-map-visualizer")]
    pub dir: PathBuf,

    /// Port to listen on
    #[arg(short, long, default_value_t = 4173)]
    pub port: u16,

    /// Report file opened at `/`
    #[arg(short, long, default_value = "report.html")]
    pub filename: String,
}
