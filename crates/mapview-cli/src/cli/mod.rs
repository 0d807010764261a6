//! Command-line interface definition.
//!
//! - `mapview encode` - pack a file and its source map into a token
//! - `mapview decode` - unpack a token
//! - `mapview demo` - run a directory through a pipeline and write a report
//! - `mapview serve` - serve a report directory over HTTP

mod commands;
#[cfg(test)]
mod tests;

use clap::Parser;

pub use commands::{Command, DecodeArgs, DemoArgs, EncodeArgs, ServeArgs};

/// mapview - inspect what a build pipeline did to each file
#[derive(Parser, Debug)]
#[command(
    name = "mapview",
    version,
    about = "Inspect transform results with a source map visualizer",
    long_about = "mapview packs code and source maps into tokens understood by\n\
                  https://evanw.github.io/source-map-visualization and writes static\n\
                  HTML reports listing every transform result of a pipeline run."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
