//! mapview CLI entry point.
//!
//! Parses arguments, sets up logging and colours, and dispatches to the
//! selected command.

use clap::Parser;
use mapview_cli::{cli, commands, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Encode(encode_args) => commands::encode_execute(encode_args).await,
        cli::Command::Decode(decode_args) => commands::decode_execute(decode_args).await,
        cli::Command::Demo(demo_args) => commands::demo_execute(demo_args).await,
        cli::Command::Serve(serve_args) => commands::serve_execute(serve_args).await,
    };

    result.map_err(error::cli_error_to_miette)
}
