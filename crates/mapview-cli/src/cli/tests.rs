use super::*;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_cli_verbose_quiet_conflict() {
    let result = Cli::try_parse_from(["mapview", "--verbose", "--quiet", "decode", "abc"]);
    assert!(result.is_err());
}

#[test]
fn test_encode_args() {
    let args = Cli::try_parse_from(["mapview", "encode", "out.js", "--map", "out.js.map", "--link"]).unwrap();

    match args.command {
        Command::Encode(encode) => {
            assert_eq!(encode.code, PathBuf::from("out.js"));
            assert_eq!(encode.map, Some(PathBuf::from("out.js.map")));
            assert!(encode.link);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_decode_reads_stdin_marker() {
    let args = Cli::try_parse_from(["mapview", "--no-color", "decode", "-"]).unwrap();
    assert!(args.no_color);

    match args.command {
        Command::Decode(decode) => {
            assert_eq!(decode.token, "-");
            assert!(!decode.json);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_demo_overrides_are_optional() {
    let args = Cli::try_parse_from(["mapview", "demo", "fixtures"]).unwrap();

    match args.command {
        Command::Demo(demo) => {
            assert_eq!(demo.dir, PathBuf::from("fixtures"));
            assert!(demo.out_dir.is_none());
            assert!(demo.filename.is_none());
            assert!(demo.config.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_serve_defaults() {
    let args = Cli::try_parse_from(["mapview", "serve"]).unwrap();

    match args.command {
        Command::Serve(serve) => {
            assert_eq!(serve.dir, PathBuf::from(".source-map-visualizer"));
            assert_eq!(serve.port, 4173);
            assert_eq!(serve.filename, "report.html");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let args = Cli::try_parse_from(["mapview", "decode", "abc", "-v"]).unwrap();
    assert!(args.verbose);
}
