//! Tests for CLI argument parsing

use super::*;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_parse_tools() {
    let cli = Cli::try_parse_from(["deskbridge", "tools"]).unwrap();
    assert!(matches!(cli.command, Commands::Tools));
    assert_eq!(cli.format, OutputFormat::Json);
    assert!(!cli.verbose);
    assert!(cli.config.is_none());
}

#[test]
fn test_parse_call_with_args() {
    let cli = Cli::try_parse_from([
        "deskbridge",
        "-C",
        "settings.yaml",
        "call",
        "search_documents",
        "--args",
        r#"{"query": "pensioen"}"#,
        "-v",
    ])
    .unwrap();

    assert_eq!(cli.config, Some(PathBuf::from("settings.yaml")));
    assert!(cli.verbose);
    match cli.command {
        Commands::Call { tool, args } => {
            assert_eq!(tool, "search_documents");
            assert_eq!(args.as_deref(), Some(r#"{"query": "pensioen"}"#));
        }
        other => panic!("expected call, got {other:?}"),
    }
}

#[test]
fn test_parse_check_pretty() {
    let cli = Cli::try_parse_from(["deskbridge", "check", "--format", "pretty"]).unwrap();
    assert!(matches!(cli.command, Commands::Check));
    assert_eq!(cli.format, OutputFormat::Pretty);
}

#[test]
fn test_call_requires_tool() {
    assert!(Cli::try_parse_from(["deskbridge", "call"]).is_err());
}

#[tokio::test]
async fn test_call_rejects_invalid_args_json() {
    let cli = Cli::try_parse_from(["deskbridge", "call", "list_knowledge", "--args", "{oops"])
        .unwrap();
    let err = Runner::new(cli).run().await.unwrap_err();
    assert!(err.to_string().contains("invalid JSON"));
}
