use clap::Parser;
use std::path::PathBuf;

use settle::cli::{Cli, Commands};

#[test]
fn test_parse_render_defaults() {
    let cli = Cli::try_parse_from(vec!["settle", "render"]).unwrap();

    assert!(!cli.json);
    assert!(cli.config.is_none());
    match cli.command {
        Commands::Render(args) => {
            assert_eq!(args.round_limit, None);
            assert_eq!(args.depth, 1);
            assert_eq!(args.latency_ms, 25);
            assert_eq!(args.fail_at, None);
            assert_eq!(args.title, "Settle demo thread");
        }
        Commands::Config => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_render_options() {
    let cli = Cli::try_parse_from(vec![
        "settle",
        "render",
        "--round-limit",
        "6",
        "--depth",
        "3",
        "--latency-ms",
        "0",
        "--fail-at",
        "2",
        "--title",
        "Inbox",
    ])
    .unwrap();

    match cli.command {
        Commands::Render(args) => {
            assert_eq!(args.round_limit, Some(6));
            assert_eq!(args.depth, 3);
            assert_eq!(args.latency_ms, 0);
            assert_eq!(args.fail_at, Some(2));
            assert_eq!(args.title, "Inbox");
        }
        Commands::Config => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(vec![
        "settle",
        "config",
        "--json",
        "--config",
        "/etc/settle.yaml",
    ])
    .unwrap();

    assert!(matches!(cli.command, Commands::Config));
    assert!(cli.json);
    assert_eq!(cli.config, Some(PathBuf::from("/etc/settle.yaml")));
}

#[test]
fn test_rejects_negative_round_limit() {
    assert!(Cli::try_parse_from(vec!["settle", "render", "--round-limit", "-1"]).is_err());
}

#[test]
fn test_requires_subcommand() {
    assert!(Cli::try_parse_from(vec!["settle"]).is_err());
}
