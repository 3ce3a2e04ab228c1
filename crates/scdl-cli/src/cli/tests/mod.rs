//! CLI parse tests.

use super::{build_session, Cli, CliCommand};
use clap::Parser;
use scdl_core::config::ScdlConfig;
use scdl_core::StorageMode;
use std::path::PathBuf;

pub(super) fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

#[test]
fn cli_parse_resolve() {
    match parse(&["scdl", "resolve", "https://api.soundcloud.com/tracks/42"]) {
        CliCommand::Resolve {
            reference,
            client_id,
        } => {
            assert_eq!(reference, "https://api.soundcloud.com/tracks/42");
            assert!(client_id.is_none());
        }
        _ => panic!("expected Resolve"),
    }
}

#[test]
fn cli_parse_download_defaults() {
    match parse(&["scdl", "download", "https://api.soundcloud.com/tracks/42"]) {
        CliCommand::Download {
            name,
            dir,
            client_id,
            no_progress,
            clean,
            force,
            ..
        } => {
            assert!(name.is_none());
            assert!(dir.is_none());
            assert!(client_id.is_none());
            assert!(!no_progress);
            assert!(!clean);
            assert!(!force);
        }
        _ => panic!("expected Download"),
    }
}

#[test]
fn cli_parse_download_all_flags() {
    match parse(&[
        "scdl",
        "download",
        "https://api.soundcloud.com/tracks/42",
        "--name",
        "mysong",
        "--dir",
        "/tmp/out",
        "--client-id",
        "abc123",
        "--no-progress",
        "--clean",
        "--force",
    ]) {
        CliCommand::Download {
            reference,
            name,
            dir,
            client_id,
            no_progress,
            clean,
            force,
        } => {
            assert_eq!(reference, "https://api.soundcloud.com/tracks/42");
            assert_eq!(name.as_deref(), Some("mysong"));
            assert_eq!(dir, Some(PathBuf::from("/tmp/out")));
            assert_eq!(client_id.as_deref(), Some("abc123"));
            assert!(no_progress);
            assert!(clean);
            assert!(force);
        }
        _ => panic!("expected Download"),
    }
}

#[test]
fn cli_force_requires_clean() {
    let res = Cli::try_parse_from(["scdl", "download", "https://x/tracks/1", "--force"]);
    assert!(res.is_err());
}

#[test]
fn cli_requires_reference() {
    assert!(Cli::try_parse_from(["scdl", "download"]).is_err());
    assert!(Cli::try_parse_from(["scdl", "resolve"]).is_err());
}

#[test]
fn build_session_prefers_flag_over_config() {
    let cfg = ScdlConfig {
        client_id: Some("from-config".to_string()),
        storage_dir: Some(PathBuf::from("/srv/music")),
        ..ScdlConfig::default()
    };
    let session = build_session(&cfg, Some("from-flag".to_string()), None).unwrap();
    assert_eq!(session.client().credential(), "from-flag");
    assert_eq!(
        session.client().storage(),
        &StorageMode::Persistent(PathBuf::from("/srv/music"))
    );

    let session = build_session(&cfg, None, Some(PathBuf::from("/tmp/out"))).unwrap();
    assert_eq!(session.client().credential(), "from-config");
    assert_eq!(
        session.client().storage(),
        &StorageMode::Persistent(PathBuf::from("/tmp/out"))
    );
}

#[test]
fn build_session_without_client_id_fails() {
    let cfg = ScdlConfig::default();
    let err = build_session(&cfg, None, None).unwrap_err();
    assert!(err.to_string().contains("client id"));
}

#[test]
fn build_session_uses_config_api_base_and_ephemeral_default() {
    let cfg = ScdlConfig {
        api_base: "http://127.0.0.1:9000".to_string(),
        ..ScdlConfig::default()
    };
    let session = build_session(&cfg, Some("id".to_string()), None).unwrap();
    assert_eq!(session.client().api_base(), "http://127.0.0.1:9000");
    assert_eq!(session.client().storage(), &StorageMode::Ephemeral);
}
