//! Tests for the command-line surface.

#![cfg(feature = "cli")]

use clap::Parser;
use splatlog::cli::{Cli, KeyValue, run};
use splatlog::{Level, LevelSetting, Logging, Setup, Value, VerbosityArgs};
use std::fs;

#[derive(Debug, Parser)]
struct App {
    #[command(flatten)]
    verbosity: VerbosityArgs,
}

#[test]
fn verbosity_args_flatten_into_applications() {
    let app = App::try_parse_from(["app", "-vvv", "--log-level", "net:debug"]).unwrap();
    assert_eq!(app.verbosity.verbosity(), 3);

    let setup = app.verbosity.apply_to(Setup::new()).unwrap();
    assert_eq!(setup.verbosity, Some(3));
    assert_eq!(
        setup.level.unwrap().assignments(),
        vec![("net".to_string(), Level::Debug)]
    );
}

#[test]
fn no_flags_change_nothing() {
    let app = App::try_parse_from(["app"]).unwrap();
    assert!(app.verbosity.apply_to(Setup::new()).unwrap().is_empty());
}

#[test]
fn bad_log_level_is_an_error() {
    let app = App::try_parse_from(["app", "--log-level", "net:chatty"]).unwrap();
    assert!(app.verbosity.apply_to(Setup::new()).is_err());
}

#[test]
fn bare_log_level_targets_root() {
    let app = App::try_parse_from(["app", "--log-level", "error"]).unwrap();
    let setup = app.verbosity.apply_to(Setup::new()).unwrap();
    assert_eq!(setup.level, Some(LevelSetting::All(Level::Error)));
}

#[test]
fn key_values_keep_json_types() {
    let kv: KeyValue = "ids=[1,2]".parse().unwrap();
    assert_eq!(kv.key, "ids");
    assert_eq!(kv.value, Value::List(vec![Value::Int(1), Value::Int(2)]));

    let kv: KeyValue = "note=plain words".parse().unwrap();
    assert_eq!(kv.value, Value::from("plain words"));
}

#[test]
fn unknown_level_is_rejected_by_the_parser() {
    assert!(Cli::try_parse_from(["splatlog", "loud", "msg"]).is_err());
}

#[test]
fn run_writes_export_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    let export = dir.path().join("out.jsonl");
    fs::write(&config, "console = false\n").unwrap();

    let cli = Cli::try_parse_from([
        "splatlog",
        "--config",
        config.to_str().unwrap(),
        "--export",
        export.to_str().unwrap(),
        "--name",
        "deploy",
        "info",
        "shipped {version}",
        "version=\"1.2.0\"",
        "replicas=3",
    ])
    .unwrap();

    let logging = Logging::new();
    run(&cli, &logging).unwrap();

    let written = fs::read_to_string(&export).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(written.trim()).unwrap();
    assert_eq!(parsed["name"], "deploy");
    assert_eq!(parsed["msg"], "shipped 1.2.0");
    assert_eq!(parsed["data"]["replicas"], 3);
}

#[test]
fn debug_needs_a_verbose_flag() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    let export = dir.path().join("out.jsonl");
    fs::write(&config, "console = false\n").unwrap();
    let args = |extra: &[&str]| {
        let mut args = vec![
            "splatlog",
            "--config",
            config.to_str().unwrap(),
            "--export",
            export.to_str().unwrap(),
        ];
        args.extend_from_slice(extra);
        args.extend(["debug", "details"]);
        Cli::try_parse_from(args).unwrap()
    };

    run(&args(&[]), &Logging::new()).unwrap();
    assert!(fs::read_to_string(&export).unwrap_or_default().is_empty());

    run(&args(&["-v"]), &Logging::new()).unwrap();
    assert!(fs::read_to_string(&export).unwrap().contains("details"));
}
