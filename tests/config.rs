//! Tests for config file loading and conversion into a `Setup`.

use splatlog::config::{LEVEL_ENV_VAR, parse_level_spec};
use splatlog::{Config, Error, Level, LevelSetting, Logging, VerbosityLevels};
use std::collections::BTreeMap;
use std::fs;

const FULL: &str = r#"
level = "info"
verbosity = 2
console = false

[verbosity_levels]
myapp = [[0, "warning"], [2, "info"], [3, "debug"]]

[export]
filename = "EXPORT_PATH"
formatter = { encoder = "compact", tz = "utc" }

[theme]
"log.name" = "bold #4ec9b0"
"#;

#[test]
fn full_file_parses() {
    let config = Config::from_toml(FULL).unwrap();
    assert_eq!(config.level, Some(LevelSetting::All(Level::Info)));
    assert_eq!(config.verbosity, Some(2));
    assert_eq!(config.console, Some(serde_json::Value::Bool(false)));
    assert_eq!(
        config.verbosity_levels["myapp"],
        VerbosityLevels::new([(0, Level::Warning), (2, Level::Info), (3, Level::Debug)]).unwrap()
    );
    assert_eq!(config.theme["log.name"], "bold #4ec9b0");
}

#[test]
fn per_name_levels_accept_numbers() {
    let config = Config::from_toml("[level]\nroot = 30\napp = \"debug\"\n").unwrap();
    let expected = BTreeMap::from([
        ("app".to_string(), Level::Debug),
        ("root".to_string(), Level::Warning),
    ]);
    assert_eq!(config.level, Some(LevelSetting::ByName(expected)));
}

#[test]
fn bad_files_fail() {
    assert!(matches!(
        Config::from_toml("colour = true"),
        Err(Error::ConfigParse(_))
    ));
    assert!(Config::from_toml("level = \"loud\"").is_err());
    assert!(Config::from_toml("[verbosity_levels]\napp = [[0, \"debug\"], [1, \"error\"]]").is_err());
}

#[test]
fn load_from_file_and_apply() {
    let dir = tempfile::tempdir().unwrap();
    let export_path = dir.path().join("app.jsonl");
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        FULL.replace("EXPORT_PATH", export_path.to_str().unwrap()),
    )
    .unwrap();

    let config = Config::load_from(&config_path).unwrap();
    let logging = Logging::new();
    logging.setup(config.into_setup().unwrap()).unwrap();

    assert_eq!(logging.get_verbosity(), Some(2));
    assert_eq!(logging.get_level("root"), Level::Info);
    assert_eq!(logging.get_level("myapp"), Level::Info);
    assert!(logging.get_named_handler("console").unwrap().is_none());
    assert!(logging.get_named_handler("export").unwrap().is_some());

    logging.get_logger("myapp.jobs").info("ran {n} jobs", splatlog::splat! { n = 3 });
    logging.flush();
    let written = fs::read_to_string(&export_path).unwrap();
    assert!(written.contains("\"msg\":\"ran 3 jobs\""));
    assert!(written.contains("Z\",\"level\":\"INFO\""));
}

#[test]
fn custom_handler_sections_need_registration() {
    let config = Config::from_toml("[handlers.audit]\nfilename = \"/tmp/audit.jsonl\"\n").unwrap();
    let logging = Logging::new();
    let err = logging.setup(config.into_setup().unwrap()).unwrap_err();
    assert!(matches!(err, Error::UnknownHandler(name) if name == "audit"));
}

#[test]
fn console_section_as_table() {
    let config = Config::from_toml("[console]\nlevel = \"error\"\ncolors = false\n").unwrap();
    let logging = Logging::new();
    logging.setup(config.into_setup().unwrap()).unwrap();
    assert!(logging.get_named_handler("console").unwrap().is_some());
    assert_eq!(logging.tree().handler_count(), 1);
}

#[test]
fn level_specs() {
    assert_eq!(parse_level_spec("debug").unwrap(), LevelSetting::All(Level::Debug));
    assert_eq!(parse_level_spec(" 40 ").unwrap(), LevelSetting::All(Level::Error));

    let LevelSetting::ByName(map) = parse_level_spec("app:debug,app::db:error").unwrap() else {
        panic!("expected per-name levels");
    };
    assert_eq!(map["app"], Level::Debug);
    assert_eq!(map["app.db"], Level::Error);

    assert!(matches!(parse_level_spec(""), Err(Error::Validation(_))));
    assert!(matches!(parse_level_spec("app:"), Err(Error::Validation(_))));
    assert!(matches!(parse_level_spec("chatty"), Err(Error::InvalidLevel(_))));
}

#[test]
fn level_spec_merges_over_file() {
    let mut config = Config::from_toml("level = \"error\"").unwrap();
    config.apply_level_spec("app:debug").unwrap();
    let LevelSetting::ByName(map) = config.level.unwrap() else {
        panic!("expected per-name levels");
    };
    assert_eq!(map["root"], Level::Error);
    assert_eq!(map["app"], Level::Debug);
}

#[test]
fn env_var_name() {
    assert_eq!(LEVEL_ENV_VAR, "LOG_LEVEL");
}
