//! Tests for JSON export output.

use chrono::{TimeZone, Utc};
use splatlog::handler::{
    EncoderStyle, ErrorInfo, ExportConfig, FileMode, JsonFormatter, JsonFormatterConfig,
    SharedBuffer, Timezone,
};
use splatlog::{ExportHandler, Handler, Level, LogRecord, Logging, Stream, splat};

fn record() -> LogRecord {
    let mut record = LogRecord::new(
        "app.db",
        Level::Warning,
        "slow query on <bold>{table}</bold>",
        splat! { table = "users", ms = 1250, tags = vec!["a", "b"] },
    );
    record.created = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    record.file = "src/db.rs".to_string();
    record.line = 42;
    record
}

fn utc() -> JsonFormatter {
    JsonFormatter::new(JsonFormatterConfig {
        tz: Timezone::Utc,
        ..JsonFormatterConfig::default()
    })
}

#[test]
fn compact_keys_in_fixed_order() {
    let line = utc().format(&record()).unwrap();
    assert_eq!(
        line,
        r#"{"t":"2024-01-02T03:04:05.000000Z","level":"WARNING","name":"app.db","file":"src/db.rs","line":42,"msg":"slow query on <bold>users</bold>","data":{"table":"users","ms":1250,"tags":["a","b"]}}"#
    );
}

#[test]
fn output_parses_back_with_same_fields() {
    let line = utc().format(&record()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
    let keys: Vec<&str> = parsed.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["t", "level", "name", "file", "line", "msg", "data"]);
    assert_eq!(parsed["data"]["ms"], 1250);
}

#[test]
fn offset_instead_of_z_when_asked() {
    let formatter = JsonFormatter::new(JsonFormatterConfig {
        tz: Timezone::Utc,
        use_z_for_utc: false,
        ..JsonFormatterConfig::default()
    });
    assert_eq!(
        formatter.format_timestamp(record().created),
        "2024-01-02T03:04:05.000000+00:00"
    );
}

#[test]
fn error_payload_and_chain() {
    let mut record = record().with_error(ErrorInfo::new("QueryError", "timed out"));
    if let Some(error) = record.error.as_mut() {
        error.chain.push("socket closed".to_string());
    }
    let parsed: serde_json::Value =
        serde_json::from_str(&utc().format(&record).unwrap()).unwrap();
    assert_eq!(parsed["error"]["type"], "QueryError");
    assert_eq!(parsed["error"]["msg"], "timed out");
    assert_eq!(parsed["error"]["chain"][0], "socket closed");
}

#[test]
fn empty_data_is_omitted() {
    let mut record = record();
    record.data = splat! {};
    let parsed: serde_json::Value =
        serde_json::from_str(&utc().format(&record).unwrap()).unwrap();
    assert!(parsed.get("data").is_none());
    assert!(parsed.get("error").is_none());
}

#[test]
fn pretty_records_are_blank_line_separated() {
    let buffer = SharedBuffer::new();
    let handler = ExportHandler::new(Stream::from(buffer.clone())).formatter(JsonFormatter::pretty());
    handler.emit(&record()).unwrap();
    handler.emit(&record()).unwrap();

    let out = buffer.contents();
    let chunks: Vec<&str> = out.split("\n\n").filter(|c| !c.is_empty()).collect();
    assert_eq!(chunks.len(), 2);
    assert!(chunks[0].contains("\n    \"level\": \"WARNING\""));
    for chunk in chunks {
        serde_json::from_str::<serde_json::Value>(chunk).unwrap();
    }
}

#[test]
fn formatter_config_forms() {
    let short: JsonFormatterConfig = serde_json::from_str(r#""pretty""#).unwrap();
    assert_eq!(short.encoder, EncoderStyle::Pretty);
    assert_eq!(short.tz, Timezone::Local);

    let full: JsonFormatterConfig =
        serde_json::from_str(r#"{"tz": "utc", "use_z_for_utc": false}"#).unwrap();
    assert_eq!(full.encoder, EncoderStyle::Compact);
    assert_eq!(full.tz, Timezone::Utc);
    assert!(!full.use_z_for_utc);
}

#[test]
fn file_export_appends_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("app.jsonl");

    let logging = Logging::new();
    logging
        .set_named_handler("export", ExportConfig::file(&path))
        .unwrap();
    logging.set_level("app", Level::Info);

    let log = logging.get_logger("app");
    log.info("one", ());
    log.info("two {n}", splat! { n = 2 });
    logging.flush();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("\"msg\":\"two 2\""));
}

#[test]
fn write_mode_truncates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.jsonl");
    std::fs::write(&path, "old\n").unwrap();

    let config = ExportConfig {
        mode: FileMode::Write,
        ..ExportConfig::file(&path)
    };
    let handler = config.build().unwrap();
    handler.emit(&record()).unwrap();
    handler.flush().unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(!content.contains("old"));
    assert_eq!(content.lines().count(), 1);
}

#[test]
fn level_threshold_applies() {
    let buffer = SharedBuffer::new();
    let handler = ExportHandler::new(Stream::from(buffer.clone())).level(Level::Error);
    assert!(!handler.handles(&record(), None));
    assert_eq!(Handler::level(&handler), Level::Error);
}

#[test]
fn msg_keeps_markup_from_values_and_template() {
    let logging = Logging::new();
    let buffer = SharedBuffer::new();
    logging
        .set_named_handler("export", Stream::from(buffer.clone()))
        .unwrap();

    let log = logging.get_logger("app");
    log.warning("rendered {html}", splat! { html = "<b>hi</b>" });
    log.warning("<x>literal</x>", ());

    let lines: Vec<serde_json::Value> = buffer
        .contents()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines[0]["msg"], "rendered <b>hi</b>");
    assert_eq!(lines[0]["data"]["html"], "<b>hi</b>");
    assert_eq!(lines[1]["msg"], "<x>literal</x>");
}

#[test]
fn data_decodes_back_to_the_same_mapping() {
    let record = LogRecord::new("app", Level::Info, "m", splat! { x = 1, y = 22 });
    let line = utc().format(&record).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
    let data = parsed["data"].as_object().unwrap();
    let keys: Vec<&str> = data.keys().map(String::as_str).collect();
    assert_eq!(keys, ["x", "y"]);

    let decoded: serde_json::Map<String, serde_json::Value> = data.clone();
    let expected = serde_json::json!({ "x": 1, "y": 22 });
    assert_eq!(serde_json::Value::Object(decoded), expected);
}
