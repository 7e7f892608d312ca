//! Machine-oriented JSON output.
//!
//! One object per record with keys `t, level, name, file, line, msg`, then
//! `data` when the record has splat data and `error` when it carries one.
//! Compact encoding gives JSON Lines; pretty encoding indents by four spaces
//! and separates objects with a blank line.

use super::{Handler, LogRecord, Stream};
use super::stream::FileMode;
use crate::Error;
use crate::data::Data;
use crate::level::Level;
use crate::verbosity::{VerbosityLevels, VerbosityLevelsFilter};
use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncoderStyle {
    /// One object per line.
    #[default]
    Compact,
    Pretty,
}

/// Zone the `t` field is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timezone {
    #[default]
    Local,
    Utc,
}

/// Formatter settings; a bare string is shorthand for the encoder style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "JsonFormatterRepr")]
pub struct JsonFormatterConfig {
    pub encoder: EncoderStyle,
    pub tz: Timezone,
    pub use_z_for_utc: bool,
}

impl Default for JsonFormatterConfig {
    fn default() -> Self {
        Self {
            encoder: EncoderStyle::Compact,
            tz: Timezone::Local,
            use_z_for_utc: true,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonFormatterRepr {
    Encoder(EncoderStyle),
    Full {
        #[serde(default)]
        encoder: EncoderStyle,
        #[serde(default)]
        tz: Timezone,
        #[serde(default = "default_true")]
        use_z_for_utc: bool,
    },
}

const fn default_true() -> bool {
    true
}

impl From<JsonFormatterRepr> for JsonFormatterConfig {
    fn from(repr: JsonFormatterRepr) -> Self {
        match repr {
            JsonFormatterRepr::Encoder(encoder) => Self {
                encoder,
                ..Self::default()
            },
            JsonFormatterRepr::Full {
                encoder,
                tz,
                use_z_for_utc,
            } => Self {
                encoder,
                tz,
                use_z_for_utc,
            },
        }
    }
}

#[derive(Serialize)]
struct ErrorPayload<'a> {
    #[serde(rename = "type")]
    type_name: &'a str,
    msg: &'a str,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    chain: &'a [String],
}

#[derive(Serialize)]
struct Payload<'a> {
    t: String,
    level: &'static str,
    name: &'a str,
    file: &'a str,
    line: u32,
    msg: String,
    #[serde(skip_serializing_if = "Data::is_empty")]
    data: &'a Data,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorPayload<'a>>,
}

/// Turns records into JSON text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonFormatter {
    config: JsonFormatterConfig,
}

impl JsonFormatter {
    /// Encodes records as `config` describes.
    #[must_use]
    pub const fn new(config: JsonFormatterConfig) -> Self {
        Self { config }
    }

    /// Four-space indented objects in the local time zone.
    #[must_use]
    pub fn pretty() -> Self {
        Self::new(JsonFormatterConfig {
            encoder: EncoderStyle::Pretty,
            ..JsonFormatterConfig::default()
        })
    }

    #[must_use]
    pub const fn config(&self) -> &JsonFormatterConfig {
        &self.config
    }

    /// RFC 3339 with microseconds in the configured zone.
    #[must_use]
    pub fn format_timestamp(&self, created: DateTime<Utc>) -> String {
        let use_z = self.config.use_z_for_utc;
        match self.config.tz {
            Timezone::Utc => created.to_rfc3339_opts(SecondsFormat::Micros, use_z),
            Timezone::Local => {
                let local = created.with_timezone(&Local);
                let formatted = local.to_rfc3339_opts(SecondsFormat::Micros, false);
                match formatted.strip_suffix("+00:00") {
                    Some(head) if use_z => format!("{head}Z"),
                    _ => formatted,
                }
            }
        }
    }

    /// Encodes `record` without a trailing newline.
    ///
    /// # Errors
    /// Serialization failures.
    pub fn format(&self, record: &LogRecord) -> Result<String, Error> {
        let payload = Payload {
            t: self.format_timestamp(record.created),
            level: record.level.as_str(),
            name: &record.name,
            file: &record.file,
            line: record.line,
            msg: record.message(),
            data: &record.data,
            error: record.error.as_ref().map(|e| ErrorPayload {
                type_name: &e.type_name,
                msg: &e.msg,
                chain: &e.chain,
            }),
        };

        match self.config.encoder {
            EncoderStyle::Compact => Ok(serde_json::to_string(&payload)?),
            EncoderStyle::Pretty => {
                let mut buf = Vec::new();
                let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
                let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
                payload.serialize(&mut ser)?;
                String::from_utf8(buf).map_err(|e| Error::Format(e.to_string()))
            }
        }
    }
}

/// Writes JSON records to a file or stream.
#[derive(Debug, Clone)]
pub struct ExportHandler {
    level: Level,
    stream: Stream,
    formatter: JsonFormatter,
    verbosity_levels: Option<VerbosityLevelsFilter>,
}

impl ExportHandler {
    /// Compact JSON lines to `stream`, accepting every level.
    #[must_use]
    pub fn new(stream: Stream) -> Self {
        Self {
            level: Level::NotSet,
            stream,
            formatter: JsonFormatter::default(),
            verbosity_levels: None,
        }
    }

    /// Opens `path` in append mode.
    ///
    /// # Errors
    /// I/O errors opening the file.
    pub fn to_file(path: impl Into<PathBuf>) -> Result<Self, Error> {
        Ok(Self::new(Stream::open(&path.into(), FileMode::Append)?))
    }

    /// Drops records below `level`.
    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Replaces the JSON encoder settings.
    #[must_use]
    pub const fn formatter(mut self, formatter: JsonFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Per-logger verbosity tables checked before the handler's level.
    #[must_use]
    pub fn verbosity_levels(mut self, filter: VerbosityLevelsFilter) -> Self {
        self.verbosity_levels = (!filter.is_empty()).then_some(filter);
        self
    }

    #[must_use]
    pub const fn stream(&self) -> &Stream {
        &self.stream
    }
}

impl Handler for ExportHandler {
    fn level(&self) -> Level {
        self.level
    }

    fn verbosity_levels(&self) -> Option<&VerbosityLevelsFilter> {
        self.verbosity_levels.as_ref()
    }

    fn emit(&self, record: &LogRecord) -> Result<(), Error> {
        let mut text = self.formatter.format(record)?;
        text.push('\n');
        if self.formatter.config.encoder == EncoderStyle::Pretty {
            text.push('\n');
        }
        self.stream.write_all(text.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        self.stream.flush()?;
        Ok(())
    }
}

/// Export settings as they appear in config files and `Setup`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub filename: Option<PathBuf>,
    pub stream: Option<Stream>,
    pub mode: FileMode,
    pub level: Option<Level>,
    pub formatter: Option<JsonFormatterConfig>,
    pub verbosity_levels: BTreeMap<String, VerbosityLevels>,
}

impl ExportConfig {
    /// JSON lines appended to `path`.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            filename: Some(path.into()),
            ..Self::default()
        }
    }

    /// # Errors
    /// `Error::Cast` when neither `filename` nor `stream` is given, or I/O
    /// errors opening the file.
    pub fn build(self) -> Result<ExportHandler, Error> {
        let stream = match (self.filename, self.stream) {
            (Some(path), _) => Stream::open(&path, self.mode)?,
            (None, Some(stream)) => stream,
            (None, None) => {
                return Err(Error::cast(
                    "export settings with a `filename` or `stream`",
                    "neither",
                ));
            }
        };

        let mut handler = ExportHandler::new(stream)
            .formatter(JsonFormatter::new(self.formatter.unwrap_or_default()))
            .verbosity_levels(VerbosityLevelsFilter::from(self.verbosity_levels));
        if let Some(level) = self.level {
            handler = handler.level(level);
        }
        Ok(handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{ErrorInfo, SharedBuffer};
    use crate::splat;
    use chrono::TimeZone;

    fn record() -> LogRecord {
        let mut record = LogRecord::new(
            "app",
            Level::Info,
            "Test {x}",
            splat! { x = 1, y = 2 },
        );
        record.created = Utc.with_ymd_and_hms(2022, 9, 4, 3, 4, 5).unwrap()
            + chrono::Duration::microseconds(123_456);
        record.file = "src/app.rs".to_string();
        record.line = 123;
        record
    }

    fn utc() -> JsonFormatterConfig {
        JsonFormatterConfig {
            tz: Timezone::Utc,
            ..JsonFormatterConfig::default()
        }
    }

    #[test]
    fn compact_keys_in_order() {
        let out = JsonFormatter::new(utc()).format(&record()).unwrap();
        assert_eq!(
            out,
            r#"{"t":"2022-09-04T03:04:05.123456Z","level":"INFO","name":"app","file":"src/app.rs","line":123,"msg":"Test 1","data":{"x":1,"y":2}}"#
        );
    }

    #[test]
    fn utc_offset_when_z_disabled() {
        let cfg = JsonFormatterConfig {
            use_z_for_utc: false,
            ..utc()
        };
        let t = JsonFormatter::new(cfg).format_timestamp(record().created);
        assert_eq!(t, "2022-09-04T03:04:05.123456+00:00");
    }

    #[test]
    fn pretty_indents_by_four_and_includes_error() {
        let mut rec = record();
        rec.data = Data::new();
        let rec = rec.with_error(ErrorInfo::new("RuntimeError", "Something went wrong"));
        let cfg = JsonFormatterConfig {
            encoder: EncoderStyle::Pretty,
            ..utc()
        };
        let out = JsonFormatter::new(cfg).format(&rec).unwrap();
        assert!(out.starts_with("{\n    \"t\": \"2022-09-04T03:04:05.123456Z\","));
        assert!(out.contains("\"error\": {\n        \"type\": \"RuntimeError\""));
        assert!(!out.contains("\"data\""));
    }

    #[test]
    fn config_requires_destination() {
        assert!(matches!(
            ExportConfig::default().build(),
            Err(Error::Cast { .. })
        ));
        let buffer = SharedBuffer::new();
        let cfg = ExportConfig {
            stream: Some(Stream::from(buffer.clone())),
            formatter: Some(utc()),
            ..ExportConfig::default()
        };
        cfg.build().unwrap().emit(&record()).unwrap();
        assert!(buffer.contents().ends_with("}\n"));
    }

    #[test]
    fn formatter_accepts_shorthand() {
        let cfg: JsonFormatterConfig = serde_json::from_str(r#""pretty""#).unwrap();
        assert_eq!(cfg.encoder, EncoderStyle::Pretty);
        assert!(cfg.use_z_for_utc);
    }
}
