//! Values accepted when setting a named handler, and the built-in casts that
//! turn them into `console` and `export` handlers.

use super::{
    ConsoleConfig, ConsoleHandler, ExportConfig, ExportHandler, HandlerRef, Stream,
};
use crate::Error;
use crate::fmt::Theme;
use crate::level::Level;
use serde_json::Value as Json;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// What a cast may be handed.
#[derive(Clone)]
pub enum HandlerValue {
    /// No handler: detaches whatever is installed.
    Off,
    /// The cast's default handler.
    On,
    Level(Level),
    Stream(Stream),
    Path(PathBuf),
    /// Used as-is.
    Handler(HandlerRef),
    Console(ConsoleConfig),
    Export(ExportConfig),
    /// Loosely typed input from config files.
    Json(Json),
}

impl HandlerValue {
    /// `Off`, JSON `null` and JSON `false` all mean "no handler".
    #[must_use]
    pub const fn is_off(&self) -> bool {
        matches!(self, Self::Off | Self::Json(Json::Null | Json::Bool(false)))
    }

    /// Short description for cast errors.
    #[must_use]
    pub fn kind(&self) -> String {
        match self {
            Self::Off => "off".to_string(),
            Self::On => "on".to_string(),
            Self::Level(level) => format!("level {level}"),
            Self::Stream(_) => "a stream".to_string(),
            Self::Path(path) => format!("path {}", path.display()),
            Self::Handler(_) => "a handler".to_string(),
            Self::Console(_) => "console settings".to_string(),
            Self::Export(_) => "export settings".to_string(),
            Self::Json(json) => format!("JSON {json}"),
        }
    }
}

impl fmt::Debug for HandlerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handler(_) => f.write_str("Handler(..)"),
            Self::Console(cfg) => f.debug_tuple("Console").field(cfg).finish(),
            Self::Export(cfg) => f.debug_tuple("Export").field(cfg).finish(),
            other => f.write_str(&other.kind()),
        }
    }
}

impl From<bool> for HandlerValue {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl From<Level> for HandlerValue {
    fn from(level: Level) -> Self {
        Self::Level(level)
    }
}

impl From<Stream> for HandlerValue {
    fn from(stream: Stream) -> Self {
        Self::Stream(stream)
    }
}

impl From<PathBuf> for HandlerValue {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for HandlerValue {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<HandlerRef> for HandlerValue {
    fn from(handler: HandlerRef) -> Self {
        Self::Handler(handler)
    }
}

impl From<ConsoleHandler> for HandlerValue {
    fn from(handler: ConsoleHandler) -> Self {
        Self::Handler(Arc::new(handler))
    }
}

impl From<ExportHandler> for HandlerValue {
    fn from(handler: ExportHandler) -> Self {
        Self::Handler(Arc::new(handler))
    }
}

impl From<ConsoleConfig> for HandlerValue {
    fn from(cfg: ConsoleConfig) -> Self {
        Self::Console(cfg)
    }
}

impl From<ExportConfig> for HandlerValue {
    fn from(cfg: ExportConfig) -> Self {
        Self::Export(cfg)
    }
}

impl From<Json> for HandlerValue {
    fn from(json: Json) -> Self {
        Self::Json(json)
    }
}

impl<T: Into<Self>> From<Option<T>> for HandlerValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Off, Into::into)
    }
}

/// Context-wide settings a cast may draw on.
#[derive(Debug, Clone, Copy)]
pub struct CastContext<'a> {
    /// Base theme for console handlers.
    pub theme: &'a Theme,
}

const CONSOLE_EXPECTED: &str = "bool, level, \"stdout\"/\"stderr\", stream, console settings or a handler";
const EXPORT_EXPECTED: &str = "path, stream, export settings with `filename` or `stream`, or a handler";

fn json_config<T: serde::de::DeserializeOwned>(
    json: Json,
    expected: &str,
) -> Result<T, Error> {
    let shown = json.to_string();
    serde_json::from_value(json).map_err(|e| Error::cast(expected, format!("{shown} ({e})")))
}

/// Built-in cast behind the `console` named handler.
///
/// # Errors
/// `Error::Cast` for values it can't make a console handler from; `Error::Validation`
/// for bad theme specs.
pub fn to_console_handler(
    value: HandlerValue,
    ctx: &CastContext<'_>,
) -> Result<Option<HandlerRef>, Error> {
    if value.is_off() {
        return Ok(None);
    }
    let themed = |handler: ConsoleHandler| handler.theme(ctx.theme.clone());

    let handler = match value {
        HandlerValue::On | HandlerValue::Json(Json::Bool(true)) => themed(ConsoleHandler::new()),
        HandlerValue::Level(level) => themed(ConsoleHandler::new()).level(level),
        HandlerValue::Stream(stream) => themed(ConsoleHandler::with_stream(stream)),
        HandlerValue::Console(cfg) => cfg.build(ctx.theme)?,
        HandlerValue::Handler(handler) => return Ok(Some(handler)),
        HandlerValue::Json(Json::String(s)) => {
            if let Some(stream) = Stream::from_name(&s) {
                themed(ConsoleHandler::with_stream(stream))
            } else if let Ok(level) = s.parse::<Level>() {
                themed(ConsoleHandler::new()).level(level)
            } else {
                return Err(Error::cast(CONSOLE_EXPECTED, format!("{s:?}")));
            }
        }
        HandlerValue::Json(Json::Number(n)) => {
            let level = n
                .as_u64()
                .and_then(Level::from_value)
                .ok_or_else(|| Error::cast(CONSOLE_EXPECTED, format!("number {n}")))?;
            themed(ConsoleHandler::new()).level(level)
        }
        HandlerValue::Json(json @ Json::Object(_)) => {
            json_config::<ConsoleConfig>(json, CONSOLE_EXPECTED)?.build(ctx.theme)?
        }
        other => return Err(Error::cast(CONSOLE_EXPECTED, other.kind())),
    };
    Ok(Some(Arc::new(handler)))
}

/// Built-in cast behind the `export` named handler.
///
/// # Errors
/// `Error::Cast` for values it can't make an export handler from; I/O errors
/// opening the file.
pub fn to_export_handler(
    value: HandlerValue,
    _ctx: &CastContext<'_>,
) -> Result<Option<HandlerRef>, Error> {
    if value.is_off() {
        return Ok(None);
    }

    let handler = match value {
        HandlerValue::Path(path) => ExportConfig::file(path).build()?,
        HandlerValue::Json(Json::String(path)) => ExportConfig::file(path).build()?,
        HandlerValue::Stream(stream) => ExportHandler::new(stream),
        HandlerValue::Export(cfg) => cfg.build()?,
        HandlerValue::Json(json @ Json::Object(_)) => {
            json_config::<ExportConfig>(json, EXPORT_EXPECTED)?.build()?
        }
        HandlerValue::Handler(handler) => return Ok(Some(handler)),
        other => return Err(Error::cast(EXPORT_EXPECTED, other.kind())),
    };
    Ok(Some(Arc::new(handler)))
}
