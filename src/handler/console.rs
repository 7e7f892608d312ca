//! Human-oriented console output.
//!
//! Each record is a small grid: an 8-wide label column and a content column.
//!
//! ```text
//! INFO     app.net
//! msg      Connecting to example.com
//! data     host        str         example.com
//!          port        int         8080
//! err      ConnectError: refused
//! ```

use super::{Handler, LogRecord, Stream};
use crate::Error;
use crate::fmt::{self, Highlight, Theme, style, table};
use crate::level::Level;
use crate::verbosity::{VerbosityLevels, VerbosityLevelsFilter};
use serde::Deserialize;
use std::collections::BTreeMap;

const LABEL_WIDTH: usize = 8;

/// Console handler: themed, optionally colored, writing whole records at once.
#[derive(Debug, Clone)]
pub struct ConsoleHandler {
    level: Level,
    stream: Stream,
    /// Off for pipes and files unless forced.
    colors: bool,
    theme: Theme,
    highlight: Highlight,
    verbosity_levels: Option<VerbosityLevelsFilter>,
}

impl Default for ConsoleHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleHandler {
    /// Writes to stderr, colored when stderr is a terminal.
    #[must_use]
    pub fn new() -> Self {
        Self::with_stream(Stream::Stderr)
    }

    /// Colors default to whether `stream` is a terminal.
    #[must_use]
    pub fn with_stream(stream: Stream) -> Self {
        Self {
            level: Level::NotSet,
            colors: stream.is_terminal(),
            stream,
            theme: Theme::default(),
            highlight: Highlight::default(),
            verbosity_levels: None,
        }
    }

    /// Drops records below `level`. `NotSet` accepts everything the logger
    /// lets through.
    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Forces ANSI colors on or off, overriding terminal detection.
    #[must_use]
    pub const fn colors(mut self, enabled: bool) -> Self {
        self.colors = enabled;
        self
    }

    /// Styles for labels, names and data columns. Only used with colors on.
    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Value highlighting for the data table.
    #[must_use]
    pub fn highlight(mut self, highlight: Highlight) -> Self {
        self.highlight = highlight;
        self
    }

    /// Per-logger verbosity tables checked before the handler's level.
    /// An empty filter is the same as none.
    #[must_use]
    pub fn verbosity_levels(mut self, filter: VerbosityLevelsFilter) -> Self {
        self.verbosity_levels = (!filter.is_empty()).then_some(filter);
        self
    }

    #[must_use]
    pub const fn stream(&self) -> &Stream {
        &self.stream
    }

    fn label(&self, text: &str) -> String {
        let padded = format!("{text:<LABEL_WIDTH$}");
        if self.colors {
            self.theme.get("log.label").paint(&padded)
        } else {
            padded
        }
    }

    fn markup(&self, text: &str) -> String {
        if self.colors {
            style::render(&style::parse(text), &self.theme)
        } else {
            style::strip_tags(text)
        }
    }

    /// Renders `record` as the lines it will occupy, newline-terminated.
    #[must_use]
    pub fn format(&self, record: &LogRecord) -> String {
        let blank = " ".repeat(LABEL_WIDTH);
        let mut lines: Vec<String> = Vec::new();

        let level = format!("{:<LABEL_WIDTH$}", record.level.as_str());
        if self.colors {
            lines.push(format!(
                "{} {}",
                self.theme.level(record.level).paint(&level),
                self.theme.get("log.name").paint(&record.name)
            ));
        } else {
            lines.push(format!("{level} {}", record.name));
        }

        let msg = self.markup(&record.message());
        for (i, line) in msg.lines().enumerate() {
            let head = if i == 0 { self.label("msg") } else { blank.clone() };
            lines.push(format!("{head} {line}").trim_end().to_string());
        }
        if msg.is_empty() {
            lines.push(self.label("msg").trim_end().to_string());
        }

        if !record.data.is_empty() {
            let rows = table::render(&record.data, &self.theme, &self.highlight, self.colors);
            for (i, row) in rows.into_iter().enumerate() {
                let head = if i == 0 { self.label("data") } else { blank.clone() };
                lines.push(format!("{head} {row}"));
            }
        }

        if let Some(error) = &record.error {
            lines.push(format!(
                "{} {}: {}",
                self.label("err"),
                error.type_name,
                error.msg
            ));
            for cause in &error.chain {
                lines.push(format!("{blank} caused by: {cause}"));
            }
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

impl Handler for ConsoleHandler {
    fn level(&self) -> Level {
        self.level
    }

    fn verbosity_levels(&self) -> Option<&VerbosityLevelsFilter> {
        self.verbosity_levels.as_ref()
    }

    fn emit(&self, record: &LogRecord) -> Result<(), Error> {
        self.stream.write_all(self.format(record).as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        self.stream.flush()?;
        Ok(())
    }
}

/// Console settings as they appear in config files and `Setup`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    pub stream: Option<Stream>,
    pub level: Option<Level>,
    pub colors: Option<bool>,
    /// Style overrides layered on the context theme.
    pub theme: BTreeMap<String, String>,
    pub highlight: Option<Highlight>,
    pub verbosity_levels: BTreeMap<String, VerbosityLevels>,
}

impl ConsoleConfig {
    /// Builds the handler on top of `base` theme.
    ///
    /// # Errors
    /// An unparseable style spec in `theme`.
    pub fn build(self, base: &Theme) -> Result<ConsoleHandler, Error> {
        let mut theme = base.clone();
        for (name, spec) in &self.theme {
            theme.set(name.as_str(), fmt::Style::parse(spec)?);
        }

        let mut handler = ConsoleHandler::with_stream(self.stream.unwrap_or_default())
            .theme(theme)
            .verbosity_levels(VerbosityLevelsFilter::from(self.verbosity_levels));
        if let Some(level) = self.level {
            handler = handler.level(level);
        }
        if let Some(colors) = self.colors {
            handler = handler.colors(colors);
        }
        if let Some(highlight) = self.highlight {
            handler = handler.highlight(highlight);
        }
        Ok(handler)
    }
}
