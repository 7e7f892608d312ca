//! Named styles for console output.
//!
//! A theme maps style names (`log.name`, `log.level.warning`, ...) to a
//! [`Style`]; unknown names render unstyled.

use super::Color;
use crate::Error;
use crate::level::Level;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Foreground color plus text attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub color: Option<Color>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Style {
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            color: None,
            bold: false,
            dim: false,
            italic: false,
            underline: false,
        }
    }

    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    #[must_use]
    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    #[must_use]
    pub const fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Parses a space-separated spec such as `"bold #4ec9b0"` or `"blue dim"`.
    ///
    /// # Errors
    /// `Error::Validation` on a word that is neither an attribute nor a color.
    pub fn parse(spec: &str) -> Result<Self, Error> {
        let mut style = Self::plain();
        for word in spec.split_whitespace() {
            style = match word.to_lowercase().as_str() {
                "bold" | "b" => style.bold(),
                "dim" => style.dim(),
                "italic" | "i" => style.italic(),
                "underline" | "u" => style.underline(),
                "none" | "plain" => style,
                other => style.color(Color::named(other).ok_or_else(|| {
                    Error::validation(format!("unknown style word '{word}' in '{spec}'"))
                })?),
            };
        }
        Ok(style)
    }

    /// True when rendering adds no escapes.
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        self.color.is_none() && !self.bold && !self.dim && !self.italic && !self.underline
    }

    /// SGR prefix for this style; empty when plain.
    #[must_use]
    pub fn ansi(&self) -> String {
        let mut out = String::new();
        if self.bold {
            out.push_str("\x1b[1m");
        }
        if self.dim {
            out.push_str("\x1b[2m");
        }
        if self.italic {
            out.push_str("\x1b[3m");
        }
        if self.underline {
            out.push_str("\x1b[4m");
        }
        if let Some(color) = self.color {
            out.push_str(&color.fg_ansi());
        }
        out
    }

    /// Wraps `text` in this style's escapes.
    #[must_use]
    pub fn paint(&self, text: &str) -> String {
        if self.is_plain() || text.is_empty() {
            return text.to_string();
        }
        let mut out = self.ansi();
        let _ = write!(out, "{text}{}", Color::RESET);
        out
    }
}

/// Style lookup by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    styles: BTreeMap<String, Style>,
}

impl Default for Theme {
    fn default() -> Self {
        let mut styles = BTreeMap::new();
        styles.insert("log.level".to_string(), Style::plain().bold());
        styles.insert(
            "log.level.debug".to_string(),
            Style::plain().bold().color(Color::purple()),
        );
        styles.insert(
            "log.level.info".to_string(),
            Style::plain().bold().color(Color::cyan()),
        );
        styles.insert(
            "log.level.warning".to_string(),
            Style::plain().bold().color(Color::yellow()),
        );
        styles.insert(
            "log.level.error".to_string(),
            Style::plain().bold().color(Color::red()),
        );
        styles.insert(
            "log.level.critical".to_string(),
            Style::plain().bold().underline().color(Color::red()),
        );
        styles.insert("log.name".to_string(), Style::plain().dim().color(Color::blue()));
        styles.insert("log.label".to_string(), Style::plain().dim().color(Color::white()));
        styles.insert(
            "log.data.name".to_string(),
            Style::plain().italic().color(Color::blue()),
        );
        styles.insert(
            "log.data.type".to_string(),
            Style::plain().italic().color(Color::teal()),
        );
        Self { styles }
    }
}

impl Theme {
    /// A theme with no styles at all.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            styles: BTreeMap::new(),
        }
    }

    /// Default theme with `overrides` layered on top.
    ///
    /// # Errors
    /// The first style spec that fails to parse.
    pub fn from_specs<'a>(
        overrides: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, Error> {
        let mut theme = Self::default();
        for (name, spec) in overrides {
            theme.set(name, Style::parse(spec)?);
        }
        Ok(theme)
    }

    /// Adds or replaces the style called `name`.
    pub fn set(&mut self, name: impl Into<String>, style: Style) {
        self.styles.insert(name.into(), style);
    }

    /// The style called `name`, plain when the theme has none.
    #[must_use]
    pub fn get(&self, name: &str) -> Style {
        self.styles.get(name).copied().unwrap_or_default()
    }

    /// `log.level.<name>` layered over the generic `log.level`.
    #[must_use]
    pub fn level(&self, level: Level) -> Style {
        let key = format!("log.level.{}", level.as_str().to_lowercase());
        self.styles
            .get(&key)
            .copied()
            .unwrap_or_else(|| self.get("log.level"))
    }
}
