//! 24-bit colors for console output.

use std::fmt;

/// A dedicated type prevents mixing up raw u8 triples and documents color intent at the type level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` (the `#` is optional).
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self { r, g, b })
    }

    /// Palette names usable in themes and inline markup, or a hex code.
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        if name.starts_with('#') {
            return Self::from_hex(name);
        }
        let color = match name.to_lowercase().as_str() {
            "white" => Self::white(),
            "grey" | "gray" => Self::grey(),
            "green" => Self::green(),
            "yellow" => Self::yellow(),
            "cyan" => Self::cyan(),
            "red" => Self::red(),
            "purple" | "magenta" => Self::purple(),
            "pink" => Self::pink(),
            "orange" => Self::orange(),
            "blue" => Self::blue(),
            "teal" => Self::teal(),
            _ => return None,
        };
        Some(color)
    }

    /// 24-bit foreground escape, `\x1b[38;2;R;G;Bm`.
    #[must_use]
    pub fn fg_ansi(self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }

    /// Terminates any active SGR styling so subsequent text returns to the terminal default.
    pub const RESET: &'static str = "\x1b[0m";

    #[must_use]
    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    #[must_use]
    pub const fn grey() -> Self {
        Self::new(150, 150, 150)
    }

    #[must_use]
    pub const fn green() -> Self {
        Self::new(80, 250, 123)
    }

    #[must_use]
    pub const fn yellow() -> Self {
        Self::new(241, 250, 140)
    }

    #[must_use]
    pub const fn cyan() -> Self {
        Self::new(139, 233, 253)
    }

    #[must_use]
    pub const fn red() -> Self {
        Self::new(255, 85, 85)
    }

    #[must_use]
    pub const fn purple() -> Self {
        Self::new(189, 147, 249)
    }

    #[must_use]
    pub const fn pink() -> Self {
        Self::new(255, 121, 198)
    }

    #[must_use]
    pub const fn orange() -> Self {
        Self::new(255, 184, 108)
    }

    #[must_use]
    pub const fn blue() -> Self {
        Self::new(98, 114, 164)
    }

    /// Type annotations in the data table.
    #[must_use]
    pub const fn teal() -> Self {
        Self::new(78, 201, 176)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_through_display() {
        let c = Color::from_hex("#4ec9b0").unwrap();
        assert_eq!(c, Color::teal());
        assert_eq!(c.to_string(), "#4ec9b0");
        assert!(Color::from_hex("#zzzzzz").is_none());
        assert!(Color::named("no-such-color").is_none());
    }
}
